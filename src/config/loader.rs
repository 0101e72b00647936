//! Configuration loading from disk, environment and command line.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ForwarderConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `upstream.base_url`.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Values that take precedence over the config file.
///
/// Blank values are ignored.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces `upstream.base_url`.
    pub base_url: Option<String>,
    /// Replaces `listener.bind_address`.
    pub bind_address: Option<String>,
}

impl Overrides {
    /// Overrides taken from the process environment (`API_BASE_URL`).
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV).ok(),
            bind_address: None,
        }
    }

    /// Write every set, non-blank value into `config`.
    pub fn apply(self, config: &mut ForwarderConfig) {
        if let Some(base_url) = non_blank(self.base_url) {
            tracing::debug!(base_url = %base_url, "Base URL overridden");
            config.upstream.base_url = base_url;
        }
        if let Some(bind_address) = non_blank(self.bind_address) {
            tracing::debug!(bind_address = %bind_address, "Bind address overridden");
            config.listener.bind_address = bind_address;
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Load configuration from an optional TOML file, apply overrides, then
/// validate the result.
///
/// Without a file, defaults are used and the base URL must come from an
/// override.
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<ForwarderConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ForwarderConfig::default(),
    };

    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML file without overrides or validation.
pub fn read_config_file(path: &Path) -> Result<ForwarderConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_override_replaces_base_url_and_bind() {
        let mut config = ForwarderConfig::default();
        config.upstream.base_url = "http://from-file:1".to_string();

        Overrides {
            base_url: Some("http://from-env:2".to_string()),
            bind_address: Some("127.0.0.1:4000".to_string()),
        }
        .apply(&mut config);
        assert_eq!(config.upstream.base_url, "http://from-env:2");
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let mut config = ForwarderConfig::default();
        config.upstream.base_url = "http://from-file:1".to_string();

        Overrides {
            base_url: Some("  ".to_string()),
            bind_address: Some(String::new()),
        }
        .apply(&mut config);
        Overrides::default().apply(&mut config);
        assert_eq!(config.upstream.base_url, "http://from-file:1");
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_bind_override_is_validated() {
        let overrides = Overrides {
            base_url: Some("http://backend:8000".to_string()),
            bind_address: Some("not-an-address".to_string()),
        };

        match load_config(None, overrides) {
            Err(ConfigError::Validation(errors)) => assert_eq!(
                errors,
                vec![ValidationError::InvalidBindAddress {
                    address: "not-an-address".to_string()
                }]
            ),
            other => panic!("expected bind validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_without_file_or_override_base_url_is_required() {
        match load_config(None, Overrides::default()) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.contains(&ValidationError::MissingBaseUrl))
            }
            other => panic!("expected missing base URL, got {other:?}"),
        }
    }

    #[test]
    fn test_read_config_file_reports_syntax_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forwarder.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[upstream\nbase_url = 1").unwrap();

        assert!(matches!(read_config_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_validation_error_display_lists_everything() {
        let err = ConfigError::Validation(vec![
            ValidationError::MissingBaseUrl,
            ValidationError::ZeroBodyLimit,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: upstream.base_url is required, limits.max_body_size must be greater than zero"
        );
    }
}
