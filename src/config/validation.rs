//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. All problems are reported at
//! once rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ForwarderConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.base_url is required")]
    MissingBaseUrl,

    #[error("upstream.base_url {url:?} is not an absolute http(s) URL")]
    InvalidBaseUrl { url: String },

    #[error("listener.bind_address {address:?} is not a socket address")]
    InvalidBindAddress { address: String },

    #[error("limits.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("upstream.timeout_secs must be greater than zero when set")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ForwarderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let base_url = config.upstream.base_url.trim();
    if base_url.is_empty() {
        errors.push(ValidationError::MissingBaseUrl);
    } else if !is_http_url(base_url) {
        errors.push(ValidationError::InvalidBaseUrl {
            url: config.upstream.base_url.clone(),
        });
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            address: config.listener.bind_address.clone(),
        });
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
