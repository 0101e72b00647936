//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Backend the `/api` tree is forwarded to.
    pub upstream: UpstreamConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Backend origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute backend base URL, optionally with a path prefix
    /// (e.g., "http://127.0.0.1:8000/v1").
    pub base_url: String,

    /// Total time allowed for one backend call. Unset means no limit.
    pub timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Limits applied to buffered request bodies.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum size in bytes of a body that is buffered before forwarding.
    /// Streamed multipart uploads are not subject to it.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
