//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, API_BASE_URL / --bind overrides)
//!     → validation.rs (semantic checks)
//!     → ForwarderConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults except the backend base URL
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config_file, ConfigError, Overrides};
pub use schema::{ForwarderConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig};
pub use validation::ValidationError;
