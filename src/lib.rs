//! API forwarder library.
//!
//! Forwards everything under `/api` to a single backend origin and relays
//! the response (status, content-type, cookies, body) back to the caller.

pub mod config;
pub mod error;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ForwarderConfig;
pub use error::ForwardError;
pub use forward::{Forwarder, ProxyResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
