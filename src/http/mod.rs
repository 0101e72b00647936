//! HTTP host runtime.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace layer)
//!     → forward handler (/api, /api/, /api/*)
//!     → forward::Forwarder
//!     → ProxyResult written back to the client
//! ```

pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
