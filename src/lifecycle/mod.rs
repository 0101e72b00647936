//! Lifecycle management.
//!
//! Shutdown fans out over a broadcast channel: `main` and tests trigger it,
//! the HTTP server stops accepting and drains in-flight requests.

pub mod shutdown;

pub use shutdown::Shutdown;
