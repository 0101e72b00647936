//! Observability subsystem.
//!
//! Structured logging through `tracing`. Every forwarded request runs inside
//! a `forward` span carrying its request ID.

pub mod logging;
