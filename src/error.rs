//! Error definitions for the forwarding path.

use thiserror::Error;

/// Errors that can occur while forwarding a single request.
///
/// None of these escape [`Forwarder::forward`](crate::forward::Forwarder::forward);
/// they are folded into a 500 `{"error": ...}` result.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The inbound body could not be read or exceeded the buffer limit.
    #[error("failed to read request body: {0}")]
    ReadBody(#[from] axum::Error),

    /// The buffered body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend call failed (connect, send or response read).
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
}
