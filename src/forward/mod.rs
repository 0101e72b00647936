//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest (method, path+query, content-type, cookie, body)
//!     → target.rs   (strip mount prefix, reattach query)
//!     → headers.rs  (content-type + cookie only)
//!     → body.rs     (empty | json | stream)
//!     → upstream.rs (one backend call, full response read)
//!     → response.rs (status, content-type, set-cookie list, body envelope)
//!     → ProxyResult
//! ```
//!
//! # Design Decisions
//! - Exactly one backend call per inbound request; no retries
//! - All failures are folded into a 500 `{"error": ...}` result
//! - The backend client is injected, never global

pub mod body;
pub mod forwarder;
pub mod headers;
pub mod response;
pub mod target;
pub mod upstream;

pub use body::RequestBody;
pub use forwarder::{Forwarder, InboundRequest};
pub use headers::ForwardedHeaders;
pub use response::{ProxyResult, ResultBody, UpstreamResponse};
pub use target::{target_url, MOUNT_PREFIX};
pub use upstream::{OutboundRequest, ReqwestUpstream, Upstream};
