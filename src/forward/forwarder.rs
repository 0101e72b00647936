//! The forwarding pipeline: one inbound request in, one [`ProxyResult`] out.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method};

use crate::error::ForwardError;
use crate::forward::body::RequestBody;
use crate::forward::headers::ForwardedHeaders;
use crate::forward::response::ProxyResult;
use crate::forward::target::target_url;
use crate::forward::upstream::{OutboundRequest, Upstream};

/// Inbound request as handed over by the host runtime.
#[derive(Debug)]
pub struct InboundRequest {
    pub method: Method,
    /// Path with the mount prefix still attached; may include `?query`.
    pub path_and_query: String,
    pub headers: ForwardedHeaders,
    pub body: Body,
}

/// Forwards requests to a single backend origin.
#[derive(Clone)]
pub struct Forwarder {
    base_url: String,
    upstream: Arc<dyn Upstream>,
}

impl Forwarder {
    pub fn new(base_url: impl Into<String>, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            base_url: base_url.into(),
            upstream,
        }
    }

    /// Forward one request. Never fails: internal errors become a 500
    /// `{"error": ...}` result.
    pub async fn forward(&self, inbound: InboundRequest) -> ProxyResult {
        let method = inbound.method.clone();
        let path = inbound.path_and_query.clone();

        match self.try_forward(inbound).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(method = %method, path = %path, error = %e, "Proxy error");
                ProxyResult::failure(e.to_string())
            }
        }
    }

    async fn try_forward(&self, inbound: InboundRequest) -> Result<ProxyResult, ForwardError> {
        let request = self.prepare(inbound).await?;

        tracing::info!(
            method = %request.method,
            target = %request.url,
            body = request.body.kind(),
            "Forwarding request"
        );

        let response = self.upstream.send(request).await?;

        tracing::debug!(status = response.status.as_u16(), cookies = response.set_cookies.len(), "Upstream responded");

        Ok(ProxyResult::from_upstream(response))
    }

    /// Build the outbound request: target URL, projected headers and body.
    pub async fn prepare(&self, inbound: InboundRequest) -> Result<OutboundRequest, ForwardError> {
        let url = target_url(&self.base_url, &inbound.path_and_query);
        let mut headers = inbound.headers;

        let body = RequestBody::select(
            &inbound.method,
            headers.content_type_str(),
            inbound.body,
        )
        .await?;

        if let RequestBody::Json(_) = body {
            headers.content_type = Some(HeaderValue::from_static("application/json"));
        }

        Ok(OutboundRequest {
            method: inbound.method,
            url,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl InboundRequest {
    /// Split an axum request into the parts the forwarder reads.
    pub fn from_request(request: axum::http::Request<Body>) -> Self {
        let (parts, body) = request.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Self {
            method: parts.method,
            path_and_query,
            headers: ForwardedHeaders::project(&parts.headers),
            body,
        }
    }
}
