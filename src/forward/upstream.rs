//! Outbound HTTP client.
//!
//! The forwarder talks to the backend through the [`Upstream`] trait so the
//! core can be exercised with an in-memory fake. [`ReqwestUpstream`] is the
//! production implementation.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{header, Method};

use crate::error::ForwardError;
use crate::forward::body::RequestBody;
use crate::forward::headers::ForwardedHeaders;
use crate::forward::response::UpstreamResponse;

/// A fully prepared backend request.
#[derive(Debug)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: ForwardedHeaders,
    pub body: RequestBody,
}

/// Executes exactly one backend call per request and reads the whole response.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, ForwardError>;
}

/// [`Upstream`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    client: reqwest::Client,
}

impl ReqwestUpstream {
    /// Build a client, with an overall per-request timeout if one is given.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ForwardError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Upstream for ReqwestUpstream {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, ForwardError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers.to_header_map());

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_string(&value)?),
            RequestBody::Stream(body) => {
                builder.body(reqwest::Body::wrap_stream(body.into_data_stream()))
            }
        };

        let response = builder.send().await?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .cloned()
            .collect();
        let body = response.text().await?;

        Ok(UpstreamResponse {
            status,
            content_type,
            set_cookies,
            body,
        })
    }
}
