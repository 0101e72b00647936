//! Backend response mapping.
//!
//! # Design Decisions
//! - `set-cookie` values are kept as a list, never joined into one header
//! - Backend content-type is carried over only when the backend sent one
//! - Empty or unparsable JSON bodies collapse into fixed envelopes

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

/// What the upstream client hands back after reading the full response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub set_cookies: Vec<HeaderValue>,
    pub body: String,
}

/// Body of a [`ProxyResult`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResultBody {
    Json(Value),
    Text(String),
}

/// Outcome of forwarding one request, ready to be written to the caller.
#[derive(Debug, Clone)]
pub struct ProxyResult {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub set_cookies: Vec<HeaderValue>,
    pub body: ResultBody,
}

impl ProxyResult {
    /// Map a backend response.
    pub fn from_upstream(response: UpstreamResponse) -> Self {
        let body = map_body(response.content_type.as_ref(), response.body);
        Self {
            status: response.status,
            content_type: response.content_type,
            set_cookies: response.set_cookies,
            body,
        }
    }

    /// The 500 `{"error": message}` result used for every internal failure.
    pub fn failure(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            content_type: None,
            set_cookies: Vec::new(),
            body: ResultBody::Json(json!({ "error": message })),
        }
    }
}

fn map_body(content_type: Option<&HeaderValue>, text: String) -> ResultBody {
    if text.is_empty() {
        return ResultBody::Json(json!({ "success": true }));
    }

    let is_json = content_type
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if !is_json {
        return ResultBody::Text(text);
    }

    match serde_json::from_str(&text) {
        Ok(value) => ResultBody::Json(value),
        Err(_) => ResultBody::Json(json!({ "success": true, "data": text })),
    }
}

impl IntoResponse for ProxyResult {
    fn into_response(self) -> Response {
        let (default_type, payload) = match self.body {
            ResultBody::Json(value) => (Some("application/json"), value.to_string()),
            ResultBody::Text(text) => (None, text),
        };

        let mut response = Response::new(Body::from(payload));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        match (self.content_type, default_type) {
            (Some(content_type), _) => {
                headers.insert(header::CONTENT_TYPE, content_type);
            }
            (None, Some(default_type)) => {
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(default_type));
            }
            (None, None) => {}
        }
        for cookie in self.set_cookies {
            headers.append(header::SET_COOKIE, cookie);
        }

        response
    }
}
