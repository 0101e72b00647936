//! Request body selection.
//!
//! The body mode is decided once, from the method and the inbound
//! content-type, and the result is consumed exhaustively by the upstream
//! client.

use axum::body::Body;
use axum::http::Method;
use serde_json::{Map, Value};

use crate::error::ForwardError;

/// Body to attach to the outbound request.
#[derive(Debug)]
pub enum RequestBody {
    /// No body is sent.
    Empty,
    /// Buffered body, re-encoded as JSON text on the way out.
    Json(Value),
    /// Live inbound body, forwarded without buffering.
    Stream(Body),
}

impl RequestBody {
    /// Choose and prepare the outbound body.
    ///
    /// Only POST, PUT, PATCH and DELETE carry a body; for any other method the
    /// inbound body is never read. Multipart uploads stream through untouched.
    /// Everything else is buffered in full and decoded. Size limits belong to
    /// the host server, not to this step.
    pub async fn select(
        method: &Method,
        content_type: Option<&str>,
        body: Body,
    ) -> Result<Self, ForwardError> {
        if !carries_body(method) {
            return Ok(Self::Empty);
        }

        if content_type.is_some_and(|ct| ct.contains("multipart/form-data")) {
            return Ok(Self::Stream(body));
        }

        let bytes = axum::body::to_bytes(body, usize::MAX).await?;
        Ok(match decode(content_type, &bytes) {
            Some(value) => Self::Json(value),
            None => Self::Empty,
        })
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Stream(_) => "stream",
        }
    }
}

/// Whether requests with this method get a body forwarded.
pub fn carries_body(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Decode a buffered payload into a structured value.
///
/// Form-encoded payloads become an object, anything else is parsed as JSON
/// and falls back to a JSON string of the raw text. An empty payload, or a
/// value that is JSON-falsy (`null`, `false`, `0`, `""`), yields `None`.
pub fn decode(content_type: Option<&str>, bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }

    let value = if content_type.is_some_and(is_form_urlencoded) {
        decode_form(bytes)
    } else {
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
    };

    (!is_falsy(&value)).then_some(value)
}

fn is_form_urlencoded(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
}

// Repeated keys collect into an array, in order of appearance.
fn decode_form(bytes: &[u8]) -> Value {
    let mut fields = Map::new();
    for (key, value) in url::form_urlencoded::parse(bytes) {
        let value = Value::String(value.into_owned());
        match fields.get_mut(&*key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(key.into_owned(), value);
            }
        }
    }
    Value::Object(fields)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
