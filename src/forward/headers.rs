//! Inbound header projection.
//!
//! Only `content-type` and `cookie` ever cross to the backend. Everything
//! else on the inbound request (authorization, user-agent, accept, custom
//! headers) is dropped. Several inbound `cookie` headers are merged into one,
//! separated by `; `.

use axum::http::{header, HeaderMap, HeaderValue};

/// The headers sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders {
    pub content_type: Option<HeaderValue>,
    pub cookie: Option<HeaderValue>,
}

impl ForwardedHeaders {
    /// Pick the allowed headers out of an inbound header map.
    pub fn project(headers: &HeaderMap) -> Self {
        Self {
            content_type: headers.get(header::CONTENT_TYPE).cloned(),
            cookie: merged_cookie(headers),
        }
    }

    /// Content type as text, if present and visible ASCII.
    pub fn content_type_str(&self) -> Option<&str> {
        self.content_type.as_ref().and_then(|v| v.to_str().ok())
    }

    /// Render into a header map for the outbound call.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(content_type) = &self.content_type {
            map.insert(header::CONTENT_TYPE, content_type.clone());
        }
        if let Some(cookie) = &self.cookie {
            map.insert(header::COOKIE, cookie.clone());
        }
        map
    }
}

fn merged_cookie(headers: &HeaderMap) -> Option<HeaderValue> {
    let mut values = headers.get_all(header::COOKIE).iter();
    let first = values.next()?;

    let mut merged = first.as_bytes().to_vec();
    for value in values {
        merged.extend_from_slice(b"; ");
        merged.extend_from_slice(value.as_bytes());
    }
    HeaderValue::from_bytes(&merged).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_allowed_headers_survive() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        inbound.insert(header::COOKIE, HeaderValue::from_static("sid=abc"));
        inbound.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        inbound.insert(header::USER_AGENT, HeaderValue::from_static("curl/8"));
        inbound.insert("x-custom", HeaderValue::from_static("1"));

        let projected = ForwardedHeaders::project(&inbound);
        let map = projected.to_header_map();

        assert_eq!(map.len(), 2);
        assert_eq!(map[header::CONTENT_TYPE], "text/plain");
        assert_eq!(map[header::COOKIE], "sid=abc");
    }

    #[test]
    fn test_missing_headers_are_not_invented() {
        let projected = ForwardedHeaders::project(&HeaderMap::new());
        assert_eq!(projected, ForwardedHeaders::default());
        assert!(projected.to_header_map().is_empty());
        assert_eq!(projected.content_type_str(), None);
    }

    #[test]
    fn test_repeated_cookie_headers_are_merged() {
        let mut inbound = HeaderMap::new();
        inbound.append(header::COOKIE, HeaderValue::from_static("a=1"));
        inbound.append(header::COOKIE, HeaderValue::from_static("b=2"));

        let map = ForwardedHeaders::project(&inbound).to_header_map();

        assert_eq!(map.get_all(header::COOKIE).iter().count(), 1);
        assert_eq!(map[header::COOKIE], "a=1; b=2");
    }
}
