//! Target URL composition.
//!
//! The backend URL is plain string concatenation: the mount prefix is cut
//! off, the remainder is split at the first `?`, and the query is glued back
//! on unchanged. Nothing is escaped, decoded or normalized here.

/// Path segment the forwarder is mounted under.
pub const MOUNT_PREFIX: &str = "/api";

/// Build the backend URL for an inbound path (which may still carry its query).
pub fn target_url(base: &str, path_and_query: &str) -> String {
    let rest = path_and_query
        .strip_prefix(MOUNT_PREFIX)
        .unwrap_or(path_and_query);

    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    };

    if query.is_empty() {
        format!("{base}{path}")
    } else {
        format!("{base}{path}?{query}")
    }
}
