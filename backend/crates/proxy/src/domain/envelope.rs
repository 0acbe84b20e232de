//! Forwarded request/response envelope
//!
//! Deliberately shallow: bodies stay opaque bytes and headers stay a raw
//! `HeaderMap`, so nothing is reinterpreted on the way through.

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};

/// A browser request, minus the mount prefix
#[derive(Debug, Clone)]
pub struct ForwardedRequest {
    pub method: Method,
    /// Path after the mount prefix, split on `/`, still percent-encoded
    pub segments: Vec<String>,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// The upstream's answer, relayed verbatim
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ForwardedRequest {
    pub fn new(method: Method, segments: Vec<String>) -> Self {
        Self {
            method,
            segments,
            query: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(str::to_string);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }
}

/// Split the request path into the segments below `mount_prefix`
///
/// `/api/foo/bar` under `/api` gives `["foo", "bar"]`, `/api/foo/` gives
/// `["foo", ""]` and `/api` gives `[]`. Returns `None` when the path is not
/// under the prefix (`/apix` is not under `/api`).
pub fn split_segments(path: &str, mount_prefix: &str) -> Option<Vec<String>> {
    let prefix = mount_prefix.trim_end_matches('/');
    let rest = path.strip_prefix(prefix)?;

    if rest.is_empty() {
        return Some(Vec::new());
    }

    let rest = rest.strip_prefix('/')?;
    Some(rest.split('/').map(str::to_string).collect())
}
