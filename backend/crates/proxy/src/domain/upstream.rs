//! Upstream base URL

use std::fmt;
use url::Url;

use crate::error::{ProxyError, ProxyResult};

/// Absolute `http`/`https` base of the upstream API, e.g.
/// `https://api.example.com/v1`
///
/// Stored without a trailing slash so joining never doubles one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBase(String);

impl UpstreamBase {
    pub fn parse(raw: &str) -> ProxyResult<Self> {
        let raw = raw.trim();
        let url = Url::parse(raw)?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ProxyError::InvalidUpstream(format!(
                    "unsupported scheme `{}`",
                    other
                )));
            }
        }
        if url.host_str().is_none() {
            return Err(ProxyError::InvalidUpstream("missing host".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ProxyError::InvalidUpstream(
                "base URL must not carry a query or fragment".to_string(),
            ));
        }

        // Keep the caller's spelling of the path rather than `Url`'s normalized one
        Ok(Self(raw.trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<base>/<segments joined by '/'>[?query]`
    ///
    /// No segments yields the bare base; a trailing empty segment keeps the
    /// trailing slash of the original request.
    pub fn join(&self, segments: &[String], query: Option<&str>) -> String {
        let mut url = self.0.clone();

        if !segments.is_empty() {
            url.push('/');
            url.push_str(&segments.join("/"));
        }

        if let Some(query) = query {
            if !query.is_empty() {
                url.push('?');
                url.push_str(query);
            }
        }

        url
    }
}

impl fmt::Display for UpstreamBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
