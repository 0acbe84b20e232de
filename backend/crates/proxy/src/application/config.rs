//! Application Configuration
//!
//! Configuration for the API Forwarding Proxy.

use std::time::Duration;

use crate::domain::upstream::UpstreamBase;
use crate::error::ProxyResult;

pub const DEFAULT_MOUNT_PREFIX: &str = "/api";

/// Proxy application configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Where forwarded requests go
    pub upstream: UpstreamBase,
    /// Local path prefix served by the proxy, no trailing slash
    pub mount_prefix: String,
    /// Append `X-Forwarded-For/Host/Proto` to forwarded requests
    pub forwarded_headers: bool,
    /// TCP connect timeout; `None` waits as long as the OS does
    pub connect_timeout: Option<Duration>,
}

impl ProxyConfig {
    pub fn new(upstream: UpstreamBase) -> Self {
        Self {
            upstream,
            mount_prefix: DEFAULT_MOUNT_PREFIX.to_string(),
            forwarded_headers: true,
            connect_timeout: None,
        }
    }

    /// Parse the upstream base and use defaults for everything else
    pub fn from_upstream_url(raw: &str) -> ProxyResult<Self> {
        Ok(Self::new(UpstreamBase::parse(raw)?))
    }

    pub fn with_mount_prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_end_matches('/');
        self.mount_prefix = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    pub fn with_forwarded_headers(mut self, enabled: bool) -> Self {
        self.forwarded_headers = enabled;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
