//! reqwest-backed upstream transport

use reqwest::{Client, redirect};

use crate::application::config::ProxyConfig;
use crate::domain::envelope::{ForwardedRequest, ForwardedResponse};
use crate::domain::transport::UpstreamTransport;
use crate::error::{ProxyError, ProxyResult};

/// Shared HTTP client for the upstream API
///
/// Redirects are not followed and bodies are not decompressed: a 3xx or a
/// gzip body goes back to the browser exactly as the upstream sent it.
#[derive(Clone)]
pub struct ReqwestUpstream {
    client: Client,
}

impl ReqwestUpstream {
    pub fn new(config: &ProxyConfig) -> ProxyResult<Self> {
        let mut builder = Client::builder().redirect(redirect::Policy::none());

        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl UpstreamTransport for ReqwestUpstream {
    async fn send(&self, url: &str, request: ForwardedRequest) -> ProxyResult<ForwardedResponse> {
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);

        // An empty body would still add `Content-Length: 0` to a GET
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ProxyError::UpstreamTimeout
            } else {
                ProxyError::UpstreamBody(e.to_string())
            }
        })?;

        Ok(ForwardedResponse {
            status,
            headers,
            body,
        })
    }
}
