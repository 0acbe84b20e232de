//! Forward Request Use Case

use std::net::IpAddr;
use std::sync::Arc;

use crate::application::config::ProxyConfig;
use crate::domain::envelope::{ForwardedRequest, ForwardedResponse};
use crate::domain::headers::{prepare_request_headers, prepare_response_headers};
use crate::domain::transport::UpstreamTransport;
use crate::error::ProxyResult;

/// Forward Request Use Case
///
/// One routine for every method; the method is just a field of the
/// envelope.
pub struct ForwardRequestUseCase<T>
where
    T: UpstreamTransport,
{
    transport: Arc<T>,
    config: Arc<ProxyConfig>,
}

impl<T> ForwardRequestUseCase<T>
where
    T: UpstreamTransport,
{
    pub fn new(transport: Arc<T>, config: Arc<ProxyConfig>) -> Self {
        Self { transport, config }
    }

    /// Absolute upstream URL for `request`
    pub fn upstream_url(&self, request: &ForwardedRequest) -> String {
        self.config
            .upstream
            .join(&request.segments, request.query.as_deref())
    }

    pub async fn execute(
        &self,
        mut request: ForwardedRequest,
        peer_ip: Option<IpAddr>,
    ) -> ProxyResult<ForwardedResponse> {
        let url = self.upstream_url(&request);
        let client_ip = platform::client::extract_client_ip(&request.headers, peer_ip);

        if self.config.forwarded_headers {
            // Reads Host, so it has to run before the headers are prepared
            platform::client::append_forwarded_headers(&mut request.headers, peer_ip);
        }
        prepare_request_headers(&mut request.headers);

        tracing::debug!(
            method = %request.method,
            url = %url,
            client_ip = ?client_ip,
            "Forwarding to upstream"
        );

        let mut response = self.transport.send(&url, request).await?;
        prepare_response_headers(&mut response.headers);

        tracing::debug!(status = response.status.as_u16(), url = %url, "Upstream responded");

        Ok(response)
    }
}
