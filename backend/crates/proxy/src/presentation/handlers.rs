//! HTTP Handlers

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::response::Response;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::config::ProxyConfig;
use crate::application::forward::ForwardRequestUseCase;
use crate::domain::envelope::{ForwardedRequest, split_segments};
use crate::domain::transport::UpstreamTransport;
use crate::error::{ProxyError, ProxyResult};

/// Shared state for the proxy handler
pub struct ProxyAppState<T>
where
    T: UpstreamTransport + Send + Sync + 'static,
{
    pub transport: Arc<T>,
    pub config: Arc<ProxyConfig>,
}

impl<T> Clone for ProxyAppState<T>
where
    T: UpstreamTransport + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            config: self.config.clone(),
        }
    }
}

/// ANY {mount_prefix}/{*rest}
///
/// Single handler for every method.
pub async fn forward<T>(
    State(state): State<ProxyAppState<T>>,
    req: Request<Body>,
) -> ProxyResult<Response>
where
    T: UpstreamTransport + Send + Sync + 'static,
{
    let peer_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let (parts, body) = req.into_parts();

    let segments = split_segments(parts.uri.path(), &state.config.mount_prefix).ok_or_else(|| {
        ProxyError::Internal(format!(
            "{} is outside mount prefix {}",
            parts.uri.path(),
            state.config.mount_prefix
        ))
    })?;

    // No size limit: the upstream decides what it accepts
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| ProxyError::RequestBody(e.to_string()))?;

    let request = ForwardedRequest::new(parts.method, segments)
        .with_query(parts.uri.query())
        .with_headers(parts.headers)
        .with_body(body);

    let use_case = ForwardRequestUseCase::new(state.transport.clone(), state.config.clone());
    let forwarded = use_case.execute(request, peer_ip).await?;

    let mut response = Response::new(Body::from(forwarded.body));
    *response.status_mut() = forwarded.status;
    *response.headers_mut() = forwarded.headers;

    Ok(response)
}
