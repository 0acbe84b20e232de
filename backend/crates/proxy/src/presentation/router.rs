//! Proxy Router

use axum::{Router, routing::any};
use std::sync::Arc;

use crate::application::config::ProxyConfig;
use crate::domain::transport::UpstreamTransport;
use crate::error::ProxyResult;
use crate::infra::client::ReqwestUpstream;
use crate::presentation::handlers::{self, ProxyAppState};

/// Create the proxy router with the reqwest transport
pub fn proxy_router(config: ProxyConfig) -> ProxyResult<Router> {
    let transport = ReqwestUpstream::new(&config)?;
    Ok(proxy_router_generic(transport, config))
}

/// Create a proxy router for any transport implementation
///
/// Routes are registered at the absolute mount prefix (not nested) so the
/// handler sees the raw, still percent-encoded request path.
pub fn proxy_router_generic<T>(transport: T, config: ProxyConfig) -> Router
where
    T: UpstreamTransport + Send + Sync + 'static,
{
    let prefix = config.mount_prefix.clone();
    let state = ProxyAppState {
        transport: Arc::new(transport),
        config: Arc::new(config),
    };

    let (exact, slash, wildcard) = if prefix == "/" {
        ("/".to_string(), None, "/{*rest}".to_string())
    } else {
        (
            prefix.clone(),
            Some(format!("{}/", prefix)),
            format!("{}/{{*rest}}", prefix),
        )
    };

    let mut router = Router::new()
        .route(&exact, any(handlers::forward::<T>))
        .route(&wildcard, any(handlers::forward::<T>));

    if let Some(slash) = slash {
        router = router.route(&slash, any(handlers::forward::<T>));
    }

    router.with_state(state)
}
