//! Router composition
//!
//! ```text
//! CORS -> Trace -> Session Gate -> /health | {mount_prefix}/* | pages
//! ```
//!
//! The gate wraps everything; `/health` and the API mount are public in
//! every profile, so in practice it only acts on page routes.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
};
use gate::{GateState, session_gate};
use kernel::AppError;
use proxy::{ProxyResult, ReqwestUpstream, UpstreamTransport, proxy_router_generic};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::health::health_router;

/// Build the gateway with the reqwest transport
pub fn build_router(config: &GatewayConfig) -> ProxyResult<Router> {
    let transport = ReqwestUpstream::new(&config.proxy)?;
    Ok(compose(config, transport))
}

/// Build the gateway for any transport; the page renderer, when
/// configured, shares it with the API proxy
pub fn compose<T>(config: &GatewayConfig, transport: T) -> Router
where
    T: UpstreamTransport + Clone + Send + Sync + 'static,
{
    let router = Router::new()
        .merge(health_router())
        .merge(proxy_router_generic(transport.clone(), config.proxy.clone()));

    let router = match &config.pages {
        Some(pages) => router.fallback_service(proxy_router_generic(transport, pages.clone())),
        None => router.fallback(page_not_found),
    };

    router
        .layer(from_fn_with_state(
            GateState::new(config.gate.clone()),
            session_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins))
}

async fn page_not_found() -> AppError {
    AppError::not_found("No page renderer is configured for this path")
        .with_action("Set PAGE_UPSTREAM_URL to serve pages through the gateway")
}

fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
