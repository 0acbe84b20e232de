//! API Forwarding Proxy
//!
//! Same-origin tunnel from a local path prefix (`/api` by default) to the
//! separately hosted upstream API, so browser code never makes
//! cross-origin credentialed requests.
//!
//! Clean Architecture structure:
//! - `domain/` - forwarded envelope, upstream URL building, header rules, transport trait
//! - `application/` - proxy configuration and the forward use case
//! - `infra/` - reqwest-backed transport
//! - `presentation/` - catch-all handler and router
//!
//! ## Contract
//! - Method, path, query, headers and body reach the upstream unchanged
//!   (hop-by-hop headers excepted)
//! - Status, headers and body come back unchanged, whatever the status
//!   or content type
//! - Only failure to reach the upstream is an error (502)
//! - Session state is never checked here; the upstream API owns auth

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ProxyConfig;
pub use domain::transport::UpstreamTransport;
pub use domain::upstream::UpstreamBase;
pub use error::{ProxyError, ProxyResult};
pub use infra::client::ReqwestUpstream;
pub use presentation::router::{proxy_router, proxy_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::envelope::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

#[cfg(test)]
mod tests;
