//! Presentation Layer
//!
//! Catch-all handler and router.

pub mod handlers;
pub mod router;

pub use handlers::ProxyAppState;
pub use router::{proxy_router, proxy_router_generic};
