//! Session Gate
//!
//! Request-time checkpoint in front of the page routes of a frontend.
//!
//! Clean Architecture structure:
//! - `domain/` - route patterns, accepted session cookies, decision table
//! - `application/` - gate configuration and the evaluate use case
//! - `presentation/` - axum middleware
//!
//! ## Security Model
//! The gate only checks that one of the accepted session cookies is
//! *present*. It does not verify signatures or expiry; every data call goes
//! through the API proxy and the upstream API rejects stale tokens there.
//! A forged cookie therefore gets a page shell but no data.
//! This is a known gap, flagged for security review.
//!
//! Routes are matched on the canonical path (percent-decoded, repeated
//! slashes collapsed, dot segments resolved), so `//admin` and `/%61dmin`
//! are gated like `/admin`.

pub mod application;
pub mod domain;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{FrontendProfile, GateConfig, UnknownProfile};
pub use application::evaluate::{EvaluateGateUseCase, GateOutcome};
pub use domain::credentials::SessionCookieSet;
pub use domain::decision::GateDecision;
pub use domain::route::{RouteClass, RoutePattern, canonical_path};
pub use presentation::middleware::{GateState, session_gate};
