//! Presentation Layer
//!
//! axum middleware applying the gate decision.

pub mod middleware;

pub use middleware::{GateState, session_gate};
