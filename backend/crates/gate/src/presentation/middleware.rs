//! Session Gate Middleware
//!
//! Install with `axum::middleware::from_fn_with_state(state, session_gate)`.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::config::GateConfig;
use crate::application::evaluate::EvaluateGateUseCase;

/// Middleware state
#[derive(Clone)]
pub struct GateState {
    pub config: Arc<GateConfig>,
}

impl GateState {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Redirect or pass the request through unchanged
pub async fn session_gate(
    State(state): State<GateState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let use_case = EvaluateGateUseCase::new(state.config.clone());
    let outcome = use_case.evaluate(req.uri().path(), req.uri().query(), req.headers());

    match outcome.location {
        None => {
            tracing::debug!(
                path = %req.uri().path(),
                class = %outcome.class,
                "Session gate pass"
            );
            next.run(req).await
        }
        Some(location) => {
            tracing::info!(
                path = %req.uri().path(),
                decision = %outcome.decision,
                location = %location,
                "Session gate redirect"
            );
            Redirect::temporary(&location).into_response()
        }
    }
}
