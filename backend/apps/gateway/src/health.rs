//! Liveness endpoint for process supervisors

use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub status: &'static str,
    /// Unix epoch millis
    pub timestamp: i64,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        status: "success",
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

pub fn health_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_payload() {
        let before = chrono::Utc::now().timestamp_millis();
        let Json(body) = health().await;

        assert!(body.ok);
        assert_eq!(body.status, "success");
        assert!(body.timestamp >= before);
    }

    #[tokio::test]
    async fn test_health_routes() {
        for path in ["/health", "/healthz"] {
            let response = health_router()
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["ok"], true);
            assert_eq!(body["status"], "success");
            assert!(body["timestamp"].is_i64());
        }
    }
}
