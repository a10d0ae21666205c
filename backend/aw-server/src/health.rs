use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Service health with the orchestrator's current state
pub async fn health(State(state): State<AppState>) -> Response {
    let lifecycle = state.orchestrator.state().await;
    let draining = lifecycle.is_draining() || state.shutdown.is_shutdown();

    let health = json!({
        "status": if draining { "draining" } else { "healthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "orchestrator": lifecycle.name(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe; not ready once shutdown has begun
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutdown() || state.orchestrator.state().await.is_draining() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Draining").into_response();
    }

    (StatusCode::OK, "Ready").into_response()
}
