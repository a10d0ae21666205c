use crate::{
    AppState, create_connection, delete_connection, get_status, get_timer, health,
    reload_config, request_shutdown,
};

use axum::{
    Router,
    routing::{delete, get, post},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Client events
        .route("/api/v1/connections", post(create_connection))
        .route("/api/v1/connections/{client_id}", delete(delete_connection))
        // Queries
        .route("/api/v1/status", get(get_status))
        .route("/api/v1/timer", get(get_timer))
        // Admin commands
        .route("/api/v1/shutdown", post(request_shutdown))
        .route("/api/v1/reload", post(reload_config))
        .with_state(state)
}
