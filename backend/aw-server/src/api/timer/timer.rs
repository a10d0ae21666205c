use crate::{AppState, TimerResponse};

use axum::{Json, extract::State};

/// GET /api/v1/timer
pub async fn get_timer(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(state.orchestrator.countdown().await.into())
}
