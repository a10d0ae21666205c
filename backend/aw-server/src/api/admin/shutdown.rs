use crate::ApiResult;
use crate::AppState;

use aw_core::ShutdownRequestOutcome;

use axum::{Json, extract::State, http::StatusCode};

/// POST /api/v1/shutdown
///
/// Stop the managed server after the manual grace period. 202 when a stop
/// was scheduled, 200 when one is already pending.
pub async fn request_shutdown(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<ShutdownRequestOutcome>)> {
    let outcome = state.orchestrator.on_manual_shutdown_request().await?;

    let status = match outcome {
        ShutdownRequestOutcome::Scheduled { .. } => StatusCode::ACCEPTED,
        ShutdownRequestOutcome::AlreadyPending => StatusCode::OK,
    };

    Ok((status, Json(outcome)))
}
