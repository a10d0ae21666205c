use crate::{ApiResult, AppState, StatusResponse};

use axum::{Json, extract::State};

/// GET /api/v1/status
///
/// Lifecycle state plus a live TCP check, status probe and control API
/// status, all gathered concurrently. 503 once draining.
pub async fn get_status(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    let report = state.orchestrator.status_report().await?;
    Ok(Json(report.into()))
}
