use crate::{ApiResult, AppState, ReloadResponse};

use axum::{Json, extract::State};
use log::info;

/// POST /api/v1/reload
///
/// Re-read configuration from disk and environment and hand it to the
/// orchestrator. The running configuration is kept when the new one fails
/// validation.
pub async fn reload_config(State(state): State<AppState>) -> ApiResult<Json<ReloadResponse>> {
    info!("Configuration reload requested");

    let config = (state.config_loader)()?;
    let auto_shutdown_enabled = config.auto_shutdown_enabled;
    state.orchestrator.on_manual_reload_request(config).await?;

    Ok(Json(ReloadResponse {
        status: "reloaded".to_string(),
        auto_shutdown_enabled,
    }))
}
