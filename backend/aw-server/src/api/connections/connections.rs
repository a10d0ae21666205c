//! Connection REST API handlers
//!
//! Turn client arrivals and departures into orchestrator events.

use crate::{ApiResult, AppState, ConnectionRequest, ConnectionResponse};

use aw_core::ClientId;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// POST /api/v1/connections
///
/// A client wants to reach the managed server. Blocks until the server is
/// known online, a start was requested, or the client joined a running cycle.
pub async fn create_connection(
    State(state): State<AppState>,
    Json(request): Json<ConnectionRequest>,
) -> ApiResult<Json<ConnectionResponse>> {
    let client = ClientId::parse(&request.client_id)?;
    let outcome = state
        .orchestrator
        .on_connection_attempt(client.clone())
        .await?;

    Ok(Json(ConnectionResponse {
        client_id: client.to_string(),
        outcome,
    }))
}

/// DELETE /api/v1/connections/{client_id}
///
/// The client stopped waiting
pub async fn delete_connection(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<StatusCode> {
    let client = ClientId::parse(&client_id)?;
    state.orchestrator.on_client_disconnected(client).await?;

    Ok(StatusCode::NO_CONTENT)
}
