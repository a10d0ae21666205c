use crate::error::Result as ServerErrorResult;

use aw_core::{Orchestrator, PowerConfig, ShutdownCoordinator};

use std::sync::Arc;

/// Produces a fresh, validated configuration for `POST /api/v1/reload`
pub type ConfigLoader = Arc<dyn Fn() -> ServerErrorResult<PowerConfig> + Send + Sync>;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub shutdown: ShutdownCoordinator,
    pub config_loader: ConfigLoader,
}
