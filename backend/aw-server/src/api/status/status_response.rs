use crate::TimerResponse;

use aw_core::{LifecycleState, StatusReport};

use serde::Serialize;

/// Body of `GET /api/v1/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_attempts: Option<u32>,
    pub target: String,
    pub server_id: String,
    pub tcp_reachable: bool,
    pub protocol_online: bool,
    pub player_count: Option<u32>,
    pub control_status: String,
    pub auto_shutdown: TimerResponse,
}

impl From<StatusReport> for StatusResponse {
    fn from(report: StatusReport) -> Self {
        let startup_attempts = match &report.state {
            LifecycleState::StartupMonitoring {
                attempts_elapsed, ..
            } => Some(*attempts_elapsed),
            _ => None,
        };

        Self {
            state: report.state.name().to_string(),
            startup_attempts,
            target: report.target,
            server_id: report.server_id,
            tcp_reachable: report.tcp_check,
            protocol_online: report.reachability.protocol_online,
            player_count: report.reachability.player_count,
            control_status: report.control_status,
            auto_shutdown: report.countdown.into(),
        }
    }
}
