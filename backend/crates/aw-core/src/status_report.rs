use crate::{Countdown, LifecycleState};

use aw_proto::ReachabilityResult;

/// Everything the `status` admin command shows
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub state: LifecycleState,
    /// `host:port` of the managed server
    pub target: String,
    pub server_id: String,
    /// Plain TCP connect result
    pub tcp_check: bool,
    pub reachability: ReachabilityResult,
    /// Label reported by the control API; "offline" on failure
    pub control_status: String,
    pub countdown: Countdown,
}
