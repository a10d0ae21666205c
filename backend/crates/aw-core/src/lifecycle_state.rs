use crate::ClientId;

use tokio::time::Instant;

/// Snapshot of the orchestrator's lifecycle.
///
/// Derived from the internal record on every query; mutating a snapshot
/// has no effect on the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    /// Start signal issued, awaiting the control API's answer
    StartRequested,
    /// Polling for readiness after an accepted start signal
    StartupMonitoring {
        attempts_elapsed: u32,
        /// Client that triggered the cycle
        client: ClientId,
    },
    /// Polling gave up; behaves as `Idle` on the next event
    StartupTimedOut,
    /// Reachable with zero players since `empty_since`
    EmptyTimerRunning { empty_since: Instant },
    /// Stop signal issued, awaiting the control API's answer
    ShutdownRequested,
    /// Torn down; terminal
    Draining,
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::StartRequested => "start_requested",
            Self::StartupMonitoring { .. } => "startup_monitoring",
            Self::StartupTimedOut => "startup_timed_out",
            Self::EmptyTimerRunning { .. } => "empty_timer_running",
            Self::ShutdownRequested => "shutdown_requested",
            Self::Draining => "draining",
        }
    }

    pub fn is_draining(&self) -> bool {
        matches!(self, Self::Draining)
    }
}
