use serde::Serialize;

/// What happened to a connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionOutcome {
    /// The managed server answered; the client may proceed
    Online,
    /// A start signal was accepted and readiness polling began
    Starting,
    /// A check or startup cycle was already running; the client joined it
    StartupInProgress,
    /// The control API refused the start signal
    StartFailed,
    /// A stop is in progress; the client should retry once it resolves
    ShuttingDown,
    /// The startup cycle was cancelled while the start signal was in flight
    Cancelled,
}

/// Result of an admin shutdown request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShutdownRequestOutcome {
    Scheduled { delay_secs: u64 },
    AlreadyPending,
}
