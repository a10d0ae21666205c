use std::time::Duration;

use serde::Serialize;

/// Progress of the auto-shutdown countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub enabled: bool,
    /// Set while the server is confirmed empty
    pub seconds_remaining: Option<u64>,
}

impl Countdown {
    pub fn is_active(&self) -> bool {
        self.seconds_remaining.is_some()
    }
}

/// Whole seconds, rounded up so a running countdown never reads 0 early.
pub(crate) fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}
