use aw_core::Countdown;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TimerResponse {
    pub enabled: bool,
    pub active: bool,
    pub seconds_remaining: Option<u64>,
}

impl From<Countdown> for TimerResponse {
    fn from(countdown: Countdown) -> Self {
        Self {
            enabled: countdown.enabled,
            active: countdown.is_active(),
            seconds_remaining: countdown.seconds_remaining,
        }
    }
}
