use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MAX_INITIAL_DELAY_SECS: u64 = 300;
pub const DEFAULT_INITIAL_DELAY_SECS: u64 = 5;

pub const MIN_POLL_INTERVAL_SECS: u64 = 1;
pub const MAX_POLL_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 1000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 24;

/// Readiness polling after a start signal was accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Delay before the first readiness probe
    pub initial_delay_secs: u64,
    /// Delay between subsequent probes
    pub poll_interval_secs: u64,
    /// Probes before the cycle is abandoned
    pub max_attempts: u32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: DEFAULT_INITIAL_DELAY_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl StartupConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.initial_delay_secs > MAX_INITIAL_DELAY_SECS {
            return Err(ConfigError::config(format!(
                "startup.initial_delay_secs must be 0-{}, got {}",
                MAX_INITIAL_DELAY_SECS, self.initial_delay_secs
            )));
        }

        if self.poll_interval_secs < MIN_POLL_INTERVAL_SECS
            || self.poll_interval_secs > MAX_POLL_INTERVAL_SECS
        {
            return Err(ConfigError::config(format!(
                "startup.poll_interval_secs must be {}-{}, got {}",
                MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS, self.poll_interval_secs
            )));
        }

        if self.max_attempts < MIN_MAX_ATTEMPTS || self.max_attempts > MAX_MAX_ATTEMPTS {
            return Err(ConfigError::config(format!(
                "startup.max_attempts must be {}-{}, got {}",
                MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS, self.max_attempts
            )));
        }

        Ok(())
    }
}
