use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MAX_DELAY_SECS: u64 = 86_400;
pub const DEFAULT_DELAY_SECS: u64 = 300;

pub const MIN_CHECK_INTERVAL_SECS: u64 = 1;
pub const MAX_CHECK_INTERVAL_SECS: u64 = 3_600;
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

pub const MAX_MANUAL_DELAY_SECS: u64 = 300;
pub const DEFAULT_MANUAL_DELAY_SECS: u64 = 5;

/// Stop the managed server after it has been empty for a while.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutoShutdownConfig {
    pub enabled: bool,
    /// How long the server must stay empty before it is stopped
    pub delay_secs: u64,
    /// Period of the emptiness check
    pub check_interval_secs: u64,
    /// Grace period between an admin shutdown request and the stop signal
    pub manual_delay_secs: u64,
}

impl Default for AutoShutdownConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_secs: DEFAULT_DELAY_SECS,
            check_interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
            manual_delay_secs: DEFAULT_MANUAL_DELAY_SECS,
        }
    }
}

impl AutoShutdownConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.delay_secs > MAX_DELAY_SECS {
            return Err(ConfigError::config(format!(
                "auto_shutdown.delay_secs must be 0-{}, got {}",
                MAX_DELAY_SECS, self.delay_secs
            )));
        }

        if self.check_interval_secs < MIN_CHECK_INTERVAL_SECS
            || self.check_interval_secs > MAX_CHECK_INTERVAL_SECS
        {
            return Err(ConfigError::config(format!(
                "auto_shutdown.check_interval_secs must be {}-{}, got {}",
                MIN_CHECK_INTERVAL_SECS, MAX_CHECK_INTERVAL_SECS, self.check_interval_secs
            )));
        }

        if self.manual_delay_secs > MAX_MANUAL_DELAY_SECS {
            return Err(ConfigError::config(format!(
                "auto_shutdown.manual_delay_secs must be 0-{}, got {}",
                MAX_MANUAL_DELAY_SECS, self.manual_delay_secs
            )));
        }

        Ok(())
    }
}
