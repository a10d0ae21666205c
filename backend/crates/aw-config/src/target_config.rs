use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_PROTOCOL_VERSION, DEFAULT_TARGET_HOST,
    DEFAULT_TARGET_PORT,
};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_PROBE_TIMEOUT_MS: u64 = 100;
pub const MAX_PROBE_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// The managed game server as seen from the network.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub host: String,
    pub port: u16,
    /// Applied separately to connect and to the status exchange
    pub probe_timeout_ms: u64,
    /// Protocol version announced in the status handshake
    pub protocol_version: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_TARGET_HOST),
            port: DEFAULT_TARGET_PORT,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            protocol_version: DEFAULT_PROTOCOL_VERSION,
        }
    }
}

impl TargetConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::target("target.host must not be empty"));
        }

        if self.port == 0 {
            return Err(ConfigError::target("target.port must not be 0"));
        }

        if self.probe_timeout_ms < MIN_PROBE_TIMEOUT_MS
            || self.probe_timeout_ms > MAX_PROBE_TIMEOUT_MS
        {
            return Err(ConfigError::target(format!(
                "target.probe_timeout_ms must be {}-{}, got {}",
                MIN_PROBE_TIMEOUT_MS, MAX_PROBE_TIMEOUT_MS, self.probe_timeout_ms
            )));
        }

        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
