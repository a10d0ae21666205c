use crate::{CoreError, CoreResult};

use std::fmt;
use std::time::Duration;

/// Resolved settings the orchestrator runs with. Read-only to the core;
/// replaced wholesale on reload.
#[derive(Clone)]
pub struct PowerConfig {
    pub control_endpoint: String,
    pub credentials: String,
    pub server_id: String,
    pub target_host: String,
    pub target_port: u16,
    pub probe_timeout: Duration,
    pub startup_initial_delay: Duration,
    pub startup_poll_interval: Duration,
    pub startup_max_attempts: u32,
    pub auto_shutdown_enabled: bool,
    pub empty_delay_seconds: u64,
    pub empty_check_interval_seconds: u64,
    pub manual_shutdown_delay: Duration,
}

impl PowerConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.target_host.trim().is_empty() {
            return Err(CoreError::config("target host must not be empty"));
        }
        if self.target_port == 0 {
            return Err(CoreError::config("target port must not be 0"));
        }
        if self.startup_max_attempts == 0 {
            return Err(CoreError::config("startup max attempts must be at least 1"));
        }
        if self.startup_poll_interval.is_zero() {
            return Err(CoreError::config("startup poll interval must not be 0"));
        }
        if self.empty_check_interval_seconds == 0 {
            return Err(CoreError::config("empty check interval must not be 0"));
        }
        Ok(())
    }

    pub fn empty_delay(&self) -> Duration {
        Duration::from_secs(self.empty_delay_seconds)
    }

    pub fn empty_check_interval(&self) -> Duration {
        Duration::from_secs(self.empty_check_interval_seconds)
    }

    /// `host:port` of the managed server
    pub fn target(&self) -> String {
        format!("{}:{}", self.target_host, self.target_port)
    }
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            control_endpoint: String::new(),
            credentials: String::new(),
            server_id: String::new(),
            target_host: String::from("localhost"),
            target_port: 25565,
            probe_timeout: Duration::from_millis(5000),
            startup_initial_delay: Duration::from_secs(5),
            startup_poll_interval: Duration::from_secs(5),
            startup_max_attempts: 24,
            auto_shutdown_enabled: false,
            empty_delay_seconds: 300,
            empty_check_interval_seconds: 60,
            manual_shutdown_delay: Duration::from_secs(5),
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for PowerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PowerConfig")
            .field("control_endpoint", &self.control_endpoint)
            .field("credentials", &"<redacted>")
            .field("server_id", &self.server_id)
            .field("target_host", &self.target_host)
            .field("target_port", &self.target_port)
            .field("probe_timeout", &self.probe_timeout)
            .field("startup_initial_delay", &self.startup_initial_delay)
            .field("startup_poll_interval", &self.startup_poll_interval)
            .field("startup_max_attempts", &self.startup_max_attempts)
            .field("auto_shutdown_enabled", &self.auto_shutdown_enabled)
            .field("empty_delay_seconds", &self.empty_delay_seconds)
            .field(
                "empty_check_interval_seconds",
                &self.empty_check_interval_seconds,
            )
            .field("manual_shutdown_delay", &self.manual_shutdown_delay)
            .finish()
    }
}
