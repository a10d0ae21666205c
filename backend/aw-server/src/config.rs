use crate::error::Result as ServerErrorResult;

use aw_core::PowerConfig;

use std::time::Duration;

/// Resolve the file/env configuration into the record the orchestrator runs with
pub fn power_config(config: &aw_config::Config) -> PowerConfig {
    PowerConfig {
        control_endpoint: config.control.url.clone(),
        credentials: config.control.api_key().to_string(),
        server_id: config.control.server_id.clone(),
        target_host: config.target.host.clone(),
        target_port: config.target.port,
        probe_timeout: config.target.probe_timeout(),
        startup_initial_delay: Duration::from_secs(config.startup.initial_delay_secs),
        startup_poll_interval: Duration::from_secs(config.startup.poll_interval_secs),
        startup_max_attempts: config.startup.max_attempts,
        auto_shutdown_enabled: config.auto_shutdown.enabled,
        empty_delay_seconds: config.auto_shutdown.delay_secs,
        empty_check_interval_seconds: config.auto_shutdown.check_interval_secs,
        manual_shutdown_delay: Duration::from_secs(config.auto_shutdown.manual_delay_secs),
    }
}

/// Re-read the config directory, validate, and resolve it. Used by the
/// reload endpoint.
pub fn load_power_config() -> ServerErrorResult<PowerConfig> {
    let config = aw_config::Config::load()?;
    config.validate()?;
    Ok(power_config(&config))
}
