use crate::{
    AutoShutdownConfig, ConfigError, ConfigErrorResult, ControlConfig, LoggingConfig,
    ServerConfig, StartupConfig, TargetConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

pub(crate) const CONFIG_DIR_ENV: &str = "AW_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".aw";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub control: ControlConfig,
    pub target: TargetConfig,
    pub startup: StartupConfig,
    pub auto_shutdown: AutoShutdownConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for AW_CONFIG_DIR env var, else use ./.aw/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply AW_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: AW_CONFIG_DIR env var > ./.aw/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.control.validate()?;
        self.target.validate()?;
        self.startup.validate()?;
        self.auto_shutdown.validate()?;

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs the api key).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  control: {} (server {}, api key {})",
            self.control.url,
            self.control.server_id,
            if self.control.api_key.is_some() {
                "set"
            } else {
                "missing"
            }
        );
        info!(
            "  target: {}:{} (timeout {}ms, protocol {})",
            self.target.host,
            self.target.port,
            self.target.probe_timeout_ms,
            self.target.protocol_version
        );
        info!(
            "  startup: first poll after {}s, every {}s, {} attempts",
            self.startup.initial_delay_secs,
            self.startup.poll_interval_secs,
            self.startup.max_attempts
        );
        info!(
            "  auto_shutdown: {} (delay {}s, check every {}s, manual {}s)",
            if self.auto_shutdown.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.auto_shutdown.delay_secs,
            self.auto_shutdown.check_interval_secs,
            self.auto_shutdown.manual_delay_secs
        );
        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("AW_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("AW_SERVER_PORT", &mut self.server.port);

        // Control
        Self::apply_env_string("AW_CONTROL_URL", &mut self.control.url);
        Self::apply_env_option_string("AW_CONTROL_API_KEY", &mut self.control.api_key);
        Self::apply_env_string("AW_CONTROL_SERVER_ID", &mut self.control.server_id);

        // Target
        Self::apply_env_string("AW_TARGET_HOST", &mut self.target.host);
        Self::apply_env_parse("AW_TARGET_PORT", &mut self.target.port);
        Self::apply_env_parse(
            "AW_TARGET_PROBE_TIMEOUT_MS",
            &mut self.target.probe_timeout_ms,
        );
        Self::apply_env_parse(
            "AW_TARGET_PROTOCOL_VERSION",
            &mut self.target.protocol_version,
        );

        // Startup
        Self::apply_env_parse(
            "AW_STARTUP_INITIAL_DELAY_SECS",
            &mut self.startup.initial_delay_secs,
        );
        Self::apply_env_parse(
            "AW_STARTUP_POLL_INTERVAL_SECS",
            &mut self.startup.poll_interval_secs,
        );
        Self::apply_env_parse("AW_STARTUP_MAX_ATTEMPTS", &mut self.startup.max_attempts);

        // Auto shutdown
        Self::apply_env_bool("AW_AUTO_SHUTDOWN_ENABLED", &mut self.auto_shutdown.enabled);
        Self::apply_env_parse(
            "AW_AUTO_SHUTDOWN_DELAY_SECS",
            &mut self.auto_shutdown.delay_secs,
        );
        Self::apply_env_parse(
            "AW_AUTO_SHUTDOWN_CHECK_INTERVAL_SECS",
            &mut self.auto_shutdown.check_interval_secs,
        );
        Self::apply_env_parse(
            "AW_AUTO_SHUTDOWN_MANUAL_DELAY_SECS",
            &mut self.auto_shutdown.manual_delay_secs,
        );

        // Logging
        Self::apply_env_parse("AW_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_string("AW_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("AW_LOG_FILE", &mut self.logging.file);
        Self::apply_env_bool("AW_LOG_COLORED", &mut self.logging.colored);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
