use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

/// Hosting panel that receives power signals for the managed server.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ControlConfig {
    /// Panel base URL, e.g. "https://panel.example.com"
    pub url: String,
    /// Client API key. Never logged.
    pub api_key: Option<String>,
    /// Panel identifier of the managed server
    pub server_id: String,
}

impl ControlConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ConfigError::control("control.url is required"));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::control(format!(
                "control.url must start with http:// or https://, got '{}'",
                url
            )));
        }

        match &self.api_key {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::control("control.api_key is required")),
        }

        if self.server_id.trim().is_empty() {
            return Err(ConfigError::control("control.server_id is required"));
        }

        Ok(())
    }

    /// The api key, or an empty string when unset. Only call after validate().
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}
