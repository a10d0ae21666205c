//! Port discovery file.
//!
//! `aw-server` writes this file after binding its admin listener. The `aw`
//! CLI reads it to find the server without a `--server` flag.
//!
//! File location: `<config_dir>/server.json`
//!
//! A file left behind by a crashed server is detected by checking whether
//! its PID is still running; `read_live_in()` removes such files.

use crate::{Config, ConfigError, ConfigErrorResult, port_file::is_process_running};

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

const PORT_FILENAME: &str = "server.json";

/// Information stored in the port discovery file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortFileInfo {
    /// Process ID of the server that wrote this file
    pub pid: u32,
    /// Port the admin listener is bound to
    pub port: u16,
    /// Host the admin listener is bound to
    pub host: String,
    /// RFC 3339 timestamp of server start
    pub started_at: String,
    pub version: String,
}

impl PortFileInfo {
    /// Base URL of the admin API described by this file.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Write the port file into the configured directory.
    pub fn write(port: u16, host: &str) -> ConfigErrorResult<PathBuf> {
        Self::write_in(&Config::config_dir()?, port, host)
    }

    /// Write the port file into `config_dir`.
    ///
    /// Creates the directory if needed. Refuses to overwrite the file of a
    /// server that is still running; stale files are replaced.
    pub fn write_in(config_dir: &Path, port: u16, host: &str) -> ConfigErrorResult<PathBuf> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        if let Ok(Some(existing)) = Self::read_live_in(config_dir)
            && existing.pid != std::process::id()
        {
            return Err(ConfigError::config(format!(
                "Another aw-server is already running on port {} (PID {}). \
                 Stop it first or use a different config directory.",
                existing.port, existing.pid
            )));
        }

        let info = PortFileInfo {
            pid: std::process::id(),
            port,
            host: host.to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        let content = serde_json::to_string_pretty(&info)
            .map_err(|e| ConfigError::config(format!("Failed to serialize port file: {e}")))?;

        let path = config_dir.join(PORT_FILENAME);
        std::fs::write(&path, content).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }

    /// Read the port file from the configured directory, checking liveness.
    pub fn read_live() -> ConfigErrorResult<Option<PortFileInfo>> {
        Self::read_live_in(&Config::config_dir()?)
    }

    /// Read the port file from `config_dir`.
    ///
    /// Returns `Ok(None)` if the file does not exist and `Err` if it exists
    /// but cannot be read or parsed.
    pub fn read_in(config_dir: &Path) -> ConfigErrorResult<Option<PortFileInfo>> {
        let path = config_dir.join(PORT_FILENAME);

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        let info: PortFileInfo = serde_json::from_str(&content).map_err(|e| {
            ConfigError::config(format!("Invalid port file {}: {e}", path.display()))
        })?;

        Ok(Some(info))
    }

    /// Read the port file and verify the writing process is still alive.
    ///
    /// A file whose PID is gone is removed and reported as `None`.
    pub fn read_live_in(config_dir: &Path) -> ConfigErrorResult<Option<PortFileInfo>> {
        let Some(info) = Self::read_in(config_dir)? else {
            return Ok(None);
        };

        if !is_process_running(info.pid) {
            debug!(
                "Removing stale port file (pid {} no longer running)",
                info.pid
            );
            Self::remove_in(config_dir).ok();
            return Ok(None);
        }

        Ok(Some(info))
    }

    /// Delete the port file from the configured directory.
    pub fn remove() -> ConfigErrorResult<()> {
        Self::remove_in(&Config::config_dir()?)
    }

    /// Delete the port file from `config_dir`. Succeeds if it is absent.
    pub fn remove_in(config_dir: &Path) -> ConfigErrorResult<()> {
        let path = config_dir.join(PORT_FILENAME);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// `<config_dir>/server.json`
    pub fn path() -> ConfigErrorResult<PathBuf> {
        Ok(Config::config_dir()?.join(PORT_FILENAME))
    }
}
