mod auto_shutdown_config;
mod config;
mod control_config;
mod error;
mod log_level;
mod logging_config;
mod port_file;
mod server_config;
mod startup_config;
mod target_config;

#[cfg(test)]
mod tests;

pub use auto_shutdown_config::AutoShutdownConfig;
pub use config::Config;
pub use control_config::ControlConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use port_file::{is_process_running, port_file_info::PortFileInfo};
pub use server_config::ServerConfig;
pub use startup_config::StartupConfig;
pub use target_config::TargetConfig;

// Admin server
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

// Logging
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

// Managed game server
const DEFAULT_TARGET_HOST: &str = "localhost";
const DEFAULT_TARGET_PORT: u16 = 25565;
const DEFAULT_PROTOCOL_VERSION: u32 = 47;
