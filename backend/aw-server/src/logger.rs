use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::{Arguments, Display};
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// HTTP plumbing underneath the admin API and the control client. Capped at
/// `Warn` so lifecycle lines from the aw_* crates stay readable at debug.
const DEPENDENCY_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "tower", "axum"];

/// Level applied to [`DEPENDENCY_TARGETS`] for a configured level
pub fn dependency_level(level: LevelFilter) -> LevelFilter {
    level.min(LevelFilter::Warn)
}

/// `aw_core::orchestrator` -> `core::orchestrator`; other targets unchanged
pub fn short_target(target: &str) -> &str {
    target.strip_prefix("aw_").unwrap_or(target)
}

fn write_line(
    out: FormatCallback<'_>,
    message: &Arguments<'_>,
    record: &Record<'_>,
    level: impl Display,
) {
    out.finish(format_args!(
        "[{date} {level} {target}] {message}",
        date = humantime::format_rfc3339_seconds(SystemTime::now()),
        target = short_target(record.target()),
    ))
}

/// Initialize the fern logger
///
/// Logs to `log_file` when given (plain, with source locations), otherwise to
/// stdout, colored unless `colored` is false (systemd / docker).
pub fn initialize(
    log_level: aw_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let base = DEPENDENCY_TARGETS
        .iter()
        .fold(Dispatch::new().level(level_filter), |dispatch, target| {
            dispatch.level_for(*target, dependency_level(level_filter))
        });

    let output = match &log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(|e| ServerError::LogFile {
                    path: log_path.display().to_string(),
                    source: e,
                })?;

            Dispatch::new()
                .format(|out, message, record| {
                    write_line(
                        out,
                        &format_args!(
                            "{} [{}:{}]",
                            message,
                            record.file().unwrap_or("unknown"),
                            record.line().unwrap_or(0)
                        ),
                        record,
                        record.level(),
                    )
                })
                .chain(file)
        }
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        None => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(std::io::stdout()),
    };

    base.chain(output).apply().map_err(|e| ServerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    match &log_file {
        Some(path) => info!("Logging at {} to {}", level_filter, path.display()),
        None => info!("Logging at {} to stdout", level_filter),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}
