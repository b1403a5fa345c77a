//! Tracing/logging initialization for hwbot.

use crate::config::LogConfig;
use crate::error::ConfigError;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing to stdout and to a size-capped rotating log file.
///
/// Uses the `RUST_LOG` environment variable to control log levels.
/// Defaults to `info` if not set. The returned guard flushes the file
/// writer on drop and must be held until the process exits.
pub fn init(config: &LogConfig) -> Result<WorkerGuard, ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let appender = file_appender(config)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    Ok(guard)
}

/// Open the rotating log file, creating its directory if needed.
pub fn file_appender(config: &LogConfig) -> Result<BasicRollingFileAppender, ConfigError> {
    let open_err =
        |e: std::io::Error| ConfigError::Logging(format!("{}: {}", config.file.display(), e));

    if let Some(dir) = config.file.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(open_err)?;
    }

    BasicRollingFileAppender::new(
        &config.file,
        RollingConditionBasic::new().max_size(config.max_bytes),
        config.backups,
    )
    .map_err(open_err)
}
