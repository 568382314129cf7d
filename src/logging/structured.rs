//! Subscriber setup
//!
//! Human-readable events go to stderr so they never mix with command
//! output on stdout. When `[logging] local_enabled` is set, the same
//! events are also written as JSON lines to a rolling file under
//! `local_path`.
//!
//! The level passed to [`init_logging`] applies to this crate only;
//! `RUST_LOG` replaces the whole filter when it is set.

use crate::config::LoggingConfig;
use crate::domain::{ExchangeError, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_PREFIX: &str = "healthx.log";

/// Flushes the file writer when dropped. Hold it until the process ends.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    file: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// True when events are also written to a log file
    pub fn writes_file(&self) -> bool {
        self.file.is_some()
    }
}

/// Installs the global subscriber
///
/// # Errors
///
/// Returns a configuration error for an unknown level or rotation, if the
/// log directory cannot be created, or if a global subscriber is already
/// installed.
pub fn init_logging(log_level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = crate_filter(parse_log_level(log_level)?);

    let (file_layer, file) = if config.local_enabled {
        let (writer, guard) = file_writer(config)?;
        let layer = fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ExchangeError::Configuration(format!("Logging already initialized: {e}")))?;

    tracing::debug!(
        file = config.local_enabled,
        path = %config.local_path,
        rotation = %config.local_rotation,
        "Logging initialized"
    );

    Ok(LoggingGuard { file })
}

/// Parses a level name, ignoring case
pub fn parse_log_level(name: &str) -> Result<Level> {
    name.parse::<Level>().map_err(|_| {
        ExchangeError::Configuration(format!(
            "Invalid log level: {name}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

fn crate_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,healthx={level}")))
}

fn rotation(name: &str) -> Result<Rotation> {
    match name {
        "daily" => Ok(Rotation::DAILY),
        "hourly" => Ok(Rotation::HOURLY),
        "never" => Ok(Rotation::NEVER),
        other => Err(ExchangeError::Configuration(format!(
            "Invalid logging.local_rotation '{other}'"
        ))),
    }
}

fn file_writer(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard)> {
    let rotation = rotation(&config.local_rotation)?;
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        ExchangeError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(rotation, &config.local_path, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}
