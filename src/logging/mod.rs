//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output for operators
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use healthx::config::LoggingConfig;
//! use healthx::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an import
///
/// # Example
///
/// ```no_run
/// use healthx::log_import_start;
///
/// log_import_start!("Weight", 12);
/// ```
#[macro_export]
macro_rules! log_import_start {
    ($record_type:expr, $count:expr) => {
        tracing::info!(
            record_type = %$record_type,
            count = $count,
            "Starting import"
        );
    };
}

/// Log the completion of an import
///
/// # Example
///
/// ```no_run
/// use healthx::log_import_complete;
/// use std::time::Duration;
///
/// log_import_complete!("Weight", 12, Duration::from_millis(40));
/// ```
#[macro_export]
macro_rules! log_import_complete {
    ($record_type:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            record_type = %$record_type,
            count = $count,
            duration_ms = $duration.as_millis(),
            "Import completed"
        );
    };
}

/// Log the rejection of a record during validation
///
/// # Example
///
/// ```no_run
/// use healthx::log_record_rejected;
/// use healthx::domain::ExchangeError;
///
/// let error = ExchangeError::field("Weight", 3);
/// log_record_rejected!("Weight", 3, &error);
/// ```
#[macro_export]
macro_rules! log_record_rejected {
    ($record_type:expr, $record:expr, $error:expr) => {
        tracing::warn!(
            record_type = %$record_type,
            record = $record,
            error = %$error,
            "Record rejected, nothing imported"
        );
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use healthx::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!("Weight", 42, Duration::from_secs(1));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($record_type:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            record_type = %$record_type,
            count = $count,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}
