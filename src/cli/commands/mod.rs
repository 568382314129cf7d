//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod import;
pub mod init;
pub mod spreadsheet;
pub mod validate;

use crate::config::{load_config, HealthXConfig};
use crate::domain::ExchangeError;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when a batch is rejected by validation
pub const EXIT_REJECTED: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Loads and validates the configuration, reporting problems on stdout
///
/// Returns the exit code to use when the configuration is unusable.
pub(crate) fn load_checked_config(config_path: &str) -> Result<HealthXConfig, i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("Failed to load configuration: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Configuration validation failed");
        eprintln!("Configuration validation failed: {e}");
        return Err(EXIT_CONFIG);
    }

    Ok(config)
}

/// Maps an exchange failure to an exit code
pub(crate) fn exit_code_for(error: &ExchangeError) -> i32 {
    if error.is_rejection() {
        EXIT_REJECTED
    } else if matches!(error, ExchangeError::Configuration(_)) {
        EXIT_CONFIG
    } else {
        EXIT_FATAL
    }
}
