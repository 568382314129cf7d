//! Configuration management for HealthX.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! HealthX uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HEALTHX_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use healthx::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("healthx.toml")?;
//! println!("Store snapshot: {}", config.store.snapshot_path);
//! println!("Delimiter: {}", config.exchange.delimiter);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry run
//! - [`StoreConfig`] - Store snapshot location
//! - [`ExchangeConfig`] - Delimiter and export directory
//! - [`SpreadsheetConfig`] - Health monitor column titles and date format
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! dry_run = false
//!
//! [store]
//! snapshot_path = "${HEALTHX_DATA_DIR}/healthx.json"
//!
//! [exchange]
//! delimiter = ","
//! export_path = "exports"
//!
//! [spreadsheet]
//! date_column_title = "Date"
//! systolic_column_title = "Systolic (mmHg)"
//! diastolic_column_title = "Diastolic (mmHg)"
//! date_format = "%m/%d/%Y"
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ExchangeConfig, HealthXConfig, LoggingConfig, SpreadsheetConfig,
    StoreConfig,
};
