//! Configuration schema types
//!
//! This module defines the configuration structure for HealthX.

use serde::{Deserialize, Serialize};

/// Main HealthX configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HealthXConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Persistence settings for the CLI's store
    #[serde(default)]
    pub store: StoreConfig,

    /// Import and export line format settings
    #[serde(default)]
    pub exchange: ExchangeConfig,

    /// Health monitor spreadsheet column titles
    #[serde(default)]
    pub spreadsheet: SpreadsheetConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HealthXConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.exchange.validate()?;
        self.spreadsheet.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (validate imports, never commit)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot the CLI loads on start and saves after a commit
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.snapshot_path.trim().is_empty() {
            return Err("store.snapshot_path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

/// Line format configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Field delimiter, a single ASCII character other than a quote
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Directory relative export paths are resolved against
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

impl ExchangeConfig {
    fn validate(&self) -> Result<(), String> {
        self.delimiter_byte().map(|_| ())
    }

    /// The delimiter as a byte
    ///
    /// # Errors
    ///
    /// Returns an error unless the delimiter is exactly one ASCII
    /// character that is not a double quote or a line break.
    pub fn delimiter_byte(&self) -> Result<u8, String> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(*byte),
            _ => Err(format!(
                "Invalid exchange.delimiter '{}'. Must be a single character other than a quote",
                self.delimiter
            )),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            export_path: default_export_path(),
        }
    }
}

/// Column titles and date format of the health monitor export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadsheetConfig {
    #[serde(default = "default_date_column_title")]
    pub date_column_title: String,

    #[serde(default = "default_systolic_column_title")]
    pub systolic_column_title: String,

    #[serde(default = "default_diastolic_column_title")]
    pub diastolic_column_title: String,

    /// chrono format for the date portion of the date column
    #[serde(default = "default_spreadsheet_date_format")]
    pub date_format: String,
}

impl SpreadsheetConfig {
    fn validate(&self) -> Result<(), String> {
        let titles = [
            ("date_column_title", &self.date_column_title),
            ("systolic_column_title", &self.systolic_column_title),
            ("diastolic_column_title", &self.diastolic_column_title),
        ];
        for (key, title) in titles {
            if title.trim().is_empty() {
                return Err(format!("spreadsheet.{key} cannot be empty"));
            }
        }

        if self.date_format.matches('/').count() != 2 {
            return Err(format!(
                "Invalid spreadsheet.date_format '{}'. Must have three '/' separated parts",
                self.date_format
            ));
        }
        Ok(())
    }
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            date_column_title: default_date_column_title(),
            systolic_column_title: default_systolic_column_title(),
            diastolic_column_title: default_diastolic_column_title(),
            date_format: default_spreadsheet_date_format(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_snapshot_path() -> String {
    "data/healthx.json".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_export_path() -> String {
    "exports".to_string()
}

fn default_date_column_title() -> String {
    "Date".to_string()
}

fn default_systolic_column_title() -> String {
    "Systolic (mmHg)".to_string()
}

fn default_diastolic_column_title() -> String {
    "Diastolic (mmHg)".to_string()
}

fn default_spreadsheet_date_format() -> String {
    "%m/%d/%Y".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
