//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HealthXConfig;
use crate::domain::errors::ExchangeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

const ENV_PREFIX: &str = "HEALTHX";

/// Loads, overrides and validates a TOML configuration file
///
/// `${VAR}` placeholders are substituted before parsing, then any
/// `HEALTHX_<SECTION>_<KEY>` variables replace the parsed values.
///
/// # Errors
///
/// Returns a configuration error if the file is missing or unreadable,
/// a placeholder names an unset variable, the TOML does not parse, or
/// the result fails validation.
///
/// # Examples
///
/// ```no_run
/// use healthx::config::loader::load_config;
///
/// let config = load_config("healthx.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HealthXConfig> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| {
        let reason = if e.kind() == std::io::ErrorKind::NotFound {
            "not found".to_string()
        } else {
            e.to_string()
        };
        ExchangeError::Configuration(format!(
            "Configuration file {}: {reason}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: HealthXConfig = toml::from_str(&contents)
        .map_err(|e| ExchangeError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ExchangeError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Replaces every `${VAR}` outside comment lines with the variable's value
///
/// # Errors
///
/// Returns a configuration error naming every referenced variable that is
/// not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let placeholder = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExchangeError::Configuration(e.to_string()))?;
    let mut missing: Vec<String> = Vec::new();

    let substituted: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            placeholder
                .replace_all(line, |caps: &regex::Captures<'_>| {
                    std::env::var(&caps[1]).unwrap_or_else(|_| {
                        if !missing.iter().any(|name| name == &caps[1]) {
                            missing.push(caps[1].to_string());
                        }
                        caps[0].to_string()
                    })
                })
                .into_owned()
        })
        .collect();

    if !missing.is_empty() {
        return Err(ExchangeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    let mut output = substituted.join("\n");
    output.push('\n');
    Ok(output)
}

fn env_override(section: &str, key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{section}_{key}")).ok()
}

fn set_from_env(target: &mut String, section: &str, key: &str) {
    if let Some(value) = env_override(section, key) {
        *target = value;
    }
}

fn set_flag_from_env(target: &mut bool, section: &str, key: &str) {
    if let Some(value) = env_override(section, key) {
        *target = value.eq_ignore_ascii_case("true") || value == "1";
    }
}

/// Applies `HEALTHX_<SECTION>_<KEY>` environment overrides
fn apply_env_overrides(config: &mut HealthXConfig) {
    let app = &mut config.application;
    set_from_env(&mut app.log_level, "APPLICATION", "LOG_LEVEL");
    set_flag_from_env(&mut app.dry_run, "APPLICATION", "DRY_RUN");

    set_from_env(&mut config.store.snapshot_path, "STORE", "SNAPSHOT_PATH");

    let exchange = &mut config.exchange;
    set_from_env(&mut exchange.delimiter, "EXCHANGE", "DELIMITER");
    set_from_env(&mut exchange.export_path, "EXCHANGE", "EXPORT_PATH");

    let sheet = &mut config.spreadsheet;
    set_from_env(&mut sheet.date_column_title, "SPREADSHEET", "DATE_COLUMN_TITLE");
    set_from_env(&mut sheet.systolic_column_title, "SPREADSHEET", "SYSTOLIC_COLUMN_TITLE");
    set_from_env(&mut sheet.diastolic_column_title, "SPREADSHEET", "DIASTOLIC_COLUMN_TITLE");
    set_from_env(&mut sheet.date_format, "SPREADSHEET", "DATE_FORMAT");

    let logging = &mut config.logging;
    set_flag_from_env(&mut logging.local_enabled, "LOGGING", "LOCAL_ENABLED");
    set_from_env(&mut logging.local_path, "LOGGING", "LOCAL_PATH");
    set_from_env(&mut logging.local_rotation, "LOGGING", "LOCAL_ROTATION");
}
