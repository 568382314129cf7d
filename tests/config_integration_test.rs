//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX to avoid
//! interference between tests.

use healthx::config::load_config;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("HEALTHX_APPLICATION_LOG_LEVEL");
    std::env::remove_var("HEALTHX_APPLICATION_DRY_RUN");
    std::env::remove_var("HEALTHX_STORE_SNAPSHOT_PATH");
    std::env::remove_var("HEALTHX_EXCHANGE_DELIMITER");
    std::env::remove_var("HEALTHX_SPREADSHEET_DATE_FORMAT");
    std::env::remove_var("TEST_HEALTHX_DATA_DIR");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[store]
snapshot_path = "/var/lib/healthx/store.json"

[exchange]
delimiter = "|"
export_path = "/tmp/exports"

[spreadsheet]
date_column_title = "Measured"
systolic_column_title = "SYS"
diastolic_column_title = "DIA"
date_format = "%d/%m/%Y"

[logging]
local_enabled = true
local_path = "/var/log/healthx"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.store.snapshot_path, "/var/lib/healthx/store.json");
    assert_eq!(config.exchange.delimiter_byte().unwrap(), b'|');
    assert_eq!(config.exchange.export_path, "/tmp/exports");
    assert_eq!(config.spreadsheet.date_column_title, "Measured");
    assert_eq!(config.spreadsheet.date_format, "%d/%m/%Y");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_missing_sections_use_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("[application]\nlog_level = \"warn\"\n");
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert!(!config.application.dry_run);
    assert_eq!(config.store.snapshot_path, "data/healthx.json");
    assert_eq!(config.exchange.delimiter, ",");
    assert_eq!(config.spreadsheet.systolic_column_title, "Systolic (mmHg)");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_HEALTHX_DATA_DIR", "/srv/healthx");

    let temp_file = write_config(
        r#"
[store]
snapshot_path = "${TEST_HEALTHX_DATA_DIR}/store.json"
"#,
    );
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.store.snapshot_path, "/srv/healthx/store.json");
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[store]
snapshot_path = "${TEST_HEALTHX_DATA_DIR}/store.json"
"#,
    );
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_HEALTHX_DATA_DIR"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("HEALTHX_APPLICATION_DRY_RUN", "true");
    std::env::set_var("HEALTHX_EXCHANGE_DELIMITER", ";");
    std::env::set_var("HEALTHX_STORE_SNAPSHOT_PATH", "override.json");

    let temp_file = write_config("[exchange]\ndelimiter = \",\"\n");
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert!(config.application.dry_run);
    assert_eq!(config.exchange.delimiter_byte().unwrap(), b';');
    assert_eq!(config.store.snapshot_path, "override.json");
}

#[test]
fn test_invalid_override_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("HEALTHX_SPREADSHEET_DATE_FORMAT", "%Y-%m-%d");

    let temp_file = write_config("");
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_invalid_toml() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("[application\nlog_level = ");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}
