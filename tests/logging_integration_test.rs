//! Integration tests for logging functionality

use healthx::config::LoggingConfig;
use healthx::domain::ExchangeError;
use healthx::logging::{init_logging, parse_log_level};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

// The global subscriber can only be installed once per process, so this
// is the only test in this file that initializes logging.
#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists());
    let guard = init_logging("debug", &config).unwrap();

    healthx::log_import_start!("Weight", 2);
    healthx::log_import_complete!("Weight", 2, Duration::from_millis(5));
    drop(guard);

    assert!(log_path.is_dir());
}

#[test]
fn test_invalid_level_is_a_configuration_error() {
    let err = parse_log_level("chatty").unwrap_err();
    assert!(matches!(err, ExchangeError::Configuration(_)));
}

#[test]
fn test_logging_macros_usage() {
    // Without a subscriber the macros are no-ops, but must accept these types
    let error = ExchangeError::field("Weight", 3);
    healthx::log_record_rejected!("Weight", 3, &error);
    healthx::log_export_complete!("People", 10, Duration::from_secs(1));

    assert_eq!(error.record_position(), Some(3));
}
