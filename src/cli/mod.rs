//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for HealthX using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// HealthX - Health Tracker Data Exchange Engine
#[derive(Parser, Debug)]
#[command(name = "healthx")]
#[command(version, about, long_about = None)]
#[command(author = "HealthX Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "healthx.toml", env = "HEALTHX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HEALTHX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a delimited text file into the store
    Import(commands::import::ImportArgs),

    /// Export stored records to a delimited text file
    Export(commands::export::ExportArgs),

    /// Import blood pressure readings from a health monitor spreadsheet
    ImportBloodPressure(commands::spreadsheet::ImportBloodPressureArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordType;

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from(["healthx", "import", "weight", "weight.csv"]);
        assert_eq!(cli.config, "healthx.toml");
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.record_type, RecordType::Weight);
                assert_eq!(args.file, "weight.csv");
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["healthx", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["healthx", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export_filters() {
        let cli = Cli::parse_from([
            "healthx",
            "export",
            "blood-pressure",
            "--person-id",
            "3",
            "--from",
            "2024-01-01",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.record_type, RecordType::BloodPressure);
                assert_eq!(args.person_id, Some(3));
                assert!(args.from.is_some());
                assert!(args.to.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_import_blood_pressure() {
        let cli = Cli::parse_from([
            "healthx",
            "import-blood-pressure",
            "monitor.csv",
            "--person-id",
            "2",
        ]);
        assert!(matches!(cli.command, Commands::ImportBloodPressure(_)));
    }

    #[test]
    fn test_cli_rejects_unknown_record_type() {
        assert!(Cli::try_parse_from(["healthx", "import", "pulse", "pulse.csv"]).is_err());
    }
}
