//! `validate-config` command
//!
//! Loads the configuration exactly as the other commands would, then
//! prints the settings an import or export will run with.

use super::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::{load_config, HealthXConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");
        println!("🔍 Checking {config_path}");

        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_settings(&config);
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Configuration rejected");
                println!("❌ {e}");
                Ok(EXIT_CONFIG)
            }
        }
    }
}

fn print_settings(config: &HealthXConfig) {
    let sheet = &config.spreadsheet;
    let file_logging = if config.logging.local_enabled {
        format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
    } else {
        "off".to_string()
    };

    println!("Settings:");
    println!("  Log level:        {}", config.application.log_level);
    println!("  Dry run:          {}", config.application.dry_run);
    println!("  Store snapshot:   {}", config.store.snapshot_path);
    println!("  Delimiter:        {:?}", config.exchange.delimiter);
    println!("  Export directory: {}", config.exchange.export_path);
    println!(
        "  Monitor columns:  {} / {} / {}",
        sheet.date_column_title, sheet.systolic_column_title, sheet.diastolic_column_title
    );
    println!("  Monitor dates:    {}", sheet.date_format);
    println!("  File logging:     {file_logging}");
}
