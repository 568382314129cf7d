//! Import command implementation
//!
//! This module implements the `import` command, which loads one delimited
//! text file of a single record type into the store snapshot.

use super::{exit_code_for, load_checked_config, EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use crate::adapters::store::MemoryStore;
use crate::core::{DataExchange, RecordType};
use crate::domain::ExchangeError;
use clap::Args;
use std::sync::Arc;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Record type held in the file (e.g. weight, blood-pressure, food-items)
    pub record_type: RecordType,

    /// Path to the file to import
    pub file: String,

    /// Dry run mode - validate every record without writing to the store
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            record_type = %self.record_type,
            file = %self.file,
            "Starting import command"
        );

        let config = match load_checked_config(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if !self.record_type.can_import() {
            eprintln!("{} can only be exported", self.record_type);
            return Ok(EXIT_CONFIG);
        }

        let dry_run = self.dry_run || config.application.dry_run;
        let delimiter = match config.exchange.delimiter_byte() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Configuration validation failed: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let store = match MemoryStore::load(&config.store.snapshot_path) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                tracing::error!(error = %e, "Failed to open store");
                eprintln!("Failed to open store: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        if dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No data will be written to the store");
            println!();
        }

        let exchange = DataExchange::new(store.clone())
            .with_delimiter(delimiter)
            .with_dry_run(dry_run);

        match exchange.import_file(self.record_type, &self.file).await {
            Ok(summary) => {
                summary.log_summary();
                if !dry_run {
                    store.save(&config.store.snapshot_path).await?;
                }

                println!();
                println!("📊 Import Summary:");
                println!("  Record Type: {}", summary.record_type);
                println!("  Validated: {}", summary.validated);
                println!("  Committed: {}", summary.committed);
                println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
                println!();
                println!("✅ Import completed successfully!");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                if e.is_rejection() {
                    println!("❌ Import rejected, nothing was imported");
                } else {
                    println!("❌ Import failed");
                }
                println!("   Error: {e}");

                // Records committed before a store failure stay committed
                if matches!(e, ExchangeError::Store(_)) && !dry_run {
                    store.save(&config.store.snapshot_path).await?;
                }
                Ok(exit_code_for(&e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_args_creation() {
        let args = ImportArgs {
            record_type: RecordType::People,
            file: "people.csv".to_string(),
            dry_run: true,
        };
        assert!(args.dry_run);
        assert!(format!("{args:?}").contains("People"));
    }
}
