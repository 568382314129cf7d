//! Export command implementation
//!
//! This module implements the `export` command for writing stored records
//! of one type to a delimited text file.

use super::{exit_code_for, load_checked_config, EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use crate::adapters::store::MemoryStore;
use crate::core::export::ExportFilter;
use crate::core::{DataExchange, RecordType};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Record type to export (e.g. weight, alcohol-consumption, meals)
    pub record_type: RecordType,

    /// Output file (defaults to <export_path>/<record-type>.csv)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Only export records belonging to this person
    #[arg(long)]
    pub person_id: Option<i64>,

    /// Only export records dated on or after this day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only export records dated on or before this day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl ExportArgs {
    fn filter(&self) -> ExportFilter {
        ExportFilter {
            person_id: self.person_id,
            from: self.from,
            to: self.to,
        }
    }

    fn destination(&self, export_path: &str) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => PathBuf::from(export_path).join(format!("{}.csv", self.record_type.key())),
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(record_type = %self.record_type, "Starting export command");

        let config = match load_checked_config(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                eprintln!("--from ({from}) is after --to ({to})");
                return Ok(EXIT_CONFIG);
            }
        }

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

        let destination = self.destination(&config.exchange.export_path);
        let exchange = DataExchange::new(store).with_delimiter(delimiter);

        match exchange
            .export_file(self.record_type, &destination, self.filter())
            .await
        {
            Ok(summary) => {
                summary.log_summary();
                println!();
                println!("📊 Export Summary:");
                println!("  Record Type: {}", summary.record_type);
                println!("  Records Written: {}", summary.records_written);
                println!("  Destination: {}", destination.display());
                println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
                println!();
                println!("✅ Export completed successfully!");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                println!("❌ Export failed");
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
