//! Import-blood-pressure command implementation
//!
//! Reads a health monitor export and imports its readings for one person.

use super::{exit_code_for, load_checked_config, EXIT_FATAL, EXIT_SUCCESS};
use crate::adapters::store::MemoryStore;
use crate::core::spreadsheet::{
    BloodPressureWorkbookAdapter, CsvWorkbook, WorksheetSource, XlsxWorkbook,
};
use clap::Args;
use std::path::Path;
use std::sync::Arc;

/// Arguments for the import-blood-pressure command
#[derive(Args, Debug)]
pub struct ImportBloodPressureArgs {
    /// Path to the health monitor workbook (.xlsx, or delimited text)
    pub file: String,

    /// Person the readings belong to
    #[arg(long)]
    pub person_id: i64,

    /// Dry run mode - validate readings without writing to the store
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportBloodPressureArgs {
    /// Execute the import-blood-pressure command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            file = %self.file,
            person_id = self.person_id,
            "Starting blood pressure workbook import"
        );

        let config = match load_checked_config(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let dry_run = self.dry_run || config.application.dry_run;

        let store = match MemoryStore::load(&config.store.snapshot_path) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                tracing::error!(error = %e, "Failed to open store");
                eprintln!("Failed to open store: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        let adapter =
            BloodPressureWorkbookAdapter::from_config(&config.spreadsheet).with_dry_run(dry_run);
        let workbook = workbook_for(&self.file);

        match adapter.import(workbook.as_ref(), self.person_id, store.clone()).await {
            Ok(summary) => {
                summary.log_summary();
                if !dry_run {
                    store.save(&config.store.snapshot_path).await?;
                }
                println!();
                println!("📊 Import Summary:");
                println!("  Readings Validated: {}", summary.validated);
                println!("  Readings Committed: {}", summary.committed);
                println!();
                println!("✅ Import completed successfully!");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Blood pressure import failed");
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}

fn workbook_for(file: &str) -> Box<dyn WorksheetSource> {
    let is_xlsx = Path::new(file)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if is_xlsx {
        Box::new(XlsxWorkbook::new(file))
    } else {
        Box::new(CsvWorkbook::new(file))
    }
}
