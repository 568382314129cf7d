//! Spreadsheet input adapters
//!
//! Converts tabular exports from other tools into flat lines the import
//! engine understands.
//!
//! # Example
//!
//! ```rust,no_run
//! use healthx::adapters::store::MemoryStore;
//! use healthx::core::spreadsheet::{BloodPressureWorkbookAdapter, XlsxWorkbook};
//! use std::sync::Arc;
//!
//! # async fn example() -> healthx::domain::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let adapter = BloodPressureWorkbookAdapter::new("Date", "Systolic (mmHg)", "Diastolic (mmHg)");
//! let summary = adapter
//!     .import(&XlsxWorkbook::new("monitor.xlsx"), 1, store)
//!     .await?;
//! println!("{} readings imported", summary.committed);
//! # Ok(())
//! # }
//! ```

pub mod blood_pressure;
pub mod worksheet;
pub mod xlsx;

pub use blood_pressure::{normalize_date, BloodPressureWorkbookAdapter};
pub use worksheet::{CsvWorkbook, Worksheet, WorksheetSource};
pub use xlsx::XlsxWorkbook;
