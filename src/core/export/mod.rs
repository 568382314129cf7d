//! Export of stored aggregates as delimited text
//!
//! An export writes one header line and one quoted line per aggregate,
//! with every foreign key replaced by the referenced entity's name.
//!
//! # Example
//!
//! ```rust,no_run
//! use healthx::adapters::store::MemoryStore;
//! use healthx::core::export::{ExportFilter, Exporter};
//! use healthx::domain::WeightMeasurement;
//! use std::sync::Arc;
//!
//! # async fn example() -> healthx::domain::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let mut exporter = Exporter::<WeightMeasurement>::new(store).with_filter(ExportFilter {
//!     person_id: Some(1),
//!     ..Default::default()
//! });
//!
//! let summary = exporter.export_to_file("exports/weight.csv").await?;
//! summary.log_summary();
//! # Ok(())
//! # }
//! ```

pub mod exporter;
pub mod serializer;
pub mod source;
pub mod summary;

pub use exporter::{write_export_file, Assessor, Exporter};
pub use serializer::ExportSerializer;
pub use source::{ExportFilter, ExportSource};
pub use summary::ExportSummary;
