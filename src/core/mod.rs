//! Core business logic for HealthX.
//!
//! # Modules
//!
//! - [`import`] - Two-pass batch import (validate everything, then persist)
//! - [`export`] - Filtered export of stored aggregates
//! - [`transform`] - Projections between aggregates and flat records
//! - [`reference`] - Per-session reference data lookup
//! - [`validation`] - Line shape and field value checks
//! - [`spreadsheet`] - Health monitor workbook adapter
//! - [`exchange`] - Record type registry and dispatch
//!
//! # Import Workflow
//!
//! 1. **Prepare**: Load the reference collections the record type needs
//! 2. **Validate**: Check every line's shape, fields and references
//! 3. **Persist**: Only if every line passed, store each record in order
//! 4. **Report**: Return an import summary
//!
//! # Example
//!
//! ```rust,no_run
//! use healthx::adapters::store::MemoryStore;
//! use healthx::core::{DataExchange, RecordType};
//! use std::sync::Arc;
//!
//! # async fn example() -> healthx::domain::Result<()> {
//! let store = Arc::new(MemoryStore::load("data/healthx.json")?);
//! let exchange = DataExchange::new(store.clone());
//!
//! let summary = exchange.import_file(RecordType::Weight, "weight.csv").await?;
//! println!("Committed: {}", summary.committed);
//!
//! store.save("data/healthx.json").await?;
//! # Ok(())
//! # }
//! ```

pub mod exchange;
pub mod export;
pub mod import;
pub mod reference;
pub mod spreadsheet;
pub mod transform;
pub mod validation;

pub use exchange::{DataExchange, RecordType};
