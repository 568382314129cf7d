// HealthX - Health Tracker Data Exchange Engine
// Copyright (c) 2025 HealthX Contributors
// Licensed under the MIT License

//! # HealthX - Health Tracker Data Exchange Engine
//!
//! HealthX moves personal health tracker data in and out of a store as
//! delimited text, one record type per file.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Importing** batches atomically: every record is validated before any is stored
//! - **Exporting** stored records, optionally filtered by person and date range
//! - **Projecting** between aggregates with numeric foreign keys and flat records
//!   that carry human-readable names
//! - **Adapting** health monitor spreadsheets into blood pressure imports
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (import, export, transform, validation)
//! - [`records`] - Flat record types and the line codec
//! - [`adapters`] - The persistence collaborator
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use healthx::adapters::store::MemoryStore;
//! use healthx::core::export::ExportFilter;
//! use healthx::core::{DataExchange, RecordType};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let exchange = DataExchange::new(store.clone());
//!
//!     exchange.import_file(RecordType::People, "people.csv").await?;
//!     exchange.import_file(RecordType::Weight, "weight.csv").await?;
//!
//!     let filter = ExportFilter {
//!         person_id: Some(1),
//!         ..Default::default()
//!     };
//!     let summary = exchange
//!         .export_file(RecordType::Weight, "exports/weight.csv", filter)
//!         .await?;
//!
//!     println!("Exported {} records", summary.records_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! HealthX uses the [`domain::ExchangeError`] type for all errors. Rejections
//! carry the 1-based position of the offending data record:
//!
//! ```rust
//! use healthx::domain::ExchangeError;
//!
//! let err = ExchangeError::field("Weight", 3);
//! assert!(err.is_rejection());
//! assert_eq!(err.record_position(), Some(3));
//! ```
//!
//! ## Logging
//!
//! HealthX uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(record_type = "Weight", "Starting import");
//! warn!(record = 4, "Record rejected");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod records;
