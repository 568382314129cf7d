//! Two-pass import engine
//!
//! The first line of every batch is a header and is skipped. Record
//! positions count from 1 at the first data line.
//!
//! 1. **Validate all**: every data line is pattern-checked, inflated and
//!    validated. The first failure aborts the call before anything is
//!    persisted.
//! 2. **Commit all**: every line is inflated again and persisted in input
//!    order. Listeners are notified after each successful persist.
//!
//! Store failures during the commit phase are not rolled back: records
//! committed before the failure stay in the store and the store error is
//! returned unchanged.
//!
//! # Example
//!
//! ```rust,no_run
//! use healthx::adapters::store::MemoryStore;
//! use healthx::core::import::{ImportEngine, WeightImporter};
//! use std::sync::Arc;
//!
//! # async fn example() -> healthx::domain::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let mut engine = ImportEngine::new(WeightImporter, store)
//!     .on_record_imported(|position, weight| println!("{position}: {}", weight.weight));
//!
//! let summary = engine.import_file("weights.csv").await?;
//! summary.log_summary();
//! # Ok(())
//! # }
//! ```

use super::summary::ImportSummary;
use super::{RecordImporter, ValidationContext};
use crate::adapters::store::HealthStore;
use crate::core::reference::ReferenceSession;
use crate::core::validation::RecordPattern;
use crate::domain::{ExchangeError, Result};
use crate::records::{DateStyle, FlatRecord, LineCodec, DEFAULT_DELIMITER};
use crate::{log_import_complete, log_import_start, log_record_rejected};
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

type ImportListener<A> = Box<dyn FnMut(usize, &A) + Send>;

/// Drives a [`RecordImporter`] over a batch of lines
pub struct ImportEngine<I: RecordImporter> {
    importer: I,
    store: Arc<dyn HealthStore>,
    codec: LineCodec,
    dry_run: bool,
    listeners: Vec<ImportListener<I::Aggregate>>,
}

impl<I: RecordImporter> ImportEngine<I> {
    /// Creates an engine using the default delimiter and the record
    /// type's own date style
    pub fn new(importer: I, store: Arc<dyn HealthStore>) -> Self {
        Self {
            importer,
            store,
            codec: LineCodec::for_record::<I::Record>(DEFAULT_DELIMITER),
            dry_run: false,
            listeners: Vec::new(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.codec = LineCodec::new(delimiter, self.codec.style());
        self
    }

    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.codec = LineCodec::new(self.codec.delimiter(), style);
        self
    }

    /// Stops after the validate-all phase
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Registers a listener called with (position, aggregate) after each
    /// record is persisted
    pub fn on_record_imported<F>(mut self, listener: F) -> Self
    where
        F: FnMut(usize, &I::Aggregate) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn importer(&self) -> &I {
        &self.importer
    }

    /// Reads every line of a file and imports them
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise as
    /// [`import`](Self::import).
    pub async fn import_file(&mut self, path: impl AsRef<Path>) -> Result<ImportSummary> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExchangeError::Io(format!("Failed to read {}: {e}", path.display())))?;
        let lines: Vec<&str> = contents.lines().collect();

        tracing::debug!(path = %path.display(), lines = lines.len(), "Read import file");
        self.import(&lines).await
    }

    /// Imports a batch whose first line is a header
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, in which case nothing was
    /// persisted, or the first store failure of the commit phase.
    pub async fn import<S>(&mut self, lines: &[S]) -> Result<ImportSummary>
    where
        S: AsRef<str> + Sync,
    {
        let start_time = Instant::now();
        let record_type = self.importer.record_type();
        let data = lines.get(1..).unwrap_or_default();
        let mut summary = ImportSummary::new(record_type);

        log_import_start!(record_type, data.len());

        let refs = ReferenceSession::prepare(self.store.as_ref(), self.importer.references()).await?;
        let pattern = RecordPattern::for_record::<I::Record>(self.codec.delimiter())?;

        let context = ValidationContext {
            refs: &refs,
            now: Local::now().naive_local(),
        };

        for (index, line) in data.iter().enumerate() {
            let position = index + 1;
            if let Err(e) = self.check(line.as_ref(), position, &pattern, &context) {
                log_record_rejected!(record_type, position, &e);
                return Err(e);
            }
            summary.validated += 1;
        }

        if self.dry_run {
            summary.dry_run = true;
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        for (index, line) in data.iter().enumerate() {
            let position = index + 1;
            let record = self.importer.inflate(line.as_ref(), position, &self.codec)?;

            let aggregate = match self
                .importer
                .persist(&record, &refs, self.store.as_ref())
                .await
            {
                Ok(aggregate) => aggregate,
                Err(e) => {
                    tracing::error!(
                        record_type = %record_type,
                        record = position,
                        committed = summary.committed,
                        error = %e,
                        "Store failed during commit, earlier records remain committed"
                    );
                    return Err(e);
                }
            };

            for listener in &mut self.listeners {
                listener(position, &aggregate);
            }
            summary.committed += 1;
        }

        let summary = summary.with_duration(start_time.elapsed());
        log_import_complete!(record_type, summary.committed, summary.duration);
        Ok(summary)
    }

    fn check(
        &self,
        line: &str,
        position: usize,
        pattern: &RecordPattern,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        pattern.check(line, position)?;
        let record = self.importer.inflate(line, position, &self.codec)?;
        self.importer.validate(&record, position, context)
    }
}

impl<I: RecordImporter> std::fmt::Debug for ImportEngine<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportEngine")
            .field("record_type", &self.importer.record_type())
            .field("columns", &I::Record::COLUMNS.len())
            .field("dry_run", &self.dry_run)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
