//! Exporter for one aggregate type
//!
//! Loads the aggregates and every reference table their projection needs
//! up front, applies the filter and any assessor, projects each aggregate
//! to its flat record, and hands the records to the serializer. A missing
//! cross-reference aborts the whole export.

use super::serializer::ExportSerializer;
use super::source::{ExportFilter, ExportSource};
use super::summary::ExportSummary;
use crate::adapters::store::HealthStore;
use crate::core::reference::ReferenceSession;
use crate::core::transform::to_flat_all;
use crate::domain::{ExchangeError, Result};
use crate::log_export_complete;
use crate::records::{DateStyle, DEFAULT_DELIMITER};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Attaches computed fields, such as assessment labels, to an aggregate
/// before it is exported
pub trait Assessor<A>: Send + Sync {
    fn assess(&self, aggregate: &mut A);
}

impl<A, F> Assessor<A> for F
where
    F: Fn(&mut A) + Send + Sync,
{
    fn assess(&self, aggregate: &mut A) {
        self(aggregate)
    }
}

/// Exports every stored aggregate of one type
pub struct Exporter<A: ExportSource> {
    store: Arc<dyn HealthStore>,
    serializer: ExportSerializer<A::Flat>,
    filter: ExportFilter,
    assessor: Option<Box<dyn Assessor<A>>>,
    record_type: &'static str,
}

impl<A: ExportSource> Exporter<A> {
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self {
            store,
            serializer: ExportSerializer::new(DEFAULT_DELIMITER),
            filter: ExportFilter::default(),
            assessor: None,
            record_type: A::RECORD_TYPE,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.serializer = self.serializer.with_delimiter(delimiter);
        self
    }

    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.serializer = self.serializer.with_date_style(style);
        self
    }

    pub fn with_filter(mut self, filter: ExportFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_assessor(mut self, assessor: impl Assessor<A> + 'static) -> Self {
        self.assessor = Some(Box::new(assessor));
        self
    }

    /// Names the export in logs and its summary
    pub fn with_record_type(mut self, record_type: &'static str) -> Self {
        self.record_type = record_type;
        self
    }

    /// Registers a listener called with each flat record after its line
    /// is written
    pub fn on_record_written<L>(mut self, listener: L) -> Self
    where
        L: FnMut(&A::Flat) + Send + 'static,
    {
        self.serializer.on_record_written(listener);
        self
    }

    /// Loads, filters and exports every stored aggregate
    ///
    /// # Errors
    ///
    /// Returns a lookup error if an aggregate references a missing
    /// entity, or an I/O error if the destination cannot be written.
    pub async fn export<W: Write>(&mut self, destination: W) -> Result<ExportSummary> {
        let aggregates = A::load(self.store.as_ref()).await?;
        let aggregates = self.filter.apply(aggregates);
        self.export_aggregates(aggregates, destination).await
    }

    /// Exports the given aggregates, in order
    pub async fn export_aggregates<W: Write>(
        &mut self,
        mut aggregates: Vec<A>,
        destination: W,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();

        if let Some(assessor) = &self.assessor {
            for aggregate in &mut aggregates {
                assessor.assess(aggregate);
            }
        }

        let refs = ReferenceSession::prepare(self.store.as_ref(), A::references()).await?;
        let records = to_flat_all(&aggregates, &refs)?;
        let written = self.serializer.write(&records, destination)?;

        let mut summary = ExportSummary::new(self.record_type);
        summary.records_written = written;
        let summary = summary.with_duration(start_time.elapsed());

        log_export_complete!(self.record_type, written, summary.duration);
        Ok(summary)
    }

    /// Exports to a file, creating its parent directories
    ///
    /// The file is only created once every record has been serialized.
    pub async fn export_to_file(&mut self, path: impl AsRef<Path>) -> Result<ExportSummary> {
        let path = path.as_ref();
        let mut buffer = Vec::new();
        let mut summary = self.export(&mut buffer).await?;
        write_export_file(path, &buffer).await?;
        summary.destination = Some(path.to_path_buf());
        Ok(summary)
    }
}

/// Writes (or replaces) an export file, creating its parent directories
pub async fn write_export_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ExchangeError::Io(format!("Failed to create {}: {e}", parent.display()))
        })?;
    }

    tokio::fs::write(path, contents)
        .await
        .map_err(|e| ExchangeError::Io(format!("Failed to write {}: {e}", path.display())))
}
