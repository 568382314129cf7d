//! Export summary and reporting

use std::path::PathBuf;
use std::time::Duration;

/// Summary of a completed export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Display name of the exported record type
    pub record_type: String,

    /// Number of data lines written, excluding the header
    pub records_written: usize,

    /// File written, when exporting to a file
    pub destination: Option<PathBuf>,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            records_written: 0,
            destination: None,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            record_type = %self.record_type,
            records_written = self.records_written,
            destination = ?self.destination,
            duration_ms = self.duration.as_millis(),
            "Export summary"
        );
    }
}
