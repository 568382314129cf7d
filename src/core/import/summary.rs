//! Import summary and reporting

use std::time::Duration;

/// Summary of a successful import call
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// Display name of the imported record type
    pub record_type: String,

    /// Number of data lines that passed validation
    pub validated: usize,

    /// Number of records handed to the store
    pub committed: usize,

    /// True if the commit phase was skipped
    pub dry_run: bool,

    /// Duration of the import
    pub duration: Duration,
}

impl ImportSummary {
    /// Create a new empty import summary
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            validated: 0,
            committed: 0,
            dry_run: false,
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
        if self.dry_run {
            tracing::info!(
                record_type = %self.record_type,
                validated = self.validated,
                duration_ms = self.duration.as_millis(),
                "Dry run completed, nothing committed"
            );
        } else {
            tracing::info!(
                record_type = %self.record_type,
                validated = self.validated,
                committed = self.committed,
                duration_ms = self.duration.as_millis(),
                "Import summary"
            );
        }
    }
}
