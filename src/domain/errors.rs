//! Domain error types
//!
//! This module defines the error hierarchy for HealthX. Every import or
//! export call surfaces exactly one terminal error: the first problem it
//! encountered, tagged with the 1-based record position where one exists.

use thiserror::Error;

/// Main HealthX error type
///
/// This is the primary error type used throughout the application.
/// It wraps store errors and provides context for error handling.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// A line does not match the expected column pattern, or a field
    /// cannot be parsed to its declared type
    #[error("Invalid record format at line {record}: {reason}")]
    InvalidRecordFormat { record: usize, reason: String },

    /// A parsed field failed a domain predicate
    #[error("Invalid value for '{field}' at record {record}")]
    InvalidFieldValue { field: String, record: usize },

    /// A named cross-reference did not resolve to exactly one entity
    #[error("'{value}' does not match a known {field} at record {record}")]
    ReferentialMiss {
        field: String,
        value: String,
        record: usize,
    },

    /// A lookup by identifier or name failed outside of record validation
    #[error("{collection} '{key}' not found")]
    ReferenceNotFound { collection: String, key: String },

    /// Errors raised by the persistence collaborator
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Spreadsheet adapter errors
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ExchangeError {
    /// Creates a format mismatch error for the record at `record`
    pub fn format(record: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecordFormat {
            record,
            reason: reason.into(),
        }
    }

    /// Creates a field value rejection for `field` at `record`
    pub fn field(field: impl Into<String>, record: usize) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            record,
        }
    }

    /// Creates a referential miss for `value` in `field` at `record`
    pub fn referential_miss(
        field: impl Into<String>,
        value: impl Into<String>,
        record: usize,
    ) -> Self {
        Self::ReferentialMiss {
            field: field.into(),
            value: value.into(),
            record,
        }
    }

    /// Creates a lookup failure for `key` in `collection`
    pub fn not_found(collection: impl Into<String>, key: impl ToString) -> Self {
        Self::ReferenceNotFound {
            collection: collection.into(),
            key: key.to_string(),
        }
    }

    /// Returns true for errors raised while checking a batch, before any
    /// record was handed to the store
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecordFormat { .. }
                | Self::InvalidFieldValue { .. }
                | Self::ReferentialMiss { .. }
        )
    }

    /// The 1-based position of the offending record, if the error has one
    pub fn record_position(&self) -> Option<usize> {
        match self {
            Self::InvalidRecordFormat { record, .. }
            | Self::InvalidFieldValue { record, .. }
            | Self::ReferentialMiss { record, .. } => Some(*record),
            _ => None,
        }
    }
}

/// Persistence collaborator errors
///
/// These are raised by the store, never by the exchange engine, and pass
/// through it unmodified.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The entity does not exist
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// The write could not be completed
    #[error("Failed to write entity: {0}")]
    WriteFailed(String),

    /// The store snapshot could not be read or written
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExchangeError {
    fn from(err: std::io::Error) -> Self {
        ExchangeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExchangeError {
    fn from(err: toml::de::Error) -> Self {
        ExchangeError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv reader/writer errors
impl From<csv::Error> for ExchangeError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            ExchangeError::Io(err.to_string())
        } else {
            ExchangeError::Serialization(err.to_string())
        }
    }
}
