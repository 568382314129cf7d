//! Record format matcher
//!
//! A structural check run before any field is interpreted: the line must
//! hold exactly the expected number of quoted fields separated by the
//! delimiter. Embedded quotes must be doubled.

use crate::domain::{ExchangeError, Result};
use crate::records::FlatRecord;
use regex::Regex;

/// The structural pattern of one record type's lines
#[derive(Debug, Clone)]
pub struct RecordPattern {
    regex: Regex,
    field_count: usize,
}

impl RecordPattern {
    /// Builds the pattern for `field_count` quoted fields
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `field_count` is zero.
    pub fn new(field_count: usize, delimiter: u8) -> Result<Self> {
        if field_count == 0 {
            return Err(ExchangeError::Configuration(
                "A record pattern needs at least one field".to_string(),
            ));
        }

        let field = r#""(?:[^"]|"")*""#;
        let separator = regex::escape(&char::from(delimiter).to_string());
        let pattern = format!(
            r"^{field}(?:{separator}{field}){{{}}}\r?$",
            field_count - 1
        );
        let regex = Regex::new(&pattern).map_err(|e| {
            ExchangeError::Configuration(format!("Invalid record pattern: {e}"))
        })?;

        Ok(Self { regex, field_count })
    }

    /// Builds the pattern for a flat record type
    pub fn for_record<R: FlatRecord>(delimiter: u8) -> Result<Self> {
        Self::new(R::COLUMNS.len(), delimiter)
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Returns true if the line is structurally well-formed
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Fails with a format mismatch at `record` unless the line matches
    pub fn check(&self, line: &str, record: usize) -> Result<()> {
        if self.is_match(line) {
            Ok(())
        } else {
            Err(ExchangeError::format(
                record,
                format!("expected {} quoted fields", self.field_count),
            ))
        }
    }
}
