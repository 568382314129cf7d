//! Tabular worksheet input
//!
//! A [`Worksheet`] is a header row followed by data rows of cell text.
//! Every source treats the first row with any non-blank cell as the
//! header and skips blank rows after it. [`CsvWorkbook`] reads a
//! delimited text sheet; [`XlsxWorkbook`](super::XlsxWorkbook) reads the
//! monitor's own workbook.

use crate::domain::{ExchangeError, Result};
use std::path::{Path, PathBuf};

/// One sheet of cell text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Worksheet {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Builds a sheet from raw rows: the first non-blank row becomes the
    /// header and blank rows are dropped
    ///
    /// Returns `None` when every row is blank.
    pub fn from_rows<I>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut rows = rows.into_iter().filter(|row| !is_blank(row));
        let header = rows.next()?;
        Some(Self::new(header, rows.collect()))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Finds the column whose header matches `title` exactly
    pub fn column_index(&self, title: &str) -> Option<usize> {
        self.header.iter().position(|cell| cell == title)
    }

    /// Like [`column_index`](Self::column_index), failing if the column
    /// is missing
    pub fn require_column(&self, title: &str) -> Result<usize> {
        self.column_index(title).ok_or_else(|| {
            ExchangeError::Spreadsheet(format!("Column '{title}' not found in header row"))
        })
    }
}

/// A workbook the adapter can take its first worksheet from
pub trait WorksheetSource {
    fn first_worksheet(&self) -> Result<Worksheet>;
}

/// A workbook stored as a single delimited text sheet
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    path: PathBuf,
    delimiter: u8,
}

impl CsvWorkbook {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

impl WorksheetSource for CsvWorkbook {
    fn first_worksheet(&self) -> Result<Worksheet> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(|e| {
                ExchangeError::Spreadsheet(format!("Failed to open {}: {e}", self.path.display()))
            })?;

        let rows = reader
            .records()
            .map(|record| {
                record.map(|record| record.iter().map(|cell| cell.trim().to_string()).collect())
            })
            .collect::<std::result::Result<Vec<Vec<String>>, _>>()?;

        let sheet = Worksheet::from_rows(rows).ok_or_else(|| {
            ExchangeError::Spreadsheet(format!("{} has no header row", self.path.display()))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            columns = sheet.header().len(),
            rows = sheet.rows().len(),
            "Worksheet loaded"
        );
        Ok(sheet)
    }
}
