//! Workbooks in the Office Open XML format
//!
//! Health monitors export their readings as `.xlsx`. [`XlsxWorkbook`]
//! reads the used range of the first sheet, from a file or from bytes
//! already in memory (for example an upload, or base64 text pasted from
//! a web form).

use super::worksheet::{Worksheet, WorksheetSource};
use crate::domain::{ExchangeError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use calamine::{Data, DataType, Reader, Xlsx};
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// Format date cells are rendered with before the adapter parses them
const DATE_CELL_FORMAT: &str = "%m/%d/%Y %H:%M";

#[derive(Debug, Clone)]
enum Content {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// An `.xlsx` workbook
#[derive(Debug, Clone)]
pub struct XlsxWorkbook {
    content: Content,
}

impl XlsxWorkbook {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            content: Content::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Content::Bytes(bytes.into()),
        }
    }

    /// Decodes standard base64 workbook content
    ///
    /// # Errors
    ///
    /// Returns a spreadsheet error if `encoded` is not valid base64.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ExchangeError::Spreadsheet(format!("Invalid base64 workbook: {e}")))?;
        Ok(Self::from_bytes(bytes))
    }

    fn describe(&self) -> String {
        match &self.content {
            Content::File(path) => path.display().to_string(),
            Content::Bytes(bytes) => format!("in-memory workbook ({} bytes)", bytes.len()),
        }
    }
}

/// Renders a cell the way it would appear in a delimited re-save
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|when| when.format(DATE_CELL_FORMAT).to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string().trim().to_string(),
    }
}

fn first_sheet<RS: Read + Seek>(mut workbook: Xlsx<RS>, source: &str) -> Result<Worksheet> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExchangeError::Spreadsheet(format!("{source} has no worksheets")))?
        .map_err(|e| ExchangeError::Spreadsheet(format!("Failed to read {source}: {e}")))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());

    Worksheet::from_rows(rows)
        .ok_or_else(|| ExchangeError::Spreadsheet(format!("{source} has no header row")))
}

impl WorksheetSource for XlsxWorkbook {
    fn first_worksheet(&self) -> Result<Worksheet> {
        let source = self.describe();
        let open_error = |e: calamine::XlsxError| {
            ExchangeError::Spreadsheet(format!("Failed to open {source}: {e}"))
        };

        let sheet = match &self.content {
            Content::File(path) => {
                let workbook: Xlsx<_> = calamine::open_workbook(path).map_err(open_error)?;
                first_sheet(workbook, &source)?
            }
            Content::Bytes(bytes) => {
                let workbook = Xlsx::new(Cursor::new(bytes.as_slice())).map_err(open_error)?;
                first_sheet(workbook, &source)?
            }
        };

        tracing::debug!(
            source = %source,
            columns = sheet.header().len(),
            rows = sheet.rows().len(),
            "Worksheet loaded"
        );
        Ok(sheet)
    }
}
