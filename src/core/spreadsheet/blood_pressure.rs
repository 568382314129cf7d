//! Blood pressure readings from a health monitor export
//!
//! The adapter finds the date, systolic and diastolic columns by their
//! header titles, turns every non-blank data row into a blood pressure
//! line for the given person, and runs the lines through the generic
//! import engine. It never writes to the store itself.

use super::worksheet::{Worksheet, WorksheetSource};
use crate::adapters::store::HealthStore;
use crate::config::SpreadsheetConfig;
use crate::core::import::{BloodPressureImporter, ImportEngine, ImportSummary};
use crate::core::reference::ReferenceCollection;
use crate::domain::{ExchangeError, Person, Result};
use crate::records::{BloodPressureRecord, FlatRecord, LineCodec, DEFAULT_DELIMITER};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;

/// Parses the date portion of a cell, swapping day and month once if the
/// direct parse fails
///
/// The date portion is everything before the first whitespace.
///
/// # Errors
///
/// Returns a spreadsheet error if neither the direct nor the swapped
/// parse succeeds.
pub fn normalize_date(value: &str, format: &str) -> Result<NaiveDate> {
    let date_part = value.split_whitespace().next().unwrap_or_default();

    if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
        return Ok(date);
    }

    let parts: Vec<&str> = date_part.split('/').collect();
    if let [first, second, rest @ ..] = parts.as_slice() {
        let swapped = [*second, *first]
            .iter()
            .chain(rest)
            .copied()
            .collect::<Vec<_>>()
            .join("/");
        if let Ok(date) = NaiveDate::parse_from_str(&swapped, format) {
            tracing::debug!(value, swapped = %swapped, "Date parsed with day and month swapped");
            return Ok(date);
        }
    }

    Err(ExchangeError::Spreadsheet(format!(
        "Unable to parse date '{value}' with format '{format}'"
    )))
}

/// Whole-number readings sometimes arrive as decimals ("120.0")
fn reading(cell: &str) -> String {
    let cell = cell.trim();
    match cell.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() < f64::from(i32::MAX) => {
            format!("{}", value as i64)
        }
        _ => cell.to_string(),
    }
}

/// Converts health monitor worksheets into blood pressure imports
#[derive(Debug, Clone)]
pub struct BloodPressureWorkbookAdapter {
    date_column: String,
    systolic_column: String,
    diastolic_column: String,
    date_format: String,
    codec: LineCodec,
    dry_run: bool,
}

impl BloodPressureWorkbookAdapter {
    pub fn new(
        date_column: impl Into<String>,
        systolic_column: impl Into<String>,
        diastolic_column: impl Into<String>,
    ) -> Self {
        Self {
            date_column: date_column.into(),
            systolic_column: systolic_column.into(),
            diastolic_column: diastolic_column.into(),
            date_format: SpreadsheetConfig::default().date_format,
            codec: LineCodec::for_record::<BloodPressureRecord>(DEFAULT_DELIMITER),
            dry_run: false,
        }
    }

    pub fn from_config(config: &SpreadsheetConfig) -> Self {
        Self::new(
            &config.date_column_title,
            &config.systolic_column_title,
            &config.diastolic_column_title,
        )
        .with_date_format(&config.date_format)
    }

    /// chrono format tried first for the date portion of the date column
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.codec = LineCodec::new(delimiter, self.codec.style());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Synthesizes a header line plus one blood pressure line per
    /// non-blank data row
    ///
    /// # Errors
    ///
    /// Returns a spreadsheet error if a column is missing or a date
    /// cannot be parsed.
    pub fn lines(&self, sheet: &Worksheet, person: &Person) -> Result<Vec<String>> {
        let date_index = sheet.require_column(&self.date_column)?;
        let systolic_index = sheet.require_column(&self.systolic_column)?;
        let diastolic_index = sheet.require_column(&self.diastolic_column)?;

        let name = person.display_name();
        let mut lines = vec![self.codec.encode_fields(BloodPressureRecord::COLUMNS)?];

        for row in sheet.rows() {
            let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or_default();
            if cell(date_index).trim().is_empty() {
                continue;
            }

            let date = normalize_date(cell(date_index), &self.date_format)?;
            let when = date.and_time(NaiveTime::MIN);

            lines.push(self.codec.encode_fields(&[
                person.id.to_string(),
                name.clone(),
                self.codec.style().format(when),
                reading(cell(systolic_index)),
                reading(cell(diastolic_index)),
                String::new(),
            ])?);
        }

        Ok(lines)
    }

    /// Imports every reading on the source's first worksheet for the
    /// person with identifier `person_id`
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the person does not exist, a spreadsheet
    /// error if the sheet cannot be converted, or the import engine's
    /// error.
    pub async fn import(
        &self,
        source: &dyn WorksheetSource,
        person_id: i64,
        store: Arc<dyn HealthStore>,
    ) -> Result<ImportSummary> {
        let people = ReferenceCollection::new("Person", store.people().list().await?);
        let person = people.find_by_id(person_id)?;

        let sheet = source.first_worksheet()?;
        let lines = self.lines(&sheet, person)?;

        tracing::info!(
            person_id,
            readings = lines.len().saturating_sub(1),
            "Converted health monitor worksheet"
        );

        let mut engine = ImportEngine::new(BloodPressureImporter, store)
            .with_delimiter(self.codec.delimiter())
            .with_date_style(self.codec.style())
            .with_dry_run(self.dry_run);
        engine.import(&lines).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("13/02/2024 10:00", 2024, 2, 13 ; "swapped day first")]
    #[test_case("02/13/2024 10:00", 2024, 2, 13 ; "month first")]
    #[test_case("03/04/2024", 2024, 3, 4 ; "ambiguous parses month first")]
    fn test_normalize_date(value: &str, year: i32, month: u32, day: u32) {
        let date = normalize_date(value, "%m/%d/%Y").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(year, month, day).unwrap());
    }

    #[test_case("32/13/2024" ; "neither order valid")]
    #[test_case("2024-02-13" ; "wrong separator")]
    #[test_case("" ; "empty")]
    fn test_normalize_date_fails(value: &str) {
        let err = normalize_date(value, "%m/%d/%Y").unwrap_err();
        assert!(matches!(err, ExchangeError::Spreadsheet(_)));
    }

    #[test]
    fn test_reading_drops_zero_fraction() {
        assert_eq!(reading("120.0"), "120");
        assert_eq!(reading(" 80 "), "80");
        assert_eq!(reading("high"), "high");
    }

    #[test]
    fn test_lines_embed_person() {
        let sheet = Worksheet::new(
            vec![
                "Date".to_string(),
                "Systolic (mmHg)".to_string(),
                "Diastolic (mmHg)".to_string(),
            ],
            vec![
                vec!["13/02/2024 10:00".to_string(), "121".to_string(), "79".to_string()],
                vec![String::new(), String::new(), String::new()],
            ],
        );
        let person = Person {
            id: 4,
            first_names: "Jane".to_string(),
            surname: "Doe".to_string(),
            ..Default::default()
        };

        let adapter =
            BloodPressureWorkbookAdapter::new("Date", "Systolic (mmHg)", "Diastolic (mmHg)");
        let lines = adapter.lines(&sheet, &person).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            r#""4","Jane Doe","13-Feb-2024 00:00:00","121","79","""#
        );
    }

    #[test]
    fn test_missing_column() {
        let sheet = Worksheet::new(vec!["Date".to_string()], Vec::new());
        let adapter =
            BloodPressureWorkbookAdapter::new("Date", "Systolic (mmHg)", "Diastolic (mmHg)");
        let err = adapter.lines(&sheet, &Person::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Spreadsheet error: Column 'Systolic (mmHg)' not found in header row"
        );
    }
}
