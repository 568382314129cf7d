//! Line codec for flat records
//!
//! Lines are tokenised and written with the `csv` crate. Every field is
//! quoted on output; embedded quotes are doubled.

use super::{DateStyle, FlatRecord};
use crate::domain::{ExchangeError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

/// Encodes and decodes flat records as single delimited lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCodec {
    delimiter: u8,
    style: DateStyle,
}

impl LineCodec {
    /// Creates a codec with an explicit delimiter and date style
    pub fn new(delimiter: u8, style: DateStyle) -> Self {
        Self { delimiter, style }
    }

    /// Creates a codec using the record type's own date style
    pub fn for_record<R: FlatRecord>(delimiter: u8) -> Self {
        Self::new(delimiter, R::DATE_STYLE)
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn style(&self) -> DateStyle {
        self.style
    }

    /// Renders a record's fields as text, in column order
    pub fn fields<R: FlatRecord>(&self, record: &R) -> Vec<String> {
        let mut writer = FieldWriter::new(self.style);
        record.write_fields(&mut writer);
        writer.into_fields()
    }

    /// Encodes one record as a line, without a terminator
    pub fn encode<R: FlatRecord>(&self, record: &R) -> Result<String> {
        self.encode_fields(&self.fields(record))
    }

    /// Encodes the header line for a record type
    pub fn header<R: FlatRecord>(&self) -> Result<String> {
        self.encode_fields(R::COLUMNS)
    }

    /// Encodes arbitrary field text as a quoted line
    pub fn encode_fields<S: AsRef<str>>(&self, fields: &[S]) -> Result<String> {
        let mut writer = self.writer(Vec::new());
        writer.write_record(fields.iter().map(|f| f.as_ref()))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| ExchangeError::Io(e.to_string()))?;
        let line = String::from_utf8(bytes)
            .map_err(|e| ExchangeError::Serialization(e.to_string()))?;
        Ok(line.trim_end_matches('\n').to_string())
    }

    /// Decodes one line into a typed record
    ///
    /// # Errors
    ///
    /// Returns a format mismatch at `position` if the line does not hold
    /// exactly one field per column or a field does not parse.
    pub fn decode<R: FlatRecord>(&self, line: &str, position: usize) -> Result<R> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_reader(line.as_bytes());

        let mut record = csv::StringRecord::new();
        let found = reader
            .read_record(&mut record)
            .map_err(|e| ExchangeError::format(position, e.to_string()))?;
        if !found {
            return Err(ExchangeError::format(position, "line is empty"));
        }

        if record.len() != R::COLUMNS.len() {
            return Err(ExchangeError::format(
                position,
                format!(
                    "expected {} fields, found {}",
                    R::COLUMNS.len(),
                    record.len()
                ),
            ));
        }

        let mut fields = FieldReader::new(&record, R::COLUMNS, self.style, position);
        R::read_fields(&mut fields)
    }

    /// Wraps `destination` in a writer that quotes every field
    pub fn writer<W: Write>(&self, destination: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(destination)
    }
}

/// Sequential, typed access to the fields of one tokenised line
pub struct FieldReader<'a> {
    record: &'a csv::StringRecord,
    columns: &'static [&'static str],
    style: DateStyle,
    position: usize,
    index: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(
        record: &'a csv::StringRecord,
        columns: &'static [&'static str],
        style: DateStyle,
        position: usize,
    ) -> Self {
        Self {
            record,
            columns,
            style,
            position,
            index: 0,
        }
    }

    /// The 1-based position of the record being read
    pub fn position(&self) -> usize {
        self.position
    }

    fn next_raw(&mut self) -> Result<(&'static str, &'a str)> {
        let column = self.columns.get(self.index).copied().unwrap_or("?");
        let value = self.record.get(self.index).ok_or_else(|| {
            ExchangeError::format(self.position, format!("missing value for column '{column}'"))
        })?;
        self.index += 1;
        Ok((column, value))
    }

    fn invalid(&self, column: &str, value: &str, expected: &str) -> ExchangeError {
        ExchangeError::format(
            self.position,
            format!("'{value}' in column '{column}' is not a valid {expected}"),
        )
    }

    pub fn text(&mut self) -> Result<String> {
        let (_, value) = self.next_raw()?;
        Ok(value.to_string())
    }

    pub fn integer<T: FromStr>(&mut self) -> Result<T> {
        let (column, value) = self.next_raw()?;
        value
            .trim()
            .parse()
            .map_err(|_| self.invalid(column, value, "whole number"))
    }

    pub fn decimal(&mut self) -> Result<f64> {
        let (column, value) = self.next_raw()?;
        parse_decimal(value).ok_or_else(|| self.invalid(column, value, "number"))
    }

    /// An empty field reads as `None`
    pub fn optional_decimal(&mut self) -> Result<Option<f64>> {
        let (column, value) = self.next_raw()?;
        if value.trim().is_empty() {
            return Ok(None);
        }
        parse_decimal(value)
            .map(Some)
            .ok_or_else(|| self.invalid(column, value, "number"))
    }

    /// The record's "when" column, in the codec's date style
    pub fn when(&mut self) -> Result<NaiveDateTime> {
        let (column, value) = self.next_raw()?;
        let style = self.style;
        style
            .parse(value.trim())
            .ok_or_else(|| self.invalid(column, value, "date"))
    }

    /// A calendar date column, always date style
    pub fn date(&mut self) -> Result<NaiveDate> {
        let (column, value) = self.next_raw()?;
        NaiveDate::parse_from_str(value.trim(), DateStyle::DATE_FORMAT)
            .map_err(|_| self.invalid(column, value, "date"))
    }

    /// An `HH:MM:SS` duration, in seconds
    pub fn duration(&mut self) -> Result<u32> {
        let (column, value) = self.next_raw()?;
        parse_duration(value.trim()).ok_or_else(|| self.invalid(column, value, "duration"))
    }
}

/// Builds the field text of one record, in column order
pub struct FieldWriter {
    style: DateStyle,
    fields: Vec<String>,
}

impl FieldWriter {
    pub fn new(style: DateStyle) -> Self {
        Self {
            style,
            fields: Vec::new(),
        }
    }

    pub fn text(&mut self, value: &str) -> &mut Self {
        self.fields.push(value.to_string());
        self
    }

    pub fn integer(&mut self, value: impl Display) -> &mut Self {
        self.fields.push(value.to_string());
        self
    }

    pub fn decimal(&mut self, value: f64) -> &mut Self {
        self.fields.push(value.to_string());
        self
    }

    pub fn optional_decimal(&mut self, value: Option<f64>) -> &mut Self {
        self.fields
            .push(value.map(|v| v.to_string()).unwrap_or_default());
        self
    }

    pub fn when(&mut self, value: NaiveDateTime) -> &mut Self {
        self.fields.push(self.style.format(value));
        self
    }

    pub fn date(&mut self, value: NaiveDate) -> &mut Self {
        self.fields
            .push(value.format(DateStyle::DATE_FORMAT).to_string());
        self
    }

    pub fn duration(&mut self, seconds: u32) -> &mut Self {
        self.fields.push(format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        ));
        self
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

fn parse_decimal(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_duration(value: &str) -> Option<u32> {
    let mut parts = value.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }
    hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::WeightRecord;
    use test_case::test_case;

    fn weight_record() -> WeightRecord {
        WeightRecord {
            person_id: 1,
            name: "Jane Doe".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 13)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            weight: 72.5,
            bmi: 23.1,
            assessment: "Normal".to_string(),
            bmr: 1450.0,
        }
    }

    #[test]
    fn test_encode_quotes_every_field() {
        let codec = LineCodec::for_record::<WeightRecord>(b',');
        let line = codec.encode(&weight_record()).unwrap();
        assert_eq!(
            line,
            r#""1","Jane Doe","13-Feb-2024 10:00:00","72.5","23.1","Normal","1450""#
        );
    }

    #[test]
    fn test_header_line() {
        let codec = LineCodec::for_record::<WeightRecord>(b',');
        assert_eq!(
            codec.header::<WeightRecord>().unwrap(),
            r#""Person Id","Name","Date","Weight","BMI","Assessment","BMR""#
        );
    }

    #[test]
    fn test_decode_encoded_line() {
        let codec = LineCodec::for_record::<WeightRecord>(b';');
        let line = codec.encode(&weight_record()).unwrap();
        assert!(line.contains("\";\""));
        let decoded: WeightRecord = codec.decode(&line, 1).unwrap();
        assert_eq!(decoded, weight_record());
    }

    #[test]
    fn test_embedded_quotes_survive() {
        let mut record = weight_record();
        record.assessment = r#"Slightly "high""#.to_string();
        let codec = LineCodec::for_record::<WeightRecord>(b',');
        let line = codec.encode(&record).unwrap();
        assert!(line.contains(r#""Slightly ""high""""#));
        let decoded: WeightRecord = codec.decode(&line, 1).unwrap();
        assert_eq!(decoded.assessment, record.assessment);
    }

    #[test]
    fn test_decode_reports_bad_column() {
        let codec = LineCodec::for_record::<WeightRecord>(b',');
        let line = r#""1","Jane Doe","13-Feb-2024 10:00:00","heavy","23.1","Normal","1450""#;
        let err = codec.decode::<WeightRecord>(line, 4).unwrap_err();
        assert_eq!(err.record_position(), Some(4));
        assert!(err.to_string().contains("Weight"));
    }

    #[test]
    fn test_decode_rejects_field_count() {
        let codec = LineCodec::for_record::<WeightRecord>(b',');
        let err = codec.decode::<WeightRecord>(r#""1","Jane Doe""#, 2).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidRecordFormat { record: 2, .. }));
    }

    #[test_case("00:00:01", Some(1) ; "one second")]
    #[test_case("01:30:00", Some(5400) ; "ninety minutes")]
    #[test_case("10:05:07", Some(36307) ; "mixed")]
    #[test_case("00:60:00", None ; "minutes out of range")]
    #[test_case("1:2", None ; "missing part")]
    #[test_case("aa:00:00", None ; "not a number")]
    fn test_parse_duration(value: &str, expected: Option<u32>) {
        assert_eq!(parse_duration(value), expected);
    }

    #[test]
    fn test_duration_format() {
        let mut writer = FieldWriter::new(DateStyle::Date);
        writer.duration(36307);
        assert_eq!(writer.into_fields(), vec!["10:05:07".to_string()]);
    }

    #[test]
    fn test_optional_decimal() {
        let mut writer = FieldWriter::new(DateStyle::Date);
        writer.optional_decimal(None).optional_decimal(Some(2.5));
        assert_eq!(writer.into_fields(), vec!["".to_string(), "2.5".to_string()]);
    }
}
