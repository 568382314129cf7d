//! Flat records: self-contained, denormalised rows
//!
//! Every exchangeable record type has a flat record struct that holds each
//! field of one exported line. Foreign relationships are carried by their
//! human-readable name (plus the redundant identifier where one is useful
//! for round trips), so a flat record can be written to one delimited line
//! and read back without consulting any other record.
//!
//! # Line Format
//!
//! Every field is quoted and separated by a single configurable delimiter:
//!
//! ```text
//! "Person Id","Name","Date","Weight","BMI","Assessment","BMR"
//! "1","Jane Doe","13-Feb-2024 10:00:00","72.5","23.1","Normal","1450"
//! ```
//!
//! The "when" column is rendered in one of two [`DateStyle`]s, fixed per
//! record type and per call.

pub mod codec;
pub mod food;
pub mod measurements;
pub mod people;

pub use codec::{FieldReader, FieldWriter, LineCodec};
pub use food::{FoodItemRecord, MealFoodItemRecord, MealRecord, Nutrition, PlannedMealRecord};
pub use measurements::{
    BeverageConsumptionRecord, BloodGlucoseRecord, BloodOxygenSaturationRecord,
    BloodPressureRecord, CholesterolRecord, ExerciseRecord, MealConsumptionRecord,
    MeasurementRecord, WeightRecord,
};
pub use people::PersonRecord;

use crate::domain::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

/// How the "when" column of a record is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Date only, e.g. `13/02/2024`
    Date,
    /// Date and time, e.g. `13-Feb-2024 10:00:00`
    Timestamp,
}

impl DateStyle {
    pub const DATE_FORMAT: &'static str = "%d/%m/%Y";
    pub const TIMESTAMP_FORMAT: &'static str = "%d-%b-%Y %H:%M:%S";

    /// Renders a timestamp in this style. Date style drops the time.
    pub fn format(self, value: NaiveDateTime) -> String {
        match self {
            DateStyle::Date => value.format(Self::DATE_FORMAT).to_string(),
            DateStyle::Timestamp => value.format(Self::TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Parses a value written in this style. Date style yields midnight.
    pub fn parse(self, value: &str) -> Option<NaiveDateTime> {
        match self {
            DateStyle::Date => NaiveDate::parse_from_str(value, Self::DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN)),
            DateStyle::Timestamp => {
                NaiveDateTime::parse_from_str(value, Self::TIMESTAMP_FORMAT).ok()
            }
        }
    }
}

/// A record type that can be written to, and read from, one delimited line
pub trait FlatRecord: Sized {
    /// Column titles, in line order. Also the header line.
    const COLUMNS: &'static [&'static str];

    /// Rendering of the "when" column unless a call overrides it
    const DATE_STYLE: DateStyle = DateStyle::Timestamp;

    /// Appends this record's fields in column order
    fn write_fields(&self, fields: &mut FieldWriter);

    /// Reads one record's fields in column order
    ///
    /// # Errors
    ///
    /// Returns a format mismatch naming the column of the first field that
    /// cannot be parsed to its declared type.
    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_style() {
        let value = NaiveDate::from_ymd_opt(2024, 2, 13)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(DateStyle::Timestamp.format(value), "13-Feb-2024 10:00:00");
        assert_eq!(DateStyle::Timestamp.parse("13-Feb-2024 10:00:00"), Some(value));
    }

    #[test]
    fn test_date_style_drops_time() {
        let value = NaiveDate::from_ymd_opt(2024, 2, 13)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(DateStyle::Date.format(value), "13/02/2024");
        let parsed = DateStyle::Date.parse("13/02/2024").unwrap();
        assert_eq!(parsed.date(), value.date());
        assert_eq!(parsed.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_style_mismatch_fails() {
        assert!(DateStyle::Date.parse("13-Feb-2024 10:00:00").is_none());
        assert!(DateStyle::Timestamp.parse("13/02/2024").is_none());
    }
}
