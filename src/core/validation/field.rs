//! Field validator
//!
//! Stateless predicate checks on single scalar values. A failed check is a
//! field value rejection naming the field and the record position.

use crate::domain::{ExchangeError, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Checks `predicate(value)`, rejecting `field` at `record` if it is false
///
/// # Examples
///
/// ```
/// use healthx::core::validation::validate_field;
///
/// assert!(validate_field(|w: &f64| *w > 0.0, &72.5, "Weight", 1).is_ok());
///
/// let err = validate_field(|w: &f64| *w > 0.0, &0.0, "Weight", 1).unwrap_err();
/// assert_eq!(err.to_string(), "Invalid value for 'Weight' at record 1");
/// ```
pub fn validate_field<T: ?Sized>(
    predicate: impl FnOnce(&T) -> bool,
    value: &T,
    field: &str,
    record: usize,
) -> Result<()> {
    if predicate(value) {
        Ok(())
    } else {
        Err(ExchangeError::field(field, record))
    }
}

pub fn require_text(value: &str, field: &str, record: usize) -> Result<()> {
    validate_field(|v: &str| !v.trim().is_empty(), value, field, record)
}

pub fn require_positive(value: f64, field: &str, record: usize) -> Result<()> {
    validate_field(|v: &f64| *v > 0.0, &value, field, record)
}

pub fn require_non_negative(value: f64, field: &str, record: usize) -> Result<()> {
    validate_field(|v: &f64| *v >= 0.0, &value, field, record)
}

/// Missing values pass
pub fn require_optional_non_negative(
    value: Option<f64>,
    field: &str,
    record: usize,
) -> Result<()> {
    validate_field(
        |v: &Option<f64>| v.map_or(true, |v| v >= 0.0),
        &value,
        field,
        record,
    )
}

pub fn require_not_future(
    value: NaiveDateTime,
    now: NaiveDateTime,
    field: &str,
    record: usize,
) -> Result<()> {
    validate_field(|v: &NaiveDateTime| *v <= now, &value, field, record)
}

pub fn require_date_not_future(
    value: NaiveDate,
    now: NaiveDateTime,
    field: &str,
    record: usize,
) -> Result<()> {
    validate_field(|v: &NaiveDate| *v <= now.date(), &value, field, record)
}
