//! Flat record for people

use super::{DateStyle, FieldReader, FieldWriter, FlatRecord};
use crate::domain::Result;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub first_names: String,
    pub surname: String,
    pub date_of_birth: NaiveDate,
    pub height: f64,
    pub gender: String,
}

impl FlatRecord for PersonRecord {
    const COLUMNS: &'static [&'static str] =
        &["First Names", "Surname", "Date Of Birth", "Height", "Gender"];
    const DATE_STYLE: DateStyle = DateStyle::Date;

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .text(&self.first_names)
            .text(&self.surname)
            .date(self.date_of_birth)
            .decimal(self.height)
            .text(&self.gender);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            first_names: fields.text()?,
            surname: fields.text()?,
            date_of_birth: fields.date()?,
            height: fields.decimal()?,
            gender: fields.text()?,
        })
    }
}
