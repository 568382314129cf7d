//! Flat records for measurements
//!
//! Every measurement line starts with the same three columns: the owning
//! person's identifier, their display name, and when the measurement was
//! taken.

use super::food::Nutrition;
use super::{DateStyle, FieldReader, FieldWriter, FlatRecord};
use crate::domain::Result;
use chrono::NaiveDateTime;

/// The columns shared by every measurement record
pub trait MeasurementRecord {
    fn person_id(&self) -> i64;
    fn name(&self) -> &str;
    fn date(&self) -> NaiveDateTime;
}

macro_rules! impl_measurement_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl MeasurementRecord for $ty {
                fn person_id(&self) -> i64 {
                    self.person_id
                }

                fn name(&self) -> &str {
                    &self.name
                }

                fn date(&self) -> NaiveDateTime {
                    self.date
                }
            }
        )+
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightRecord {
    pub person_id: i64,
    pub name: String,
    pub date: NaiveDateTime,
    pub weight: f64,
    pub bmi: f64,
    pub assessment: String,
    pub bmr: f64,
}

impl FlatRecord for WeightRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Person Id",
        "Name",
        "Date",
        "Weight",
        "BMI",
        "Assessment",
        "BMR",
    ];

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .integer(self.person_id)
            .text(&self.name)
            .when(self.date)
            .decimal(self.weight)
            .decimal(self.bmi)
            .text(&self.assessment)
            .decimal(self.bmr);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            person_id: fields.integer()?,
            name: fields.text()?,
            date: fields.when()?,
            weight: fields.decimal()?,
            bmi: fields.decimal()?,
            assessment: fields.text()?,
            bmr: fields.decimal()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BloodPressureRecord {
    pub person_id: i64,
    pub name: String,
    pub date: NaiveDateTime,
    pub systolic: i32,
    pub diastolic: i32,
    pub assessment: String,
}

impl FlatRecord for BloodPressureRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Person Id",
        "Name",
        "Date",
        "Systolic",
        "Diastolic",
        "Assessment",
    ];

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .integer(self.person_id)
            .text(&self.name)
            .when(self.date)
            .integer(self.systolic)
            .integer(self.diastolic)
            .text(&self.assessment);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            person_id: fields.integer()?,
            name: fields.text()?,
            date: fields.when()?,
            systolic: fields.integer()?,
            diastolic: fields.integer()?,
            assessment: fields.text()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BloodGlucoseRecord {
    pub person_id: i64,
    pub name: String,
    pub date: NaiveDateTime,
    pub level: f64,
    pub assessment: String,
}

impl FlatRecord for BloodGlucoseRecord {
    const COLUMNS: &'static [&'static str] =
        &["Person Id", "Name", "Date", "Level", "Assessment"];

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .integer(self.person_id)
            .text(&self.name)
            .when(self.date)
            .decimal(self.level)
            .text(&self.assessment);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            person_id: fields.integer()?,
            name: fields.text()?,
            date: fields.when()?,
            level: fields.decimal()?,
            assessment: fields.text()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BloodOxygenSaturationRecord {
    pub person_id: i64,
    pub name: String,
    pub date: NaiveDateTime,
    pub percentage: f64,
    pub assessment: String,
}

impl FlatRecord for BloodOxygenSaturationRecord {
    const COLUMNS: &'static [&'static str] =
        &["Person Id", "Name", "Date", "Percentage", "Assessment"];
    const DATE_STYLE: DateStyle = DateStyle::Date;

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .integer(self.person_id)
            .text(&self.name)
            .when(self.date)
            .decimal(self.percentage)
            .text(&self.assessment);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            person_id: fields.integer()?,
            name: fields.text()?,
            date: fields.when()?,
            percentage: fields.decimal()?,
            assessment: fields.text()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CholesterolRecord {
    pub person_id: i64,
    pub name: String,
    pub date: NaiveDateTime,
    pub total: f64,
    pub hdl: f64,
    pub ldl: f64,
    pub triglycerides: f64,
}

impl FlatRecord for CholesterolRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Person Id",
        "Name",
        "Date",
        "Total",
        "HDL",
        "LDL",
        "Triglycerides",
    ];
    const DATE_STYLE: DateStyle = DateStyle::Date;

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .integer(self.person_id)
            .text(&self.name)
            .when(self.date)
            .decimal(self.total)
            .decimal(self.hdl)
            .decimal(self.ldl)
            .decimal(self.triglycerides);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            person_id: fields.integer()?,
            name: fields.text()?,
            date: fields.when()?,
            total: fields.decimal()?,
            hdl: fields.decimal()?,
            ldl: fields.decimal()?,
            triglycerides: fields.decimal()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub person_id: i64,
    pub name: String,
    pub date: NaiveDateTime,
    pub activity_type: String,
    /// Duration in seconds, written as `HH:MM:SS`
    pub duration: u32,
    pub distance: Option<f64>,
    pub calories: i32,
    pub minimum_heart_rate: i32,
    pub maximum_heart_rate: i32,
}

impl FlatRecord for ExerciseRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Person Id",
        "Name",
        "Date",
        "Activity Type",
        "Duration",
        "Distance",
        "Calories",
        "Minimum Heart Rate",
        "Maximum Heart Rate",
    ];
    const DATE_STYLE: DateStyle = DateStyle::Date;

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .integer(self.person_id)
            .text(&self.name)
            .when(self.date)
            .text(&self.activity_type)
            .duration(self.duration)
            .optional_decimal(self.distance)
            .integer(self.calories)
            .integer(self.minimum_heart_rate)
            .integer(self.maximum_heart_rate);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            person_id: fields.integer()?,
            name: fields.text()?,
            date: fields.when()?,
            activity_type: fields.text()?,
            duration: fields.duration()?,
            distance: fields.optional_decimal()?,
            calories: fields.integer()?,
            minimum_heart_rate: fields.integer()?,
            maximum_heart_rate: fields.integer()?,
        })
    }
}

/// Beverage consumption. Also the shape of alcohol consumption exports.
#[derive(Debug, Clone, PartialEq)]
pub struct BeverageConsumptionRecord {
    pub person_id: i64,
    pub name: String,
    pub date: NaiveDateTime,
    pub beverage_id: i64,
    pub beverage: String,
    /// Numeric measure code
    pub measure: i32,
    pub measure_name: String,
    pub quantity: i32,
    pub volume: f64,
    pub abv: f64,
    pub units: f64,
}

impl FlatRecord for BeverageConsumptionRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Person Id",
        "Name",
        "Date",
        "Beverage Id",
        "Beverage",
        "Measure",
        "Measure Name",
        "Quantity",
        "Volume",
        "ABV",
        "Units",
    ];

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .integer(self.person_id)
            .text(&self.name)
            .when(self.date)
            .integer(self.beverage_id)
            .text(&self.beverage)
            .integer(self.measure)
            .text(&self.measure_name)
            .integer(self.quantity)
            .decimal(self.volume)
            .decimal(self.abv)
            .decimal(self.units);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            person_id: fields.integer()?,
            name: fields.text()?,
            date: fields.when()?,
            beverage_id: fields.integer()?,
            beverage: fields.text()?,
            measure: fields.integer()?,
            measure_name: fields.text()?,
            quantity: fields.integer()?,
            volume: fields.decimal()?,
            abv: fields.decimal()?,
            units: fields.decimal()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealConsumptionRecord {
    pub person_id: i64,
    pub name: String,
    pub date: NaiveDateTime,
    pub meal_id: i64,
    pub meal: String,
    pub quantity: f64,
    pub nutrition: Nutrition,
}

impl FlatRecord for MealConsumptionRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Person Id",
        "Name",
        "Date",
        "Meal Id",
        "Meal",
        "Quantity",
        "Calories",
        "Fat",
        "Saturated Fat",
        "Protein",
        "Carbohydrates",
        "Sugar",
        "Fibre",
    ];

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .integer(self.person_id)
            .text(&self.name)
            .when(self.date)
            .integer(self.meal_id)
            .text(&self.meal)
            .decimal(self.quantity);
        self.nutrition.write_fields(fields);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            person_id: fields.integer()?,
            name: fields.text()?,
            date: fields.when()?,
            meal_id: fields.integer()?,
            meal: fields.text()?,
            quantity: fields.decimal()?,
            nutrition: Nutrition::read_fields(fields)?,
        })
    }
}

impl_measurement_record!(
    WeightRecord,
    BloodPressureRecord,
    BloodGlucoseRecord,
    BloodOxygenSaturationRecord,
    CholesterolRecord,
    ExerciseRecord,
    BeverageConsumptionRecord,
    MealConsumptionRecord,
);
