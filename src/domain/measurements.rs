//! Health measurements recorded against a person
//!
//! Computed fields (BMI, BMR, assessment labels, alcohol units) are filled in
//! by collaborators outside the exchange engine. The engine copies them to
//! and from flat records but never derives them.

use super::entity::impl_entity;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Common accessors for measurements, used for filtering exports
pub trait Measurement {
    fn person_id(&self) -> i64;
    fn date(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeightMeasurement {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDateTime,
    pub weight: f64,
    pub bmi: f64,
    pub bmi_assessment: String,
    pub bmr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BloodPressureMeasurement {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDateTime,
    pub systolic: i32,
    pub diastolic: i32,
    pub assessment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BloodGlucoseMeasurement {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDateTime,
    pub level: f64,
    pub assessment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BloodOxygenSaturationMeasurement {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDateTime,
    pub percentage: f64,
    pub assessment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CholesterolMeasurement {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDateTime,
    pub total: f64,
    pub hdl: f64,
    pub ldl: f64,
    pub triglycerides: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExerciseMeasurement {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDateTime,
    pub activity_type_id: i64,
    /// Duration in seconds
    pub duration: u32,
    pub distance: Option<f64>,
    pub calories: i32,
    pub minimum_heart_rate: i32,
    pub maximum_heart_rate: i32,
}

/// Standard serving sizes for beverages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BeverageMeasure {
    #[default]
    None,
    Pint,
    LargeGlass,
    MediumGlass,
    SmallGlass,
    Shot,
}

impl BeverageMeasure {
    /// The numeric code used in flat records
    pub fn code(self) -> i32 {
        match self {
            BeverageMeasure::None => 0,
            BeverageMeasure::Pint => 1,
            BeverageMeasure::LargeGlass => 2,
            BeverageMeasure::MediumGlass => 3,
            BeverageMeasure::SmallGlass => 4,
            BeverageMeasure::Shot => 5,
        }
    }

    /// Looks up a measure from its numeric code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(BeverageMeasure::None),
            1 => Some(BeverageMeasure::Pint),
            2 => Some(BeverageMeasure::LargeGlass),
            3 => Some(BeverageMeasure::MediumGlass),
            4 => Some(BeverageMeasure::SmallGlass),
            5 => Some(BeverageMeasure::Shot),
            _ => None,
        }
    }
}

impl fmt::Display for BeverageMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BeverageMeasure::None => "None",
            BeverageMeasure::Pint => "Pint",
            BeverageMeasure::LargeGlass => "Large Glass",
            BeverageMeasure::MediumGlass => "Medium Glass",
            BeverageMeasure::SmallGlass => "Small Glass",
            BeverageMeasure::Shot => "Shot",
        };
        f.write_str(name)
    }
}

impl FromStr for BeverageMeasure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        match normalised.to_lowercase().as_str() {
            "none" => Ok(BeverageMeasure::None),
            "pint" => Ok(BeverageMeasure::Pint),
            "largeglass" => Ok(BeverageMeasure::LargeGlass),
            "mediumglass" => Ok(BeverageMeasure::MediumGlass),
            "smallglass" => Ok(BeverageMeasure::SmallGlass),
            "shot" => Ok(BeverageMeasure::Shot),
            _ => Err(format!("Unknown beverage measure '{s}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BeverageConsumptionMeasurement {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDateTime,
    pub beverage_id: i64,
    pub measure: BeverageMeasure,
    pub quantity: i32,
    pub volume: f64,
    pub abv: f64,
    pub units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MealConsumptionMeasurement {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDateTime,
    pub meal_id: i64,
    pub quantity: f64,
    pub nutritional_value_id: Option<i64>,
    pub nutritional_value: Option<super::food::NutritionalValue>,
}

macro_rules! impl_measurement {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Measurement for $ty {
                fn person_id(&self) -> i64 {
                    self.person_id
                }

                fn date(&self) -> NaiveDateTime {
                    self.date
                }
            }
        )+
    };
}

impl_measurement!(
    WeightMeasurement,
    BloodPressureMeasurement,
    BloodGlucoseMeasurement,
    BloodOxygenSaturationMeasurement,
    CholesterolMeasurement,
    ExerciseMeasurement,
    BeverageConsumptionMeasurement,
    MealConsumptionMeasurement,
);

impl_entity!(
    WeightMeasurement,
    BloodPressureMeasurement,
    BloodGlucoseMeasurement,
    BloodOxygenSaturationMeasurement,
    CholesterolMeasurement,
    ExerciseMeasurement,
    BeverageConsumptionMeasurement,
    MealConsumptionMeasurement,
);
