//! Flat records for food items, meals, meal composition and meal plans

use super::{DateStyle, FieldReader, FieldWriter, FlatRecord};
use crate::domain::{NutritionalValue, Result};
use chrono::NaiveDate;

/// The seven optional nutrition columns that close several record types
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Nutrition {
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub sugar: Option<f64>,
    pub fibre: Option<f64>,
}

impl Nutrition {
    pub fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .optional_decimal(self.calories)
            .optional_decimal(self.fat)
            .optional_decimal(self.saturated_fat)
            .optional_decimal(self.protein)
            .optional_decimal(self.carbohydrates)
            .optional_decimal(self.sugar)
            .optional_decimal(self.fibre);
    }

    pub fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            calories: fields.optional_decimal()?,
            fat: fields.optional_decimal()?,
            saturated_fat: fields.optional_decimal()?,
            protein: fields.optional_decimal()?,
            carbohydrates: fields.optional_decimal()?,
            sugar: fields.optional_decimal()?,
            fibre: fields.optional_decimal()?,
        })
    }

    /// Builds an unsaved nutritional value from these columns
    pub fn to_value(&self) -> NutritionalValue {
        NutritionalValue {
            id: 0,
            calories: self.calories,
            fat: self.fat,
            saturated_fat: self.saturated_fat,
            protein: self.protein,
            carbohydrates: self.carbohydrates,
            sugar: self.sugar,
            fibre: self.fibre,
        }
    }

    /// Copies an optional nutritional value into columns. `None` gives
    /// empty columns.
    pub fn from_value(value: Option<&NutritionalValue>) -> Self {
        match value {
            Some(value) => Self {
                calories: value.calories,
                fat: value.fat,
                saturated_fat: value.saturated_fat,
                protein: value.protein,
                carbohydrates: value.carbohydrates,
                sugar: value.sugar,
                fibre: value.fibre,
            },
            None => Self::default(),
        }
    }

    /// True if every column is empty
    pub fn is_empty(&self) -> bool {
        self.to_value().values().iter().all(Option::is_none)
    }

    /// `None` when every column is empty
    pub fn to_optional_value(&self) -> Option<NutritionalValue> {
        (!self.is_empty()).then(|| self.to_value())
    }

    /// Column names and values, in column order
    pub fn named_values(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("Calories", self.calories),
            ("Fat", self.fat),
            ("SaturatedFat", self.saturated_fat),
            ("Protein", self.protein),
            ("Carbohydrates", self.carbohydrates),
            ("Sugar", self.sugar),
            ("Fibre", self.fibre),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodItemRecord {
    pub name: String,
    pub category: String,
    pub portion: f64,
    pub nutrition: Nutrition,
}

impl FlatRecord for FoodItemRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Name",
        "Category",
        "Portion",
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
            .text(&self.name)
            .text(&self.category)
            .decimal(self.portion);
        self.nutrition.write_fields(fields);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.text()?,
            category: fields.text()?,
            portion: fields.decimal()?,
            nutrition: Nutrition::read_fields(fields)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealRecord {
    pub name: String,
    pub source: String,
    pub reference: String,
    pub portions: i32,
    pub nutrition: Nutrition,
}

impl FlatRecord for MealRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Name",
        "Source",
        "Reference",
        "Portions",
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
            .text(&self.name)
            .text(&self.source)
            .text(&self.reference)
            .integer(self.portions);
        self.nutrition.write_fields(fields);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.text()?,
            source: fields.text()?,
            reference: fields.text()?,
            portions: fields.integer()?,
            nutrition: Nutrition::read_fields(fields)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealFoodItemRecord {
    pub meal: String,
    pub food_item: String,
    pub quantity: f64,
    pub nutrition: Nutrition,
}

impl FlatRecord for MealFoodItemRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Meal",
        "Food Item",
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
            .text(&self.meal)
            .text(&self.food_item)
            .decimal(self.quantity);
        self.nutrition.write_fields(fields);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            meal: fields.text()?,
            food_item: fields.text()?,
            quantity: fields.decimal()?,
            nutrition: Nutrition::read_fields(fields)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMealRecord {
    pub meal_type: String,
    pub date: NaiveDate,
    pub meal: String,
}

impl FlatRecord for PlannedMealRecord {
    const COLUMNS: &'static [&'static str] = &["Meal Type", "Date", "Meal"];
    const DATE_STYLE: DateStyle = DateStyle::Date;

    fn write_fields(&self, fields: &mut FieldWriter) {
        fields
            .text(&self.meal_type)
            .date(self.date)
            .text(&self.meal);
    }

    fn read_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            meal_type: fields.text()?,
            date: fields.date()?,
            meal: fields.text()?,
        })
    }
}
