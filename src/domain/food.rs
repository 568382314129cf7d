//! Food, meals and meal planning

use super::entity::{impl_entity, Named};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Nutrition per portion. Every value is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NutritionalValue {
    pub id: i64,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub sugar: Option<f64>,
    pub fibre: Option<f64>,
}

impl NutritionalValue {
    /// Values in column order: calories, fat, saturated fat, protein,
    /// carbohydrates, sugar, fibre
    pub fn values(&self) -> [Option<f64>; 7] {
        [
            self.calories,
            self.fat,
            self.saturated_fat,
            self.protein,
            self.carbohydrates,
            self.sugar,
            self.fibre,
        ]
    }

    /// True if any value is present and non-zero
    pub fn has_values(&self) -> bool {
        self.values().iter().flatten().any(|v| *v != 0.0)
    }

    /// An unsaved copy with every present value multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> NutritionalValue {
        let scale = |value: Option<f64>| value.map(|v| v * factor);
        NutritionalValue {
            id: 0,
            calories: scale(self.calories),
            fat: scale(self.fat),
            saturated_fat: scale(self.saturated_fat),
            protein: scale(self.protein),
            carbohydrates: scale(self.carbohydrates),
            sugar: scale(self.sugar),
            fibre: scale(self.fibre),
        }
    }
}

/// A single food that can be combined into meals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub portion: f64,
    pub food_category_id: i64,
    pub nutritional_value_id: Option<i64>,
    pub nutritional_value: Option<NutritionalValue>,
}

impl Named for FoodItem {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

/// A meal recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub portions: i32,
    pub food_source_id: i64,
    pub reference: String,
    pub nutritional_value_id: Option<i64>,
    pub nutritional_value: Option<NutritionalValue>,
}

impl Named for Meal {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

/// Membership of a food item in a meal. The store enforces one row per
/// (meal, food item) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MealFoodItem {
    pub id: i64,
    pub meal_id: i64,
    pub food_item_id: i64,
    pub quantity: f64,
    pub nutritional_value_id: Option<i64>,
    pub nutritional_value: Option<NutritionalValue>,
}

/// The slot a planned meal occupies in the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MealType {
    #[default]
    None,
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealType::None => "None",
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        };
        f.write_str(name)
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(MealType::None),
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(format!("Unknown meal type '{s}'")),
        }
    }
}

/// A meal scheduled for a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlannedMeal {
    pub id: i64,
    pub meal_type: MealType,
    pub date: NaiveDate,
    pub meal_id: i64,
}

impl_entity!(NutritionalValue, FoodItem, Meal, MealFoodItem, PlannedMeal);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_values() {
        let mut value = NutritionalValue::default();
        assert!(!value.has_values());

        value.fat = Some(0.0);
        assert!(!value.has_values());

        value.fibre = Some(2.5);
        assert!(value.has_values());
    }

    #[test]
    fn test_scaled_keeps_missing_values() {
        let value = NutritionalValue {
            id: 4,
            calories: Some(150.0),
            fibre: Some(2.0),
            ..Default::default()
        };
        let scaled = value.scaled(1.5);
        assert_eq!(scaled.id, 0);
        assert_eq!(scaled.calories, Some(225.0));
        assert_eq!(scaled.fibre, Some(3.0));
        assert_eq!(scaled.fat, None);
    }

    #[test]
    fn test_meal_type_round_trip() {
        for meal_type in [MealType::Breakfast, MealType::Lunch, MealType::Dinner] {
            assert_eq!(meal_type.to_string().parse::<MealType>().unwrap(), meal_type);
        }
        assert!("brunch".parse::<MealType>().is_err());
    }
}
