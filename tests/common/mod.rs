//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use healthx::adapters::store::{MemoryStore, StoreSnapshot};
use healthx::domain::{
    ActivityType, Beverage, BeverageConsumptionMeasurement, BeverageMeasure, FoodCategory,
    FoodItem, FoodSource, Gender, Meal, NutritionalValue, Person, WeightMeasurement,
};
use std::sync::Arc;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

pub fn apple_nutrition() -> NutritionalValue {
    NutritionalValue {
        id: 1,
        calories: Some(52.0),
        fat: Some(0.2),
        saturated_fat: None,
        protein: Some(0.3),
        carbohydrates: Some(14.0),
        sugar: Some(10.0),
        fibre: Some(2.4),
    }
}

pub fn porridge_nutrition() -> NutritionalValue {
    NutritionalValue {
        id: 2,
        calories: Some(300.0),
        fat: Some(6.0),
        protein: Some(10.0),
        ..Default::default()
    }
}

/// Reference data every scenario relies on
pub fn reference_snapshot() -> StoreSnapshot {
    StoreSnapshot {
        people: vec![
            Person {
                id: 1,
                first_names: "Jane".to_string(),
                surname: "Doe".to_string(),
                date_of_birth: date(1980, 5, 1),
                height: 1.68,
                gender: Gender::Female,
            },
            Person {
                id: 2,
                first_names: "John".to_string(),
                surname: "Smith".to_string(),
                date_of_birth: date(1975, 11, 23),
                height: 1.82,
                gender: Gender::Male,
            },
        ],
        beverages: vec![
            Beverage {
                id: 1,
                name: "Water".to_string(),
                typical_abv: 0.0,
                is_hydrating: true,
                is_alcohol: false,
            },
            Beverage {
                id: 2,
                name: "Beer".to_string(),
                typical_abv: 4.5,
                is_hydrating: false,
                is_alcohol: true,
            },
        ],
        activity_types: vec![
            ActivityType {
                id: 1,
                description: "Running".to_string(),
                distance_based: true,
                calories_per_minute: Some(11.0),
            },
            ActivityType {
                id: 2,
                description: "Yoga".to_string(),
                distance_based: false,
                calories_per_minute: None,
            },
        ],
        food_categories: vec![FoodCategory {
            id: 1,
            name: "Fruit".to_string(),
        }],
        food_sources: vec![FoodSource {
            id: 1,
            name: "Home Cooking".to_string(),
        }],
        nutritional_values: vec![apple_nutrition(), porridge_nutrition()],
        food_items: vec![FoodItem {
            id: 1,
            name: "Apple".to_string(),
            portion: 100.0,
            food_category_id: 1,
            nutritional_value_id: Some(1),
            nutritional_value: Some(apple_nutrition()),
        }],
        meals: vec![Meal {
            id: 1,
            name: "Porridge".to_string(),
            portions: 1,
            food_source_id: 1,
            reference: String::new(),
            nutritional_value_id: Some(2),
            nutritional_value: Some(porridge_nutrition()),
        }],
        ..Default::default()
    }
}

/// A store holding only reference data
pub fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::from_snapshot(reference_snapshot()))
}

/// A store holding reference data plus a few measurements for each person
pub fn populated_store() -> Arc<MemoryStore> {
    let mut snapshot = reference_snapshot();
    snapshot.weights = vec![
        WeightMeasurement {
            id: 1,
            person_id: 1,
            date: at(2024, 2, 13, 10, 0),
            weight: 72.5,
            bmi: 25.7,
            bmi_assessment: "Overweight".to_string(),
            bmr: 1450.0,
        },
        WeightMeasurement {
            id: 2,
            person_id: 2,
            date: at(2024, 2, 14, 7, 30),
            weight: 88.0,
            bmi: 26.6,
            bmi_assessment: "Overweight".to_string(),
            bmr: 1820.0,
        },
        WeightMeasurement {
            id: 3,
            person_id: 1,
            date: at(2024, 3, 1, 8, 15),
            weight: 71.9,
            bmi: 25.5,
            bmi_assessment: "Overweight".to_string(),
            bmr: 1445.0,
        },
    ];
    snapshot.beverage_consumption = vec![
        BeverageConsumptionMeasurement {
            id: 1,
            person_id: 1,
            date: at(2024, 2, 13, 12, 0),
            beverage_id: 1,
            measure: BeverageMeasure::LargeGlass,
            quantity: 2,
            volume: 500.0,
            abv: 0.0,
            units: 0.0,
        },
        BeverageConsumptionMeasurement {
            id: 2,
            person_id: 1,
            date: at(2024, 2, 13, 19, 0),
            beverage_id: 2,
            measure: BeverageMeasure::Pint,
            quantity: 1,
            volume: 568.0,
            abv: 4.5,
            units: 2.6,
        },
    ];
    Arc::new(MemoryStore::from_snapshot(snapshot))
}

/// Prepends `header` to `rows`
pub fn batch(header: &str, rows: &[&str]) -> Vec<String> {
    std::iter::once(header)
        .chain(rows.iter().copied())
        .map(str::to_string)
        .collect()
}

pub const WEIGHT_HEADER: &str = r#""Person Id","Name","Date","Weight","BMI","Assessment","BMR""#;
