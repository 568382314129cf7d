//! Domain models and types for HealthX.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Reference data** ([`Person`], [`Beverage`], [`ActivityType`], [`FoodCategory`], [`FoodSource`])
//! - **Food and meal aggregates** ([`FoodItem`], [`Meal`], [`MealFoodItem`], [`PlannedMeal`])
//! - **Measurements** ([`WeightMeasurement`], [`BloodPressureMeasurement`], ...)
//! - **Error types** ([`ExchangeError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! Aggregates are owned by the store. The exchange engine borrows them to
//! run projections and only writes the surrogate key the store assigns.
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ExchangeError>`]:
//!
//! ```rust
//! use healthx::domain::{ExchangeError, Result};
//!
//! fn check_weight(weight: f64, record: usize) -> Result<()> {
//!     if weight <= 0.0 {
//!         return Err(ExchangeError::field("Weight", record));
//!     }
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod errors;
pub mod food;
pub mod measurements;
pub mod people;
pub mod result;

// Re-export commonly used types for convenience
pub use entity::{Entity, Named};
pub use errors::{ExchangeError, StoreError};
pub use food::{FoodItem, Meal, MealFoodItem, MealType, NutritionalValue, PlannedMeal};
pub use measurements::{
    BeverageConsumptionMeasurement, BeverageMeasure, BloodGlucoseMeasurement,
    BloodOxygenSaturationMeasurement, BloodPressureMeasurement, CholesterolMeasurement,
    ExerciseMeasurement, MealConsumptionMeasurement, Measurement, WeightMeasurement,
};
pub use people::{ActivityType, Beverage, FoodCategory, FoodSource, Gender, Person};
pub use result::Result;
