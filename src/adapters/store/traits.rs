//! Persistence collaborator traits
//!
//! The exchange engine depends on these traits only. Transactional
//! semantics belong to the store implementation.

use crate::domain::{
    ActivityType, Beverage, BeverageConsumptionMeasurement, BloodGlucoseMeasurement,
    BloodOxygenSaturationMeasurement, BloodPressureMeasurement, CholesterolMeasurement,
    ExerciseMeasurement, FoodCategory, FoodItem, FoodSource, Meal, MealConsumptionMeasurement,
    MealFoodItem, NutritionalValue, Person, PlannedMeal, Result, WeightMeasurement,
};
use async_trait::async_trait;

/// Keyed storage for one aggregate type
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Adds an entity, returning it with its assigned identifier
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the entity violates a uniqueness
    /// constraint.
    async fn add(&self, entity: T) -> Result<T>;

    /// Lists every entity, in insertion order
    async fn list(&self) -> Result<Vec<T>>;

    /// Replaces the entity with the same identifier
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no entity has that identifier.
    async fn update(&self, entity: T) -> Result<T>;

    /// Deletes the entity with the given identifier
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no entity has that identifier.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// The full set of repositories the exchange engine reads and writes
pub trait HealthStore: Send + Sync {
    fn people(&self) -> &dyn Repository<Person>;
    fn beverages(&self) -> &dyn Repository<Beverage>;
    fn activity_types(&self) -> &dyn Repository<ActivityType>;
    fn food_categories(&self) -> &dyn Repository<FoodCategory>;
    fn food_sources(&self) -> &dyn Repository<FoodSource>;
    fn nutritional_values(&self) -> &dyn Repository<NutritionalValue>;
    fn food_items(&self) -> &dyn Repository<FoodItem>;
    fn meals(&self) -> &dyn Repository<Meal>;
    fn meal_food_items(&self) -> &dyn Repository<MealFoodItem>;
    fn planned_meals(&self) -> &dyn Repository<PlannedMeal>;
    fn weights(&self) -> &dyn Repository<WeightMeasurement>;
    fn blood_pressures(&self) -> &dyn Repository<BloodPressureMeasurement>;
    fn blood_glucose(&self) -> &dyn Repository<BloodGlucoseMeasurement>;
    fn blood_oxygen_saturation(&self) -> &dyn Repository<BloodOxygenSaturationMeasurement>;
    fn cholesterol(&self) -> &dyn Repository<CholesterolMeasurement>;
    fn exercise(&self) -> &dyn Repository<ExerciseMeasurement>;
    fn beverage_consumption(&self) -> &dyn Repository<BeverageConsumptionMeasurement>;
    fn meal_consumption(&self) -> &dyn Repository<MealConsumptionMeasurement>;
}
