//! In-memory store
//!
//! A [`HealthStore`] backed by vectors behind `tokio` read/write locks.
//! Identifiers are assigned sequentially per repository. The whole store
//! can be saved to, and loaded from, a JSON snapshot so the CLI can keep
//! data between runs.

use super::traits::{HealthStore, Repository};
use crate::domain::{
    ActivityType, Beverage, BeverageConsumptionMeasurement, BloodGlucoseMeasurement,
    BloodOxygenSaturationMeasurement, BloodPressureMeasurement, CholesterolMeasurement, Entity,
    ExerciseMeasurement, FoodCategory, FoodItem, FoodSource, Meal, MealConsumptionMeasurement,
    MealFoodItem, NutritionalValue, Person, PlannedMeal, Result, StoreError, WeightMeasurement,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;

struct RepositoryState<T> {
    next_id: i64,
    entities: Vec<T>,
}

/// A single in-memory repository
pub struct MemoryRepository<T> {
    label: &'static str,
    state: RwLock<RepositoryState<T>>,
    unique_key: Option<fn(&T) -> String>,
}

impl<T: Entity + Clone + Send + Sync> MemoryRepository<T> {
    /// Creates an empty repository. `label` names the entity in errors.
    pub fn new(label: &'static str) -> Self {
        Self::with_entities(label, Vec::new())
    }

    /// Creates a repository holding `entities`. New identifiers continue
    /// from the highest existing one.
    pub fn with_entities(label: &'static str, entities: Vec<T>) -> Self {
        let next_id = entities.iter().map(Entity::id).max().unwrap_or(0) + 1;
        Self {
            label,
            state: RwLock::new(RepositoryState { next_id, entities }),
            unique_key: None,
        }
    }

    /// Rejects adds whose key matches an existing entity's key
    pub fn with_unique_key(mut self, key: fn(&T) -> String) -> Self {
        self.unique_key = Some(key);
        self
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn entities(&self) -> Vec<T> {
        self.state.read().await.entities.clone()
    }

    fn missing(&self, id: i64) -> StoreError {
        StoreError::NotFound(format!("{} {id}", self.label))
    }
}

#[async_trait]
impl<T: Entity + Clone + Send + Sync + 'static> Repository<T> for MemoryRepository<T> {
    async fn add(&self, mut entity: T) -> Result<T> {
        let mut state = self.state.write().await;

        if let Some(key) = self.unique_key {
            let candidate = key(&entity);
            if state.entities.iter().any(|existing| key(existing) == candidate) {
                return Err(StoreError::Conflict(format!(
                    "{} with {candidate} already exists",
                    self.label
                ))
                .into());
            }
        }

        entity.set_id(state.next_id);
        state.next_id += 1;
        state.entities.push(entity.clone());

        tracing::trace!(entity = self.label, id = entity.id(), "Entity added");
        Ok(entity)
    }

    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.entities().await)
    }

    async fn update(&self, entity: T) -> Result<T> {
        let mut state = self.state.write().await;
        let slot = state
            .entities
            .iter_mut()
            .find(|existing| existing.id() == entity.id())
            .ok_or_else(|| self.missing(entity.id()))?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let index = state
            .entities
            .iter()
            .position(|existing| existing.id() == id)
            .ok_or_else(|| self.missing(id))?;
        state.entities.remove(index);
        Ok(())
    }
}

/// Serialisable contents of a [`MemoryStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    pub people: Vec<Person>,
    pub beverages: Vec<Beverage>,
    pub activity_types: Vec<ActivityType>,
    pub food_categories: Vec<FoodCategory>,
    pub food_sources: Vec<FoodSource>,
    pub nutritional_values: Vec<NutritionalValue>,
    pub food_items: Vec<FoodItem>,
    pub meals: Vec<Meal>,
    pub meal_food_items: Vec<MealFoodItem>,
    pub planned_meals: Vec<PlannedMeal>,
    pub weights: Vec<WeightMeasurement>,
    pub blood_pressures: Vec<BloodPressureMeasurement>,
    pub blood_glucose: Vec<BloodGlucoseMeasurement>,
    pub blood_oxygen_saturation: Vec<BloodOxygenSaturationMeasurement>,
    pub cholesterol: Vec<CholesterolMeasurement>,
    pub exercise: Vec<ExerciseMeasurement>,
    pub beverage_consumption: Vec<BeverageConsumptionMeasurement>,
    pub meal_consumption: Vec<MealConsumptionMeasurement>,
}

/// In-memory [`HealthStore`]
pub struct MemoryStore {
    people: MemoryRepository<Person>,
    beverages: MemoryRepository<Beverage>,
    activity_types: MemoryRepository<ActivityType>,
    food_categories: MemoryRepository<FoodCategory>,
    food_sources: MemoryRepository<FoodSource>,
    nutritional_values: MemoryRepository<NutritionalValue>,
    food_items: MemoryRepository<FoodItem>,
    meals: MemoryRepository<Meal>,
    meal_food_items: MemoryRepository<MealFoodItem>,
    planned_meals: MemoryRepository<PlannedMeal>,
    weights: MemoryRepository<WeightMeasurement>,
    blood_pressures: MemoryRepository<BloodPressureMeasurement>,
    blood_glucose: MemoryRepository<BloodGlucoseMeasurement>,
    blood_oxygen_saturation: MemoryRepository<BloodOxygenSaturationMeasurement>,
    cholesterol: MemoryRepository<CholesterolMeasurement>,
    exercise: MemoryRepository<ExerciseMeasurement>,
    beverage_consumption: MemoryRepository<BeverageConsumptionMeasurement>,
    meal_consumption: MemoryRepository<MealConsumptionMeasurement>,
}

fn meal_food_item_key(item: &MealFoodItem) -> String {
    format!("meal {} and food item {}", item.meal_id, item.food_item_id)
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }

    /// Creates a store holding the snapshot's contents
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            people: MemoryRepository::with_entities("person", snapshot.people),
            beverages: MemoryRepository::with_entities("beverage", snapshot.beverages),
            activity_types: MemoryRepository::with_entities(
                "activity type",
                snapshot.activity_types,
            ),
            food_categories: MemoryRepository::with_entities(
                "food category",
                snapshot.food_categories,
            ),
            food_sources: MemoryRepository::with_entities("food source", snapshot.food_sources),
            nutritional_values: MemoryRepository::with_entities(
                "nutritional value",
                snapshot.nutritional_values,
            ),
            food_items: MemoryRepository::with_entities("food item", snapshot.food_items),
            meals: MemoryRepository::with_entities("meal", snapshot.meals),
            meal_food_items: MemoryRepository::with_entities(
                "meal/food item relationship",
                snapshot.meal_food_items,
            )
            .with_unique_key(meal_food_item_key),
            planned_meals: MemoryRepository::with_entities("planned meal", snapshot.planned_meals),
            weights: MemoryRepository::with_entities("weight measurement", snapshot.weights),
            blood_pressures: MemoryRepository::with_entities(
                "blood pressure measurement",
                snapshot.blood_pressures,
            ),
            blood_glucose: MemoryRepository::with_entities(
                "blood glucose measurement",
                snapshot.blood_glucose,
            ),
            blood_oxygen_saturation: MemoryRepository::with_entities(
                "blood oxygen saturation measurement",
                snapshot.blood_oxygen_saturation,
            ),
            cholesterol: MemoryRepository::with_entities(
                "cholesterol measurement",
                snapshot.cholesterol,
            ),
            exercise: MemoryRepository::with_entities("exercise", snapshot.exercise),
            beverage_consumption: MemoryRepository::with_entities(
                "beverage consumption",
                snapshot.beverage_consumption,
            ),
            meal_consumption: MemoryRepository::with_entities(
                "meal consumption",
                snapshot.meal_consumption,
            ),
        }
    }

    /// Loads a store from a JSON snapshot. A missing file gives an empty
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No store snapshot found, starting empty");
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            StoreError::Snapshot(format!("Failed to read {}: {e}", path.display()))
        })?;
        let snapshot: StoreSnapshot = serde_json::from_str(&contents).map_err(|e| {
            StoreError::Snapshot(format!("Failed to parse {}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), people = snapshot.people.len(), "Store snapshot loaded");
        Ok(Self::from_snapshot(snapshot))
    }

    /// Captures the current contents
    pub async fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            people: self.people.entities().await,
            beverages: self.beverages.entities().await,
            activity_types: self.activity_types.entities().await,
            food_categories: self.food_categories.entities().await,
            food_sources: self.food_sources.entities().await,
            nutritional_values: self.nutritional_values.entities().await,
            food_items: self.food_items.entities().await,
            meals: self.meals.entities().await,
            meal_food_items: self.meal_food_items.entities().await,
            planned_meals: self.planned_meals.entities().await,
            weights: self.weights.entities().await,
            blood_pressures: self.blood_pressures.entities().await,
            blood_glucose: self.blood_glucose.entities().await,
            blood_oxygen_saturation: self.blood_oxygen_saturation.entities().await,
            cholesterol: self.cholesterol.entities().await,
            exercise: self.exercise.entities().await,
            beverage_consumption: self.beverage_consumption.entities().await,
            meal_consumption: self.meal_consumption.entities().await,
        }
    }

    /// Writes the current contents to a JSON snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = self.snapshot().await;
        let contents = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::Snapshot(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(path, contents).await.map_err(|e| {
            StoreError::Snapshot(format!("Failed to write {}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), "Store snapshot saved");
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthStore for MemoryStore {
    fn people(&self) -> &dyn Repository<Person> {
        &self.people
    }

    fn beverages(&self) -> &dyn Repository<Beverage> {
        &self.beverages
    }

    fn activity_types(&self) -> &dyn Repository<ActivityType> {
        &self.activity_types
    }

    fn food_categories(&self) -> &dyn Repository<FoodCategory> {
        &self.food_categories
    }

    fn food_sources(&self) -> &dyn Repository<FoodSource> {
        &self.food_sources
    }

    fn nutritional_values(&self) -> &dyn Repository<NutritionalValue> {
        &self.nutritional_values
    }

    fn food_items(&self) -> &dyn Repository<FoodItem> {
        &self.food_items
    }

    fn meals(&self) -> &dyn Repository<Meal> {
        &self.meals
    }

    fn meal_food_items(&self) -> &dyn Repository<MealFoodItem> {
        &self.meal_food_items
    }

    fn planned_meals(&self) -> &dyn Repository<PlannedMeal> {
        &self.planned_meals
    }

    fn weights(&self) -> &dyn Repository<WeightMeasurement> {
        &self.weights
    }

    fn blood_pressures(&self) -> &dyn Repository<BloodPressureMeasurement> {
        &self.blood_pressures
    }

    fn blood_glucose(&self) -> &dyn Repository<BloodGlucoseMeasurement> {
        &self.blood_glucose
    }

    fn blood_oxygen_saturation(&self) -> &dyn Repository<BloodOxygenSaturationMeasurement> {
        &self.blood_oxygen_saturation
    }

    fn cholesterol(&self) -> &dyn Repository<CholesterolMeasurement> {
        &self.cholesterol
    }

    fn exercise(&self) -> &dyn Repository<ExerciseMeasurement> {
        &self.exercise
    }

    fn beverage_consumption(&self) -> &dyn Repository<BeverageConsumptionMeasurement> {
        &self.beverage_consumption
    }

    fn meal_consumption(&self) -> &dyn Repository<MealConsumptionMeasurement> {
        &self.meal_consumption
    }
}
