//! Exportable aggregates and export filters

use crate::adapters::store::HealthStore;
use crate::core::transform::Projection;
use crate::domain::{
    BeverageConsumptionMeasurement, BloodGlucoseMeasurement, BloodOxygenSaturationMeasurement,
    BloodPressureMeasurement, CholesterolMeasurement, ExerciseMeasurement, FoodItem, Meal,
    MealConsumptionMeasurement, MealFoodItem, Measurement, Person, PlannedMeal, Result,
    WeightMeasurement,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// A domain aggregate that can be loaded from the store and exported
#[async_trait]
pub trait ExportSource: Projection + Send + Sync + 'static {
    /// Display name used in logs and summaries
    const RECORD_TYPE: &'static str;

    /// Lists every stored aggregate of this type
    async fn load(store: &dyn HealthStore) -> Result<Vec<Self>>;

    /// The owning person, for types that have one
    fn owner(&self) -> Option<i64> {
        None
    }

    /// The date range filters compare against, for dated types
    fn day(&self) -> Option<NaiveDate> {
        None
    }
}

/// Restricts which aggregates are exported
///
/// A criterion is ignored for aggregate types that lack the matching
/// property. Date bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub person_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ExportFilter {
    pub fn is_empty(&self) -> bool {
        self.person_id.is_none() && self.from.is_none() && self.to.is_none()
    }

    pub fn matches<A: ExportSource>(&self, aggregate: &A) -> bool {
        if let (Some(wanted), Some(owner)) = (self.person_id, aggregate.owner()) {
            if wanted != owner {
                return false;
            }
        }

        match aggregate.day() {
            Some(day) => {
                self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
            }
            None => true,
        }
    }

    /// Keeps the matching aggregates, preserving order
    pub fn apply<A: ExportSource>(&self, aggregates: Vec<A>) -> Vec<A> {
        if self.is_empty() {
            return aggregates;
        }
        aggregates.into_iter().filter(|a| self.matches(a)).collect()
    }
}

macro_rules! measurement_source {
    ($($ty:ty => $repository:ident, $name:literal);+ $(;)?) => {
        $(
            #[async_trait]
            impl ExportSource for $ty {
                const RECORD_TYPE: &'static str = $name;

                async fn load(store: &dyn HealthStore) -> Result<Vec<Self>> {
                    store.$repository().list().await
                }

                fn owner(&self) -> Option<i64> {
                    Some(self.person_id())
                }

                fn day(&self) -> Option<NaiveDate> {
                    Some(self.date().date())
                }
            }
        )+
    };
}

measurement_source! {
    WeightMeasurement => weights, "Weight";
    BloodPressureMeasurement => blood_pressures, "Blood Pressure";
    BloodGlucoseMeasurement => blood_glucose, "Blood Glucose";
    BloodOxygenSaturationMeasurement => blood_oxygen_saturation, "% SPO2";
    CholesterolMeasurement => cholesterol, "Cholesterol";
    ExerciseMeasurement => exercise, "Exercise";
    BeverageConsumptionMeasurement => beverage_consumption, "Beverage Consumption";
    MealConsumptionMeasurement => meal_consumption, "Meal Consumption";
}

#[async_trait]
impl ExportSource for Person {
    const RECORD_TYPE: &'static str = "People";

    async fn load(store: &dyn HealthStore) -> Result<Vec<Self>> {
        store.people().list().await
    }

    fn owner(&self) -> Option<i64> {
        Some(self.id)
    }
}

#[async_trait]
impl ExportSource for FoodItem {
    const RECORD_TYPE: &'static str = "Food Items";

    async fn load(store: &dyn HealthStore) -> Result<Vec<Self>> {
        store.food_items().list().await
    }
}

#[async_trait]
impl ExportSource for Meal {
    const RECORD_TYPE: &'static str = "Meals";

    async fn load(store: &dyn HealthStore) -> Result<Vec<Self>> {
        store.meals().list().await
    }
}

#[async_trait]
impl ExportSource for MealFoodItem {
    const RECORD_TYPE: &'static str = "Meal/Food Item Relationships";

    async fn load(store: &dyn HealthStore) -> Result<Vec<Self>> {
        store.meal_food_items().list().await
    }
}

#[async_trait]
impl ExportSource for PlannedMeal {
    const RECORD_TYPE: &'static str = "Scheduled Meals";

    async fn load(store: &dyn HealthStore) -> Result<Vec<Self>> {
        store.planned_meals().list().await
    }

    fn day(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}
