//! Food importers

use super::{add_nutritional_value, add_projected, RecordImporter, ValidationContext};
use crate::adapters::store::HealthStore;
use crate::core::reference::{ReferenceKind, ReferenceSession};
use crate::core::transform::Projection;
use crate::core::validation::{
    require_optional_non_negative, require_positive, require_text, validate_field,
};
use crate::domain::{FoodItem, Meal, MealFoodItem, MealType, PlannedMeal, Result};
use crate::records::{FoodItemRecord, MealFoodItemRecord, MealRecord, Nutrition, PlannedMealRecord};
use async_trait::async_trait;

fn validate_nutrition(nutrition: &Nutrition, position: usize) -> Result<()> {
    for (field, value) in nutrition.named_values() {
        require_optional_non_negative(value, field, position)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FoodItemImporter;

#[async_trait]
impl RecordImporter for FoodItemImporter {
    type Record = FoodItemRecord;
    type Aggregate = FoodItem;

    fn record_type(&self) -> &'static str {
        "Food Items"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        FoodItem::references()
    }

    fn validate(
        &self,
        record: &FoodItemRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        context
            .refs
            .food_categories
            .resolve_name(&record.category, "FoodCategory", position)?;
        require_text(&record.name, "Name", position)?;
        require_positive(record.portion, "Portion", position)?;
        validate_nutrition(&record.nutrition, position)
    }

    async fn persist(
        &self,
        record: &FoodItemRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<FoodItem> {
        let mut item = FoodItem::from_flat(record, refs)?;
        item.nutritional_value = add_nutritional_value(item.nutritional_value.take(), store).await?;
        item.nutritional_value_id = item.nutritional_value.as_ref().map(|v| v.id);
        store.food_items().add(item).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MealImporter;

#[async_trait]
impl RecordImporter for MealImporter {
    type Record = MealRecord;
    type Aggregate = Meal;

    fn record_type(&self) -> &'static str {
        "Meals"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        Meal::references()
    }

    fn validate(
        &self,
        record: &MealRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        require_text(&record.name, "Name", position)?;
        context
            .refs
            .food_sources
            .resolve_name(&record.source, "FoodSource", position)?;
        validate_field(|p: &i32| *p > 0, &record.portions, "Portions", position)?;
        validate_nutrition(&record.nutrition, position)
    }

    async fn persist(
        &self,
        record: &MealRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<Meal> {
        let mut meal = Meal::from_flat(record, refs)?;
        meal.nutritional_value = add_nutritional_value(meal.nutritional_value.take(), store).await?;
        meal.nutritional_value_id = meal.nutritional_value.as_ref().map(|v| v.id);
        store.meals().add(meal).await
    }
}

/// Imports meal composition. The store rejects a second row for the same
/// meal and food item with a conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct MealFoodItemImporter;

#[async_trait]
impl RecordImporter for MealFoodItemImporter {
    type Record = MealFoodItemRecord;
    type Aggregate = MealFoodItem;

    fn record_type(&self) -> &'static str {
        "Meal/Food Item Relationships"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        MealFoodItem::references()
    }

    fn validate(
        &self,
        record: &MealFoodItemRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        context
            .refs
            .meals
            .resolve_name(&record.meal, "Meal", position)?;
        context
            .refs
            .food_items
            .resolve_name(&record.food_item, "FoodItem", position)?;
        require_positive(record.quantity, "Quantity", position)
    }

    async fn persist(
        &self,
        record: &MealFoodItemRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<MealFoodItem> {
        let mut relationship = MealFoodItem::from_flat(record, refs)?;
        let food_item = refs.food_items.find_by_id(relationship.food_item_id)?;
        let nutrition = food_item
            .nutritional_value
            .as_ref()
            .filter(|_| food_item.portion > 0.0)
            .map(|value| value.scaled(relationship.quantity / food_item.portion));

        relationship.nutritional_value = add_nutritional_value(nutrition, store).await?;
        relationship.nutritional_value_id = relationship.nutritional_value.as_ref().map(|v| v.id);
        store.meal_food_items().add(relationship).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlannedMealImporter;

#[async_trait]
impl RecordImporter for PlannedMealImporter {
    type Record = PlannedMealRecord;
    type Aggregate = PlannedMeal;

    fn record_type(&self) -> &'static str {
        "Scheduled Meals"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        PlannedMeal::references()
    }

    fn validate(
        &self,
        record: &PlannedMealRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_field(
            |t: &str| t.parse::<MealType>().is_ok_and(|t| t != MealType::None),
            record.meal_type.as_str(),
            "MealType",
            position,
        )?;
        context
            .refs
            .meals
            .resolve_name(&record.meal, "Meal", position)?;
        Ok(())
    }

    async fn persist(
        &self,
        record: &PlannedMealRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<PlannedMeal> {
        add_projected(record, refs, store.planned_meals()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::ReferenceCollection;
    use crate::domain::FoodCategory;
    use chrono::NaiveDate;

    fn session() -> ReferenceSession {
        ReferenceSession {
            food_categories: ReferenceCollection::new(
                "Food category",
                vec![FoodCategory {
                    id: 1,
                    name: "Dairy".to_string(),
                }],
            ),
            ..Default::default()
        }
    }

    fn milk() -> FoodItemRecord {
        FoodItemRecord {
            name: "Milk".to_string(),
            category: "DAIRY".to_string(),
            portion: 100.0,
            nutrition: Nutrition {
                calories: Some(64.0),
                ..Default::default()
            },
        }
    }

    fn context(refs: &ReferenceSession) -> ValidationContext<'_> {
        ValidationContext {
            refs,
            now: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_food_item_valid() {
        let refs = session();
        assert!(FoodItemImporter.validate(&milk(), 1, &context(&refs)).is_ok());
    }

    #[test]
    fn test_food_item_negative_nutrition() {
        let refs = session();
        let mut record = milk();
        record.nutrition.saturated_fat = Some(-1.0);
        let err = FoodItemImporter
            .validate(&record, 5, &context(&refs))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for 'SaturatedFat' at record 5");
    }

    #[test]
    fn test_planned_meal_rejects_none_type() {
        let refs = session();
        let record = PlannedMealRecord {
            meal_type: "None".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            meal: "Porridge".to_string(),
        };
        let err = PlannedMealImporter
            .validate(&record, 1, &context(&refs))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for 'MealType' at record 1");
    }
}
