//! Food projections

use super::Projection;
use crate::core::reference::{ReferenceKind, ReferenceSession};
use crate::domain::{
    ExchangeError, FoodItem, Meal, MealFoodItem, MealType, PlannedMeal, Result,
};
use crate::records::{FoodItemRecord, MealFoodItemRecord, MealRecord, Nutrition, PlannedMealRecord};

impl Projection for FoodItem {
    type Flat = FoodItemRecord;

    fn references() -> &'static [ReferenceKind] {
        &[ReferenceKind::FoodCategories]
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<FoodItemRecord> {
        let category = refs.food_categories.find_by_id(self.food_category_id)?;
        Ok(FoodItemRecord {
            name: self.name.clone(),
            category: category.name.clone(),
            portion: self.portion,
            nutrition: Nutrition::from_value(self.nutritional_value.as_ref()),
        })
    }

    fn from_flat(flat: &FoodItemRecord, refs: &ReferenceSession) -> Result<Self> {
        let category = refs.food_categories.find_by_name(&flat.category)?;
        Ok(FoodItem {
            id: 0,
            name: flat.name.clone(),
            portion: flat.portion,
            food_category_id: category.id,
            nutritional_value_id: None,
            nutritional_value: flat.nutrition.to_optional_value(),
        })
    }
}

impl Projection for Meal {
    type Flat = MealRecord;

    fn references() -> &'static [ReferenceKind] {
        &[ReferenceKind::FoodSources]
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<MealRecord> {
        let source = refs.food_sources.find_by_id(self.food_source_id)?;
        Ok(MealRecord {
            name: self.name.clone(),
            source: source.name.clone(),
            reference: self.reference.clone(),
            portions: self.portions,
            nutrition: Nutrition::from_value(self.nutritional_value.as_ref()),
        })
    }

    fn from_flat(flat: &MealRecord, refs: &ReferenceSession) -> Result<Self> {
        let source = refs.food_sources.find_by_name(&flat.source)?;
        Ok(Meal {
            id: 0,
            name: flat.name.clone(),
            portions: flat.portions,
            food_source_id: source.id,
            reference: flat.reference.clone(),
            nutritional_value_id: None,
            nutritional_value: flat.nutrition.to_optional_value(),
        })
    }
}

impl Projection for MealFoodItem {
    type Flat = MealFoodItemRecord;

    fn references() -> &'static [ReferenceKind] {
        &[ReferenceKind::Meals, ReferenceKind::FoodItems]
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<MealFoodItemRecord> {
        let meal = refs.meals.find_by_id(self.meal_id)?;
        let food_item = refs.food_items.find_by_id(self.food_item_id)?;
        Ok(MealFoodItemRecord {
            meal: meal.name.clone(),
            food_item: food_item.name.clone(),
            quantity: self.quantity,
            nutrition: Nutrition::from_value(self.nutritional_value.as_ref()),
        })
    }

    fn from_flat(flat: &MealFoodItemRecord, refs: &ReferenceSession) -> Result<Self> {
        let meal = refs.meals.find_by_name(&flat.meal)?;
        let food_item = refs.food_items.find_by_name(&flat.food_item)?;
        Ok(MealFoodItem {
            id: 0,
            meal_id: meal.id,
            food_item_id: food_item.id,
            quantity: flat.quantity,
            nutritional_value_id: None,
            nutritional_value: flat.nutrition.to_optional_value(),
        })
    }
}

impl Projection for PlannedMeal {
    type Flat = PlannedMealRecord;

    fn references() -> &'static [ReferenceKind] {
        &[ReferenceKind::Meals]
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<PlannedMealRecord> {
        let meal = refs.meals.find_by_id(self.meal_id)?;
        Ok(PlannedMealRecord {
            meal_type: self.meal_type.to_string(),
            date: self.date,
            meal: meal.name.clone(),
        })
    }

    fn from_flat(flat: &PlannedMealRecord, refs: &ReferenceSession) -> Result<Self> {
        let meal_type: MealType = flat
            .meal_type
            .parse()
            .map_err(|_| ExchangeError::not_found("Meal type", &flat.meal_type))?;
        let meal = refs.meals.find_by_name(&flat.meal)?;
        Ok(PlannedMeal {
            id: 0,
            meal_type,
            date: flat.date,
            meal_id: meal.id,
        })
    }
}
