//! Integration tests for the two-pass import engine
//!
//! These tests verify that a batch is either validated in full before any
//! record reaches the store, or rejected with the first failure and its
//! record position.

mod common;

use common::{batch, seeded_store, WEIGHT_HEADER};
use healthx::adapters::store::HealthStore;
use healthx::core::import::{
    BeverageConsumptionImporter, ExerciseImporter, FoodItemImporter, ImportEngine,
    MealConsumptionImporter, MealFoodItemImporter, MealImporter, PersonImporter, WeightImporter,
};
use healthx::domain::{ExchangeError, StoreError};
use std::sync::{Arc, Mutex};

const JANE_WEIGHT: &str = r#""1","Jane Doe","13-Feb-2024 10:00:00","72.5","25.7","Overweight","1450""#;
const JANE_LATER_WEIGHT: &str = r#""1","Jane Doe","14-Feb-2024 10:00:00","72.1","25.5","Overweight","1448""#;

#[tokio::test]
async fn test_zero_weight_is_rejected_and_nothing_stored() {
    let store = seeded_store();
    let lines = batch(
        WEIGHT_HEADER,
        &[r#""1","Jane Doe","13-Feb-2024 10:00:00","0","25.7","Overweight","1450""#],
    );

    let err = ImportEngine::new(WeightImporter, store.clone())
        .import(&lines)
        .await
        .unwrap_err();

    match err {
        ExchangeError::InvalidFieldValue { field, record } => {
            assert_eq!(field, "Weight");
            assert_eq!(record, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(store.weights().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_line_rejects_whole_batch() {
    let store = seeded_store();
    let lines = batch(
        WEIGHT_HEADER,
        &[JANE_WEIGHT, r#""1","Jane Doe","14-Feb-2024 10:00:00","73""#],
    );

    let err = ImportEngine::new(WeightImporter, store.clone())
        .import(&lines)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExchangeError::InvalidRecordFormat { record: 2, .. }
    ));
    assert!(err.is_rejection());
    assert!(store.weights().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_valid_batch_commits_in_order() {
    let store = seeded_store();
    let lines = batch(WEIGHT_HEADER, &[JANE_WEIGHT, JANE_LATER_WEIGHT]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let summary = ImportEngine::new(WeightImporter, store.clone())
        .on_record_imported(move |position, weight| {
            sink.lock().unwrap().push((position, weight.id));
        })
        .import(&lines)
        .await
        .unwrap();

    assert_eq!(summary.record_type, "Weight");
    assert_eq!(summary.validated, 2);
    assert_eq!(summary.committed, 2);
    assert!(!summary.dry_run);
    assert_eq!(*seen.lock().unwrap(), vec![(1, 1), (2, 2)]);

    let stored = store.weights().list().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].weight, 72.5);
    assert_eq!(stored[0].bmi_assessment, "Overweight");
    assert_eq!(stored[1].weight, 72.1);
}

#[tokio::test]
async fn test_dry_run_validates_without_committing() {
    let store = seeded_store();
    let lines = batch(WEIGHT_HEADER, &[JANE_WEIGHT, JANE_LATER_WEIGHT]);

    let summary = ImportEngine::new(WeightImporter, store.clone())
        .with_dry_run(true)
        .import(&lines)
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.validated, 2);
    assert_eq!(summary.committed, 0);
    assert!(store.weights().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_header_only_batch_imports_nothing() {
    let store = seeded_store();
    let summary = ImportEngine::new(WeightImporter, store.clone())
        .import(&[WEIGHT_HEADER])
        .await
        .unwrap();

    assert_eq!(summary.validated, 0);
    assert_eq!(summary.committed, 0);

    let empty: [&str; 0] = [];
    let summary = ImportEngine::new(WeightImporter, store)
        .import(&empty)
        .await
        .unwrap();
    assert_eq!(summary.committed, 0);
}

#[tokio::test]
async fn test_unknown_person_is_a_referential_miss() {
    let store = seeded_store();
    let lines = batch(
        WEIGHT_HEADER,
        &[
            JANE_WEIGHT,
            r#""99","Nobody","13-Feb-2024 10:00:00","72.5","25.7","Overweight","1450""#,
        ],
    );

    let err = ImportEngine::new(WeightImporter, store.clone())
        .import(&lines)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "'99' does not match a known PersonId at record 2"
    );
    assert!(store.weights().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_future_date_is_rejected() {
    let store = seeded_store();
    let lines = batch(
        WEIGHT_HEADER,
        &[r#""1","Jane Doe","01-Jan-2999 00:00:00","72.5","25.7","Overweight","1450""#],
    );

    let err = ImportEngine::new(WeightImporter, store)
        .import(&lines)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid value for 'Date' at record 1");
}

#[tokio::test]
async fn test_custom_delimiter() {
    let store = seeded_store();
    let lines = [
        WEIGHT_HEADER.replace(',', ";"),
        JANE_WEIGHT.replace(',', ";"),
    ];

    let summary = ImportEngine::new(WeightImporter, store.clone())
        .with_delimiter(b';')
        .import(&lines)
        .await
        .unwrap();

    assert_eq!(summary.committed, 1);
}

#[tokio::test]
async fn test_people_import_assigns_new_identifier() {
    let store = seeded_store();
    let lines = batch(
        r#""First Names","Surname","Date Of Birth","Height","Gender""#,
        &[r#""Alice","Jones","02/03/1990","1.6","Female""#],
    );

    ImportEngine::new(PersonImporter, store.clone())
        .import(&lines)
        .await
        .unwrap();

    let people = store.people().list().await.unwrap();
    assert_eq!(people.len(), 3);
    assert_eq!(people[2].id, 3);
    assert_eq!(people[2].display_name(), "Alice Jones");
}

#[tokio::test]
async fn test_people_import_rejects_unknown_gender() {
    let store = seeded_store();
    let lines = batch(
        r#""First Names","Surname","Date Of Birth","Height","Gender""#,
        &[r#""Alice","Jones","02/03/1990","1.6","Robot""#],
    );

    let err = ImportEngine::new(PersonImporter, store)
        .import(&lines)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for 'Gender' at record 1");
}

#[tokio::test]
async fn test_unknown_beverage_names_the_record() {
    let store = seeded_store();
    let header = r#""Person Id","Name","Date","Beverage Id","Beverage","Measure","Measure Name","Quantity","Volume","ABV","Units""#;
    let lines = batch(
        header,
        &[
            r#""1","Jane Doe","13-Feb-2024 19:00:00","2","beer","1","Pint","1","568","4.5","2.6""#,
            r#""1","Jane Doe","13-Feb-2024 20:00:00","0","Cider","1","Pint","1","568","4.5","2.6""#,
        ],
    );

    let err = ImportEngine::new(BeverageConsumptionImporter, store.clone())
        .import(&lines)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "'Cider' does not match a known Beverage at record 2"
    );
    assert!(store.beverage_consumption().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exercise_distance_is_optional() {
    let store = seeded_store();
    let header = r#""Person Id","Name","Date","Activity Type","Duration","Distance","Calories","Minimum Heart Rate","Maximum Heart Rate""#;
    let lines = batch(
        header,
        &[
            r#""2","John Smith","13/02/2024","Yoga","01:00:00","","200","60","110""#,
            r#""2","John Smith","14/02/2024","running","00:30:15","5.2","350","90","165""#,
        ],
    );

    ImportEngine::new(ExerciseImporter, store.clone())
        .import(&lines)
        .await
        .unwrap();

    let stored = store.exercise().list().await.unwrap();
    assert_eq!(stored[0].activity_type_id, 2);
    assert_eq!(stored[0].duration, 3600);
    assert_eq!(stored[0].distance, None);
    assert_eq!(stored[1].activity_type_id, 1);
    assert_eq!(stored[1].duration, 1815);
    assert_eq!(stored[1].distance, Some(5.2));
}

#[tokio::test]
async fn test_exercise_heart_rate_range() {
    let store = seeded_store();
    let header = r#""Person Id","Name","Date","Activity Type","Duration","Distance","Calories","Minimum Heart Rate","Maximum Heart Rate""#;
    let lines = batch(
        header,
        &[r#""2","John Smith","13/02/2024","Yoga","01:00:00","","200","120","110""#],
    );

    let err = ImportEngine::new(ExerciseImporter, store)
        .import(&lines)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value for 'MaximumHeartRate' at record 1"
    );
}

#[tokio::test]
async fn test_meal_consumption_nutrition_comes_from_meal() {
    let store = seeded_store();
    let header = r#""Person Id","Name","Date","Meal Id","Meal","Quantity","Calories","Fat","Saturated Fat","Protein","Carbohydrates","Sugar","Fibre""#;
    let lines = batch(
        header,
        &[r#""1","Jane Doe","13-Feb-2024 08:00:00","0","porridge","2","1","1","1","1","1","1","1""#],
    );

    ImportEngine::new(MealConsumptionImporter, store.clone())
        .import(&lines)
        .await
        .unwrap();

    let stored = store.meal_consumption().list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].meal_id, 1);

    let nutrition = stored[0].nutritional_value.as_ref().unwrap();
    assert_eq!(nutrition.calories, Some(600.0));
    assert_eq!(nutrition.protein, Some(20.0));
    assert_eq!(nutrition.sugar, None);
    assert_eq!(store.nutritional_values().list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_store_conflict_keeps_earlier_commits() {
    let store = seeded_store();
    let header = r#""Meal","Food Item","Quantity","Calories","Fat","Saturated Fat","Protein","Carbohydrates","Sugar","Fibre""#;
    let row = r#""Porridge","Apple","50","","","","","","","""#;
    let lines = batch(header, &[row, row]);

    let err = ImportEngine::new(MealFoodItemImporter, store.clone())
        .import(&lines)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::Store(StoreError::Conflict(_))));
    assert!(!err.is_rejection());

    let stored = store.meal_food_items().list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].meal_id, 1);
    assert_eq!(stored[0].food_item_id, 1);
}

const FOOD_ITEM_HEADER: &str = r#""Name","Category","Portion","Calories","Fat","Saturated Fat","Protein","Carbohydrates","Sugar","Fibre""#;
const MEAL_HEADER: &str = r#""Name","Source","Reference","Portions","Calories","Fat","Saturated Fat","Protein","Carbohydrates","Sugar","Fibre""#;
const MEAL_FOOD_ITEM_HEADER: &str = r#""Meal","Food Item","Quantity","Calories","Fat","Saturated Fat","Protein","Carbohydrates","Sugar","Fibre""#;

#[tokio::test]
async fn test_food_item_without_nutrition_creates_no_nutritional_value() {
    let store = seeded_store();
    let lines = batch(
        FOOD_ITEM_HEADER,
        &[
            r#""Pear","fruit","100","","","","","","","""#,
            r#""Plum","Fruit","80","0","0","0","0","0","0","0""#,
        ],
    );

    let summary = ImportEngine::new(FoodItemImporter, store.clone())
        .import(&lines)
        .await
        .unwrap();
    assert_eq!(summary.committed, 2);

    let items = store.food_items().list().await.unwrap();
    for item in items.iter().filter(|item| item.name != "Apple") {
        assert_eq!(item.nutritional_value_id, None, "{}", item.name);
        assert!(item.nutritional_value.is_none());
    }
    assert_eq!(store.nutritional_values().list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_meal_without_nutrition_creates_no_nutritional_value() {
    let store = seeded_store();
    let lines = batch(
        MEAL_HEADER,
        &[
            r#""Toast","Home Cooking","","1","0","","0","","","0","""#,
            r#""Soup","home cooking","Card 3","4","152","3.5","","6","21","4","2.5""#,
        ],
    );

    ImportEngine::new(MealImporter, store.clone())
        .import(&lines)
        .await
        .unwrap();

    let meals = store.meals().list().await.unwrap();
    let toast = meals.iter().find(|meal| meal.name == "Toast").unwrap();
    assert_eq!(toast.nutritional_value_id, None);
    assert!(toast.nutritional_value.is_none());

    let soup = meals.iter().find(|meal| meal.name == "Soup").unwrap();
    assert_eq!(soup.nutritional_value.as_ref().unwrap().calories, Some(152.0));
    assert_eq!(store.nutritional_values().list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_meal_food_item_nutrition_scaled_by_portion() {
    let store = seeded_store();
    // Nutrition columns are ignored in favour of the food item's own values
    let row = r#""porridge","APPLE","50","999","","","","","","""#;
    let lines = batch(MEAL_FOOD_ITEM_HEADER, &[row]);

    let summary = ImportEngine::new(MealFoodItemImporter, store.clone())
        .import(&lines)
        .await
        .unwrap();
    assert_eq!(summary.committed, 1);

    let stored = store.meal_food_items().list().await.unwrap();
    let nutrition = stored[0].nutritional_value.as_ref().unwrap();
    assert_eq!(stored[0].nutritional_value_id, Some(nutrition.id));
    assert_eq!(nutrition.calories, Some(26.0));
    assert_eq!(nutrition.fat, Some(0.1));
    assert_eq!(nutrition.saturated_fat, None);
    assert_eq!(nutrition.protein, Some(0.15));
    assert_eq!(nutrition.carbohydrates, Some(7.0));
    assert_eq!(nutrition.sugar, Some(5.0));
    assert_eq!(nutrition.fibre, Some(1.2));
    assert_eq!(store.nutritional_values().list().await.unwrap().len(), 3);

    let err = ImportEngine::new(MealFoodItemImporter, store.clone())
        .import(&lines)
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::Store(StoreError::Conflict(_))));
    assert_eq!(store.meal_food_items().list().await.unwrap().len(), 1);
}
