//! Record type registry and dispatcher
//!
//! Maps a [`RecordType`] chosen at run time to the importer or exporter
//! for that type.

use crate::adapters::store::HealthStore;
use crate::core::export::{
    write_export_file, ExportFilter, ExportSource, ExportSummary, Exporter,
};
use crate::core::import::{
    BeverageConsumptionImporter, BloodGlucoseImporter, BloodOxygenSaturationImporter,
    BloodPressureImporter, CholesterolImporter, ExerciseImporter, FoodItemImporter, ImportEngine,
    ImportSummary, MealConsumptionImporter, MealFoodItemImporter, MealImporter,
    PersonImporter, PlannedMealImporter, RecordImporter, WeightImporter,
};
use crate::core::reference::ReferenceCollection;
use crate::domain::{
    BeverageConsumptionMeasurement, BloodGlucoseMeasurement, BloodOxygenSaturationMeasurement,
    BloodPressureMeasurement, CholesterolMeasurement, ExchangeError, ExerciseMeasurement,
    FoodItem, Meal, MealConsumptionMeasurement, MealFoodItem, Person, PlannedMeal, Result,
    WeightMeasurement,
};
use crate::records::DEFAULT_DELIMITER;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Every exchangeable record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    People,
    Weight,
    BloodPressure,
    BloodGlucose,
    BloodOxygenSaturation,
    Cholesterol,
    Exercise,
    BeverageConsumption,
    AlcoholConsumption,
    MealConsumption,
    FoodItems,
    Meals,
    MealFoodItems,
    ScheduledMeals,
}

impl RecordType {
    pub const ALL: [RecordType; 14] = [
        RecordType::People,
        RecordType::Weight,
        RecordType::BloodPressure,
        RecordType::BloodGlucose,
        RecordType::BloodOxygenSaturation,
        RecordType::Cholesterol,
        RecordType::Exercise,
        RecordType::BeverageConsumption,
        RecordType::AlcoholConsumption,
        RecordType::MealConsumption,
        RecordType::FoodItems,
        RecordType::Meals,
        RecordType::MealFoodItems,
        RecordType::ScheduledMeals,
    ];

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            RecordType::People => "People",
            RecordType::Weight => "Weight",
            RecordType::BloodPressure => "Blood Pressure",
            RecordType::BloodGlucose => "Blood Glucose",
            RecordType::BloodOxygenSaturation => "% SPO2",
            RecordType::Cholesterol => "Cholesterol",
            RecordType::Exercise => "Exercise",
            RecordType::BeverageConsumption => "Beverage Consumption",
            RecordType::AlcoholConsumption => "Alcohol Consumption",
            RecordType::MealConsumption => "Meal Consumption",
            RecordType::FoodItems => "Food Items",
            RecordType::Meals => "Meals",
            RecordType::MealFoodItems => "Meal/Food Item Relationships",
            RecordType::ScheduledMeals => "Scheduled Meals",
        }
    }

    /// Command-line name
    pub fn key(self) -> &'static str {
        match self {
            RecordType::People => "people",
            RecordType::Weight => "weight",
            RecordType::BloodPressure => "blood-pressure",
            RecordType::BloodGlucose => "blood-glucose",
            RecordType::BloodOxygenSaturation => "spo2",
            RecordType::Cholesterol => "cholesterol",
            RecordType::Exercise => "exercise",
            RecordType::BeverageConsumption => "beverage-consumption",
            RecordType::AlcoholConsumption => "alcohol-consumption",
            RecordType::MealConsumption => "meal-consumption",
            RecordType::FoodItems => "food-items",
            RecordType::Meals => "meals",
            RecordType::MealFoodItems => "meal-food-items",
            RecordType::ScheduledMeals => "scheduled-meals",
        }
    }

    /// Alcohol consumption is a view over beverage consumption and can
    /// only be exported
    pub fn can_import(self) -> bool {
        self != RecordType::AlcoholConsumption
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        RecordType::ALL
            .into_iter()
            .find(|t| {
                t.key().eq_ignore_ascii_case(wanted) || t.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                let keys: Vec<&str> = RecordType::ALL.iter().map(|t| t.key()).collect();
                format!("Unknown record type '{s}'. Must be one of: {}", keys.join(", "))
            })
    }
}

/// Runs imports and exports for any [`RecordType`] against one store
#[derive(Clone)]
pub struct DataExchange {
    store: Arc<dyn HealthStore>,
    delimiter: u8,
    dry_run: bool,
}

impl DataExchange {
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self {
            store,
            delimiter: DEFAULT_DELIMITER,
            dry_run: false,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Imports a file of the given record type
    ///
    /// # Errors
    ///
    /// Returns a configuration error for export-only types, otherwise the
    /// import engine's error.
    pub async fn import_file(
        &self,
        record_type: RecordType,
        path: impl AsRef<Path>,
    ) -> Result<ImportSummary> {
        let path = path.as_ref();
        match record_type {
            RecordType::People => self.import_with(PersonImporter, path).await,
            RecordType::Weight => self.import_with(WeightImporter, path).await,
            RecordType::BloodPressure => self.import_with(BloodPressureImporter, path).await,
            RecordType::BloodGlucose => self.import_with(BloodGlucoseImporter, path).await,
            RecordType::BloodOxygenSaturation => {
                self.import_with(BloodOxygenSaturationImporter, path).await
            }
            RecordType::Cholesterol => self.import_with(CholesterolImporter, path).await,
            RecordType::Exercise => self.import_with(ExerciseImporter, path).await,
            RecordType::BeverageConsumption => {
                self.import_with(BeverageConsumptionImporter, path).await
            }
            RecordType::MealConsumption => self.import_with(MealConsumptionImporter, path).await,
            RecordType::FoodItems => self.import_with(FoodItemImporter, path).await,
            RecordType::Meals => self.import_with(MealImporter, path).await,
            RecordType::MealFoodItems => self.import_with(MealFoodItemImporter, path).await,
            RecordType::ScheduledMeals => self.import_with(PlannedMealImporter, path).await,
            RecordType::AlcoholConsumption => Err(ExchangeError::Configuration(format!(
                "{record_type} can only be exported"
            ))),
        }
    }

    /// Exports every stored record of the given type that passes `filter`
    pub async fn export_file(
        &self,
        record_type: RecordType,
        path: impl AsRef<Path>,
        filter: ExportFilter,
    ) -> Result<ExportSummary> {
        let path = path.as_ref();
        match record_type {
            RecordType::People => self.export_with::<Person>(path, filter).await,
            RecordType::Weight => self.export_with::<WeightMeasurement>(path, filter).await,
            RecordType::BloodPressure => {
                self.export_with::<BloodPressureMeasurement>(path, filter).await
            }
            RecordType::BloodGlucose => {
                self.export_with::<BloodGlucoseMeasurement>(path, filter).await
            }
            RecordType::BloodOxygenSaturation => {
                self.export_with::<BloodOxygenSaturationMeasurement>(path, filter)
                    .await
            }
            RecordType::Cholesterol => {
                self.export_with::<CholesterolMeasurement>(path, filter).await
            }
            RecordType::Exercise => self.export_with::<ExerciseMeasurement>(path, filter).await,
            RecordType::BeverageConsumption => {
                self.export_with::<BeverageConsumptionMeasurement>(path, filter)
                    .await
            }
            RecordType::AlcoholConsumption => self.export_alcohol(path, filter).await,
            RecordType::MealConsumption => {
                self.export_with::<MealConsumptionMeasurement>(path, filter)
                    .await
            }
            RecordType::FoodItems => self.export_with::<FoodItem>(path, filter).await,
            RecordType::Meals => self.export_with::<Meal>(path, filter).await,
            RecordType::MealFoodItems => self.export_with::<MealFoodItem>(path, filter).await,
            RecordType::ScheduledMeals => self.export_with::<PlannedMeal>(path, filter).await,
        }
    }

    async fn import_with<I: RecordImporter>(&self, importer: I, path: &Path) -> Result<ImportSummary> {
        let mut engine = ImportEngine::new(importer, Arc::clone(&self.store))
            .with_delimiter(self.delimiter)
            .with_dry_run(self.dry_run);
        engine.import_file(path).await
    }

    async fn export_with<A: ExportSource>(
        &self,
        path: &Path,
        filter: ExportFilter,
    ) -> Result<ExportSummary> {
        Exporter::<A>::new(Arc::clone(&self.store))
            .with_delimiter(self.delimiter)
            .with_filter(filter)
            .export_to_file(path)
            .await
    }

    /// Beverage consumption restricted to beverages flagged as alcoholic
    async fn export_alcohol(&self, path: &Path, filter: ExportFilter) -> Result<ExportSummary> {
        let beverages =
            ReferenceCollection::new("Beverage", self.store.beverages().list().await?);
        let consumption = BeverageConsumptionMeasurement::load(self.store.as_ref()).await?;
        let alcohol: Vec<_> = filter
            .apply(consumption)
            .into_iter()
            .filter(|c| beverages.by_id(c.beverage_id).is_some_and(|b| b.is_alcohol))
            .collect();

        let mut buffer = Vec::new();
        let mut summary = Exporter::<BeverageConsumptionMeasurement>::new(Arc::clone(&self.store))
            .with_delimiter(self.delimiter)
            .with_record_type(RecordType::AlcoholConsumption.display_name())
            .export_aggregates(alcohol, &mut buffer)
            .await?;
        write_export_file(path, &buffer).await?;
        summary.destination = Some(path.to_path_buf());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("spo2", RecordType::BloodOxygenSaturation ; "key")]
    #[test_case("% SPO2", RecordType::BloodOxygenSaturation ; "display name")]
    #[test_case("Blood-Pressure", RecordType::BloodPressure ; "key ignoring case")]
    #[test_case("meal/food item relationships", RecordType::MealFoodItems ; "display name ignoring case")]
    fn test_parse_record_type(input: &str, expected: RecordType) {
        assert_eq!(input.parse::<RecordType>().unwrap(), expected);
    }

    #[test_case("pulse" ; "never exchanged")]
    #[test_case("shopping-list" ; "export not carried over")]
    fn test_parse_unknown_record_type(input: &str) {
        let err = input.parse::<RecordType>().unwrap_err();
        assert!(err.contains("blood-pressure"));
    }

    #[test]
    fn test_keys_and_names_are_unique() {
        for (i, a) in RecordType::ALL.iter().enumerate() {
            for b in &RecordType::ALL[i + 1..] {
                assert_ne!(a.key(), b.key());
                assert_ne!(a.display_name(), b.display_name());
            }
        }
    }

    #[test]
    fn test_only_alcohol_is_export_only() {
        let export_only: Vec<_> = RecordType::ALL
            .into_iter()
            .filter(|t| !t.can_import())
            .collect();
        assert_eq!(export_only, vec![RecordType::AlcoholConsumption]);
    }
}
