//! Measurement importers
//!
//! Every measurement passes the same three checks before its own rules:
//! the person id resolves, the name is that person's display name
//! (ignoring case), and the date is not after the call time.

use super::{add_nutritional_value, add_projected, RecordImporter, ValidationContext};
use crate::adapters::store::HealthStore;
use crate::core::reference::{ReferenceKind, ReferenceSession};
use crate::core::transform::Projection;
use crate::core::validation::{
    require_non_negative, require_not_future, require_optional_non_negative, require_positive,
    validate_field,
};
use crate::domain::{
    BeverageConsumptionMeasurement, BeverageMeasure, BloodGlucoseMeasurement,
    BloodOxygenSaturationMeasurement, BloodPressureMeasurement, CholesterolMeasurement,
    ExerciseMeasurement, MealConsumptionMeasurement, Result, WeightMeasurement,
};
use crate::records::{
    BeverageConsumptionRecord, BloodGlucoseRecord, BloodOxygenSaturationRecord,
    BloodPressureRecord, CholesterolRecord, ExerciseRecord, MealConsumptionRecord,
    MeasurementRecord, WeightRecord,
};
use async_trait::async_trait;

const PEOPLE: &[ReferenceKind] = &[ReferenceKind::People];

fn validate_measurement<R: MeasurementRecord>(
    record: &R,
    position: usize,
    context: &ValidationContext<'_>,
) -> Result<()> {
    let person = context
        .refs
        .people
        .resolve_id(record.person_id(), "PersonId", position)?;
    let display_name = person.display_name();
    validate_field(
        |name: &str| name.trim().eq_ignore_ascii_case(&display_name),
        record.name(),
        "Name",
        position,
    )?;
    require_not_future(record.date(), context.now, "Date", position)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightImporter;

#[async_trait]
impl RecordImporter for WeightImporter {
    type Record = WeightRecord;
    type Aggregate = WeightMeasurement;

    fn record_type(&self) -> &'static str {
        "Weight"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn validate(
        &self,
        record: &WeightRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_measurement(record, position, context)?;
        require_positive(record.weight, "Weight", position)
    }

    async fn persist(
        &self,
        record: &WeightRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<WeightMeasurement> {
        add_projected(record, refs, store.weights()).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BloodPressureImporter;

#[async_trait]
impl RecordImporter for BloodPressureImporter {
    type Record = BloodPressureRecord;
    type Aggregate = BloodPressureMeasurement;

    fn record_type(&self) -> &'static str {
        "Blood Pressure"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn validate(
        &self,
        record: &BloodPressureRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_measurement(record, position, context)?;
        validate_field(|v: &i32| *v > 0, &record.systolic, "Systolic", position)?;
        validate_field(|v: &i32| *v > 0, &record.diastolic, "Diastolic", position)
    }

    async fn persist(
        &self,
        record: &BloodPressureRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<BloodPressureMeasurement> {
        add_projected(record, refs, store.blood_pressures()).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BloodGlucoseImporter;

#[async_trait]
impl RecordImporter for BloodGlucoseImporter {
    type Record = BloodGlucoseRecord;
    type Aggregate = BloodGlucoseMeasurement;

    fn record_type(&self) -> &'static str {
        "Blood Glucose"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn validate(
        &self,
        record: &BloodGlucoseRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_measurement(record, position, context)?;
        require_non_negative(record.level, "Level", position)
    }

    async fn persist(
        &self,
        record: &BloodGlucoseRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<BloodGlucoseMeasurement> {
        add_projected(record, refs, store.blood_glucose()).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BloodOxygenSaturationImporter;

#[async_trait]
impl RecordImporter for BloodOxygenSaturationImporter {
    type Record = BloodOxygenSaturationRecord;
    type Aggregate = BloodOxygenSaturationMeasurement;

    fn record_type(&self) -> &'static str {
        "% SPO2"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn validate(
        &self,
        record: &BloodOxygenSaturationRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_measurement(record, position, context)?;
        require_non_negative(record.percentage, "Percentage", position)
    }

    async fn persist(
        &self,
        record: &BloodOxygenSaturationRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<BloodOxygenSaturationMeasurement> {
        add_projected(record, refs, store.blood_oxygen_saturation()).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CholesterolImporter;

#[async_trait]
impl RecordImporter for CholesterolImporter {
    type Record = CholesterolRecord;
    type Aggregate = CholesterolMeasurement;

    fn record_type(&self) -> &'static str {
        "Cholesterol"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn validate(
        &self,
        record: &CholesterolRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_measurement(record, position, context)?;
        require_positive(record.total, "Total", position)?;
        require_positive(record.hdl, "HDL", position)?;
        require_positive(record.ldl, "LDL", position)?;
        require_positive(record.triglycerides, "Triglycerides", position)
    }

    async fn persist(
        &self,
        record: &CholesterolRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<CholesterolMeasurement> {
        add_projected(record, refs, store.cholesterol()).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExerciseImporter;

#[async_trait]
impl RecordImporter for ExerciseImporter {
    type Record = ExerciseRecord;
    type Aggregate = ExerciseMeasurement;

    fn record_type(&self) -> &'static str {
        "Exercise"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        ExerciseMeasurement::references()
    }

    fn validate(
        &self,
        record: &ExerciseRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_measurement(record, position, context)?;
        context
            .refs
            .activity_types
            .resolve_name(&record.activity_type, "ActivityType", position)?;
        validate_field(|d: &u32| *d > 0, &record.duration, "Duration", position)?;
        require_optional_non_negative(record.distance, "Distance", position)?;

        let non_negative = |v: &i32| *v >= 0;
        validate_field(non_negative, &record.calories, "Calories", position)?;
        validate_field(
            non_negative,
            &record.minimum_heart_rate,
            "MinimumHeartRate",
            position,
        )?;
        validate_field(
            |max: &i32| *max >= 0 && *max >= record.minimum_heart_rate,
            &record.maximum_heart_rate,
            "MaximumHeartRate",
            position,
        )
    }

    async fn persist(
        &self,
        record: &ExerciseRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<ExerciseMeasurement> {
        add_projected(record, refs, store.exercise()).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BeverageConsumptionImporter;

#[async_trait]
impl RecordImporter for BeverageConsumptionImporter {
    type Record = BeverageConsumptionRecord;
    type Aggregate = BeverageConsumptionMeasurement;

    fn record_type(&self) -> &'static str {
        "Beverage Consumption"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        BeverageConsumptionMeasurement::references()
    }

    fn validate(
        &self,
        record: &BeverageConsumptionRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_measurement(record, position, context)?;
        context
            .refs
            .beverages
            .resolve_name(&record.beverage, "Beverage", position)?;
        validate_field(
            |code: &i32| {
                BeverageMeasure::from_code(*code)
                    .is_some_and(|measure| measure != BeverageMeasure::None)
            },
            &record.measure,
            "Measure",
            position,
        )?;
        validate_field(|q: &i32| *q > 0, &record.quantity, "Quantity", position)?;
        validate_field(
            |abv: &f64| (0.0..=100.0).contains(abv),
            &record.abv,
            "ABV",
            position,
        )
    }

    async fn persist(
        &self,
        record: &BeverageConsumptionRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<BeverageConsumptionMeasurement> {
        add_projected(record, refs, store.beverage_consumption()).await
    }
}

/// Imports meal consumption. The nutrition columns of the line are
/// ignored: nutrition is derived from the meal, scaled by the quantity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MealConsumptionImporter;

#[async_trait]
impl RecordImporter for MealConsumptionImporter {
    type Record = MealConsumptionRecord;
    type Aggregate = MealConsumptionMeasurement;

    fn record_type(&self) -> &'static str {
        "Meal Consumption"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        MealConsumptionMeasurement::references()
    }

    fn validate(
        &self,
        record: &MealConsumptionRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        validate_measurement(record, position, context)?;
        context
            .refs
            .meals
            .resolve_name(&record.meal, "Meal", position)?;
        require_positive(record.quantity, "Quantity", position)
    }

    async fn persist(
        &self,
        record: &MealConsumptionRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<MealConsumptionMeasurement> {
        let mut consumption = MealConsumptionMeasurement::from_flat(record, refs)?;
        let meal = refs.meals.find_by_id(consumption.meal_id)?;
        let nutrition = meal
            .nutritional_value
            .as_ref()
            .map(|value| value.scaled(consumption.quantity));

        consumption.nutritional_value = add_nutritional_value(nutrition, store).await?;
        consumption.nutritional_value_id = consumption.nutritional_value.as_ref().map(|v| v.id);
        store.meal_consumption().add(consumption).await
    }
}
