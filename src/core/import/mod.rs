//! Two-pass batch import
//!
//! Each importable record type supplies one [`RecordImporter`]: inflate a
//! line, validate it against the session's reference data, and persist
//! it. The [`ImportEngine`] drives any importer over a batch with the
//! guarantee that no record is handed to the store unless every record
//! in the batch passed validation.

pub mod engine;
pub mod food;
pub mod measurements;
pub mod people;
pub mod summary;

pub use engine::ImportEngine;
pub use food::{FoodItemImporter, MealFoodItemImporter, MealImporter, PlannedMealImporter};
pub use measurements::{
    BeverageConsumptionImporter, BloodGlucoseImporter, BloodOxygenSaturationImporter,
    BloodPressureImporter, CholesterolImporter, ExerciseImporter, MealConsumptionImporter,
    WeightImporter,
};
pub use people::PersonImporter;
pub use summary::ImportSummary;

use crate::adapters::store::{HealthStore, Repository};
use crate::core::reference::{ReferenceKind, ReferenceSession};
use crate::core::transform::Projection;
use crate::domain::{NutritionalValue, Result};
use crate::records::{FlatRecord, LineCodec};
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// What a record's semantic checks can see
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub refs: &'a ReferenceSession,
    /// Wall-clock time of the import call. Dates after it are rejected.
    pub now: NaiveDateTime,
}

/// The per-type part of an import
#[async_trait]
pub trait RecordImporter: Send + Sync {
    type Record: FlatRecord + Send + Sync;
    type Aggregate: Send + Sync;

    /// Display name used in logs and summaries
    fn record_type(&self) -> &'static str;

    /// The lookup tables validation and persistence need
    fn references(&self) -> &'static [ReferenceKind];

    /// Parses a structurally valid line
    fn inflate(&self, line: &str, position: usize, codec: &LineCodec) -> Result<Self::Record> {
        codec.decode(line, position)
    }

    /// Checks one record, failing on the first rule it breaks
    fn validate(
        &self,
        record: &Self::Record,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()>;

    /// Resolves the record's names, creates any dependent entities, and
    /// adds the resulting aggregate to the store
    async fn persist(
        &self,
        record: &Self::Record,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<Self::Aggregate>;
}

/// Stores a dependent nutritional value if any of its values is present
/// and non-zero. Otherwise the owner gets no nutritional value.
pub(crate) async fn add_nutritional_value(
    value: Option<NutritionalValue>,
    store: &dyn HealthStore,
) -> Result<Option<NutritionalValue>> {
    match value.filter(NutritionalValue::has_values) {
        Some(value) => Ok(Some(store.nutritional_values().add(value).await?)),
        None => Ok(None),
    }
}

/// Rebuilds the aggregate from its flat record and adds it
pub(crate) async fn add_projected<A>(
    record: &A::Flat,
    refs: &ReferenceSession,
    repository: &dyn Repository<A>,
) -> Result<A>
where
    A: Projection + Send,
    A::Flat: Sync,
{
    let aggregate = A::from_flat(record, refs)?;
    repository.add(aggregate).await
}
