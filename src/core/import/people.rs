//! Person importer

use super::{add_projected, RecordImporter, ValidationContext};
use crate::adapters::store::HealthStore;
use crate::core::reference::{ReferenceKind, ReferenceSession};
use crate::core::validation::{require_date_not_future, require_positive, require_text, validate_field};
use crate::domain::{Gender, Person, Result};
use crate::records::PersonRecord;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct PersonImporter;

#[async_trait]
impl RecordImporter for PersonImporter {
    type Record = PersonRecord;
    type Aggregate = Person;

    fn record_type(&self) -> &'static str {
        "People"
    }

    fn references(&self) -> &'static [ReferenceKind] {
        &[]
    }

    fn validate(
        &self,
        record: &PersonRecord,
        position: usize,
        context: &ValidationContext<'_>,
    ) -> Result<()> {
        require_text(&record.first_names, "FirstNames", position)?;
        require_text(&record.surname, "Surname", position)?;
        require_date_not_future(record.date_of_birth, context.now, "DateOfBirth", position)?;
        require_positive(record.height, "Height", position)?;
        validate_field(
            |g: &str| g.parse::<Gender>().is_ok(),
            record.gender.as_str(),
            "Gender",
            position,
        )
    }

    async fn persist(
        &self,
        record: &PersonRecord,
        refs: &ReferenceSession,
        store: &dyn HealthStore,
    ) -> Result<Person> {
        add_projected(record, refs, store.people()).await
    }
}
