//! Person projection

use super::Projection;
use crate::core::reference::{ReferenceKind, ReferenceSession};
use crate::domain::{ExchangeError, Gender, Person, Result};
use crate::records::PersonRecord;

impl Projection for Person {
    type Flat = PersonRecord;

    fn references() -> &'static [ReferenceKind] {
        &[]
    }

    fn to_flat(&self, _refs: &ReferenceSession) -> Result<PersonRecord> {
        Ok(PersonRecord {
            first_names: self.first_names.clone(),
            surname: self.surname.clone(),
            date_of_birth: self.date_of_birth,
            height: self.height,
            gender: self.gender.to_string(),
        })
    }

    fn from_flat(flat: &PersonRecord, _refs: &ReferenceSession) -> Result<Self> {
        let gender: Gender = flat
            .gender
            .parse()
            .map_err(|_| ExchangeError::not_found("Gender", &flat.gender))?;

        Ok(Person {
            id: 0,
            first_names: flat.first_names.clone(),
            surname: flat.surname.clone(),
            date_of_birth: flat.date_of_birth,
            height: flat.height,
            gender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_person_round_trip() {
        let refs = ReferenceSession::default();
        let record = PersonRecord {
            first_names: "Jane Mary".to_string(),
            surname: "Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 6, 1).unwrap(),
            height: 1.68,
            gender: "Female".to_string(),
        };
        let person = Person::from_flat(&record, &refs).unwrap();
        assert_eq!(person.gender, Gender::Female);
        assert_eq!(person.to_flat(&refs).unwrap(), record);
    }

    #[test]
    fn test_unknown_gender() {
        let record = PersonRecord {
            first_names: "Jane".to_string(),
            surname: "Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 6, 1).unwrap(),
            height: 1.68,
            gender: "Other".to_string(),
        };
        assert!(Person::from_flat(&record, &ReferenceSession::default()).is_err());
    }
}
