//! People and the lookup tables measurements refer to

use super::entity::{impl_entity, Named};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Gender recorded against a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Unspecified,
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gender::Unspecified => "Unspecified",
            Gender::Male => "Male",
            Gender::Female => "Female",
        };
        f.write_str(name)
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unspecified" => Ok(Gender::Unspecified),
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender '{s}'")),
        }
    }
}

/// A person whose health is tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Person {
    pub id: i64,
    pub first_names: String,
    pub surname: String,
    pub date_of_birth: NaiveDate,
    /// Height in metres
    pub height: f64,
    pub gender: Gender,
}

impl Person {
    /// The display name used in flat records: "<first names> <surname>"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_names, self.surname)
    }
}

impl Named for Person {
    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(self.display_name())
    }
}

/// A drink that can be consumed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Beverage {
    pub id: i64,
    pub name: String,
    pub typical_abv: f64,
    pub is_hydrating: bool,
    pub is_alcohol: bool,
}

impl Named for Beverage {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

/// A kind of exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActivityType {
    pub id: i64,
    pub description: String,
    pub distance_based: bool,
    pub calories_per_minute: Option<f64>,
}

impl Named for ActivityType {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.description)
    }
}

/// A grouping for food items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FoodCategory {
    pub id: i64,
    pub name: String,
}

impl Named for FoodCategory {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

/// Where a meal recipe comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FoodSource {
    pub id: i64,
    pub name: String,
}

impl Named for FoodSource {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl_entity!(Person, Beverage, ActivityType, FoodCategory, FoodSource);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let person = Person {
            first_names: "Jane".to_string(),
            surname: "Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(person.display_name(), "Jane Doe");
        assert_eq!(person.name(), "Jane Doe");
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert!("other".parse::<Gender>().is_err());
        assert_eq!(Gender::Unspecified.to_string(), "Unspecified");
    }
}
