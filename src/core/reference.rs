//! Reference data resolver
//!
//! A [`ReferenceSession`] is built at the start of each import or export
//! call and dropped at its end. It holds fully materialised snapshots of
//! the lookup tables the record type depends on, and is never shared
//! between calls.
//!
//! Name resolution is case-insensitive and must find exactly one
//! candidate: zero or several matches are both treated as "not found".
//!
//! # Example
//!
//! ```rust,no_run
//! use healthx::adapters::store::MemoryStore;
//! use healthx::core::reference::{ReferenceKind, ReferenceSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let refs = ReferenceSession::prepare(&store, &[ReferenceKind::People, ReferenceKind::Beverages]).await?;
//!
//! if let Some(beverage) = refs.beverages.by_name("STOUT") {
//!     println!("Stout has id {}", beverage.id);
//! }
//! # Ok(())
//! # }
//! ```

use crate::adapters::store::HealthStore;
use crate::domain::{
    ActivityType, Beverage, Entity, ExchangeError, FoodCategory, FoodItem, FoodSource, Meal,
    Named, Person, Result,
};

/// The lookup tables a record type can depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    People,
    Beverages,
    Meals,
    ActivityTypes,
    FoodCategories,
    FoodSources,
    FoodItems,
}

/// An immutable snapshot of one lookup table
#[derive(Debug, Clone)]
pub struct ReferenceCollection<T> {
    label: &'static str,
    items: Vec<T>,
}

impl<T: Entity + Named> ReferenceCollection<T> {
    /// Creates a collection. `label` names it in lookup errors.
    pub fn new(label: &'static str, items: Vec<T>) -> Self {
        Self { label, items }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Finds the single entity whose name matches, ignoring case
    pub fn by_name(&self, name: &str) -> Option<&T> {
        let wanted = name.to_lowercase();
        let mut matches = self
            .items
            .iter()
            .filter(|item| item.name().to_lowercase() == wanted);
        match (matches.next(), matches.next()) {
            (Some(item), None) => Some(item),
            _ => None,
        }
    }

    /// Finds the entity with the given identifier
    pub fn by_id(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Like [`by_id`](Self::by_id), failing with a lookup error
    pub fn find_by_id(&self, id: i64) -> Result<&T> {
        self.by_id(id)
            .ok_or_else(|| ExchangeError::not_found(self.label, id))
    }

    /// Like [`by_name`](Self::by_name), failing with a lookup error
    pub fn find_by_name(&self, name: &str) -> Result<&T> {
        self.by_name(name)
            .ok_or_else(|| ExchangeError::not_found(self.label, name))
    }

    /// Resolves a name read from `field` of the record at `record`,
    /// failing with a referential miss
    pub fn resolve_name(&self, name: &str, field: &str, record: usize) -> Result<&T> {
        self.by_name(name)
            .ok_or_else(|| ExchangeError::referential_miss(field, name, record))
    }

    /// Resolves an identifier read from `field` of the record at `record`,
    /// failing with a referential miss
    pub fn resolve_id(&self, id: i64, field: &str, record: usize) -> Result<&T> {
        self.by_id(id)
            .ok_or_else(|| ExchangeError::referential_miss(field, id.to_string(), record))
    }
}

impl<T> Default for ReferenceCollection<T> {
    fn default() -> Self {
        Self {
            label: "reference",
            items: Vec::new(),
        }
    }
}

/// The lookup tables loaded for one import or export call
///
/// Tables that were not requested are left empty.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSession {
    pub people: ReferenceCollection<Person>,
    pub beverages: ReferenceCollection<Beverage>,
    pub meals: ReferenceCollection<Meal>,
    pub activity_types: ReferenceCollection<ActivityType>,
    pub food_categories: ReferenceCollection<FoodCategory>,
    pub food_sources: ReferenceCollection<FoodSource>,
    pub food_items: ReferenceCollection<FoodItem>,
}

impl ReferenceSession {
    /// Loads the requested lookup tables from the store
    ///
    /// # Errors
    ///
    /// Returns any error raised by the store while listing a table.
    pub async fn prepare(store: &dyn HealthStore, kinds: &[ReferenceKind]) -> Result<Self> {
        let mut session = Self::default();

        for kind in kinds {
            match kind {
                ReferenceKind::People => {
                    session.people =
                        ReferenceCollection::new("Person", store.people().list().await?);
                }
                ReferenceKind::Beverages => {
                    session.beverages =
                        ReferenceCollection::new("Beverage", store.beverages().list().await?);
                }
                ReferenceKind::Meals => {
                    session.meals = ReferenceCollection::new("Meal", store.meals().list().await?);
                }
                ReferenceKind::ActivityTypes => {
                    session.activity_types = ReferenceCollection::new(
                        "Activity type",
                        store.activity_types().list().await?,
                    );
                }
                ReferenceKind::FoodCategories => {
                    session.food_categories = ReferenceCollection::new(
                        "Food category",
                        store.food_categories().list().await?,
                    );
                }
                ReferenceKind::FoodSources => {
                    session.food_sources = ReferenceCollection::new(
                        "Food source",
                        store.food_sources().list().await?,
                    );
                }
                ReferenceKind::FoodItems => {
                    session.food_items =
                        ReferenceCollection::new("Food item", store.food_items().list().await?);
                }
            }
        }

        tracing::debug!(
            people = session.people.len(),
            beverages = session.beverages.len(),
            meals = session.meals.len(),
            activity_types = session.activity_types.len(),
            food_categories = session.food_categories.len(),
            food_sources = session.food_sources.len(),
            food_items = session.food_items.len(),
            "Reference data loaded"
        );

        Ok(session)
    }
}
