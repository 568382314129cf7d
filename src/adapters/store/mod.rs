//! Persistence collaborator
//!
//! - [`traits`] - The keyed store contract the exchange engine consumes
//! - [`memory`] - An in-memory implementation with JSON snapshots

pub mod memory;
pub mod traits;

pub use memory::{MemoryRepository, MemoryStore, StoreSnapshot};
pub use traits::{HealthStore, Repository};
