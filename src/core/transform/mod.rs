//! Flattening projections
//!
//! Converts nested domain aggregates into self-contained flat records and
//! back. Foreign keys become human-readable names on the way out and are
//! resolved by name (ignoring case) on the way in.
//!
//! For every field present in a flat record, the round trip
//! `to_flat(from_flat(record))` reproduces the record exactly. Fields the
//! flat schema does not carry, such as surrogate keys, are not preserved.
//!
//! # Example
//!
//! ```rust,no_run
//! use healthx::core::reference::ReferenceSession;
//! use healthx::core::transform::{to_flat_all, Projection};
//! use healthx::domain::WeightMeasurement;
//!
//! # fn example(refs: &ReferenceSession, weights: &[WeightMeasurement]) -> healthx::domain::Result<()> {
//! let records = to_flat_all(weights, refs)?;
//! let restored = WeightMeasurement::from_flat(&records[0], refs)?;
//! # Ok(())
//! # }
//! ```

pub mod food;
pub mod measurements;
pub mod people;

use crate::core::reference::{ReferenceKind, ReferenceSession};
use crate::domain::Result;
use crate::records::FlatRecord;

/// A domain aggregate with a flat record projection
pub trait Projection: Sized {
    type Flat: FlatRecord;

    /// The lookup tables both directions of the projection read
    fn references() -> &'static [ReferenceKind];

    /// Flattens the aggregate, replacing foreign keys by names
    ///
    /// # Errors
    ///
    /// Returns a lookup error if a referenced entity is missing from the
    /// session.
    fn to_flat(&self, refs: &ReferenceSession) -> Result<Self::Flat>;

    /// Rebuilds an unsaved aggregate, resolving names to identifiers
    ///
    /// # Errors
    ///
    /// Returns a lookup error if a name does not resolve to exactly one
    /// entity.
    fn from_flat(flat: &Self::Flat, refs: &ReferenceSession) -> Result<Self>;
}

/// Flattens every aggregate, preserving order
pub fn to_flat_all<A: Projection>(
    aggregates: &[A],
    refs: &ReferenceSession,
) -> Result<Vec<A::Flat>> {
    aggregates.iter().map(|a| a.to_flat(refs)).collect()
}

/// Rebuilds every aggregate, preserving order
pub fn from_flat_all<A: Projection>(
    records: &[A::Flat],
    refs: &ReferenceSession,
) -> Result<Vec<A>> {
    records.iter().map(|r| A::from_flat(r, refs)).collect()
}
