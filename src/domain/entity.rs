//! Traits shared by every stored aggregate

use std::borrow::Cow;

/// An aggregate with a store-assigned surrogate key
pub trait Entity {
    /// The surrogate key (0 until the store assigns one)
    fn id(&self) -> i64;

    /// Sets the surrogate key
    fn set_id(&mut self, id: i64);
}

/// An aggregate that can be resolved from its human-readable name
pub trait Named {
    /// The name used in flat records
    fn name(&self) -> Cow<'_, str>;
}

/// Implements [`Entity`] for structs with an `id: i64` field
macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::domain::entity::Entity for $ty {
                fn id(&self) -> i64 {
                    self.id
                }

                fn set_id(&mut self, id: i64) {
                    self.id = id;
                }
            }
        )+
    };
}

pub(crate) use impl_entity;
