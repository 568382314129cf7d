//! Record validation
//!
//! - [`field`] - Predicate checks on single values
//! - [`format`] - Structural checks on whole lines

pub mod field;
pub mod format;

pub use field::{
    require_date_not_future, require_non_negative, require_not_future,
    require_optional_non_negative, require_positive, require_text, validate_field,
};
pub use format::RecordPattern;
