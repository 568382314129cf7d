//! Result type alias for HealthX

use super::errors::ExchangeError;

/// Result type alias for HealthX operations
///
/// # Examples
///
/// ```
/// use healthx::domain::result::Result;
/// use healthx::domain::errors::ExchangeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ExchangeError::field("Weight", 1))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExchangeError>;
