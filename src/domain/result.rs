//! Result type alias for Tracklift

use super::errors::TrackliftError;

/// Result type alias for Tracklift operations
///
/// # Examples
///
/// ```
/// use tracklift::domain::result::Result;
/// use tracklift::domain::errors::TrackliftError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TrackliftError::Artifact("missing header".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TrackliftError>;
