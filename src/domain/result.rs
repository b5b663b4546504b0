//! Result type alias for crsync

use super::errors::CrSyncError;

/// Result type alias for crsync operations
///
/// # Examples
///
/// ```
/// use crsync::domain::result::Result;
/// use crsync::domain::errors::CrSyncError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CrSyncError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CrSyncError>;
