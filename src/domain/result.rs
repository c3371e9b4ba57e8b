//! Result type alias for repository operations

use super::errors::RepositoryError;

/// Result type alias using [`RepositoryError`] as the error type
///
/// # Examples
///
/// ```
/// use cosmos_repository::domain::{RepositoryError, Result};
///
/// fn validated(id: &str) -> Result<&str> {
///     if id.is_empty() {
///         return Err(RepositoryError::EmptyArgument("id"));
///     }
///     Ok(id)
/// }
/// ```
pub type Result<T> = std::result::Result<T, RepositoryError>;
