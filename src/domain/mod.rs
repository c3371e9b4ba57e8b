//! Domain types for the repository layer.
//!
//! Provides:
//! - **Error types** ([`RepositoryError`]) and the [`Result`] alias
//! - **Record capability** ([`ContainerRecord`]) for item types with an id
//!   and partition-key value
//!
//! All fallible operations in the crate return [`Result<T>`]. Vendor
//! failures keep their original [`azure_core::Error`] payload; use
//! [`RepositoryError::is_not_found`] and [`RepositoryError::is_conflict`]
//! for the two classes callers most often branch on.

pub mod errors;
pub mod record;
pub mod result;

pub(crate) use errors::ensure_not_empty;

// Re-export commonly used types for convenience
pub use errors::RepositoryError;
pub use record::ContainerRecord;
pub use result::Result;
