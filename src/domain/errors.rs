//! Repository error types
//!
//! Configuration and validation failures are raised synchronously before any
//! network I/O. Failures returned by the Cosmos DB service are carried
//! through [`RepositoryError::Cosmos`] unmodified so callers can interpret
//! vendor status codes themselves; this layer neither retries nor translates
//! them.

use thiserror::Error;

/// Main repository error type
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Configuration-related errors (loading, parsing, validation)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A container key with no entry in the bound options
    #[error("container with key '{0}' is not configured in repository options")]
    ContainerNotConfigured(String),

    /// A required argument was null or empty
    #[error("argument '{0}' must not be empty")]
    EmptyArgument(&'static str),

    /// A pagination argument was out of range
    #[error("{argument} must be greater than or equal to 1, got {value}")]
    InvalidPageArgument {
        /// Name of the offending parameter
        argument: &'static str,
        /// Value supplied by the caller
        value: u32,
    },

    /// A typed query could not be rendered
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A count query completed without yielding a value
    #[error("unable to determine item count: {0}")]
    CountUnavailable(String),

    /// Failure returned by the Cosmos DB service, propagated unmodified
    #[error(transparent)]
    Cosmos(#[from] azure_core::Error),

    /// Response body could not be serialized or deserialized
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Whether this is a vendor not-found failure (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        match self {
            RepositoryError::Cosmos(e) => {
                let rendered = e.to_string();
                rendered.contains("404") || rendered.contains("NotFound")
            }
            _ => false,
        }
    }

    /// Whether this is a vendor conflict failure (HTTP 409).
    pub fn is_conflict(&self) -> bool {
        match self {
            RepositoryError::Cosmos(e) => {
                let rendered = e.to_string();
                rendered.contains("409") || rendered.contains("Conflict")
            }
            _ => false,
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Fails with [`RepositoryError::EmptyArgument`] when a required string
/// argument is empty.
pub(crate) fn ensure_not_empty(argument: &'static str, value: &str) -> super::Result<()> {
    if value.trim().is_empty() {
        return Err(RepositoryError::EmptyArgument(argument));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = RepositoryError::Configuration("bad options".to_string());
        assert_eq!(err.to_string(), "configuration error: bad options");
    }

    #[test]
    fn test_container_not_configured_names_key() {
        let err = RepositoryError::ContainerNotConfigured("orders".to_string());
        assert!(err.to_string().contains("orders"));
    }

    #[test]
    fn test_empty_argument_names_parameter() {
        let err = RepositoryError::EmptyArgument("partition_key_value");
        assert!(err.to_string().contains("partition_key_value"));
    }

    #[test]
    fn test_invalid_page_argument_display() {
        let err = RepositoryError::InvalidPageArgument {
            argument: "page_size",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "page_size must be greater than or equal to 1, got 0"
        );
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(ensure_not_empty("id", "o1").is_ok());
        assert!(matches!(
            ensure_not_empty("id", ""),
            Err(RepositoryError::EmptyArgument("id"))
        ));
        assert!(ensure_not_empty("id", "   ").is_err());
    }

    #[test]
    fn test_cosmos_error_classification() {
        let not_found = RepositoryError::Cosmos(azure_core::Error::with_message(
            azure_core::error::ErrorKind::Other,
            "unexpected status 404 (NotFound)",
        ));
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());

        let conflict = RepositoryError::Cosmos(azure_core::Error::with_message(
            azure_core::error::ErrorKind::Other,
            "unexpected status 409 (Conflict)",
        ));
        assert!(conflict.is_conflict());
        assert!(!conflict.is_not_found());
    }

    #[test]
    fn test_classification_only_applies_to_vendor_errors() {
        let err = RepositoryError::Configuration("404 in a message".to_string());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RepositoryError = json_err.into();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn test_repository_error_implements_std_error() {
        let err = RepositoryError::EmptyArgument("id");
        let _: &dyn std::error::Error = &err;
    }
}
