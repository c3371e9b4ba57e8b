//! Repository options schema
//!
//! Typed configuration for the Cosmos DB repository layer: account endpoint
//! and credential, database id, connection mode, and the map of logical
//! container keys to container settings. Field names accept both the crate's
//! snake_case spelling and the PascalCase keys used by the external
//! configuration schema (`EndpointUri`, `PrimaryKey`, ...).

use crate::config::SecretString;
use crate::domain::{RepositoryError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Client connectivity mode.
///
/// The external schema encodes this as an integer (0 = gateway, 1 = direct);
/// string forms `"gateway"` / `"direct"` are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// Route requests through the Cosmos DB gateway endpoint
    #[default]
    Gateway,
    /// Connect directly to backend replicas
    Direct,
}

impl Serialize for ConnectionMode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ConnectionMode::Gateway => serializer.serialize_str("gateway"),
            ConnectionMode::Direct => serializer.serialize_str("direct"),
        }
    }
}

impl<'de> Deserialize<'de> for ConnectionMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConnectionModeVisitor;

        impl Visitor<'_> for ConnectionModeVisitor {
            type Value = ConnectionMode;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("0, 1, \"gateway\" or \"direct\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
                match value {
                    0 => Ok(ConnectionMode::Gateway),
                    1 => Ok(ConnectionMode::Direct),
                    other => Err(E::invalid_value(
                        de::Unexpected::Unsigned(other),
                        &self,
                    )),
                }
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Self::Value, E> {
                match value {
                    0 => Ok(ConnectionMode::Gateway),
                    1 => Ok(ConnectionMode::Direct),
                    other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
                }
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
                match value.to_ascii_lowercase().as_str() {
                    "gateway" => Ok(ConnectionMode::Gateway),
                    "direct" => Ok(ConnectionMode::Direct),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(ConnectionModeVisitor)
    }
}

/// Settings for a single logical container.
///
/// One entry exists per container key in [`RepositoryOptions::containers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerOptions {
    /// Name of the Cosmos DB container
    #[serde(alias = "ContainerName")]
    pub container_name: String,

    /// Partition key path, e.g. `/pk`
    #[serde(alias = "PartitionKey")]
    pub partition_key: String,
}

/// Root options for the repository layer
///
/// Constructed once from external configuration at process start and shared,
/// immutable, by every provider instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOptions {
    /// Cosmos DB account endpoint URL
    #[serde(alias = "EndpointUri")]
    pub endpoint_uri: String,

    /// Account primary key
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(alias = "PrimaryKey")]
    pub primary_key: SecretString,

    /// Database identifier
    #[serde(alias = "DatabaseId")]
    pub database_id: String,

    /// Client connectivity mode
    #[serde(default, alias = "ConnectionMode")]
    pub connection_mode: ConnectionMode,

    /// Logical container key to container settings
    #[serde(default, alias = "Containers")]
    pub containers: HashMap<String, ContainerOptions>,
}

impl RepositoryOptions {
    /// Looks up the [`ContainerOptions`] bound for a container key.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ContainerNotConfigured`] naming the key if
    /// no entry exists. There is no fallback container.
    pub fn container_options(&self, container_key: &str) -> Result<&ContainerOptions> {
        self.containers
            .get(container_key)
            .ok_or_else(|| RepositoryError::ContainerNotConfigured(container_key.to_string()))
    }

    /// Validates the options
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        use secrecy::ExposeSecret;

        if self.endpoint_uri.is_empty() {
            return Err("endpoint_uri cannot be empty".to_string());
        }

        if !self.endpoint_uri.starts_with("https://") {
            return Err("endpoint_uri must start with https://".to_string());
        }

        if self.primary_key.expose_secret().is_empty() {
            return Err("primary_key cannot be empty".to_string());
        }

        if self.database_id.is_empty() {
            return Err("database_id cannot be empty".to_string());
        }

        for (container_key, container) in &self.containers {
            if container.container_name.is_empty() {
                return Err(format!(
                    "containers.{container_key}.container_name cannot be empty"
                ));
            }

            if !container.partition_key.starts_with('/') {
                return Err(format!(
                    "containers.{container_key}.partition_key must be a path starting with '/', got '{}'",
                    container.partition_key
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_options() -> RepositoryOptions {
        RepositoryOptions {
            endpoint_uri: "https://test.documents.azure.com:443/".to_string(),
            primary_key: secret_string("test-key".to_string()),
            database_id: "test_db".to_string(),
            connection_mode: ConnectionMode::Gateway,
            containers: HashMap::from([(
                "orders".to_string(),
                ContainerOptions {
                    container_name: "orders".to_string(),
                    partition_key: "/pk".to_string(),
                },
            )]),
        }
    }

    #[test]
    fn test_container_options_lookup() {
        let options = valid_options();

        let container = options.container_options("orders").unwrap();
        assert_eq!(container.container_name, "orders");
        assert_eq!(container.partition_key, "/pk");
    }

    #[test]
    fn test_container_options_missing_key_names_key() {
        let options = valid_options();

        let err = options.container_options("missing").unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::ContainerNotConfigured(ref key) if key == "missing"
        ));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_options_validation() {
        let mut options = valid_options();
        assert!(options.validate().is_ok());

        options.endpoint_uri = "http://test.documents.azure.com:443/".to_string();
        assert!(options.validate().is_err());

        options.endpoint_uri = String::new();
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_options_validation_empty_key() {
        let mut options = valid_options();
        options.primary_key = secret_string(String::new());
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_options_validation_container_entries() {
        let mut options = valid_options();
        options
            .containers
            .get_mut("orders")
            .unwrap()
            .partition_key = "pk".to_string();

        let err = options.validate().unwrap_err();
        assert!(err.contains("partition_key"));

        options.containers.get_mut("orders").unwrap().container_name = String::new();
        let err = options.validate().unwrap_err();
        assert!(err.contains("container_name"));
    }

    #[test]
    fn test_connection_mode_from_integer() {
        let gateway: ConnectionMode = serde_json::from_str("0").unwrap();
        assert_eq!(gateway, ConnectionMode::Gateway);

        let direct: ConnectionMode = serde_json::from_str("1").unwrap();
        assert_eq!(direct, ConnectionMode::Direct);

        assert!(serde_json::from_str::<ConnectionMode>("2").is_err());
    }

    #[test]
    fn test_connection_mode_from_string() {
        let gateway: ConnectionMode = serde_json::from_str("\"gateway\"").unwrap();
        assert_eq!(gateway, ConnectionMode::Gateway);

        let direct: ConnectionMode = serde_json::from_str("\"Direct\"").unwrap();
        assert_eq!(direct, ConnectionMode::Direct);

        assert!(serde_json::from_str::<ConnectionMode>("\"hybrid\"").is_err());
    }

    #[test]
    fn test_options_from_pascal_case_schema() {
        // The external configuration schema uses PascalCase keys and the
        // integer connection-mode encoding.
        let json = r#"{
            "EndpointUri": "https://account.documents.azure.com:443/",
            "PrimaryKey": "secret",
            "DatabaseId": "db",
            "ConnectionMode": 1,
            "Containers": {
                "orders": { "ContainerName": "orders", "PartitionKey": "/pk" }
            }
        }"#;

        let options: RepositoryOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.database_id, "db");
        assert_eq!(options.connection_mode, ConnectionMode::Direct);
        assert_eq!(
            options.container_options("orders").unwrap().container_name,
            "orders"
        );
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_from_toml() {
        let toml_content = r#"
endpoint_uri = "https://account.documents.azure.com:443/"
primary_key = "secret"
database_id = "db"
connection_mode = "gateway"

[containers.orders]
container_name = "orders"
partition_key = "/pk"
"#;

        let options: RepositoryOptions = toml::from_str(toml_content).unwrap();
        assert_eq!(options.connection_mode, ConnectionMode::Gateway);
        assert!(options.validate().is_ok());
    }
}
