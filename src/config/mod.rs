//! Configuration for the repository layer.
//!
//! Options are bound once from external configuration at process start and
//! shared immutably by every provider. Loading supports:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`COSMOS_REPOSITORY_*` prefix)
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! endpoint_uri = "https://your-account.documents.azure.com:443/"
//! primary_key = "${COSMOS_PRIMARY_KEY}"
//! database_id = "orders_db"
//! connection_mode = "gateway"
//!
//! [containers.orders]
//! container_name = "orders"
//! partition_key = "/pk"
//! ```
//!
//! The PascalCase key names of the external schema (`EndpointUri`,
//! `PrimaryKey`, `DatabaseId`, `ConnectionMode`, `Containers`) are accepted
//! as aliases, as is the integer connection-mode encoding (0 = gateway,
//! 1 = direct).

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_options;
pub use schema::{ConnectionMode, ContainerOptions, RepositoryOptions};
pub use secret::{secret_string, SecretString, SecretValue};
