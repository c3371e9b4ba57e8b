//! Composition root
//!
//! The single place where the object graph is assembled: options are bound
//! and validated once, then every provider, handler and repository is
//! constructed once and shared as a process-wide singleton. Consumers hold
//! the `Arc`s and pass them into their own services; there is no runtime
//! service container.

use crate::config::{load_options, RepositoryOptions};
use crate::domain::{RepositoryError, Result};
use crate::handlers::{CommandHandler, PaginatedQueryHandler, QueryHandler};
use crate::providers::{ContainerProvider, CosmosClientProvider, CosmosContainerProvider};
use crate::repositories::ReadOnlyRepository;
use std::path::Path;
use std::sync::Arc;

/// The assembled service graph for Cosmos DB data access.
///
/// All handlers share one [`CosmosContainerProvider`], which shares the one
/// lazily-initialized [`CosmosClientProvider`]; the process therefore holds
/// a single Cosmos DB client regardless of how many handlers are in use.
///
/// # Examples
///
/// ```no_run
/// use cosmos_repository::composition::CosmosDbDependencies;
/// use serde_json::Value;
///
/// # async fn example() -> cosmos_repository::domain::Result<()> {
/// let deps = CosmosDbDependencies::from_config_file("repository.toml")?;
///
/// let order: Value = deps
///     .read_only_repository
///     .get_item_by_id("o1", "orders")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct CosmosDbDependencies {
    /// The bound repository options
    pub options: Arc<RepositoryOptions>,

    /// The shared client provider
    pub client_provider: Arc<CosmosClientProvider>,

    /// The shared container provider
    pub container_provider: Arc<dyn ContainerProvider>,

    /// Query operations
    pub query_handler: Arc<QueryHandler>,

    /// Paged query operations
    pub paginated_query_handler: Arc<PaginatedQueryHandler>,

    /// Command operations
    pub command_handler: Arc<CommandHandler>,

    /// Read-only façade
    pub read_only_repository: Arc<ReadOnlyRepository>,
}

impl std::fmt::Debug for CosmosDbDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosDbDependencies")
            .field("database_id", &self.options.database_id)
            .finish_non_exhaustive()
    }
}

impl CosmosDbDependencies {
    /// Builds the service graph from already-bound options.
    ///
    /// Options are validated exactly once, before any service is
    /// constructed; no connection is opened until first use.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the options are invalid.
    pub fn build(options: RepositoryOptions) -> Result<Self> {
        options.validate().map_err(|e| {
            RepositoryError::Configuration(format!("options validation failed: {e}"))
        })?;

        let options = Arc::new(options);

        let client_provider = Arc::new(CosmosClientProvider::new(options.clone()));
        let container_provider: Arc<dyn ContainerProvider> = Arc::new(
            CosmosContainerProvider::new(client_provider.clone(), options.clone()),
        );

        let query_handler = Arc::new(QueryHandler::new(container_provider.clone()));
        let paginated_query_handler =
            Arc::new(PaginatedQueryHandler::new(container_provider.clone()));
        let command_handler = Arc::new(CommandHandler::new(container_provider.clone()));
        let read_only_repository = Arc::new(ReadOnlyRepository::new(query_handler.clone()));

        Ok(Self {
            options,
            client_provider,
            container_provider,
            query_handler,
            paginated_query_handler,
            command_handler,
            read_only_repository,
        })
    }

    /// Loads options from a TOML file and builds the service graph.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let options = load_options(path)?;
        Self::build(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, ConnectionMode, ContainerOptions};
    use std::collections::HashMap;

    fn options() -> RepositoryOptions {
        RepositoryOptions {
            endpoint_uri: "https://test.documents.azure.com:443/".to_string(),
            primary_key: secret_string("dGVzdC1rZXk=".to_string()),
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
    fn test_build_constructs_shared_graph() {
        let deps = CosmosDbDependencies::build(options()).unwrap();

        assert_eq!(deps.options.database_id, "test_db");
        // Two strong handles to the client provider: the graph field and the
        // container provider.
        assert_eq!(Arc::strong_count(&deps.client_provider), 2);
    }

    #[test]
    fn test_build_rejects_invalid_options() {
        let mut invalid = options();
        invalid.endpoint_uri = "http://insecure.example.com/".to_string();

        let err = CosmosDbDependencies::build(invalid).unwrap_err();
        assert!(matches!(err, RepositoryError::Configuration(_)));
    }

    #[test]
    fn test_independent_graphs_do_not_share_state() {
        let first = CosmosDbDependencies::build(options()).unwrap();
        let second = CosmosDbDependencies::build(options()).unwrap();

        assert!(!Arc::ptr_eq(&first.client_provider, &second.client_provider));
    }
}
