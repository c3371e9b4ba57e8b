//! Container resolution and provisioning
//!
//! Maps a logical container key to a live [`ContainerClient`]: looks up the
//! key's [`ContainerOptions`], ensures the database and container exist, and
//! returns the handle. Resolution is not cached per key; every logical
//! operation re-resolves and relies on the create-if-absent fast path being
//! idempotent at the service.

use crate::config::RepositoryOptions;
use crate::domain::{RepositoryError, Result};
use crate::providers::client::CosmosClientProvider;
use async_trait::async_trait;
use azure_data_cosmos::clients::{ContainerClient, DatabaseClient};
use azure_data_cosmos::models::{
    ContainerProperties, IndexingPolicy, PartitionKeyDefinition, PartitionKeyKind,
};
use std::borrow::Cow;
use std::sync::Arc;

/// Resolves a configured container key to a live container handle
#[async_trait]
pub trait ContainerProvider: Send + Sync {
    /// Resolve `container_key` to a provisioned [`ContainerClient`].
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ContainerNotConfigured`] for an unknown
    /// key, or the unmodified vendor error if provisioning fails.
    async fn container(&self, container_key: &str) -> Result<ContainerClient>;
}

/// [`ContainerProvider`] backed by the shared Cosmos DB client
pub struct CosmosContainerProvider {
    client_provider: Arc<CosmosClientProvider>,
    options: Arc<RepositoryOptions>,
}

impl CosmosContainerProvider {
    /// Create a new container provider over the shared client
    pub fn new(client_provider: Arc<CosmosClientProvider>, options: Arc<RepositoryOptions>) -> Self {
        Self {
            client_provider,
            options,
        }
    }

    async fn resolve(&self, container_key: &str) -> Result<ContainerClient> {
        let container_options = self.options.container_options(container_key)?;

        let database = self.ensure_database_exists().await?;

        let container = database.container_client(&container_options.container_name);

        // Try to read the container first
        if container.read(None).await.is_err() {
            tracing::debug!(
                container = %container_options.container_name,
                partition_key = %container_options.partition_key,
                "creating container"
            );

            let partition_key_def = PartitionKeyDefinition {
                paths: vec![container_options.partition_key.clone()],
                kind: PartitionKeyKind::Hash,
                version: None,
            };

            let properties = ContainerProperties {
                id: Cow::Owned(container_options.container_name.clone()),
                partition_key: partition_key_def,
                indexing_policy: Some(IndexingPolicy::default()),
                ..Default::default()
            };

            database.create_container(properties, None).await?;

            tracing::debug!(
                container = %container_options.container_name,
                "container created"
            );
        }

        Ok(container)
    }

    async fn ensure_database_exists(&self) -> Result<DatabaseClient> {
        self.client_provider
            .invoke(|client| async move {
                let database = client.database_client(&self.options.database_id);

                // Try to read the database first
                if database.read(None).await.is_err() {
                    tracing::debug!(database = %self.options.database_id, "creating database");

                    client
                        .create_database(&self.options.database_id, None)
                        .await?;

                    tracing::debug!(database = %self.options.database_id, "database created");
                }

                Ok(database)
            })
            .await
    }
}

#[async_trait]
impl ContainerProvider for CosmosContainerProvider {
    async fn container(&self, container_key: &str) -> Result<ContainerClient> {
        match self.resolve(container_key).await {
            Ok(container) => Ok(container),
            Err(err @ RepositoryError::Cosmos(_)) => {
                tracing::error!(
                    container_key,
                    error = %err,
                    "a Cosmos DB error occurred retrieving the container specified"
                );
                Err(err)
            }
            Err(err) => {
                tracing::error!(
                    container_key,
                    error = %err,
                    "an error occurred retrieving the container specified"
                );
                Err(err)
            }
        }
    }
}
