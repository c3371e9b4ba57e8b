//! Shared Cosmos DB client provider
//!
//! Owns the single [`CosmosClient`] used by the whole process. The client is
//! constructed lazily on first use and never recreated; construction failure
//! propagates to the caller. Dropping the provider releases the client's
//! connection resources.

use crate::config::{ConnectionMode, RepositoryOptions};
use crate::domain::Result;
use azure_core::credentials::Secret;
use azure_data_cosmos::{CosmosClient, CosmosClientOptions};
use secrecy::ExposeSecret;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lazily-initialized, process-wide Cosmos DB client.
///
/// Safe for concurrent use; initialization is synchronized so only one
/// client is ever constructed even under concurrent first access.
pub struct CosmosClientProvider {
    options: Arc<RepositoryOptions>,
    client: OnceCell<CosmosClient>,
}

impl CosmosClientProvider {
    /// Create a new client provider
    ///
    /// No connection is opened until the first [`invoke`](Self::invoke).
    pub fn new(options: Arc<RepositoryOptions>) -> Self {
        Self {
            options,
            client: OnceCell::new(),
        }
    }

    /// Applies an async operation to the shared client.
    ///
    /// # Errors
    ///
    /// Returns an error if client construction fails on first use, or
    /// whatever the operation itself returns.
    pub async fn invoke<'a, T, F, Fut>(&'a self, invoker: F) -> Result<T>
    where
        F: FnOnce(&'a CosmosClient) -> Fut,
        Fut: Future<Output = Result<T>> + 'a,
    {
        let client = self.client().await?;
        invoker(client).await
    }

    async fn client(&self) -> Result<&CosmosClient> {
        self.client
            .get_or_try_init(|| async { self.create_client() })
            .await
    }

    fn create_client(&self) -> Result<CosmosClient> {
        if self.options.connection_mode == ConnectionMode::Direct {
            // The Rust SDK transport is gateway-only.
            tracing::warn!(
                "direct connection mode is not supported by the Cosmos DB Rust SDK, \
                 connecting through the gateway"
            );
        }

        // Convert our SecretString to Azure's Secret type
        let key_str: String = self.options.primary_key.expose_secret().clone().into();
        let key = Secret::new(key_str);

        let client = CosmosClient::with_key(
            &self.options.endpoint_uri,
            key,
            Some(CosmosClientOptions::default()),
        )?;

        tracing::debug!(endpoint = %self.options.endpoint_uri, "Cosmos DB client created");

        Ok(client)
    }
}
