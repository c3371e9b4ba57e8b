//! Query operations against configured containers
//!
//! Point reads by id and partition key, raw SQL queries and typed
//! [`ItemQuery`] queries. Query results stream back from the service in
//! pages; [`drain_feed_pager`] appends every page into an in-memory list,
//! preserving server-returned order. Dropping an operation future cancels it
//! before the next page fetch.

use crate::domain::{ensure_not_empty, RepositoryError, Result};
use crate::handlers::query_builder::ItemQuery;
use crate::providers::ContainerProvider;
use azure_data_cosmos::{FeedPager, PartitionKey};
use futures::stream::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Handles read operations, resolving containers by key
pub struct QueryHandler {
    container_provider: Arc<dyn ContainerProvider>,
}

impl QueryHandler {
    /// Create a new query handler over a container provider
    pub fn new(container_provider: Arc<dyn ContainerProvider>) -> Self {
        Self { container_provider }
    }

    /// Point-reads a single item by id and partition key.
    ///
    /// # Errors
    ///
    /// Fails with a validation error before any network call when an
    /// argument is empty; a missing item surfaces as the vendor's not-found
    /// error (see [`RepositoryError::is_not_found`]).
    pub async fn read_item_by_id<T>(
        &self,
        id: &str,
        container_key: &str,
        partition_key_value: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        ensure_not_empty("id", id)?;
        ensure_not_empty("container_key", container_key)?;
        ensure_not_empty("partition_key_value", partition_key_value)?;

        let container = self.container_provider.container(container_key).await?;

        let response = container
            .read_item::<T>(PartitionKey::from(partition_key_value.to_string()), id, None)
            .await?;

        response.into_body().map_err(|e| {
            RepositoryError::Serialization(format!("failed to deserialize item response: {e}"))
        })
    }

    /// Runs a raw SQL query across all partitions and drains every page.
    pub async fn read_items_by_query<T>(&self, container_key: &str, query: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        ensure_not_empty("container_key", container_key)?;
        ensure_not_empty("query", query)?;

        let container = self.container_provider.container(container_key).await?;

        let pager = container.query_items::<T>(query.to_string(), (), None)?;

        drain_feed_pager(pager).await
    }

    /// Runs a typed projection/predicate query and drains every page.
    ///
    /// The query is scoped to a single partition when it carries a
    /// partition-key value, otherwise it runs across all partitions.
    pub async fn read_items<T>(&self, container_key: &str, query: &ItemQuery) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        ensure_not_empty("container_key", container_key)?;

        let sql = query.to_sql()?;

        let container = self.container_provider.container(container_key).await?;

        let pager = match query.partition_key_value() {
            Some(partition_key_value) => container.query_items::<T>(
                sql,
                PartitionKey::from(partition_key_value.to_string()),
                None,
            )?,
            None => container.query_items::<T>(sql, (), None)?,
        };

        drain_feed_pager(pager).await
    }
}

/// Drains a result pager into an in-memory list.
///
/// Fetches while the pager reports more results and appends each item in
/// server order. The pager is released when exhausted or on early exit.
pub async fn drain_feed_pager<T>(mut pager: FeedPager<T>) -> Result<Vec<T>>
where
    T: DeserializeOwned + Send,
{
    let mut items = Vec::new();

    while let Some(item) = pager.next().await {
        items.push(item?);
    }

    Ok(items)
}
