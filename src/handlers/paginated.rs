//! Paginated query operations
//!
//! Page windows are pushed into the query itself as `OFFSET (page_number-1) *
//! page_size LIMIT page_size`, so skipping happens server-side rather than by
//! slicing drained results.

use crate::domain::{ensure_not_empty, RepositoryError, Result};
use crate::handlers::query::drain_feed_pager;
use crate::handlers::query_builder::{Filter, ItemQuery};
use crate::providers::ContainerProvider;
use azure_data_cosmos::PartitionKey;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Handles paged reads and predicate counts, resolving containers by key
pub struct PaginatedQueryHandler {
    container_provider: Arc<dyn ContainerProvider>,
}

impl PaginatedQueryHandler {
    /// Create a new paginated query handler over a container provider
    pub fn new(container_provider: Arc<dyn ContainerProvider>) -> Self {
        Self { container_provider }
    }

    /// Reads one page of a typed query.
    ///
    /// `page_number` is 1-based; the first `(page_number - 1) * page_size`
    /// matching items are skipped and at most `page_size` are returned.
    ///
    /// # Errors
    ///
    /// Fails with a parameter-specific validation error when `page_number`
    /// or `page_size` is zero, before any network call.
    pub async fn read_paginated_items<T>(
        &self,
        container_key: &str,
        query: &ItemQuery,
        page_number: u32,
        page_size: u32,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        ensure_not_empty("container_key", container_key)?;

        if page_number < 1 {
            return Err(RepositoryError::InvalidPageArgument {
                argument: "page_number",
                value: page_number,
            });
        }

        if page_size < 1 {
            return Err(RepositoryError::InvalidPageArgument {
                argument: "page_size",
                value: page_size,
            });
        }

        let offset = (u64::from(page_number) - 1) * u64::from(page_size);
        let sql = query
            .clone()
            .offset_limit(offset, u64::from(page_size))
            .to_sql()?;

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

    /// Counts the items matching a predicate.
    ///
    /// Issues `SELECT VALUE COUNT(1)` across all partitions; per-partition
    /// partial counts are summed. A response that yields no count value at
    /// all fails with [`RepositoryError::CountUnavailable`]; non-success
    /// vendor statuses surface as the vendor error naming the status.
    pub async fn count_items(&self, container_key: &str, filter: Option<&Filter>) -> Result<u64> {
        ensure_not_empty("container_key", container_key)?;

        let mut query = ItemQuery::new();
        if let Some(filter) = filter {
            query = query.filter(filter.clone());
        }
        let sql = query.to_count_sql()?;

        let container = self.container_provider.container(container_key).await?;

        let pager = container.query_items::<u64>(sql, (), None)?;
        let counts = drain_feed_pager(pager).await?;

        if counts.is_empty() {
            return Err(RepositoryError::CountUnavailable(
                "count query returned no value".to_string(),
            ));
        }

        Ok(counts.into_iter().sum())
    }
}
