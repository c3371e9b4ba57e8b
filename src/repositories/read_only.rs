//! Read-only repository façade
//!
//! A narrower surface over [`QueryHandler`] for the common get-by-id and
//! query-all cases. Adds no behavior of its own beyond defaulting the
//! partition key to the item id.

use crate::domain::Result;
use crate::handlers::QueryHandler;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Read-only access to configured containers
pub struct ReadOnlyRepository {
    query_handler: Arc<QueryHandler>,
}

impl ReadOnlyRepository {
    /// Create a new read-only repository over a query handler
    pub fn new(query_handler: Arc<QueryHandler>) -> Self {
        Self { query_handler }
    }

    /// Gets an item by id, using the id as the partition-key value.
    pub async fn get_item_by_id<T>(&self, id: &str, container_key: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        self.query_handler
            .read_item_by_id(id, container_key, id)
            .await
    }

    /// Gets an item by id within an explicit partition.
    pub async fn get_item_by_id_in_partition<T>(
        &self,
        id: &str,
        container_key: &str,
        partition_key_value: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        self.query_handler
            .read_item_by_id(id, container_key, partition_key_value)
            .await
    }

    /// Gets an item by id, returning `None` when the item does not exist.
    ///
    /// Every other failure propagates unchanged.
    pub async fn try_get_item_by_id<T>(&self, id: &str, container_key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.get_item_by_id(id, container_key).await {
            Ok(item) => Ok(Some(item)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Runs a raw SQL query and returns every matching item.
    pub async fn get_all_items_by_query<T>(
        &self,
        query: &str,
        container_key: &str,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.query_handler
            .read_items_by_query(container_key, query)
            .await
    }
}
