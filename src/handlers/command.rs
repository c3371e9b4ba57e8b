//! Command operations against configured containers
//!
//! Data-mutation surface: `create` fails on an existing id+partition pair,
//! `upsert` creates or replaces unconditionally, `replace` requires the item
//! to exist, and `delete` removes it (a second delete fails not-found at the
//! vendor layer). Every operation accepts either a raw partition-key string
//! or a typed [`PartitionKey`], mutates remote state only, and keeps no
//! local cache.

use crate::domain::{ensure_not_empty, ContainerRecord, Result};
use crate::providers::ContainerProvider;
use azure_data_cosmos::PartitionKey;
use serde::Serialize;
use std::sync::Arc;

/// Handles create, upsert, replace and delete operations, resolving
/// containers by key
pub struct CommandHandler {
    container_provider: Arc<dyn ContainerProvider>,
}

impl CommandHandler {
    /// Create a new command handler over a container provider
    pub fn new(container_provider: Arc<dyn ContainerProvider>) -> Self {
        Self { container_provider }
    }

    /// Creates a new item using a string partition key.
    ///
    /// # Errors
    ///
    /// Fails with the vendor's conflict error when an item with the same id
    /// and partition key already exists (see
    /// [`RepositoryError::is_conflict`](crate::domain::RepositoryError::is_conflict)).
    pub async fn create_item<T>(
        &self,
        item: T,
        container_key: &str,
        partition_key_value: &str,
    ) -> Result<()>
    where
        T: Serialize + Send,
    {
        ensure_not_empty("partition_key_value", partition_key_value)?;

        self.create_item_with_partition_key(
            item,
            container_key,
            PartitionKey::from(partition_key_value.to_string()),
        )
        .await
    }

    /// Creates a new item using a typed [`PartitionKey`].
    pub async fn create_item_with_partition_key<T>(
        &self,
        item: T,
        container_key: &str,
        partition_key: PartitionKey,
    ) -> Result<()>
    where
        T: Serialize + Send,
    {
        ensure_not_empty("container_key", container_key)?;

        let container = self.container_provider.container(container_key).await?;

        container.create_item(partition_key, item, None).await?;

        Ok(())
    }

    /// Creates or replaces an item unconditionally, using a string partition
    /// key.
    pub async fn upsert_item<T>(
        &self,
        item: T,
        container_key: &str,
        partition_key_value: &str,
    ) -> Result<()>
    where
        T: Serialize + Send,
    {
        ensure_not_empty("partition_key_value", partition_key_value)?;

        self.upsert_item_with_partition_key(
            item,
            container_key,
            PartitionKey::from(partition_key_value.to_string()),
        )
        .await
    }

    /// Creates or replaces an item unconditionally, using a typed
    /// [`PartitionKey`].
    pub async fn upsert_item_with_partition_key<T>(
        &self,
        item: T,
        container_key: &str,
        partition_key: PartitionKey,
    ) -> Result<()>
    where
        T: Serialize + Send,
    {
        ensure_not_empty("container_key", container_key)?;

        let container = self.container_provider.container(container_key).await?;

        container.upsert_item(partition_key, item, None).await?;

        Ok(())
    }

    /// Replaces an existing item, using a string partition key.
    ///
    /// # Errors
    ///
    /// Fails with the vendor's not-found error when no item with `item_id`
    /// exists in the partition.
    pub async fn replace_item<T>(
        &self,
        item: T,
        item_id: &str,
        container_key: &str,
        partition_key_value: &str,
    ) -> Result<()>
    where
        T: Serialize + Send,
    {
        ensure_not_empty("partition_key_value", partition_key_value)?;

        self.replace_item_with_partition_key(
            item,
            item_id,
            container_key,
            PartitionKey::from(partition_key_value.to_string()),
        )
        .await
    }

    /// Replaces an existing item, using a typed [`PartitionKey`].
    pub async fn replace_item_with_partition_key<T>(
        &self,
        item: T,
        item_id: &str,
        container_key: &str,
        partition_key: PartitionKey,
    ) -> Result<()>
    where
        T: Serialize + Send,
    {
        ensure_not_empty("item_id", item_id)?;
        ensure_not_empty("container_key", container_key)?;

        let container = self.container_provider.container(container_key).await?;

        container
            .replace_item(partition_key, item_id, item, None)
            .await?;

        Ok(())
    }

    /// Deletes an item by id, using a string partition key.
    ///
    /// # Errors
    ///
    /// Fails with the vendor's not-found error when the item does not exist,
    /// including a second delete of the same id.
    pub async fn delete_item(
        &self,
        id: &str,
        container_key: &str,
        partition_key_value: &str,
    ) -> Result<()> {
        ensure_not_empty("partition_key_value", partition_key_value)?;

        self.delete_item_with_partition_key(
            id,
            container_key,
            PartitionKey::from(partition_key_value.to_string()),
        )
        .await
    }

    /// Deletes an item by id, using a typed [`PartitionKey`].
    pub async fn delete_item_with_partition_key(
        &self,
        id: &str,
        container_key: &str,
        partition_key: PartitionKey,
    ) -> Result<()> {
        ensure_not_empty("id", id)?;
        ensure_not_empty("container_key", container_key)?;

        let container = self.container_provider.container(container_key).await?;

        container.delete_item(partition_key, id, None).await?;

        Ok(())
    }

    /// Creates a record, deriving the partition key from the item.
    pub async fn create_record<T>(&self, item: T, container_key: &str) -> Result<()>
    where
        T: ContainerRecord,
    {
        let partition_key_value = item.partition_key_value().to_string();
        self.create_item(item, container_key, &partition_key_value)
            .await
    }

    /// Creates or replaces a record, deriving the partition key from the item.
    pub async fn upsert_record<T>(&self, item: T, container_key: &str) -> Result<()>
    where
        T: ContainerRecord,
    {
        let partition_key_value = item.partition_key_value().to_string();
        self.upsert_item(item, container_key, &partition_key_value)
            .await
    }

    /// Deletes a record, deriving the id and partition key from the item.
    pub async fn delete_record<T>(&self, item: &T, container_key: &str) -> Result<()>
    where
        T: ContainerRecord,
    {
        self.delete_item(item.id(), container_key, item.partition_key_value())
            .await
    }
}
