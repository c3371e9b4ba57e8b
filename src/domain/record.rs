//! Record capability for items stored in a container

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Capability trait for item types the record-level conveniences operate on.
///
/// Cosmos DB requires every item to carry a string `id` and a partition-key
/// value; this trait surfaces both so commands can derive the partition key
/// from the item instead of taking it as a separate argument. The partition
/// key defaults to the id, the common layout for small containers.
///
/// # Examples
///
/// ```
/// use cosmos_repository::domain::ContainerRecord;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Order {
///     id: String,
///     pk: String,
///     total: i64,
/// }
///
/// impl ContainerRecord for Order {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn partition_key_value(&self) -> &str {
///         &self.pk
///     }
/// }
/// ```
pub trait ContainerRecord: Serialize + DeserializeOwned + Send + Sync {
    /// The item identifier
    fn id(&self) -> &str;

    /// The partition-key value routing this item; defaults to the id
    fn partition_key_value(&self) -> &str {
        self.id()
    }
}
