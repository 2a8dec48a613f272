use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// Key type usable with an [`EntityStore`].
///
/// Keys are ordered, and their `Display` form is what durable backends
/// persist, so the textual order must agree with `Ord`.
pub trait EntityKey: Ord + Clone + Display + Send + Sync + 'static {}

impl<T> EntityKey for T where T: Ord + Clone + Display + Send + Sync + 'static {}

/// Value type usable with an [`EntityStore`].
pub trait EntityValue: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> EntityValue for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

/// A shareable, type-erased store handle.
pub type SharedStore<K, V> = Arc<dyn EntityStore<K, V>>;

/// Ordered, persistent key-value map.
///
/// Every call is individually atomic. There are no cross-key or cross-store
/// transactions; callers needing read-modify-write consistency must
/// serialize their writers themselves.
///
/// Values are copied in and out: mutating a value returned by `get` has no
/// effect on the store until it is written back with `put`.
#[async_trait]
pub trait EntityStore<K: EntityKey, V: EntityValue>: Send + Sync {
    /// Inserts or overwrites the value at `key`.
    ///
    /// Returns the previous value, if any.
    async fn put(&self, key: K, value: V) -> Result<Option<V>>;

    /// Retrieves the value at `key`.
    async fn get(&self, key: &K) -> Result<Option<V>>;

    /// Returns a snapshot of all values, in key order.
    async fn values(&self) -> Result<Vec<V>>;

    /// Returns the number of stored entries.
    async fn len(&self) -> Result<usize>;

    /// Returns true if the store holds no entries.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Returns true if a value is stored at `key`.
    async fn contains(&self, key: &K) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
