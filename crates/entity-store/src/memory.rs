use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Result,
    store::{EntityKey, EntityStore, EntityValue},
};

/// In-memory entity store.
///
/// Backed by a `BTreeMap`, so `values()` comes back in key order. Clones share
/// the same underlying map. Contents do not survive a restart; use
/// [`PostgresEntityStore`](crate::PostgresEntityStore) for durability.
pub struct InMemoryEntityStore<K, V> {
    entries: Arc<RwLock<BTreeMap<K, V>>>,
}

impl<K, V> InMemoryEntityStore<K, V> {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<K, V> Clone for InMemoryEntityStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for InMemoryEntityStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: EntityKey, V: EntityValue> EntityStore<K, V> for InMemoryEntityStore<K, V> {
    async fn put(&self, key: K, value: V) -> Result<Option<V>> {
        Ok(self.entries.write().await.insert(key, value))
    }

    async fn get(&self, key: &K) -> Result<Option<V>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn values(&self) -> Result<Vec<V>> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}
