//! HashMap-backed store for development and tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Record, RecordKey, Store, StoreError};

/// Records are kept by insertion sequence so `list` returns them in insertion order,
/// with a key index on the side for lookups.
struct Collection<T: Record> {
    next_sequence: u64,
    positions: HashMap<T::Key, u64>,
    rows: BTreeMap<u64, T>,
}

impl<T: Record> Collection<T> {
    fn new() -> Self {
        Self {
            next_sequence: 0,
            positions: HashMap::new(),
            rows: BTreeMap::new(),
        }
    }
}

/// In-memory store for one collection. Clone-friendly via Arc; clones share the same records.
pub struct InMemoryStore<T: Record> {
    inner: Arc<RwLock<Collection<T>>>,
    limit: Option<usize>,
}

impl<T: Record> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limit: self.limit,
        }
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> InMemoryStore<T> {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection::new())),
            limit: None,
        }
    }

    /// Cap the number of records the collection may hold. `None` removes the cap.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<T: Record> Store<T> for InMemoryStore<T> {
    async fn find(&self, key: &T::Key) -> Result<Option<T>, StoreError> {
        let collection = self.inner.read().await;
        Ok(collection
            .positions
            .get(key)
            .and_then(|position| collection.rows.get(position))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let collection = self.inner.read().await;
        Ok(collection.rows.values().cloned().collect())
    }

    async fn insert(&self, mut entity: T) -> Result<T, StoreError> {
        let mut collection = self.inner.write().await;

        if let Some(limit) = self.limit {
            if collection.rows.len() >= limit {
                return Err(StoreError::CapacityExceeded {
                    collection: T::COLLECTION,
                    limit,
                });
            }
        }

        let sequence = collection.next_sequence + 1;
        let key = T::Key::generate(sequence);
        if collection.positions.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                collection: T::COLLECTION,
                key: key.to_string(),
            });
        }

        collection.next_sequence = sequence;
        entity.set_key(key.clone());
        collection.positions.insert(key.clone(), sequence);
        collection.rows.insert(sequence, entity.clone());

        tracing::debug!(collection = T::COLLECTION, %key, "record inserted");
        Ok(entity)
    }

    async fn replace(&self, key: &T::Key, mut entity: T) -> Result<(), StoreError> {
        let mut collection = self.inner.write().await;
        let position = *collection
            .positions
            .get(key)
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, key))?;

        entity.set_key(key.clone());
        collection.rows.insert(position, entity);

        tracing::debug!(collection = T::COLLECTION, %key, "record replaced");
        Ok(())
    }

    async fn remove(&self, key: &T::Key) -> Result<(), StoreError> {
        let mut collection = self.inner.write().await;
        let position = collection
            .positions
            .remove(key)
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, key))?;
        collection.rows.remove(&position);

        tracing::debug!(collection = T::COLLECTION, %key, "record removed");
        Ok(())
    }
}
