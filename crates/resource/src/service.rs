use std::marker::PhantomData;
use std::sync::Arc;

use kelola_store::{Record, Store, StoreError};

use crate::Resource;

/// Result of an existence-checked mutation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NotFound,
}

/// CRUD operations for one resource kind over an explicitly passed store handle.
pub struct ResourceService<R: Resource> {
    store: Arc<dyn Store<R::Entity>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: Arc<dyn Store<R::Entity>>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    /// Every stored entity as a DTO, in store order.
    pub async fn get_all(&self) -> Result<Vec<R::Dto>, StoreError> {
        let entities = self.store.list().await?;
        Ok(entities.iter().map(R::to_dto).collect())
    }

    pub async fn get_by_id(&self, key: &R::Key) -> Result<Option<R::Dto>, StoreError> {
        let entity = self.store.find(key).await?;
        Ok(entity.as_ref().map(R::to_dto))
    }

    /// Insert a new entity built from `dto` and return its DTO, carrying the generated id.
    pub async fn create(&self, dto: R::Dto) -> Result<R::Dto, StoreError> {
        let (_, created) = self.create_keyed(dto).await?;
        Ok(created)
    }

    /// Like [`create`](Self::create), also returning the generated key.
    pub async fn create_keyed(&self, dto: R::Dto) -> Result<(R::Key, R::Dto), StoreError> {
        let stored = self.store.insert(R::from_dto(dto)).await?;
        tracing::info!(resource = R::NAME, key = %stored.key(), "resource created");
        Ok((stored.key().clone(), R::to_dto(&stored)))
    }

    /// Full replace of the entity at `key`. Fields absent from `dto` take its defaults.
    pub async fn update(&self, key: &R::Key, dto: R::Dto) -> Result<Outcome, StoreError> {
        let Some(mut entity) = self.store.find(key).await? else {
            return Ok(Outcome::NotFound);
        };

        R::apply_update(&mut entity, dto);
        entity.set_key(key.clone());

        let outcome = settle(self.store.replace(key, entity).await)?;
        if outcome == Outcome::Applied {
            tracing::info!(resource = R::NAME, %key, "resource updated");
        }
        Ok(outcome)
    }

    pub async fn delete(&self, key: &R::Key) -> Result<Outcome, StoreError> {
        if self.store.find(key).await?.is_none() {
            return Ok(Outcome::NotFound);
        }

        let outcome = settle(self.store.remove(key).await)?;
        if outcome == Outcome::Applied {
            tracing::info!(resource = R::NAME, %key, "resource deleted");
        }
        Ok(outcome)
    }
}

/// A record can vanish between the existence check and the write when requests race.
fn settle(result: Result<(), StoreError>) -> Result<Outcome, StoreError> {
    match result {
        Ok(()) => Ok(Outcome::Applied),
        Err(error) if error.is_not_found() => Ok(Outcome::NotFound),
        Err(error) => Err(error),
    }
}
