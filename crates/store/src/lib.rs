//! Keyed record storage for KELOLA resources.
//!
//! A [`Store`] is the persistence handle a resource service talks to: keyed lookup, full scan,
//! key-assigning insert, full-overwrite replace and hard delete. [`InMemoryStore`] is the
//! in-process backend used by the application and its tests.

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::InMemoryStore;

/// Key type of a stored record.
pub trait RecordKey: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Produce a fresh key for the `sequence`-th insert into a collection (starting at 1).
    fn generate(sequence: u64) -> Self;
}

impl RecordKey for i64 {
    fn generate(sequence: u64) -> Self {
        i64::try_from(sequence).unwrap_or(i64::MAX)
    }
}

/// An entity that lives in a keyed collection.
pub trait Record: Clone + Send + Sync + 'static {
    type Key: RecordKey;

    /// Collection name, used in logs and errors.
    const COLLECTION: &'static str;

    fn key(&self) -> &Self::Key;

    fn set_key(&mut self, key: Self::Key);
}

/// Persistence handle for one collection of `T`.
#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    /// Look up a record by key. A missing key is `Ok(None)`, never an error.
    async fn find(&self, key: &T::Key) -> Result<Option<T>, StoreError>;

    /// Every record, in insertion order.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Store a new record under a freshly generated key and return it with that key.
    async fn insert(&self, entity: T) -> Result<T, StoreError>;

    /// Overwrite the record at `key`. The stored key is kept whatever `entity` carries.
    async fn replace(&self, key: &T::Key, entity: T) -> Result<(), StoreError>;

    /// Delete the record at `key`.
    async fn remove(&self, key: &T::Key) -> Result<(), StoreError>;
}
