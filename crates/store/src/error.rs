use thiserror::Error;

/// Failures reported by a [`Store`](crate::Store).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{collection} record '{key}' not found")]
    NotFound {
        collection: &'static str,
        key: String,
    },

    #[error("{collection} is full: limit of {limit} records reached")]
    CapacityExceeded {
        collection: &'static str,
        limit: usize,
    },

    #[error("{collection} already holds a record with key '{key}'")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },
}

impl StoreError {
    pub fn not_found(collection: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            collection,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
