//! Generic CRUD resource pattern.
//!
//! A resource kind is described once by implementing [`Resource`]: which entity is stored,
//! which DTO travels over the wire, and how to project one into the other. Everything else
//! (the [`ResourceService`], the axum handlers, the OpenAPI fragment and the kernel module)
//! is shared by every resource kind.

use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

use kelola_http::AppError;
use kelola_store::{Record, RecordKey};

pub mod extract;
pub mod handlers;
pub mod module;
pub mod openapi;
pub mod service;

pub use extract::{ResourceKey, Validate, ValidatedJson, Violation};
pub use handlers::resource_router;
pub use module::ResourceModule;
pub use service::{Outcome, ResourceService};

/// Message returned to clients for every unexpected store failure.
pub const STORE_FAILURE_MESSAGE: &str = "Error retrieving data from the database";

/// Description of one resource kind.
pub trait Resource: Send + Sync + 'static {
    type Key: RecordKey + PathKey;

    /// Shape kept in the store.
    type Entity: Record<Key = Self::Key>;

    /// Wire-facing projection of the entity.
    type Dto: Serialize + DeserializeOwned + ToSchema + Validate + Send + Sync + 'static;

    /// Module name and URL segment (`/api/{NAME}`).
    const NAME: &'static str;

    /// OpenAPI tag grouping the resource's operations.
    const TAG: &'static str;

    fn to_dto(entity: &Self::Entity) -> Self::Dto;

    /// Build a new entity from a DTO. The DTO identifier is not carried over.
    fn from_dto(dto: Self::Dto) -> Self::Entity;

    /// Overwrite every mutable field of `entity` from `dto`, defaults included.
    fn apply_update(entity: &mut Self::Entity, dto: Self::Dto);
}

/// Key types that can be read from a `/{id}` path segment.
pub trait PathKey: Sized {
    fn from_path(segment: &str) -> Result<Self, AppError>;

    /// OpenAPI schema of the path parameter.
    fn schema() -> serde_json::Value;
}

impl PathKey for i64 {
    fn from_path(segment: &str) -> Result<Self, AppError> {
        segment
            .parse()
            .map_err(|_| AppError::bad_request(format!("'{}' is not a valid integer id", segment)))
    }

    fn schema() -> serde_json::Value {
        serde_json::json!({ "type": "integer", "format": "int64" })
    }
}
