use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use kelola_kernel::Module;
use kelola_resource::{extract::require_text, Resource, ResourceModule, Validate, Violation};
use kelola_store::{Record, Store};

/// A subject (mata pelajaran) tracked as a completable item.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapel {
    pub id: i64,
    pub name: String,
    pub is_complete: bool,
}

impl Record for Mapel {
    type Key = i64;
    const COLLECTION: &'static str = "mapel";

    fn key(&self) -> &i64 {
        &self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapelDto {
    #[serde(default)]
    #[schema(read_only)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub is_complete: bool,
}

impl Validate for MapelDto {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        require_text(&mut violations, "name", &self.name);
        violations
    }
}

pub struct MapelResource;

impl Resource for MapelResource {
    type Key = i64;
    type Entity = Mapel;
    type Dto = MapelDto;

    const NAME: &'static str = "mapel";
    const TAG: &'static str = "Mapel";

    fn to_dto(mapel: &Mapel) -> MapelDto {
        MapelDto {
            id: Some(mapel.id),
            name: mapel.name.clone(),
            is_complete: mapel.is_complete,
        }
    }

    fn from_dto(dto: MapelDto) -> Mapel {
        Mapel {
            id: 0,
            name: dto.name,
            is_complete: dto.is_complete,
        }
    }

    fn apply_update(mapel: &mut Mapel, dto: MapelDto) {
        mapel.name = dto.name;
        mapel.is_complete = dto.is_complete;
    }
}

/// Create a new instance of the mapel module
pub fn create_module(store: Arc<dyn Store<Mapel>>) -> Arc<dyn Module> {
    Arc::new(ResourceModule::<MapelResource>::new(store))
}
