use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use kelola_kernel::Module;
use kelola_resource::{extract::require_text, Resource, ResourceModule, Validate, Violation};
use kelola_store::{Record, Store};

/// A class as kept in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Kelas {
    pub id: i64,
    pub nama: String,
}

impl Record for Kelas {
    type Key = i64;
    const COLLECTION: &'static str = "kelas";

    fn key(&self) -> &i64 {
        &self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KelasDto {
    #[serde(default)]
    #[schema(read_only)]
    pub id: Option<i64>,
    pub nama: String,
}

impl Validate for KelasDto {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        require_text(&mut violations, "nama", &self.nama);
        violations
    }
}

/// Classes resource
pub struct KelasResource;

impl Resource for KelasResource {
    type Key = i64;
    type Entity = Kelas;
    type Dto = KelasDto;

    const NAME: &'static str = "kelas";
    const TAG: &'static str = "Kelas";

    fn to_dto(kelas: &Kelas) -> KelasDto {
        KelasDto {
            id: Some(kelas.id),
            nama: kelas.nama.clone(),
        }
    }

    fn from_dto(dto: KelasDto) -> Kelas {
        Kelas {
            id: 0,
            nama: dto.nama,
        }
    }

    fn apply_update(kelas: &mut Kelas, dto: KelasDto) {
        kelas.nama = dto.nama;
    }
}

/// Create a new instance of the kelas module
pub fn create_module(store: Arc<dyn Store<Kelas>>) -> Arc<dyn Module> {
    Arc::new(ResourceModule::<KelasResource>::new(store))
}
