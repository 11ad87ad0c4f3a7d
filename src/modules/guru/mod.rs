pub mod models;

use std::sync::Arc;

use kelola_kernel::Module;
use kelola_resource::{Resource, ResourceModule};
use kelola_store::Store;

pub use models::{Guru, GuruDto};

/// Teachers resource
pub struct GuruResource;

impl Resource for GuruResource {
    type Key = i64;
    type Entity = Guru;
    type Dto = GuruDto;

    const NAME: &'static str = "guru";
    const TAG: &'static str = "Guru";

    fn to_dto(guru: &Guru) -> GuruDto {
        GuruDto {
            id: Some(guru.id),
            nama: guru.nama.clone(),
            kelas: guru.kelas.clone(),
            nip: guru.nip.clone(),
        }
    }

    fn from_dto(dto: GuruDto) -> Guru {
        Guru {
            id: 0,
            nama: dto.nama,
            kelas: dto.kelas,
            nip: dto.nip,
        }
    }

    fn apply_update(guru: &mut Guru, dto: GuruDto) {
        guru.nama = dto.nama;
        guru.kelas = dto.kelas;
        guru.nip = dto.nip;
    }
}

/// Create a new instance of the guru module
pub fn create_module(store: Arc<dyn Store<Guru>>) -> Arc<dyn Module> {
    Arc::new(ResourceModule::<GuruResource>::new(store))
}
