pub mod books;
pub mod guru;
pub mod kelas;
pub mod mapel;

use std::sync::Arc;

use kelola_kernel::{settings::StoreSettings, ModuleRegistry};
use kelola_store::{InMemoryStore, Record, Store};

/// Register every resource module, each with its own store handle
pub fn register_all(registry: &mut ModuleRegistry, settings: &StoreSettings) -> anyhow::Result<()> {
    registry.register(books::create_module(store(settings)))?;
    registry.register(guru::create_module(store(settings)))?;
    registry.register(kelas::create_module(store(settings)))?;
    registry.register(mapel::create_module(store(settings)))?;
    Ok(())
}

fn store<T: Record>(settings: &StoreSettings) -> Arc<dyn Store<T>> {
    Arc::new(InMemoryStore::<T>::new().with_limit(settings.max_records))
}
