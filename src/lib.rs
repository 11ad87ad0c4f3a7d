//! KELOLA application library
//!
//! Wires the books, guru, kelas and mapel resource modules into a module registry and
//! serves them over HTTP.

use anyhow::Context;
use axum::Router;

use kelola_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;

/// Build a registry holding every application module
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings.store)
        .with_context(|| "failed to register modules")?;
    Ok(registry)
}

/// Build the complete HTTP application with fresh, empty stores
pub fn build_app(settings: &Settings) -> anyhow::Result<Router> {
    let registry = build_registry(settings)?;
    Ok(kelola_http::build_router(&registry, settings))
}

/// Run the module lifecycle around the HTTP server until shutdown
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = kelola_http::start_server(&registry, &settings).await;

    registry.stop_all().await?;
    served
}
