use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use kelola_kernel::{InitCtx, Module};
use kelola_store::{Record, Store};

use crate::{handlers, openapi, Resource, ResourceService};

/// Kernel module serving one resource kind under `/api/{R::NAME}`
pub struct ResourceModule<R: Resource> {
    service: ResourceService<R>,
}

impl<R: Resource> ResourceModule<R> {
    pub fn new(store: Arc<dyn Store<R::Entity>>) -> Self {
        Self {
            service: ResourceService::new(store),
        }
    }

    pub fn service(&self) -> &ResourceService<R> {
        &self.service
    }
}

#[async_trait]
impl<R: Resource> Module for ResourceModule<R> {
    fn name(&self) -> &'static str {
        R::NAME
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            collection = <R::Entity as Record>::COLLECTION,
            environment = ?ctx.settings.environment,
            "{} module initialized",
            R::NAME
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        handlers::resource_router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::document::<R>())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let records = self.service.get_all().await?.len();
        tracing::info!(module = self.name(), records, "{} module started", R::NAME);
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "{} module stopped", R::NAME);
        Ok(())
    }
}
