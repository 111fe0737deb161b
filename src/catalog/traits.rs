use async_trait::async_trait;

use super::types::{GetResourceContext, ListContext, PluginMetadata, PrepareContext, PrepareResult};
use crate::error::CatalogError;
use crate::models::{ListResult, Resource};

/// Contract between the host and one kind of remote catalog.
///
/// Every call is independent: implementations keep no state between calls
/// beyond their HTTP client and settings.
#[async_trait]
pub trait CatalogPlugin: Send + Sync {
    fn metadata(&self) -> PluginMetadata;

    /// Check the configuration and that the catalog is reachable
    async fn prepare(&self, ctx: PrepareContext) -> Result<PrepareResult, CatalogError>;

    /// One page of the catalog
    async fn list_resources(&self, ctx: ListContext) -> Result<ListResult, CatalogError>;

    /// Materialize one dataset (and its attachments) under `ctx.tmp_dir`
    async fn get_resource(&self, ctx: GetResourceContext) -> Result<Resource, CatalogError>;
}
