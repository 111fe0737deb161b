use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::lister::ListParams;
use crate::models::{CatalogConfig, ImportConfig};
use crate::observability::{TaskLog, TracingLog};

/// Context for [`prepare`](super::CatalogPlugin::prepare)
#[derive(Debug, Clone)]
pub struct PrepareContext {
    pub catalog_config: CatalogConfig,
}

/// Configuration accepted by `prepare`, handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareResult {
    pub catalog_config: CatalogConfig,
}

/// Context for [`list_resources`](super::CatalogPlugin::list_resources)
#[derive(Debug, Clone)]
pub struct ListContext {
    pub catalog_config: CatalogConfig,
    pub params: ListParams,
}

/// Context for [`get_resource`](super::CatalogPlugin::get_resource)
///
/// ```rust,ignore
/// let ctx = GetResourceContext::builder()
///     .catalog_config(CatalogConfig::new("https://data.example.org"))
///     .resource_id("prix-des-carburants")
///     .tmp_dir(tmp.path())
///     .build();
/// ```
#[derive(Clone, bon::Builder)]
pub struct GetResourceContext {
    pub catalog_config: CatalogConfig,
    #[builder(into)]
    pub resource_id: String,
    #[builder(default)]
    pub import_config: ImportConfig,
    /// Directory owned by the host; every file is written under it
    #[builder(into)]
    pub tmp_dir: PathBuf,
    #[builder(default = Arc::new(TracingLog) as Arc<dyn TaskLog>)]
    pub log: Arc<dyn TaskLog>,
}

/// Features a catalog plugin advertises to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Search,
    Pagination,
    ImportFilters,
    Attachments,
    Topics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginMetadata {
    pub title: &'static str,
    pub description: &'static str,
    pub capabilities: &'static [Capability],
}
