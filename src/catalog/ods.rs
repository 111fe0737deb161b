//! Opendatasoft catalog plugin

use async_trait::async_trait;
use tracing::{error, info};

use super::traits::CatalogPlugin;
use super::types::{
    Capability, GetResourceContext, ListContext, PluginMetadata, PrepareContext, PrepareResult,
};
use crate::config::{DownloadConfig, HttpConfig};
use crate::download;
use crate::error::{CatalogError, Result};
use crate::http::HttpClient;
use crate::lister;
use crate::models::{ListResult, Resource};
use crate::remote;

const CAPABILITIES: &[Capability] = &[
    Capability::Search,
    Capability::Pagination,
    Capability::ImportFilters,
    Capability::Attachments,
    Capability::Topics,
];

/// Plugin for portals exposing the Opendatasoft explore v2.1 API
#[derive(Debug, Clone)]
pub struct OdsCatalog {
    client: HttpClient,
    download: DownloadConfig,
}

impl OdsCatalog {
    pub fn new(http: &HttpConfig, download: DownloadConfig) -> Result<Self> {
        let client = HttpClient::new(http).map_err(|e| CatalogError::Http(e.to_string()))?;
        Ok(Self { client, download })
    }
}

#[async_trait]
impl CatalogPlugin for OdsCatalog {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            title: "Catalog ODS",
            description: "Import datasets from an Opendatasoft portal.",
            capabilities: CAPABILITIES,
        }
    }

    async fn prepare(&self, ctx: PrepareContext) -> Result<PrepareResult> {
        let catalog_config = ctx.catalog_config;
        if catalog_config.url.trim().is_empty() {
            return Err(CatalogError::Config(
                "Catalog configuration is missing the \"url\" property.".to_string(),
            ));
        }

        let url = remote::datasets_url(&catalog_config);
        let probe = [("limit", "1".to_string())];
        if let Err(e) = self.client.get_stream(&url, &probe).await {
            error!(url = %catalog_config.url, error = %e, "Error connecting to ODS API");
            return Err(CatalogError::Config(format!(
                "Unable to connect to ODS API at {}. Please check the URL and your network connection.",
                catalog_config.url
            )));
        }

        info!(url = %catalog_config.url, "ODS catalog reachable");
        Ok(PrepareResult { catalog_config })
    }

    async fn list_resources(&self, ctx: ListContext) -> Result<ListResult> {
        lister::list(&self.client, &ctx.catalog_config, &ctx.params).await
    }

    async fn get_resource(&self, ctx: GetResourceContext) -> Result<Resource> {
        download::get_resource(&self.client, &self.download, &ctx).await
    }
}
