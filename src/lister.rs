//! Catalog listing

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{CatalogConfig, ListResult};
use crate::normalize::summarize;
use crate::remote::{self, LIST_SELECT};

/// Page size the remote applies when `size` is not given
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Search and pagination parameters of a listing call
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ListParams {
    /// Full-text search
    #[serde(default, alias = "partName")]
    pub q: Option<String>,
    #[serde(default)]
    pub size: Option<u32>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<u32>,
}

impl ListParams {
    /// Query string for the listing endpoint
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("select", LIST_SELECT.to_string())];

        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            query.push(("where", format!("search(\"{q}\")")));
        }
        // a zero size means "not given"
        let size = self.size.filter(|size| *size > 0);
        if let Some(size) = size {
            query.push(("limit", size.to_string()));
        }
        if let Some(page) = self.page {
            let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
            let offset = u64::from(page.saturating_sub(1)) * u64::from(size);
            query.push(("offset", offset.to_string()));
        }

        query
    }
}

/// List one page of datasets, normalized to summaries
pub async fn list(
    client: &HttpClient,
    config: &CatalogConfig,
    params: &ListParams,
) -> Result<ListResult> {
    let page = remote::fetch_page(client, config, &params.to_query()).await?;

    debug!(
        url = %config.url,
        total = page.total_count,
        returned = page.results.len(),
        "Listed datasets"
    );

    Ok(ListResult {
        count: page.total_count,
        results: page
            .results
            .iter()
            .map(|record| summarize(config, record))
            .collect(),
        path: Vec::new(),
    })
}
