//! Resource download pipeline
//!
//! [`get_resource`] runs the steps in order, each one able to abort the call:
//! 1. compile the import filters (no network yet)
//! 2. fetch and normalize the dataset metadata
//! 3. stream the filtered export into `<tmp_dir>/<id>.<csv|geojson>[.gz]`
//! 4. fetch attachments, best-effort
//!
//! A failed export leaves no file behind.

mod attachments;
mod progress;
mod stream;

pub use attachments::{AttachmentError, fetch_all};
pub use progress::{ProgressSink, ProgressThrottle};
pub use stream::{StreamError, download_to_file};

use std::path::{Component, Path, PathBuf};
use tracing::{error, info};

use crate::catalog::GetResourceContext;
use crate::config::DownloadConfig;
use crate::error::{CatalogError, Result};
use crate::filters;
use crate::humanize::ByteSize;
use crate::http::HttpClient;
use crate::models::{ImportConfig, RemoteDatasetRecord, Resource};
use crate::normalize::normalize;
use crate::remote;

/// Progress key reported for the main export
pub const DOWNLOAD_TASK: &str = "download";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    GeoJson,
}

impl ExportFormat {
    /// GeoJSON when the dataset advertises geo support, it is preferred, and
    /// the import does not ask for ODS compatibility. CSV otherwise.
    pub fn select(
        record: &RemoteDatasetRecord,
        import_config: &ImportConfig,
        settings: &DownloadConfig,
    ) -> Self {
        if settings.prefer_geojson
            && !import_config.compat_ods
            && record.has_feature(&settings.geo_feature)
        {
            Self::GeoJson
        } else {
            Self::Csv
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::GeoJson => "geojson",
        }
    }
}

/// Query string of the export endpoint. `where` is only sent when filters
/// produced an expression.
pub fn export_query(where_clause: &str, compressed: bool) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", "*".to_string())];
    if !where_clause.is_empty() {
        query.push(("where", where_clause.to_string()));
    }
    if compressed {
        query.push(("compressed", "true".to_string()));
    }
    query
}

pub fn destination(
    tmp_dir: &Path,
    resource_id: &str,
    format: ExportFormat,
    compressed: bool,
) -> PathBuf {
    let suffix = if compressed { ".gz" } else { "" };
    tmp_dir.join(format!("{}.{}{}", resource_id, format.as_str(), suffix))
}

/// True when `name` is a single plain path component
pub(crate) fn file_name_is_safe(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Fetch metadata, export and attachments of one dataset into `ctx.tmp_dir`.
pub async fn get_resource(
    client: &HttpClient,
    settings: &DownloadConfig,
    ctx: &GetResourceContext,
) -> Result<Resource> {
    let log = ctx.log.as_ref();
    let catalog = &ctx.catalog_config;

    if !file_name_is_safe(&ctx.resource_id) {
        return Err(CatalogError::InvalidResourceId(ctx.resource_id.clone()));
    }

    let where_clause = filters::compile(&ctx.import_config.filters)?;

    log.task("metadata", "Fetching resource metadata");
    let record = remote::fetch_dataset(client, catalog, &ctx.resource_id).await?;

    let format = ExportFormat::select(&record, &ctx.import_config, settings);
    let mut resource = normalize(catalog, &record, format.as_str());

    let dest = destination(&ctx.tmp_dir, &ctx.resource_id, format, settings.compressed);
    let url = remote::export_url(catalog, &ctx.resource_id, format.as_str());
    let query = export_query(&where_clause, settings.compressed);

    info!(
        resource_id = %ctx.resource_id,
        format = format.as_str(),
        filtered = !where_clause.is_empty(),
        dest = %dest.display(),
        "Downloading export"
    );
    log.task(DOWNLOAD_TASK, &format!("Downloading {} export", format.as_str()));

    let response = client.get_stream(&url, &query).await.map_err(|e| {
        error!(resource_id = %ctx.resource_id, error = %e, "Export request failed");
        log.error(&format!("Export request failed: {e}"));
        CatalogError::Download(e.to_string())
    })?;

    let sink = ProgressSink {
        log,
        key: DOWNLOAD_TASK,
        interval: settings.progress_interval(),
    };
    let size = download_to_file(response, &dest, Some(sink))
        .await
        .map_err(|e| {
            error!(resource_id = %ctx.resource_id, error = %e, "Export download failed");
            log.error(&format!("Export download failed: {e}"));
            CatalogError::Download(e.to_string())
        })?;

    log.info(&format!("Export downloaded ({})", ByteSize(size)));

    let attachments = if ctx.import_config.attachments.is_empty() {
        Vec::new()
    } else {
        log.task("attachments", "Downloading attachments");
        fetch_all(
            client,
            &ctx.import_config.attachments,
            &ctx.tmp_dir,
            &dest,
            log,
        )
        .await
    };

    resource.attachments = Some(attachments);
    resource.file_path = dest.to_string_lossy().into_owned();
    Ok(resource)
}
