//! Explore v2.1 endpoints of the remote portal

use tracing::error;

use crate::error::{CatalogError, Result};
use crate::http::{HttpClient, HttpError};
use crate::models::{CatalogConfig, RemoteDatasetPage, RemoteDatasetRecord};

const API_ROOT: &str = "api/explore/v2.1/catalog/datasets";

/// Projection used when listing: heavy members are left out
pub const LIST_SELECT: &str = "exclude(attachments),exclude(alternative_exports),exclude(fields)";
/// Projection used for one dataset: fields are kept for the schema
pub const DATASET_SELECT: &str = "exclude(attachments),exclude(alternative_exports)";

pub fn datasets_url(config: &CatalogConfig) -> String {
    format!("{}/{}", config.base_url(), API_ROOT)
}

pub fn dataset_url(config: &CatalogConfig, dataset_id: &str) -> String {
    format!("{}/{}", datasets_url(config), dataset_id)
}

pub fn export_url(config: &CatalogConfig, dataset_id: &str, extension: &str) -> String {
    format!("{}/exports/{}", dataset_url(config, dataset_id), extension)
}

/// Fetch one page of the dataset listing
pub async fn fetch_page(
    client: &HttpClient,
    config: &CatalogConfig,
    query: &[(&str, String)],
) -> Result<RemoteDatasetPage> {
    client
        .get_json(&datasets_url(config), query)
        .await
        .map_err(|e| retrieval_error(&config.url, None, e))
}

/// Fetch the metadata of one dataset
pub async fn fetch_dataset(
    client: &HttpClient,
    config: &CatalogConfig,
    dataset_id: &str,
) -> Result<RemoteDatasetRecord> {
    let query = [("select", DATASET_SELECT.to_string())];
    client
        .get_json(&dataset_url(config, dataset_id), &query)
        .await
        .map_err(|e| retrieval_error(&config.url, Some(dataset_id), e))
}

/// Log the cause, keep only a generic message for the caller.
/// A body that parsed as JSON but not as the expected shape is reported
/// separately from transport failures.
fn retrieval_error(url: &str, dataset_id: Option<&str>, err: HttpError) -> CatalogError {
    match dataset_id {
        Some(dataset_id) => {
            error!(url, dataset_id, error = %err, "Error fetching dataset metadata from ODS")
        }
        None => error!(url, error = %err, "Error fetching dataset listing from ODS"),
    }
    match err {
        HttpError::Decode(message) => CatalogError::InvalidPayload(message),
        _ => CatalogError::Retrieval,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = CatalogConfig::new("https://example.com/");

        assert_eq!(
            datasets_url(&config),
            "https://example.com/api/explore/v2.1/catalog/datasets"
        );
        assert_eq!(
            dataset_url(&config, "ds"),
            "https://example.com/api/explore/v2.1/catalog/datasets/ds"
        );
        assert_eq!(
            export_url(&config, "ds", "geojson"),
            "https://example.com/api/explore/v2.1/catalog/datasets/ds/exports/geojson"
        );
    }

    #[test]
    fn test_retrieval_error_hides_cause() {
        let err = retrieval_error(
            "https://example.com",
            Some("ds"),
            HttpError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            },
        );
        assert!(matches!(err, CatalogError::Retrieval));
        assert!(!err.to_string().contains("404"));
    }

    #[test]
    fn test_decode_failure_is_invalid_payload() {
        let err = retrieval_error(
            "https://example.com",
            None,
            HttpError::Decode("missing field `total_count`".to_string()),
        );
        assert!(matches!(err, CatalogError::InvalidPayload(ref m) if m.contains("total_count")));
    }
}
