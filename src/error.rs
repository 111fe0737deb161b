use thiserror::Error;

use crate::filters::FilterError;

/// Failure surfaced to the host. Every variant carries a message only.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog configuration: {0}")]
    Config(String),

    #[error("failed to retrieve the ODS resource")]
    Retrieval,

    #[error("unexpected response from the ODS API: {0}")]
    InvalidPayload(String),

    #[error("invalid resource id \"{0}\"")]
    InvalidResourceId(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("failed to download the ODS resource: {0}")]
    Download(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
