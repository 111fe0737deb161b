use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Catalog configuration is missing the \"url\" property")]
    MissingUrl,

    #[error("Catalog url '{url}' must start with http:// or https://")]
    InvalidUrlScheme { url: String },

    #[error("Theme mapping #{index} has an empty value")]
    EmptyThemeValue { index: usize },

    #[error("download.geo_feature must not be empty")]
    EmptyGeoFeature,

    #[error("download.progress_interval_ms must be positive")]
    InvalidProgressInterval,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_catalog(config)?;
    validate_download(config)?;
    Ok(())
}

/// Url present and http(s), every theme mapping keyed by a non-empty value
pub fn validate_catalog(config: &Config) -> Result<(), ValidationError> {
    let url = config.catalog.url.trim();
    if url.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ValidationError::InvalidUrlScheme {
            url: url.to_string(),
        });
    }

    if let Some(index) = config
        .catalog
        .themes
        .iter()
        .position(|theme| theme.value.is_empty())
    {
        return Err(ValidationError::EmptyThemeValue { index });
    }

    Ok(())
}

fn validate_download(config: &Config) -> Result<(), ValidationError> {
    if config.download.geo_feature.trim().is_empty() {
        return Err(ValidationError::EmptyGeoFeature);
    }
    if config.download.progress_interval_ms == 0 {
        return Err(ValidationError::InvalidProgressInterval);
    }
    Ok(())
}
