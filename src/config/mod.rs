//! Configuration management for the connector
//!
//! Settings are layered, lowest priority first:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//!
//! # Usage
//!
//! ```no_run
//! use ods_catalog::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Catalog: {}", config.catalog.url);
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `ODS_CATALOG__<section>__<key>`, e.g.
//! - `ODS_CATALOG__CATALOG__URL=https://data.economie.gouv.fr`
//! - `ODS_CATALOG__DOWNLOAD__PROGRESS_INTERVAL_MS=1000`
//!
//! # Configuration File
//!
//! Read from `config/ods-catalog.toml` unless `ODS_CATALOG_CONFIG` points
//! elsewhere. Theme correspondences are declared as `[[catalog.themes]]`
//! tables.

mod models;
mod sources;
mod validation;

pub use crate::http::HttpConfig;
pub use models::{Config, DownloadConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load without validating, for callers that patch values (e.g. a CLI
    /// `--url` flag) before calling [`Config::validate`].
    pub fn load_unvalidated() -> Result<Self, ConfigError> {
        Ok(sources::load()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)?;
        Ok(())
    }
}
