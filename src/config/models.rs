use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::http::HttpConfig;
use crate::models::CatalogConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Export download behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DownloadConfig {
    /// Ask the portal for a gzip-compressed export (`.gz` suffix on disk)
    #[serde(default = "default_true")]
    pub compressed: bool,
    /// Export geojson instead of csv when the dataset supports it
    #[serde(default = "default_true")]
    pub prefer_geojson: bool,
    /// Entry of the remote `features` list that marks geo support
    #[serde(default = "default_geo_feature")]
    pub geo_feature: String,
    /// Minimum delay between two progress reports
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
}

impl DownloadConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            compressed: true,
            prefer_geojson: true,
            geo_feature: default_geo_feature(),
            progress_interval_ms: default_progress_interval_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_geo_feature() -> String {
    "geo".to_string()
}

fn default_progress_interval_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.catalog.url, "");
        assert!(config.catalog.themes.is_empty());
        assert!(config.download.compressed);
        assert!(config.download.prefer_geojson);
        assert_eq!(config.download.geo_feature, "geo");
        assert_eq!(config.download.progress_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r##"
[catalog]
url = "https://data.example.org"

[[catalog.themes]]
value = "Environnement"
topics = [{ title = "Environment", color = "#00ff00" }]

[download]
compressed = false
            "##,
        )
        .unwrap();

        assert_eq!(config.catalog.url, "https://data.example.org");
        assert_eq!(config.catalog.themes[0].topics[0].title, "Environment");
        assert_eq!(
            config.catalog.themes[0].topics[0].color.as_deref(),
            Some("#00ff00")
        );
        assert!(!config.download.compressed);
        assert_eq!(config.download.progress_interval_ms, 500);
        assert_eq!(config.http.connect_timeout_secs, 10);
    }
}
