use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "ODS_CATALOG_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/ods-catalog.toml";
const ENV_PREFIX: &str = "ODS_CATALOG";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_from_sources(config_path)
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // ODS_CATALOG__CATALOG__URL -> catalog.url
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.download.progress_interval_ms, 500);
        assert_eq!(config.download.geo_feature, "geo");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[catalog]
url = "https://opendata.example.org"

[[catalog.themes]]
value = "theme1"
topics = [{ title = "Theme 1" }]

[[catalog.themes]]
value = "theme2"
topics = [{ title = "Theme 1" }, { title = "Theme 2", id = "theme2" }]

[http]
connect_timeout_secs = 3
request_timeout_secs = 600

[download]
prefer_geojson = false
geo_feature = "geo_capable"
progress_interval_ms = 250
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.catalog.url, "https://opendata.example.org");
        assert_eq!(config.catalog.themes.len(), 2);
        assert_eq!(config.catalog.themes[1].topics[1].id.as_deref(), Some("theme2"));
        assert_eq!(config.http.connect_timeout_secs, 3);
        assert_eq!(config.http.request_timeout_secs, Some(600));
        assert!(!config.download.prefer_geojson);
        assert!(config.download.compressed);
        assert_eq!(config.download.geo_feature, "geo_capable");
        assert_eq!(config.download.progress_interval_ms, 250);
    }

    // Environment overrides are not exercised here: env::set_var is unsafe
    // and would leak between parallel tests.
}
