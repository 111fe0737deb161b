use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use super::ods::OdsCatalog;
use super::traits::CatalogPlugin;
use crate::config::Config;
use crate::error::CatalogError;

/// Catalog type served by [`OdsCatalog`]
pub const ODS_CATALOG: &str = "ods";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("catalog plugin not found: {0}")]
    NotFound(String),
}

/// Registry mapping catalog types to plugin instances
#[derive(Clone, Default)]
pub struct CatalogRegistry {
    plugins: BTreeMap<String, Arc<dyn CatalogPlugin>>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, catalog_type: impl Into<String>, plugin: Arc<dyn CatalogPlugin>) {
        self.plugins.insert(catalog_type.into(), plugin);
    }

    pub fn get(&self, catalog_type: &str) -> Result<Arc<dyn CatalogPlugin>, RegistryError> {
        self.plugins
            .get(catalog_type)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(catalog_type.to_string()))
    }

    pub fn has_plugin(&self, catalog_type: &str) -> bool {
        self.plugins.contains_key(catalog_type)
    }

    pub fn catalog_types(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Registry with the built-in plugins configured from `config`
    pub fn with_defaults(config: &Config) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        let ods = OdsCatalog::new(&config.http, config.download.clone())?;
        registry.register(ODS_CATALOG, Arc::new(ods));
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_register_ods() {
        let registry = CatalogRegistry::with_defaults(&Config::default()).unwrap();

        assert!(registry.has_plugin(ODS_CATALOG));
        assert_eq!(registry.catalog_types().collect::<Vec<_>>(), vec!["ods"]);
        assert_eq!(registry.get(ODS_CATALOG).unwrap().metadata().title, "Catalog ODS");
    }

    #[test]
    fn test_unknown_catalog_type() {
        let registry = CatalogRegistry::new();
        assert!(matches!(
            registry.get("ckan"),
            Err(RegistryError::NotFound(name)) if name == "ckan"
        ));
    }
}
