//! Catalog plugin surface
//!
//! - [`CatalogPlugin`] - contract between the host and a remote catalog
//! - [`OdsCatalog`] - implementation for Opendatasoft portals
//! - [`CatalogRegistry`] - plugins keyed by catalog type
//!
//! ## Example
//!
//! ```rust,ignore
//! use ods_catalog::catalog::{CatalogRegistry, ListContext, ODS_CATALOG};
//!
//! let registry = CatalogRegistry::with_defaults(&config)?;
//! let plugin = registry.get(ODS_CATALOG)?;
//! let page = plugin
//!     .list_resources(ListContext { catalog_config, params })
//!     .await?;
//! ```

mod ods;
mod registry;
mod traits;
mod types;

pub use ods::OdsCatalog;
pub use registry::{CatalogRegistry, ODS_CATALOG, RegistryError};
pub use traits::CatalogPlugin;
pub use types::{
    Capability, GetResourceContext, ListContext, PluginMetadata, PrepareContext, PrepareResult,
};
