pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod filters;
pub mod http;
pub mod humanize;
pub mod lister;
pub mod models;
pub mod normalize;
pub mod observability;
pub mod remote;

pub use error::{CatalogError, Result};
