//! Data model shared by the connector.
//!
//! Three families of types live here:
//! - catalog configuration ([`CatalogConfig`], [`ThemeMapping`], [`Topic`])
//! - per-call import configuration ([`ImportConfig`], [`FilterClause`], [`AttachmentRef`])
//! - remote payloads ([`RemoteDatasetRecord`], [`RemoteDatasetPage`]) and the
//!   normalized output ([`Resource`], [`ResourceSummary`], [`ListResult`])
//!
//! Remote payloads are deserialized into typed structs where every optional
//! member has a default. A payload that is missing optional data still parses;
//! a payload with the wrong shape fails deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connection settings for one remote catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Base URL of the portal, e.g. `https://data.economie.gouv.fr`
    #[serde(default)]
    pub url: String,
    /// Remote theme label -> host topics
    #[serde(default)]
    pub themes: Vec<ThemeMapping>,
}

impl CatalogConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            themes: Vec::new(),
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// One row of the theme correspondence table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ThemeMapping {
    /// Remote theme label, matched exactly
    pub value: String,
    #[serde(default, alias = "dataFairThemes")]
    pub topics: Vec<Topic>,
}

/// Host topic. Compared by deep equality when de-duplicating.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Topic {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
}

impl Topic {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: None,
            color: None,
            icon: None,
        }
    }
}

/// Declared type of a filtered field.
///
/// Unknown type strings are kept as [`FieldType::Unsupported`] so that the
/// filter compiler, not deserialization, reports them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Int,
    Double,
    Date,
    DateTime,
    Bool,
    Boolean,
    Unsupported(String),
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "int" => Self::Int,
            "double" => Self::Double,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "bool" => Self::Bool,
            "boolean" => Self::Boolean,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Int => "int",
            Self::Double => "double",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Bool => "bool",
            Self::Boolean => "boolean",
            Self::Unsupported(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterField {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterValue {
    pub name: String,
}

/// One import filter: `field` must equal one of `vals`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterClause {
    #[serde(default)]
    pub field: Option<FilterField>,
    #[serde(default, alias = "valeurs")]
    pub vals: Vec<FilterValue>,
}

impl FilterClause {
    pub fn new(name: &str, field_type: FieldType, values: &[&str]) -> Self {
        Self {
            field: Some(FilterField {
                name: name.to_string(),
                field_type,
            }),
            vals: values
                .iter()
                .map(|v| FilterValue {
                    name: (*v).to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttachmentMetas {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttachmentRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub metas: AttachmentMetas,
}

/// Per-download import options chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportConfig {
    #[serde(default)]
    pub filters: Vec<FilterClause>,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    /// Force a CSV export even when the dataset supports geojson
    #[serde(default, rename = "compatODS")]
    pub compat_ods: bool,
}

/// `metas.default` block of a remote dataset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DefaultMetas {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keyword: Option<Vec<String>>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub license_url: Option<String>,
    #[serde(default)]
    pub theme: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteMetas {
    #[serde(default)]
    pub default: DefaultMetas,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Dataset record as returned by the explore v2.1 API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteDatasetRecord {
    pub dataset_id: String,
    #[serde(default)]
    pub metas: RemoteMetas,
    #[serde(default)]
    pub fields: Vec<RemoteField>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl RemoteDatasetRecord {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// One page of the dataset listing endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteDatasetPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub results: Vec<RemoteDatasetRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct License {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SchemaField {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(
        rename = "x-refersTo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub refers_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentFile {
    pub title: String,
    pub file_path: String,
}

/// Normalized dataset handed back to the host.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub format: String,
    pub origin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<SchemaField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Topic>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentFile>>,
    pub file_path: String,
}

/// Listing entry, a metadata-only subset of [`Resource`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResourceSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub format: String,
    pub origin: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ListResult {
    pub count: u64,
    pub results: Vec<ResourceSummary>,
    /// Always empty: the catalog has no folder hierarchy
    pub path: Vec<String>,
}
