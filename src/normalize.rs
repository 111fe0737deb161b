//! Remote dataset record -> host resource

use crate::models::{
    CatalogConfig, License, RemoteDatasetRecord, RemoteField, Resource, ResourceSummary,
    SchemaField, ThemeMapping, Topic,
};

pub const GEO_SHAPE_CONCEPT: &str = "https://purl.org/geojson/vocab#geometry";
pub const GEO_POINT_CONCEPT: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#lat_long";

const GEO_SHAPE_TYPE: &str = "geo_shape";
const GEO_POINT_TYPE: &str = "geo_point_2d";

/// Public page of a dataset on the remote portal
pub fn origin(config: &CatalogConfig, dataset_id: &str) -> String {
    format!("{}/explore/dataset/{}", config.base_url(), dataset_id)
}

/// Build the resource for `record`, leaving `file_path` empty and
/// `attachments` unset for the downloader.
pub fn normalize(config: &CatalogConfig, record: &RemoteDatasetRecord, format: &str) -> Resource {
    let metas = &record.metas.default;

    let license = match (&metas.license, &metas.license_url) {
        (Some(title), Some(href)) => Some(License {
            title: title.clone(),
            href: href.clone(),
        }),
        _ => None,
    };

    Resource {
        id: record.dataset_id.clone(),
        title: metas.title.clone().unwrap_or_default(),
        description: metas.description.clone().unwrap_or_default(),
        keywords: metas.keyword.clone().unwrap_or_default(),
        format: format.to_string(),
        origin: origin(config, &record.dataset_id),
        license,
        schema: schema(&record.fields),
        topics: match_topics(metas.theme.as_deref(), &config.themes),
        attachments: None,
        file_path: String::new(),
    }
}

/// Listing subset of [`normalize`].
pub fn summarize(config: &CatalogConfig, record: &RemoteDatasetRecord) -> ResourceSummary {
    let metas = &record.metas.default;
    ResourceSummary {
        id: record.dataset_id.clone(),
        title: metas.title.clone().unwrap_or_default(),
        description: metas.description.clone().unwrap_or_default(),
        format: "csv".to_string(),
        origin: origin(config, &record.dataset_id),
        kind: "resource".to_string(),
    }
}

/// One schema entry per remote field, `None` when the record has no fields.
///
/// A `geo_shape` field anywhere in the schema suppresses the annotation of
/// `geo_point_2d` fields.
pub fn schema(fields: &[RemoteField]) -> Option<Vec<SchemaField>> {
    if fields.is_empty() {
        return None;
    }

    let has_shape = fields.iter().any(|f| f.field_type == GEO_SHAPE_TYPE);

    let entries = fields
        .iter()
        .map(|field| {
            let refers_to = match field.field_type.as_str() {
                GEO_SHAPE_TYPE => Some(GEO_SHAPE_CONCEPT.to_string()),
                GEO_POINT_TYPE if !has_shape => Some(GEO_POINT_CONCEPT.to_string()),
                _ => None,
            };
            SchemaField {
                key: field.name.clone(),
                title: field.label.clone(),
                description: field.description.clone().unwrap_or_default(),
                refers_to,
            }
        })
        .collect();

    Some(entries)
}

/// Map remote themes to host topics.
///
/// Topics from every matching mapping are merged, de-duplicated by equality
/// and kept in first-seen order. `None` when nothing matched.
pub fn match_topics(themes: Option<&[String]>, mappings: &[ThemeMapping]) -> Option<Vec<Topic>> {
    let themes = themes?;
    if mappings.is_empty() {
        return None;
    }

    let mut topics: Vec<Topic> = Vec::new();
    for theme in themes {
        for mapping in mappings.iter().filter(|m| &m.value == theme) {
            for topic in &mapping.topics {
                if !topics.contains(topic) {
                    topics.push(topic.clone());
                }
            }
        }
    }

    if topics.is_empty() { None } else { Some(topics) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DefaultMetas, RemoteMetas};
    use serde_json::json;

    fn field(name: &str, field_type: &str) -> RemoteField {
        RemoteField {
            name: name.to_string(),
            field_type: field_type.to_string(),
            description: None,
            label: Some(name.to_uppercase()),
        }
    }

    fn record(metas: DefaultMetas) -> RemoteDatasetRecord {
        RemoteDatasetRecord {
            dataset_id: "example-id".to_string(),
            metas: RemoteMetas { default: metas },
            fields: vec![],
            features: vec![],
        }
    }

    #[test]
    fn test_normalize_defaults() {
        let config = CatalogConfig::new("https://example.com/");
        let resource = normalize(&config, &record(DefaultMetas::default()), "csv");

        assert_eq!(resource.id, "example-id");
        assert_eq!(resource.title, "");
        assert_eq!(resource.description, "");
        assert!(resource.keywords.is_empty());
        assert_eq!(resource.origin, "https://example.com/explore/dataset/example-id");
        assert!(resource.license.is_none());
        assert!(resource.schema.is_none());
        assert!(resource.topics.is_none());
        assert!(resource.attachments.is_none());
        assert_eq!(resource.file_path, "");
    }

    #[test]
    fn test_license_requires_both_parts() {
        let config = CatalogConfig::new("https://example.com");

        let only_title = record(DefaultMetas {
            license: Some("CC-BY-4.0".to_string()),
            ..Default::default()
        });
        assert!(normalize(&config, &only_title, "csv").license.is_none());

        let both = record(DefaultMetas {
            license: Some("CC-BY-4.0".to_string()),
            license_url: Some("https://example.com/license".to_string()),
            ..Default::default()
        });
        assert_eq!(
            normalize(&config, &both, "csv").license,
            Some(License {
                title: "CC-BY-4.0".to_string(),
                href: "https://example.com/license".to_string(),
            })
        );
    }

    #[test]
    fn test_schema_shape_suppresses_point() {
        let fields = vec![
            field("point", "geo_point_2d"),
            field("name", "text"),
            field("shape", "geo_shape"),
        ];

        let schema = schema(&fields).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema[0].refers_to, None);
        assert_eq!(schema[1].refers_to, None);
        assert_eq!(schema[2].refers_to.as_deref(), Some(GEO_SHAPE_CONCEPT));
    }

    #[test]
    fn test_schema_point_without_shape() {
        let mut point = field("point", "geo_point_2d");
        point.description = Some("Coordinates".to_string());

        let schema = schema(&[point]).unwrap();
        assert_eq!(schema[0].refers_to.as_deref(), Some(GEO_POINT_CONCEPT));
        assert_eq!(schema[0].description, "Coordinates");
        assert_eq!(schema[0].title.as_deref(), Some("POINT"));
    }

    #[test]
    fn test_topics_are_deduplicated_in_order() {
        let mappings: Vec<ThemeMapping> = serde_json::from_value(json!([
            { "value": "theme1", "topics": [{ "title": "Theme 1" }] },
            { "value": "theme2", "topics": [{ "title": "Theme 1" }, { "title": "Theme 2" }] }
        ]))
        .unwrap();
        let themes = vec!["theme1".to_string(), "theme2".to_string()];

        let topics = match_topics(Some(themes.as_slice()), &mappings).unwrap();
        assert_eq!(topics, vec![Topic::titled("Theme 1"), Topic::titled("Theme 2")]);
    }

    #[test]
    fn test_topics_none_when_nothing_matches() {
        let mappings: Vec<ThemeMapping> = serde_json::from_value(json!([
            { "value": "theme4", "topics": [] },
            { "value": "theme5", "topics": [{ "title": "Theme 5" }] }
        ]))
        .unwrap();

        let unmatched = vec!["other".to_string()];
        assert_eq!(match_topics(Some(unmatched.as_slice()), &mappings), None);

        let empty_mapping = vec!["theme4".to_string()];
        assert_eq!(match_topics(Some(empty_mapping.as_slice()), &mappings), None);

        assert_eq!(match_topics(None, &mappings), None);
        assert_eq!(match_topics(Some(unmatched.as_slice()), &[]), None);
    }

    #[test]
    fn test_topics_compare_every_member() {
        let mappings: Vec<ThemeMapping> = serde_json::from_value(json!([
            { "value": "a", "topics": [{ "title": "Same" }] },
            { "value": "b", "topics": [{ "title": "Same", "color": "111" }] }
        ]))
        .unwrap();
        let themes = vec!["a".to_string(), "b".to_string()];

        assert_eq!(match_topics(Some(themes.as_slice()), &mappings).unwrap().len(), 2);
    }

    #[test]
    fn test_summarize() {
        let config = CatalogConfig::new("https://example.com");
        let summary = summarize(
            &config,
            &record(DefaultMetas {
                title: Some("Mock".to_string()),
                ..Default::default()
            }),
        );

        assert_eq!(summary.title, "Mock");
        assert_eq!(summary.description, "");
        assert_eq!(summary.format, "csv");
        assert_eq!(summary.kind, "resource");
        assert_eq!(summary.origin, "https://example.com/explore/dataset/example-id");
    }
}
