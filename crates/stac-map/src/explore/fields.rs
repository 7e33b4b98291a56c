//! Choosing the property fields shown in tooltips and popups.

use serde_json::{Map, Value};

use crate::explore::ExploreOptions;
use crate::model::{FeatureCollection, extension_prefix};

/// Resolves the fields to show, before any id injection.
///
/// Explicit `fields` are used as given. Otherwise all (or, with
/// `shared_fields`, only shared) properties are used, narrowed to unprefixed
/// fields plus those whose extension prefix is listed in `extensions`.
/// With `add_id`, `id` is put first.
pub fn resolve_fields(collection: &FeatureCollection, options: &ExploreOptions) -> Vec<String> {
    let mut fields = match &options.fields {
        Some(fields) => fields.clone(),
        None => {
            let candidates = if options.shared_fields {
                collection.shared_properties()
            } else {
                collection.all_properties()
            };
            match &options.extensions {
                Some(extensions) => filter_extensions(candidates, extensions),
                None => candidates,
            }
        }
    };

    if options.add_id {
        fields.retain(|field| field != "id");
        fields.insert(0, "id".to_string());
    }
    fields
}

/// Keeps unprefixed fields and fields from the allowed extensions.
pub fn filter_extensions(fields: Vec<String>, extensions: &[String]) -> Vec<String> {
    fields
        .into_iter()
        .filter(|field| match extension_prefix(field) {
            None => true,
            Some(prefix) => extensions.iter().any(|ext| ext == prefix),
        })
        .collect()
}

/// Gives every feature without an `id` property one holding its identifier,
/// as its first property. Existing `id` properties are left alone.
pub fn inject_ids(collection: &mut FeatureCollection) {
    for feature in collection.features_mut() {
        if feature.properties.contains_key("id") {
            continue;
        }

        let id = feature.id.clone().map(Value::String).unwrap_or(Value::Null);
        let mut properties = Map::with_capacity(feature.properties.len() + 1);
        properties.insert("id".to_string(), id);
        properties.extend(std::mem::take(&mut feature.properties));
        feature.properties = properties;
    }
}

/// Sets each of `fields` to null on features that lack it.
pub fn fill_missing(collection: &mut FeatureCollection, fields: &[String]) {
    for feature in collection.features_mut() {
        for field in fields {
            if !feature.properties.contains_key(field) {
                feature.properties.insert(field.clone(), Value::Null);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Record;

    fn collection() -> FeatureCollection {
        let record = |id: &str, properties: Value| Record {
            id: Some(id.to_string()),
            properties: properties.as_object().cloned().unwrap_or_default(),
            ..Default::default()
        };
        FeatureCollection::new(vec![
            record("a", json!({"datetime": "x", "eo:cloud_cover": 4, "view:off_nadir": 1})),
            record("b", json!({"datetime": "y", "eo:cloud_cover": 20, "gsd": 10, "id": "MY CUSTOM ID"})),
        ])
    }

    #[test]
    fn test_all_fields_with_id() {
        let fields = resolve_fields(&collection(), &ExploreOptions::new());
        assert_eq!(
            fields,
            vec!["id", "datetime", "gsd", "eo:cloud_cover", "view:off_nadir"]
        );
    }

    #[test]
    fn test_shared_fields() {
        let options = ExploreOptions::new().shared_fields(true).add_id(false);
        assert_eq!(
            resolve_fields(&collection(), &options),
            vec!["datetime", "eo:cloud_cover"]
        );
    }

    #[test]
    fn test_extension_filter() {
        let options = ExploreOptions::new().extensions(["view"]).add_id(false);
        assert_eq!(
            resolve_fields(&collection(), &options),
            vec!["datetime", "gsd", "id", "view:off_nadir"]
        );
    }

    #[test]
    fn test_explicit_fields() {
        let options = ExploreOptions::new().fields(["gsd", "id"]);
        assert_eq!(resolve_fields(&collection(), &options), vec!["id", "gsd"]);
    }

    #[test]
    fn test_inject_ids_keeps_custom_id() {
        let mut fc = collection();
        inject_ids(&mut fc);

        let first = &fc.features()[0];
        assert_eq!(first.properties.keys().next().map(String::as_str), Some("id"));
        assert_eq!(first.properties["id"], json!("a"));
        assert_eq!(fc.features()[1].properties["id"], json!("MY CUSTOM ID"));
    }

    #[test]
    fn test_inject_ids_without_identifier() {
        let mut fc = FeatureCollection::new(vec![Record::default()]);
        inject_ids(&mut fc);
        assert_eq!(fc.features()[0].properties["id"], Value::Null);
    }

    #[test]
    fn test_fill_missing() {
        let mut fc = collection();
        fill_missing(&mut fc, &["gsd".to_string()]);
        assert_eq!(fc.features()[0].properties["gsd"], Value::Null);
        assert_eq!(fc.features()[1].properties["gsd"], json!(10));
    }
}
