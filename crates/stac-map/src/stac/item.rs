//! Typed STAC items, assets and item collections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::model::Record;

/// A link from a STAC entity to a related document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A file or service referenced by an item (`thumbnail`, `visual`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Any extension fields carried on the asset.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    /// Creates an asset pointing at `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Default::default()
        }
    }

    /// Converts the asset to its JSON object form.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("href".to_string(), Value::String(self.href.clone()));
        if let Some(title) = &self.title {
            obj.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(media_type) = &self.media_type {
            obj.insert("type".to_string(), Value::String(media_type.clone()));
        }
        if !self.roles.is_empty() {
            obj.insert(
                "roles".to_string(),
                Value::Array(self.roles.iter().cloned().map(Value::String).collect()),
            );
        }
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }
        Value::Object(obj)
    }
}

/// A single STAC item (a GeoJSON feature with STAC metadata).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stac_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stac_extensions: Vec<String>,
    pub id: String,
    /// Identifier of the parent collection, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub assets: BTreeMap<String, Asset>,
}

impl Item {
    /// Creates an empty item with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Parses an item from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, NormalizeError> {
        serde_json::from_str(json).map_err(|e| NormalizeError::Json {
            context: "item".to_string(),
            message: e.to_string(),
        })
    }

    /// Converts the item into a plain record.
    pub fn to_record(&self) -> Record {
        Record {
            id: Some(self.id.clone()),
            collection: self.collection.clone(),
            properties: self.properties.clone(),
            geometry: self
                .geometry
                .clone()
                .unwrap_or_else(|| Value::Object(Map::new())),
            bbox: self.bbox.clone().unwrap_or_default(),
            assets: self
                .assets
                .iter()
                .map(|(key, asset)| (key.clone(), asset.to_json()))
                .collect(),
        }
    }
}

/// An ordered set of items, serialized as a GeoJSON FeatureCollection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCollection {
    #[serde(rename = "features", default)]
    pub items: Vec<Item>,
}

impl ItemCollection {
    /// Creates an item collection from items.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Parses an item collection from a GeoJSON FeatureCollection document.
    pub fn from_json(json: &str) -> Result<Self, NormalizeError> {
        serde_json::from_str(json).map_err(|e| NormalizeError::Json {
            context: "item collection".to_string(),
            message: e.to_string(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<Item>> for ItemCollection {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a ItemCollection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const ITEM_JSON: &str = r#"{
        "type": "Feature",
        "stac_version": "1.0.0",
        "id": "20170831_172754_101c",
        "collection": "planet-disaster-data",
        "geometry": {"type": "Point", "coordinates": [-95.0, 29.5]},
        "bbox": [-95.0, 29.5, -95.0, 29.5],
        "properties": {"datetime": "2017-08-31T17:27:54Z", "eo:cloud_cover": 4},
        "links": [],
        "assets": {
            "thumbnail": {"href": "https://example.com/thumb.png", "type": "image/png", "roles": ["thumbnail"]}
        }
    }"#;

    #[test]
    fn test_item_from_json() {
        let item = Item::from_json(ITEM_JSON).unwrap();
        assert_eq!(item.id, "20170831_172754_101c");
        assert_eq!(item.collection.as_deref(), Some("planet-disaster-data"));
        assert_eq!(item.assets["thumbnail"].roles, vec!["thumbnail".to_string()]);
    }

    #[test]
    fn test_item_to_record() {
        let item = Item::from_json(ITEM_JSON).unwrap();
        let record = item.to_record();

        assert_eq!(record.id.as_deref(), Some("20170831_172754_101c"));
        assert_eq!(record.properties["eo:cloud_cover"], json!(4));
        assert_eq!(record.bbox.len(), 4);
        assert_eq!(
            record.assets["thumbnail"]["href"],
            json!("https://example.com/thumb.png")
        );
        assert_eq!(record.assets["thumbnail"]["type"], json!("image/png"));
    }

    #[test]
    fn test_item_without_geometry_gets_empty_object() {
        let record = Item::new("bare").to_record();
        assert_eq!(record.geometry, json!({}));
        assert!(record.bbox.is_empty());
        assert!(record.assets.is_empty());
    }

    #[test]
    fn test_item_collection_from_json() {
        let json = format!(r#"{{"type": "FeatureCollection", "features": [{ITEM_JSON}, {ITEM_JSON}]}}"#);
        let collection = ItemCollection::from_json(&json).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.iter().count(), 2);
    }

    #[test]
    fn test_invalid_item_json() {
        let result = Item::from_json("{\"type\": \"Feature\"}");
        assert!(matches!(result, Err(NormalizeError::Json { .. })));
    }
}
