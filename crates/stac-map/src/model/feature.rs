//! Display features and feature collections.
//!
//! A [`Feature`] is a [`Record`] promoted to something that can be drawn: it
//! carries everything the record had plus a color assigned during styling.
//! The color is a typed field, so it never shows up among the properties.

use geo_types::Rect;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::error::ExploreError;
use crate::model::{Record, sort_properties};
use crate::util::bounds::geometry_bounds;

/// One record prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Value,
    pub bbox: Vec<f64>,
    pub assets: Map<String, Value>,
    /// Color assigned by styling.
    color: Option<String>,
}

impl Feature {
    /// Promotes a record to a feature.
    pub fn new(record: Record) -> Self {
        Self {
            id: record.id,
            properties: record.properties,
            geometry: record.geometry,
            bbox: record.bbox,
            assets: record.assets,
            color: None,
        }
    }

    /// Returns the color assigned during styling.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = Some(color.into());
    }

    /// Returns a property value, treating JSON null as absent.
    pub fn value(&self, prop: &str) -> Option<&Value> {
        match self.properties.get(prop) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    /// Returns the href of the `thumbnail` asset, if there is one.
    pub fn thumbnail_href(&self) -> Option<&str> {
        self.assets
            .get("thumbnail")
            .and_then(|asset| asset.get("href"))
            .and_then(Value::as_str)
    }

    /// Returns the bounds of the feature's geometry.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        geometry_bounds(&self.geometry)
    }

    /// Converts to a GeoJSON Feature object.
    pub fn to_geojson(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::String("Feature".to_string()));
        obj.insert(
            "id".to_string(),
            self.id.clone().map(Value::String).unwrap_or(Value::Null),
        );
        obj.insert("properties".to_string(), Value::Object(self.properties.clone()));
        obj.insert("geometry".to_string(), self.geometry.clone());
        if !self.bbox.is_empty() {
            obj.insert(
                "bbox".to_string(),
                Value::Array(self.bbox.iter().map(|v| Value::from(*v)).collect()),
            );
        }
        Value::Object(obj)
    }
}

/// An ordered set of features, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    /// Builds a collection with one feature per record.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            features: records.into_iter().map(Feature::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut [Feature] {
        &mut self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Properties with a value on every feature, in display order.
    pub fn shared_properties(&self) -> Vec<String> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for feature in &self.features {
            for (key, value) in &feature.properties {
                if !value.is_null() {
                    *counts.entry(key.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut keys: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count == self.features.len())
            .map(|(key, _)| key.to_string())
            .collect();
        sort_properties(&mut keys);
        keys
    }

    /// Properties present on at least one feature, in display order.
    pub fn all_properties(&self) -> Vec<String> {
        let mut seen: FxHashMap<&str, ()> = FxHashMap::default();
        for feature in &self.features {
            for key in feature.properties.keys() {
                seen.insert(key.as_str(), ());
            }
        }

        let mut keys: Vec<String> = seen.into_keys().map(str::to_string).collect();
        sort_properties(&mut keys);
        keys
    }

    /// Extracts one value per feature for `prop`.
    ///
    /// Features missing the property (or holding null) yield `None`. Fails
    /// only when no feature has a value at all.
    pub fn values(&self, prop: &str) -> Result<Vec<Option<&Value>>, ExploreError> {
        let values: Vec<Option<&Value>> = self.features.iter().map(|f| f.value(prop)).collect();

        if values.iter().all(Option::is_none) {
            return Err(ExploreError::UnknownProperty {
                property: prop.to_string(),
                available: self.shared_properties(),
            });
        }
        Ok(values)
    }

    /// Combined bounds of every feature geometry.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.features
            .iter()
            .filter_map(Feature::bounds)
            .reduce(|a, b| {
                Rect::new(
                    (a.min().x.min(b.min().x), a.min().y.min(b.min().y)),
                    (a.max().x.max(b.max().x), a.max().y.max(b.max().y)),
                )
            })
    }

    /// Converts to a GeoJSON FeatureCollection object.
    pub fn to_geojson(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::String("FeatureCollection".to_string()));
        obj.insert(
            "features".to_string(),
            Value::Array(self.features.iter().map(Feature::to_geojson).collect()),
        );
        Value::Object(obj)
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
