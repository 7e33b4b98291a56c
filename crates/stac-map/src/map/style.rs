//! Open key-value option maps passed through to Leaflet.
//!
//! Recognized keys depend on where the options are used:
//!
//! - footprint style: `color`, `weight`, `opacity`, `fill`, `fillColor`,
//!   `fillOpacity`, `dashArray`, `stroke`, `interactive`
//! - highlight: the same keys as style, applied on hover
//! - tooltip: `sticky`, `direction`, `offset`, `opacity`, `permanent`
//! - popup: `maxWidth`, `minWidth`, `maxHeight`, `autoPan`, `closeButton`
//! - map creation: `zoom`, `center`, `minZoom`, `maxZoom`, `zoomControl`,
//!   `scrollWheelZoom`, `preferCanvas`, and any other `L.map` option
//!
//! Unrecognized keys are passed through unchanged.

use serde::Serialize;
use serde_json::{Map, Value};

/// An ordered map of option names to JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleOptions(Map<String, Value>);

impl StyleOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Returns a copy of `self` with every entry of `overrides` applied on
    /// top.
    pub fn merged(&self, overrides: &StyleOptions) -> StyleOptions {
        let mut out = self.clone();
        for (key, value) in overrides.iter() {
            out.0.insert(key.clone(), value.clone());
        }
        out
    }

    /// Converts to a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for StyleOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for StyleOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
