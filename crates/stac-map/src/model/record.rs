//! Plain property-bag records.
//!
//! A record is the normalized form of one catalog entry, whatever shape it
//! arrived in.

use serde_json::{Map, Value};

use crate::error::NormalizeError;

/// One normalized catalog entry.
///
/// `properties`, `geometry` and `assets` are never null: missing members
/// become empty objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: Option<String>,
    /// Identifier of the collection the entry belongs to.
    pub collection: Option<String>,
    pub properties: Map<String, Value>,
    /// GeoJSON geometry object.
    pub geometry: Value,
    /// 4 or 6 bounds, or empty when the source had none.
    pub bbox: Vec<f64>,
    /// Asset key to asset object (`{"href": ..., ...}`).
    pub assets: Map<String, Value>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            id: None,
            collection: None,
            properties: Map::new(),
            geometry: Value::Object(Map::new()),
            bbox: Vec::new(),
            assets: Map::new(),
        }
    }
}

impl Record {
    /// Builds a record from an untyped JSON object.
    ///
    /// Anything other than a JSON object is rejected.
    pub fn from_json(value: &Value) -> Result<Self, NormalizeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| NormalizeError::UnsupportedInputKind {
                kind: json_kind(value).to_string(),
            })?;

        let id = match obj.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let collection = obj
            .get("collection")
            .and_then(Value::as_str)
            .map(str::to_string);

        let geometry = match obj.get("geometry") {
            Some(Value::Object(g)) => Value::Object(g.clone()),
            _ => Value::Object(Map::new()),
        };

        let bbox = obj
            .get("bbox")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default();

        Ok(Self {
            id,
            collection,
            properties: object_or_empty(obj.get("properties")),
            geometry,
            bbox,
            assets: object_or_empty(obj.get("assets")),
        })
    }
}

fn object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(obj)) => obj.clone(),
        _ => Map::new(),
    }
}

/// Names the JSON kind of a value, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
