//! Bounds of GeoJSON geometries.
//!
//! Positions are `[x, y, (z)]` arrays, i.e. `[lon, lat]`. Bounds are returned
//! as a [`Rect`] with `x` = longitude and `y` = latitude.

use geo_types::{Coord, Rect, coord};
use log::warn;
use serde_json::{Value, json};

/// Computes the bounds of a GeoJSON geometry, feature or feature collection.
///
/// Returns `None` for empty geometries.
pub fn geometry_bounds(geometry: &Value) -> Option<Rect<f64>> {
    let mut acc: Option<(Coord<f64>, Coord<f64>)> = None;
    visit_geometry(geometry, &mut acc);
    acc.map(|(min, max)| Rect::new(min, max))
}

fn visit_geometry(geometry: &Value, acc: &mut Option<(Coord<f64>, Coord<f64>)>) {
    let Some(obj) = geometry.as_object() else {
        return;
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("GeometryCollection") => {
            for g in obj.get("geometries").and_then(Value::as_array).into_iter().flatten() {
                visit_geometry(g, acc);
            }
        }
        Some("Feature") => {
            if let Some(g) = obj.get("geometry") {
                visit_geometry(g, acc);
            }
        }
        Some("FeatureCollection") => {
            for f in obj.get("features").and_then(Value::as_array).into_iter().flatten() {
                visit_geometry(f, acc);
            }
        }
        Some(_) => {
            if let Some(coords) = obj.get("coordinates") {
                visit_coordinates(coords, acc);
            }
        }
        None => {
            if !obj.is_empty() {
                warn!("geometry without a `type` member ignored for bounds");
            }
        }
    }
}

fn visit_coordinates(coords: &Value, acc: &mut Option<(Coord<f64>, Coord<f64>)>) {
    let Some(array) = coords.as_array() else {
        return;
    };

    if let (Some(x), Some(y)) = (
        array.first().and_then(Value::as_f64),
        array.get(1).and_then(Value::as_f64),
    ) {
        let c = coord! { x: x, y: y };
        *acc = Some(match acc.take() {
            Some((min, max)) => (
                coord! { x: min.x.min(c.x), y: min.y.min(c.y) },
                coord! { x: max.x.max(c.x), y: max.y.max(c.y) },
            ),
            None => (c, c),
        });
        return;
    }

    for nested in array {
        visit_coordinates(nested, acc);
    }
}

/// Builds a GeoJSON Polygon from `(west, south, east, north)` bounds.
///
/// The ring starts and ends at the south-west corner.
pub fn bbox_polygon(west: f64, south: f64, east: f64, north: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[
            [west, south],
            [west, north],
            [east, north],
            [east, south],
            [west, south],
        ]]
    })
}

/// Converts bounds to Leaflet's `[[south, west], [north, east]]` order.
pub fn to_lat_lng_bounds(rect: &Rect<f64>) -> [[f64; 2]; 2] {
    [[rect.min().y, rect.min().x], [rect.max().y, rect.max().x]]
}
