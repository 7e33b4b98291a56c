//! Children that can be attached to a [`Map`](super::Map).

use serde_json::Value;
use uuid::Uuid;

use crate::map::style::StyleOptions;
use crate::map::tiles::TileLayer;
use crate::model::{Feature, FeatureCollection};

/// Lat/lng corners `[[south, west], [north, east]]`.
pub type LatLngBounds = [[f64; 2]; 2];

/// How a GeoJSON layer styles its features.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerStyle {
    /// Every feature gets the same style.
    Uniform(StyleOptions),
    /// One style per feature, in feature order.
    PerFeature(Vec<StyleOptions>),
}

/// Property fields rendered as a table in a tooltip or popup.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    pub fields: Vec<String>,
    pub options: StyleOptions,
}

/// A vector layer of GeoJSON data.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonLayer {
    pub name: String,
    /// A GeoJSON geometry, Feature or FeatureCollection.
    pub data: Value,
    pub style: LayerStyle,
    /// Style applied on hover; empty means no highlighting.
    pub highlight: StyleOptions,
    pub tooltip: Option<FieldBinding>,
    pub popup: Option<FieldBinding>,
}

impl GeoJsonLayer {
    /// Creates a layer drawing `data` with one style for everything.
    pub fn new(name: impl Into<String>, data: Value, style: StyleOptions) -> Self {
        Self {
            name: name.into(),
            data,
            style: LayerStyle::Uniform(style),
            highlight: StyleOptions::new(),
            tooltip: None,
            popup: None,
        }
    }

    /// Creates a layer from a feature collection, styling each feature with
    /// `style_fn`.
    pub fn from_features<F>(name: impl Into<String>, collection: &FeatureCollection, style_fn: F) -> Self
    where
        F: Fn(&Feature) -> StyleOptions,
    {
        Self {
            name: name.into(),
            data: collection.to_geojson(),
            style: LayerStyle::PerFeature(collection.iter().map(style_fn).collect()),
            highlight: StyleOptions::new(),
            tooltip: None,
            popup: None,
        }
    }

    pub fn with_highlight(mut self, highlight: StyleOptions) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_tooltip(mut self, binding: FieldBinding) -> Self {
        self.tooltip = Some(binding);
        self
    }

    pub fn with_popup(mut self, binding: FieldBinding) -> Self {
        self.popup = Some(binding);
        self
    }

    /// Returns the data with each feature's style attached as a `style`
    /// member.
    pub(crate) fn styled_data(&self) -> Value {
        let mut data = self.data.clone();
        if let LayerStyle::PerFeature(styles) = &self.style {
            if let Some(features) = data.get_mut("features").and_then(Value::as_array_mut) {
                for (feature, style) in features.iter_mut().zip(styles) {
                    if let Some(obj) = feature.as_object_mut() {
                        obj.insert("style".to_string(), style.to_json());
                    }
                }
            }
        }
        data
    }
}

/// An image stretched over a lat/lng rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOverlay {
    pub url: String,
    pub bounds: LatLngBounds,
}

/// A named group of image overlays toggled together.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroup {
    pub name: String,
    pub overlays: Vec<ImageOverlay>,
}

impl FeatureGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overlays: Vec::new(),
        }
    }

    pub fn add_overlay(&mut self, overlay: ImageOverlay) {
        self.overlays.push(overlay);
    }
}

/// A widget listing base layers and toggleable overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerControl {
    pub position: String,
    pub collapsed: bool,
    /// Hide the base layer list when there is only one base layer.
    pub hide_single_base: bool,
}

impl Default for LayerControl {
    fn default() -> Self {
        Self {
            position: "topleft".to_string(),
            collapsed: true,
            hide_single_base: true,
        }
    }
}

/// What an [`Element`] draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    TileLayer(TileLayer),
    GeoJson(GeoJsonLayer),
    FeatureGroup(FeatureGroup),
    LayerControl(LayerControl),
    Fullscreen,
    FitBounds(LatLngBounds),
}

impl ElementKind {
    fn prefix(&self) -> &'static str {
        match self {
            ElementKind::TileLayer(_) => "tile_layer",
            ElementKind::GeoJson(_) => "geo_json",
            ElementKind::FeatureGroup(_) => "feature_group",
            ElementKind::LayerControl(_) => "layer_control",
            ElementKind::Fullscreen => "fullscreen",
            ElementKind::FitBounds(_) => "fit_bounds",
        }
    }
}

/// A uniquely named map child.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    kind: ElementKind,
}

impl Element {
    /// Wraps `kind` under a fresh name such as `geo_json_3f2a...`.
    pub fn new(kind: ElementKind) -> Self {
        let name = format!("{}_{}", kind.prefix(), Uuid::new_v4().simple());
        Self { name, kind }
    }

    /// The element's unique name, also its JavaScript variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// The name shown in the layer control, for layers that have one.
    pub fn layer_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::TileLayer(layer) => Some(&layer.name),
            ElementKind::GeoJson(layer) => Some(&layer.name),
            ElementKind::FeatureGroup(group) => Some(&group.name),
            _ => None,
        }
    }

    /// Whether the element is an overlay toggled by the layer control.
    pub fn is_overlay(&self) -> bool {
        matches!(self.kind, ElementKind::GeoJson(_) | ElementKind::FeatureGroup(_))
    }

    pub fn is_base_layer(&self) -> bool {
        matches!(self.kind, ElementKind::TileLayer(_))
    }

    pub fn is_layer_control(&self) -> bool {
        matches!(self.kind, ElementKind::LayerControl(_))
    }
}

impl From<TileLayer> for Element {
    fn from(layer: TileLayer) -> Self {
        Element::new(ElementKind::TileLayer(layer))
    }
}

impl From<GeoJsonLayer> for Element {
    fn from(layer: GeoJsonLayer) -> Self {
        Element::new(ElementKind::GeoJson(layer))
    }
}

impl From<FeatureGroup> for Element {
    fn from(group: FeatureGroup) -> Self {
        Element::new(ElementKind::FeatureGroup(group))
    }
}

impl From<LayerControl> for Element {
    fn from(control: LayerControl) -> Self {
        Element::new(ElementKind::LayerControl(control))
    }
}
