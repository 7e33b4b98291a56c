//! A Leaflet web map assembled from named children.
//!
//! A [`Map`] holds an ordered list of [`Element`]s (tile layers, GeoJSON
//! layers, image overlay groups, controls) plus an [`HtmlRoot`] for literal
//! markup such as legends. [`Map::render`] produces a standalone HTML page.

pub mod element;
pub mod legend;
mod render;
pub mod style;
pub mod tiles;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::debug;

pub use element::{
    Element, ElementKind, FeatureGroup, FieldBinding, GeoJsonLayer, ImageOverlay, LatLngBounds,
    LayerControl, LayerStyle,
};
pub use legend::{Legend, LegendKind};
pub use style::StyleOptions;
pub use tiles::TileLayer;

use crate::error::ExploreError;

/// A CSS length for the map container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Percent(f64),
    Pixels(u32),
}

impl Default for Length {
    fn default() -> Self {
        Length::Percent(100.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Percent(p) => write!(f, "{p}%"),
            Length::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// Literal markup placed in the page outside of Leaflet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlRoot {
    header: Vec<String>,
    html: Vec<String>,
}

impl HtmlRoot {
    /// Adds markup to `<head>`. Identical blocks are only added once.
    pub fn add_header(&mut self, markup: impl Into<String>) {
        let markup = markup.into();
        if !self.header.contains(&markup) {
            self.header.push(markup);
        }
    }

    /// Adds markup to `<body>`, after the map container.
    pub fn add_html(&mut self, markup: impl Into<String>) {
        self.html.push(markup.into());
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn html(&self) -> &[String] {
        &self.html
    }
}

/// Options for creating a [`Map`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub width: Length,
    pub height: Length,
    /// Tile provider name or URL template; `None` for no basemap.
    pub tiles: Option<String>,
    /// Attribution for the tiles.
    pub attr: Option<String>,
    /// Extra `L.map` options.
    pub map_kwds: StyleOptions,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            width: Length::default(),
            height: Length::default(),
            tiles: Some("OpenStreetMap".to_string()),
            attr: None,
            map_kwds: StyleOptions::new(),
        }
    }
}

/// An interactive web map.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    name: String,
    width: Length,
    height: Length,
    map_kwds: StyleOptions,
    children: Vec<Element>,
    root: HtmlRoot,
}

impl Map {
    /// Creates a map with its basemap and a fullscreen control.
    pub fn new(options: MapOptions) -> Result<Self, ExploreError> {
        let mut map = Self {
            name: format!("map_{}", uuid::Uuid::new_v4().simple()),
            width: options.width,
            height: options.height,
            map_kwds: options.map_kwds,
            children: Vec::new(),
            root: HtmlRoot::default(),
        };

        if let Some(tiles) = &options.tiles {
            let layer = TileLayer::resolve(tiles, options.attr.as_deref())?;
            debug!("basemap {}", layer.name);
            map.add_child(layer);
        }
        map.add_child(Element::new(ElementKind::Fullscreen));
        Ok(map)
    }

    /// The map's unique name, also its container id.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn height(&self) -> Length {
        self.height
    }

    /// Appends a child; children render in insertion order.
    pub fn add_child(&mut self, child: impl Into<Element>) {
        self.children.push(child.into());
    }

    /// Detaches every layer control. Returns how many were removed.
    pub fn remove_layer_control(&mut self) -> usize {
        let before = self.children.len();
        self.children.retain(|child| !child.is_layer_control());
        before - self.children.len()
    }

    /// Sets the view to `bounds`.
    pub fn fit_bounds(&mut self, bounds: LatLngBounds) {
        self.add_child(Element::new(ElementKind::FitBounds(bounds)));
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// The first child whose name starts with `prefix`.
    pub fn first_child(&self, prefix: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name().starts_with(prefix))
    }

    /// Names of the overlay layers, in order.
    pub fn overlay_names(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter(|child| child.is_overlay())
            .filter_map(Element::layer_name)
            .collect()
    }

    pub fn layer_control_count(&self) -> usize {
        self.children.iter().filter(|child| child.is_layer_control()).count()
    }

    pub fn root(&self) -> &HtmlRoot {
        &self.root
    }

    /// The HTML root, for injecting literal markup.
    pub fn root_mut(&mut self) -> &mut HtmlRoot {
        &mut self.root
    }

    /// Renders a standalone HTML page.
    pub fn render(&self) -> String {
        render::render_map(self)
    }

    /// Writes the rendered page to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        debug!("saving map to {}", path.display());
        fs::write(path, self.render())
    }

    pub(crate) fn map_kwds(&self) -> &StyleOptions {
        &self.map_kwds
    }
}
