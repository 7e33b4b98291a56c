//! Display options for [`explore`](super::explore).

use serde_json::Value;

use crate::color::ColormapResolver;
use crate::map::{Length, MapOptions, StyleOptions};

/// Colormap for categorical properties when none is given.
pub const DEFAULT_CATEGORICAL_CMAP: &str = "Set1";

/// Colormap for continuous properties when none is given.
pub const DEFAULT_CONTINUOUS_CMAP: &str = "RdBu_r";

/// Options controlling how items are drawn.
///
/// Every field has a default; use the builder methods to change the ones
/// you care about:
///
/// ```rust
/// use stac_map::ExploreOptions;
///
/// let options = ExploreOptions::new()
///     .name("Sentinel-2")
///     .prop("eo:cloud_cover")
///     .cmap("viridis");
/// assert!(options.tooltip);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreOptions {
    /// Display name used in layer names and the legend caption. Defaults to
    /// the first item's collection.
    pub name: Option<String>,
    /// Search box `[west, south, east, north]`, or the 6-value 3D form
    /// `[west, south, zmin, east, north, zmax]`, drawn as an outline.
    pub bbox: Option<Vec<f64>>,
    /// Search geometry drawn as an outline. Conflicts with `bbox`.
    pub intersects: Option<Value>,
    /// Draw each item's `thumbnail` asset over its footprint.
    pub thumbnails: bool,
    /// Property used to color-code footprints.
    pub prop: Option<String>,
    /// Colormap name; `_r` reverses it.
    pub cmap: Option<String>,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    /// Treat numeric values as categories.
    pub force_categorical: bool,
    pub tooltip: bool,
    pub popup: bool,
    /// Fields shown in tooltips and popups. Defaults to all (or shared)
    /// properties.
    pub fields: Option<Vec<String>>,
    /// Extension prefixes (e.g. `eo`) whose fields are shown. Unprefixed
    /// fields are always shown.
    pub extensions: Option<Vec<String>>,
    /// Show only properties every item has.
    pub shared_fields: bool,
    /// Show the item id in tooltips and popups.
    pub add_id: bool,
    pub width: Length,
    pub height: Length,
    /// Tile provider name or URL template. Only used for new maps.
    pub tiles: Option<String>,
    /// Tile attribution; required for custom tile URLs.
    pub attr: Option<String>,
    /// Fit the view to the footprints.
    pub zoom_to: bool,
    pub legend: bool,
    pub layer_control: bool,
    /// Highlight footprints on hover.
    pub highlight: bool,
    pub style_kwds: StyleOptions,
    pub highlight_kwds: StyleOptions,
    pub tooltip_kwds: StyleOptions,
    pub popup_kwds: StyleOptions,
    pub map_kwds: StyleOptions,
    /// Where colormap names are looked up.
    pub colormaps: ColormapResolver,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            name: None,
            bbox: None,
            intersects: None,
            thumbnails: false,
            prop: None,
            cmap: None,
            vmin: None,
            vmax: None,
            force_categorical: false,
            tooltip: true,
            popup: false,
            fields: None,
            extensions: None,
            shared_fields: false,
            add_id: true,
            width: Length::default(),
            height: Length::default(),
            tiles: Some("OpenStreetMap".to_string()),
            attr: None,
            zoom_to: true,
            legend: true,
            layer_control: true,
            highlight: true,
            style_kwds: StyleOptions::new(),
            highlight_kwds: StyleOptions::new(),
            tooltip_kwds: StyleOptions::new(),
            popup_kwds: StyleOptions::new(),
            map_kwds: StyleOptions::new(),
            colormaps: ColormapResolver::new(),
        }
    }
}

impl ExploreOptions {
    /// Creates options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn bbox(mut self, bbox: impl Into<Vec<f64>>) -> Self {
        self.bbox = Some(bbox.into());
        self
    }

    pub fn intersects(mut self, geometry: Value) -> Self {
        self.intersects = Some(geometry);
        self
    }

    pub fn thumbnails(mut self, thumbnails: bool) -> Self {
        self.thumbnails = thumbnails;
        self
    }

    pub fn prop(mut self, prop: impl Into<String>) -> Self {
        self.prop = Some(prop.into());
        self
    }

    pub fn cmap(mut self, cmap: impl Into<String>) -> Self {
        self.cmap = Some(cmap.into());
        self
    }

    pub fn vmin(mut self, vmin: f64) -> Self {
        self.vmin = Some(vmin);
        self
    }

    pub fn vmax(mut self, vmax: f64) -> Self {
        self.vmax = Some(vmax);
        self
    }

    pub fn force_categorical(mut self, force: bool) -> Self {
        self.force_categorical = force;
        self
    }

    pub fn tooltip(mut self, tooltip: bool) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn popup(mut self, popup: bool) -> Self {
        self.popup = popup;
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    pub fn shared_fields(mut self, shared: bool) -> Self {
        self.shared_fields = shared;
        self
    }

    pub fn add_id(mut self, add_id: bool) -> Self {
        self.add_id = add_id;
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    pub fn tiles(mut self, tiles: impl Into<String>) -> Self {
        self.tiles = Some(tiles.into());
        self
    }

    /// Creates new maps without a basemap.
    pub fn no_tiles(mut self) -> Self {
        self.tiles = None;
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    pub fn zoom_to(mut self, zoom_to: bool) -> Self {
        self.zoom_to = zoom_to;
        self
    }

    pub fn legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn layer_control(mut self, layer_control: bool) -> Self {
        self.layer_control = layer_control;
        self
    }

    pub fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn style_kwds(mut self, kwds: StyleOptions) -> Self {
        self.style_kwds = kwds;
        self
    }

    pub fn highlight_kwds(mut self, kwds: StyleOptions) -> Self {
        self.highlight_kwds = kwds;
        self
    }

    pub fn tooltip_kwds(mut self, kwds: StyleOptions) -> Self {
        self.tooltip_kwds = kwds;
        self
    }

    pub fn popup_kwds(mut self, kwds: StyleOptions) -> Self {
        self.popup_kwds = kwds;
        self
    }

    pub fn map_kwds(mut self, kwds: StyleOptions) -> Self {
        self.map_kwds = kwds;
        self
    }

    pub fn colormaps(mut self, resolver: ColormapResolver) -> Self {
        self.colormaps = resolver;
        self
    }

    /// Options for the map created by [`explore`](super::explore).
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            width: self.width,
            height: self.height,
            tiles: self.tiles.clone(),
            attr: self.attr.clone(),
            map_kwds: self.map_kwds.clone(),
        }
    }
}
