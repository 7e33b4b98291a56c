//! Composing STAC items into map layers.
//!
//! [`explore`] draws items on a new [`Map`]; [`explore_on`] adds them to an
//! existing one. Both build every layer first and only touch the map once
//! nothing can fail anymore, so a failed call leaves an existing map as it
//! was.
//!
//! Layers added per call, in order:
//!
//! 1. `"<name> - Bounds"`: the search bbox or geometry, if one was given
//! 2. a view fit to the footprints, if `zoom_to`
//! 3. `"<name> - Footprints"`: one styled shape per item
//! 4. `"<name> - Thumbnails"`: item thumbnails, if `thumbnails`
//! 5. the legend, if a property was color-coded
//! 6. the layer control, always last

pub mod fields;
pub mod options;

use log::{debug, warn};

pub use options::{DEFAULT_CATEGORICAL_CMAP, DEFAULT_CONTINUOUS_CMAP, ExploreOptions};

use crate::color::{
    ColorScale, DEFAULT_COLOR, assign_categorical, assign_continuous, assign_fixed, is_categorical,
};
use crate::error::ExploreError;
use crate::map::{
    FeatureGroup, FieldBinding, GeoJsonLayer, ImageOverlay, LatLngBounds, LayerControl, Legend, Map,
    StyleOptions,
};
use crate::model::{Feature, FeatureCollection};
use crate::normalize::{StacInput, normalize};
use crate::util::{bbox_polygon, to_lat_lng_bounds};
use crate::validate::{bbox_edges, validate_options};

/// Name used when neither `name` nor a collection id is available.
pub const DEFAULT_NAME: &str = "STAC Items";

/// Draws STAC items on a new map.
///
/// ```rust
/// use serde_json::json;
/// use stac_map::{ExploreOptions, StacInput, explore};
///
/// let item = json!({
///     "type": "Feature",
///     "id": "item-1",
///     "collection": "sentinel-2-l2a",
///     "geometry": {"type": "Point", "coordinates": [-105.1, 40.2]},
///     "properties": {"eo:cloud_cover": 12.5},
///     "assets": {},
/// });
/// let input = StacInput::from_json(item).unwrap();
///
/// let map = explore(&input, &ExploreOptions::new().prop("eo:cloud_cover")).unwrap();
/// assert_eq!(
///     map.overlay_names(),
///     vec!["sentinel-2-l2a - Footprints"]
/// );
/// ```
pub fn explore(input: &StacInput, options: &ExploreOptions) -> Result<Map, ExploreError> {
    validate_options(options)?;
    let staged = stage(input, options)?;
    let mut map = Map::new(options.map_options())?;
    staged.commit(&mut map, options);
    Ok(map)
}

/// Draws STAC items on an existing map.
///
/// The map's layer control, if any, is moved after the new layers so that
/// it lists them. On error the map is not modified.
pub fn explore_on(map: &mut Map, input: &StacInput, options: &ExploreOptions) -> Result<(), ExploreError> {
    validate_options(options)?;
    let staged = stage(input, options)?;
    staged.commit(map, options);
    Ok(())
}

/// Everything one call adds to a map.
struct Staged {
    bounds: Option<GeoJsonLayer>,
    fit: Option<LatLngBounds>,
    footprints: GeoJsonLayer,
    thumbnails: Option<FeatureGroup>,
    legend: Option<Legend>,
}

impl Staged {
    fn commit(self, map: &mut Map, options: &ExploreOptions) {
        let had_control = map.remove_layer_control() > 0;

        if let Some(bounds) = self.bounds {
            map.add_child(bounds);
        }
        if let Some(fit) = self.fit {
            map.fit_bounds(fit);
        }
        map.add_child(self.footprints);
        if let Some(thumbnails) = self.thumbnails {
            map.add_child(thumbnails);
        }
        if let Some(legend) = self.legend {
            legend.add_to(map.root_mut());
        }
        if options.layer_control || had_control {
            map.add_child(LayerControl::default());
        }
    }
}

fn stage(input: &StacInput, options: &ExploreOptions) -> Result<Staged, ExploreError> {
    let records = normalize(input)?;
    let name = options
        .name
        .clone()
        .or_else(|| records.first().and_then(|r| r.collection.clone()))
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    debug!("exploring {} items as `{}`", records.len(), name);

    let mut collection = FeatureCollection::new(records);
    let scale = assign_colors(&mut collection, options)?;

    let bounds = bounds_layer(&name, options)?;

    let fields = fields::resolve_fields(&collection, options);
    if options.add_id {
        fields::inject_ids(&mut collection);
    }
    if options.tooltip || options.popup {
        fields::fill_missing(&mut collection, &fields);
    }

    let fit = if options.zoom_to {
        let fit = collection.bounds().map(|rect| to_lat_lng_bounds(&rect));
        if fit.is_none() {
            debug!("no geometry to zoom to");
        }
        fit
    } else {
        None
    };

    let footprints = footprint_layer(&name, &collection, &fields, options);

    let thumbnails = if options.thumbnails {
        Some(thumbnail_group(&name, &collection)?)
    } else {
        None
    };

    let legend = match (&scale, &options.prop) {
        (Some(scale), Some(prop)) if options.legend => Some(Legend::from_scale(format!("{name}: {prop}"), scale)),
        _ => None,
    };

    Ok(Staged {
        bounds,
        fit,
        footprints,
        thumbnails,
        legend,
    })
}

/// Colors every feature. Returns the scale when a property drove the colors.
fn assign_colors(
    collection: &mut FeatureCollection,
    options: &ExploreOptions,
) -> Result<Option<ColorScale>, ExploreError> {
    let Some(prop) = &options.prop else {
        assign_fixed(collection, DEFAULT_COLOR);
        return Ok(None);
    };

    let categorical = is_categorical(&collection.values(prop)?, options.force_categorical);
    let scale = if categorical {
        let cmap = options.cmap.as_deref().unwrap_or(DEFAULT_CATEGORICAL_CMAP);
        assign_categorical(collection, prop, cmap, &options.colormaps)?
    } else {
        let cmap = options.cmap.as_deref().unwrap_or(DEFAULT_CONTINUOUS_CMAP);
        assign_continuous(collection, prop, cmap, options.vmin, options.vmax, &options.colormaps)?
    };
    Ok(Some(scale))
}

fn bounds_layer(name: &str, options: &ExploreOptions) -> Result<Option<GeoJsonLayer>, ExploreError> {
    let geometry = match (&options.bbox, &options.intersects) {
        (Some(_), Some(_)) => return Err(ExploreError::ConflictingFilter),
        (Some(bbox), None) => {
            let (west, south, east, north) = bbox_edges(bbox)?;
            bbox_polygon(west, south, east, north)
        }
        (None, Some(geometry)) => geometry.clone(),
        (None, None) => return Ok(None),
    };

    let style = StyleOptions::new()
        .with("fill", false)
        .with("color", "#6e6e6e")
        .with("weight", 1.0)
        .with("interactive", false);
    Ok(Some(GeoJsonLayer::new(format!("{name} - Bounds"), geometry, style)))
}

fn footprint_layer(
    name: &str,
    collection: &FeatureCollection,
    fields: &[String],
    options: &ExploreOptions,
) -> GeoJsonLayer {
    let color_coded = options.prop.is_some();
    let style_fn = |feature: &Feature| {
        let color = feature.color().unwrap_or(DEFAULT_COLOR);
        let assigned = StyleOptions::new().with("color", color).with("fillColor", color);
        let style = StyleOptions::new()
            .with("fillOpacity", 0.6)
            .with("weight", 2.0)
            .merged(&assigned)
            .merged(&options.style_kwds);
        if color_coded {
            style.merged(&assigned)
        } else {
            style
        }
    };

    let highlight = if options.highlight {
        StyleOptions::new()
            .with("fillOpacity", 0.9)
            .with("weight", 4.0)
            .merged(&options.highlight_kwds)
    } else {
        StyleOptions::new()
    };

    let mut layer = GeoJsonLayer::from_features(format!("{name} - Footprints"), collection, style_fn)
        .with_highlight(highlight);
    if options.tooltip {
        layer = layer.with_tooltip(FieldBinding {
            fields: fields.to_vec(),
            options: options.tooltip_kwds.clone(),
        });
    }
    if options.popup {
        layer = layer.with_popup(FieldBinding {
            fields: fields.to_vec(),
            options: options.popup_kwds.clone(),
        });
    }
    layer
}

/// Groups an image overlay per feature with a thumbnail. Features without
/// a thumbnail or a geometry are skipped; fails when no overlay was added.
fn thumbnail_group(name: &str, collection: &FeatureCollection) -> Result<FeatureGroup, ExploreError> {
    let mut group = FeatureGroup::new(format!("{name} - Thumbnails"));
    let mut found = 0;

    for feature in collection {
        let Some(href) = feature.thumbnail_href() else {
            continue;
        };
        match feature.bounds() {
            Some(rect) => {
                group.add_overlay(ImageOverlay {
                    url: href.to_string(),
                    bounds: to_lat_lng_bounds(&rect),
                });
                found += 1;
            }
            None => warn!(
                "skipping thumbnail of {} without geometry",
                feature.id.as_deref().unwrap_or("unnamed item")
            ),
        }
    }

    if found == 0 {
        return Err(ExploreError::NoThumbnails);
    }
    debug!("{} of {} items have thumbnails", found, collection.len());
    Ok(group)
}
