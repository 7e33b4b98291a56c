//! stac-map: interactive web maps of STAC items.
//!
//! This crate draws STAC items as Leaflet map layers: item footprints,
//! thumbnails, search bounds, and footprints color-coded by a property with
//! a matching legend.
//!
//! # Overview
//!
//! Drawing happens in three stages:
//! - **Normalize**: any input shape (item, list, item collection, catalog
//!   tree, raw JSON) is flattened into plain [`Record`]s
//! - **Collect**: records become a [`FeatureCollection`] that answers
//!   property queries (shared/all properties, per-feature values)
//! - **Compose**: [`explore`] colors the features, builds the layers and
//!   attaches them to a [`Map`], which renders to a standalone HTML page
//!
//! # Quick Start
//!
//! ```rust
//! use stac_map::{ExploreOptions, Item, ItemCollection, StacInput, explore};
//! use serde_json::json;
//!
//! let mut item = Item::new("item-1");
//! item.collection = Some("landsat".to_string());
//! item.geometry = Some(json!({"type": "Point", "coordinates": [-105.0, 40.0]}));
//! item.properties.insert("platform".to_string(), json!("landsat-8"));
//!
//! let input = StacInput::from(ItemCollection::new(vec![item]));
//! let options = ExploreOptions::new().prop("platform").popup(true);
//!
//! let map = explore(&input, &options).unwrap();
//! assert_eq!(map.overlay_names(), vec!["landsat - Footprints"]);
//!
//! let html = map.render();
//! assert!(html.contains("landsat: platform"));
//! ```
//!
//! # Modules
//!
//! - [`stac`]: Typed STAC entities (Item, ItemCollection, Catalog)
//! - [`normalize`]: Input shapes and their conversion to records
//! - [`model`]: Records, features and feature collections
//! - [`color`]: Colormaps and color assignment
//! - [`map`]: The Leaflet map, its layers and legends
//! - [`explore`]: Composing items into map layers
//! - [`validate`]: Option checks
//! - [`error`]: Error types
//!
//! # Colormaps
//!
//! ColorBrewer schemes are always available. The default
//! `extended-colormaps` feature adds perceptual maps such as `viridis` and
//! `seismic`.

pub mod color;
pub mod error;
pub mod explore;
pub mod map;
pub mod model;
pub mod normalize;
pub mod stac;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use color::{Backend, ColorScale, ColormapResolver};
pub use error::{ColormapError, ErrorCode, ExploreError, NormalizeError};
pub use explore::{ExploreOptions, explore, explore_on};
pub use map::{Legend, Length, Map, MapOptions, StyleOptions, TileLayer};
pub use model::{Feature, FeatureCollection, Record};
pub use normalize::{InputKind, ItemLike, StacInput, normalize};
pub use stac::{Asset, Catalog, Item, ItemCollection, Link};
pub use validate::validate_options;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
