//! Typed STAC entities.
//!
//! These mirror the parts of the STAC data model that map rendering needs:
//! - Items with their assets and links
//! - Item collections (GeoJSON FeatureCollections of items)
//! - Catalogs, walked recursively for their items

pub mod catalog;
pub mod item;

pub use catalog::Catalog;
pub use item::{Asset, Item, ItemCollection, Link};
