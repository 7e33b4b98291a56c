//! Utility modules for stac-map.

pub mod bounds;

pub use bounds::{bbox_polygon, geometry_bounds, to_lat_lng_bounds};
