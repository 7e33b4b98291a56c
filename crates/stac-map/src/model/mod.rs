//! Data model types for stac-map.
//!
//! This module contains the normalized forms items pass through:
//! - Records (plain property bags)
//! - Features (records prepared for display)
//! - Feature collections (ordered features with property queries)

pub mod feature;
pub mod record;

pub use feature::{Feature, FeatureCollection};
pub use record::{Record, json_kind};

/// Returns the extension namespace of a property (`eo` for `eo:cloud_cover`).
pub fn extension_prefix(prop: &str) -> Option<&str> {
    prop.split_once(':').map(|(prefix, _)| prefix)
}

/// Sorts property names for display.
///
/// Unprefixed properties come first, then extension properties such as
/// `eo:cloud_cover`; each group is sorted lexicographically.
pub fn sort_properties(props: &mut [String]) {
    props.sort_by(|a, b| {
        let key_a = (extension_prefix(a).is_some(), a.as_str());
        let key_b = (extension_prefix(b).is_some(), b.as_str());
        key_a.cmp(&key_b)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_properties() {
        let mut props: Vec<String> = ["view:off_nadir", "gsd", "eo:cloud_cover", "datetime", "id"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_properties(&mut props);
        assert_eq!(
            props,
            vec!["datetime", "gsd", "id", "eo:cloud_cover", "view:off_nadir"]
        );
    }

    #[test]
    fn test_extension_prefix() {
        assert_eq!(extension_prefix("eo:cloud_cover"), Some("eo"));
        assert_eq!(extension_prefix("datetime"), None);
    }
}
