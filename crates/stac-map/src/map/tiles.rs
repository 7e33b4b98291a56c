//! Basemap tile providers.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use serde_json::{Value, json};

use crate::error::ExploreError;

struct Provider {
    name: &'static str,
    url: &'static str,
    attribution: &'static str,
    max_zoom: u8,
}

const PROVIDERS: &[Provider] = &[
    Provider {
        name: "OpenStreetMap",
        url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
        max_zoom: 19,
    },
    Provider {
        name: "CartoDB positron",
        url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
        max_zoom: 20,
    },
    Provider {
        name: "CartoDB dark_matter",
        url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
        max_zoom: 20,
    },
    Provider {
        name: "Esri.WorldImagery",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community",
        max_zoom: 18,
    },
];

/// Lookup key for a provider name: lowercase with spaces removed, so
/// `CartoDB positron` and `cartodbpositron` are the same provider.
fn provider_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

lazy_static! {
    static ref REGISTRY: FxHashMap<String, &'static Provider> = PROVIDERS
        .iter()
        .map(|provider| (provider_key(provider.name), provider))
        .collect();
}

/// Names of the built-in providers.
pub fn provider_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.name).collect()
}

/// A basemap tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    /// Name shown in the layer control.
    pub name: String,
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl TileLayer {
    /// Resolves a provider name or a custom URL template.
    ///
    /// Built-in providers bring their own attribution, which `attr`
    /// replaces when given. Anything else is treated as a URL template and
    /// must come with an attribution.
    pub fn resolve(tiles: &str, attr: Option<&str>) -> Result<Self, ExploreError> {
        if let Some(provider) = REGISTRY.get(&provider_key(tiles)) {
            return Ok(Self {
                name: provider.name.to_string(),
                url: provider.url.to_string(),
                attribution: attr.unwrap_or(provider.attribution).to_string(),
                max_zoom: provider.max_zoom,
            });
        }

        match attr {
            Some(attribution) => Ok(Self {
                name: tiles.to_string(),
                url: tiles.to_string(),
                attribution: attribution.to_string(),
                max_zoom: 18,
            }),
            None => Err(ExploreError::MissingTileAttribution {
                tiles: tiles.to_string(),
            }),
        }
    }

    /// Options passed to `L.tileLayer`.
    pub(crate) fn options(&self) -> Value {
        json!({
            "attribution": self.attribution,
            "maxZoom": self.max_zoom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_resolve_builtin_aliases() {
        let a = TileLayer::resolve("CartoDB positron", None).unwrap();
        let b = TileLayer::resolve("cartodbpositron", None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name, "CartoDB positron");

        let osm = TileLayer::resolve("OpenStreetMap", None).unwrap();
        assert!(osm.url.contains("openstreetmap.org"));
        assert!(osm.attribution.contains("OpenStreetMap"));
    }

    #[test]
    fn test_attr_overrides_builtin() {
        let layer = TileLayer::resolve("Esri.WorldImagery", Some("mine")).unwrap();
        assert_eq!(layer.attribution, "mine");
    }

    #[test]
    fn test_custom_tiles_need_attribution() {
        let url = "https://example.com/{z}/{x}/{y}.png";
        let err = TileLayer::resolve(url, None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        let layer = TileLayer::resolve(url, Some("Example")).unwrap();
        assert_eq!(layer.url, url);
        assert_eq!(layer.attribution, "Example");
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(provider_names().len(), 4);
    }
}
