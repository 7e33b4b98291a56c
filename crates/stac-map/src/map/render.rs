//! Rendering a [`Map`] to a standalone Leaflet page.

use std::fmt::Write;

use serde_json::{Value, json};

use crate::map::element::{Element, ElementKind, FeatureGroup, FieldBinding, GeoJsonLayer, LayerControl, LayerStyle};
use crate::map::style::StyleOptions;
use crate::map::tiles::TileLayer;
use crate::map::Map;

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
    <script src="https://code.jquery.com/jquery-3.7.1.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/leaflet.fullscreen@3.0.2/Control.FullScreen.css" />
    <script src="https://unpkg.com/leaflet.fullscreen@3.0.2/Control.FullScreen.js"></script>
"#;

/// Builds the table shown in tooltips and popups.
const FIELD_TABLE_JS: &str = r#"function stacmapEscape(text) {
        return String(text).replace(/&/g, "&amp;").replace(/</g, "&lt;").replace(/>/g, "&gt;");
    }
    function stacmapFieldTable(props, fields) {
        var rows = fields.map(function (field) {
            var value = props[field];
            if (value === null || value === undefined) { value = ""; }
            else if (typeof value === "object") { value = JSON.stringify(value); }
            return "<tr><th>" + stacmapEscape(field) + "</th><td>" + stacmapEscape(value) + "</td></tr>";
        });
        return "<table>" + rows.join("") + "</table>";
    }"#;

/// Serializes a value for embedding in a `<script>` block.
fn js_value(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn js_string(text: &str) -> String {
    js_value(&Value::String(text.to_string()))
}

pub(crate) fn render_map(map: &Map) -> String {
    let mut html = String::from(HEAD);
    let _ = write!(
        html,
        "    <style>\n        html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}\n        #{} {{ position: relative; width: {}; height: {}; left: 0; top: 0; }}\n    </style>\n",
        map.name(),
        map.width(),
        map.height()
    );
    for header in map.root().header() {
        html.push_str(header);
        html.push('\n');
    }
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<div class=\"folium-map\" id=\"{}\"></div>", map.name());
    for markup in map.root().html() {
        html.push_str(markup);
        html.push('\n');
    }

    let options = StyleOptions::new()
        .with("center", json!([0.0, 0.0]))
        .with("zoom", 1)
        .merged(map.map_kwds());

    html.push_str("<script>\n");
    let _ = writeln!(html, "    {FIELD_TABLE_JS}");
    let _ = writeln!(
        html,
        "    var {} = L.map({}, {});",
        map.name(),
        js_string(map.name()),
        js_value(&options.to_json())
    );
    for child in map.children() {
        html.push_str(&render_element(map, child));
    }
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

fn render_element(map: &Map, element: &Element) -> String {
    let var = element.name();
    let parent = map.name();
    match element.kind() {
        ElementKind::TileLayer(layer) => tile_layer_js(var, parent, layer),
        ElementKind::GeoJson(layer) => geojson_js(var, parent, layer),
        ElementKind::FeatureGroup(group) => feature_group_js(var, parent, group),
        ElementKind::LayerControl(control) => layer_control_js(var, map, control),
        ElementKind::Fullscreen => {
            format!("    L.control.fullscreen({{\"position\":\"topleft\"}}).addTo({parent});\n")
        }
        ElementKind::FitBounds(bounds) => {
            format!("    {parent}.fitBounds({});\n", js_value(&json!(bounds)))
        }
    }
}

fn tile_layer_js(var: &str, parent: &str, layer: &TileLayer) -> String {
    format!(
        "    var {var} = L.tileLayer({}, {}).addTo({parent});\n",
        js_string(&layer.url),
        js_value(&layer.options())
    )
}

fn binding_js(method: &str, binding: &FieldBinding) -> String {
    format!(
        "            layer.{method}(stacmapFieldTable(feature.properties || {{}}, {}), {});\n",
        js_value(&json!(binding.fields)),
        js_value(&binding.options.to_json())
    )
}

fn geojson_js(var: &str, parent: &str, layer: &GeoJsonLayer) -> String {
    let mut js = String::new();
    let _ = writeln!(js, "    var {var}_data = {};", js_value(&layer.styled_data()));

    let mut options = String::new();
    match &layer.style {
        LayerStyle::Uniform(style) => {
            let _ = writeln!(
                options,
                "        style: function () {{ return {}; }},",
                js_value(&style.to_json())
            );
            if let Some(interactive) = style.get("interactive") {
                let _ = writeln!(options, "        interactive: {},", js_value(interactive));
            }
        }
        LayerStyle::PerFeature(_) => {
            options.push_str("        style: function (feature) { return feature.style || {}; },\n");
        }
    }

    options.push_str("        onEachFeature: function (feature, layer) {\n");
    if !layer.highlight.is_empty() {
        let _ = writeln!(
            options,
            "            layer.on({{\n                mouseover: function (e) {{ e.target.setStyle({}); }},\n                mouseout: function (e) {{ {var}.resetStyle(e.target); }}\n            }});",
            js_value(&layer.highlight.to_json())
        );
    }
    if let Some(tooltip) = &layer.tooltip {
        options.push_str(&binding_js("bindTooltip", tooltip));
    }
    if let Some(popup) = &layer.popup {
        options.push_str(&binding_js("bindPopup", popup));
    }
    options.push_str("        },\n");

    let _ = writeln!(js, "    var {var} = L.geoJson(null, {{\n{options}    }}).addTo({parent});");
    let _ = writeln!(js, "    {var}.addData({var}_data);");
    js
}

fn feature_group_js(var: &str, parent: &str, group: &FeatureGroup) -> String {
    let mut js = format!("    var {var} = L.featureGroup().addTo({parent});\n");
    for overlay in &group.overlays {
        let _ = writeln!(
            js,
            "    L.imageOverlay({}, {}).addTo({var});",
            js_string(&overlay.url),
            js_value(&json!(overlay.bounds))
        );
    }
    js
}

/// Lists layers as a JS object literal mapping display names to variables.
fn layer_object<'a>(layers: impl Iterator<Item = &'a Element>) -> String {
    let entries: Vec<String> = layers
        .filter_map(|element| {
            element
                .layer_name()
                .map(|name| format!("{}: {}", js_string(name), element.name()))
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}

fn layer_control_js(var: &str, map: &Map, control: &LayerControl) -> String {
    let base_count = map.children().iter().filter(|c| c.is_base_layer()).count();
    let base = if control.hide_single_base && base_count <= 1 {
        "{}".to_string()
    } else {
        layer_object(map.children().iter().filter(|c| c.is_base_layer()))
    };
    let overlays = layer_object(map.children().iter().filter(|c| c.is_overlay()));
    let options = json!({
        "position": control.position,
        "collapsed": control.collapsed,
    });

    format!(
        "    var {var} = L.control.layers({base}, {overlays}, {}).addTo({});\n",
        js_value(&options),
        map.name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{FieldBinding, Legend, LegendKind, MapOptions};

    #[test]
    fn test_render_contains_map_and_tiles() {
        let map = Map::new(MapOptions::default()).unwrap();
        let html = map.render();
        assert!(html.contains("leaflet@1.9.4"));
        assert!(html.contains(&format!("var {} = L.map(", map.name())));
        assert!(html.contains("L.tileLayer(\"https://tile.openstreetmap.org/{z}/{x}/{y}.png\""));
        assert!(html.contains("L.control.fullscreen"));
        assert!(html.contains("width: 100%; height: 100%"));
    }

    #[test]
    fn test_render_map_kwds_override_defaults() {
        let options = MapOptions {
            map_kwds: StyleOptions::new().with("zoom", 5),
            ..Default::default()
        };
        let html = Map::new(options).unwrap().render();
        assert!(html.contains(r#"{"center":[0.0,0.0],"zoom":5}"#));
    }

    #[test]
    fn test_render_geojson_layer() {
        let mut map = Map::new(MapOptions::default()).unwrap();
        let layer = GeoJsonLayer::new(
            "x - Bounds",
            json!({"type": "Point", "coordinates": [1, 2]}),
            StyleOptions::new().with("fill", false).with("interactive", false),
        )
        .with_highlight(StyleOptions::new().with("weight", 4.0))
        .with_tooltip(FieldBinding {
            fields: vec!["id".to_string()],
            options: StyleOptions::new().with("sticky", true),
        });
        map.add_child(layer);
        let var = map.first_child("geo_json").unwrap().name().to_string();

        let html = map.render();
        assert!(html.contains(&format!("var {var} = L.geoJson(null")));
        assert!(html.contains(r#"return {"fill":false,"interactive":false};"#));
        assert!(html.contains("interactive: false,"));
        assert!(html.contains(r#"e.target.setStyle({"weight":4.0});"#));
        assert!(html.contains(&format!("{var}.resetStyle(e.target)")));
        assert!(html.contains(r#"layer.bindTooltip(stacmapFieldTable(feature.properties || {}, ["id"]), {"sticky":true});"#));
    }

    #[test]
    fn test_render_field_table_escapes_html() {
        let html = Map::new(MapOptions::default()).unwrap().render();
        assert!(html.contains("function stacmapEscape(text)"));
        assert!(html.contains("\"<tr><th>\" + stacmapEscape(field) + \"</th><td>\" + stacmapEscape(value)"));
        assert!(html.contains(r#".replace(/</g, "&lt;")"#));
    }

    #[test]
    fn test_render_escapes_script_end() {
        let mut map = Map::new(MapOptions::default()).unwrap();
        map.add_child(GeoJsonLayer::new(
            "x",
            json!({"type": "Feature", "properties": {"title": "</script>"}, "geometry": null}),
            StyleOptions::new(),
        ));
        let html = map.render();
        assert!(html.contains("<\\/script>"));
        assert_eq!(html.matches("</script>").count(), HEAD.matches("</script>").count() + 1);
    }

    #[test]
    fn test_render_layer_control_hides_single_base() {
        let mut map = Map::new(MapOptions::default()).unwrap();
        map.add_child(GeoJsonLayer::new("a - Footprints", Value::Null, StyleOptions::new()));
        map.add_child(LayerControl::default());
        let overlay = map.first_child("geo_json").unwrap().name().to_string();

        let html = map.render();
        assert!(html.contains(&format!(
            "L.control.layers({{}}, {{\"a - Footprints\": {overlay}}}, {{\"position\":\"topleft\",\"collapsed\":true}})"
        )));
    }

    #[test]
    fn test_render_legend_markup() {
        let mut map = Map::new(MapOptions::default()).unwrap();
        let legend = Legend {
            caption: "Items: platform".to_string(),
            kind: LegendKind::Categorical(vec![("a".to_string(), "#e41a1c".to_string())]),
        };
        legend.add_to(map.root_mut());

        let html = map.render();
        let head_end = html.find("</head>").unwrap();
        assert!(html.find(".maplegend {").unwrap() < head_end);
        assert!(html.find("<div class='legend-title'>Items: platform</div>").unwrap() > head_end);
    }
}
