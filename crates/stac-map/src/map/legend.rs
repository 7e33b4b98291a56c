//! Draggable legend panels injected into the map's HTML root.

use serde_json::Value;

use crate::color::ColorScale;
use crate::map::HtmlRoot;

/// Styles and the draggable behavior shared by every legend panel.
pub const LEGEND_HEADER: &str = r#"<script src="https://code.jquery.com/ui/1.12.1/jquery-ui.js"></script>
<script>$( function() {
    $( ".maplegend" ).draggable({
        start: function (event, ui) {
            $(this).css({
                right: "auto",
                top: "auto",
                bottom: "auto"
            });
        }
    });
});
</script>
<style type='text/css'>
  .maplegend {
    position: absolute;
    z-index: 9999;
    background-color: rgba(255, 255, 255, .8);
    border-radius: 5px;
    box-shadow: 0 0 15px rgba(0,0,0,0.2);
    padding: 10px;
    font: 12px/14px Arial, Helvetica, sans-serif;
    right: 10px;
    top: 20px;
  }
  .maplegend .legend-title {
    text-align: left;
    margin-bottom: 5px;
    font-weight: bold;
  }
  .maplegend .legend-scale ul {
    margin: 0;
    padding: 0;
    float: left;
    list-style: none;
  }
  .maplegend .legend-scale ul li {
    list-style: none;
    margin-left: 0;
    line-height: 16px;
    margin-bottom: 2px;
  }
  .maplegend ul.legend-labels li span {
    display: block;
    float: left;
    height: 14px;
    width: 14px;
    margin-right: 5px;
    margin-left: 0;
  }
  .maplegend .legend-gradient {
    height: 12px;
    width: 240px;
  }
  .maplegend .legend-range {
    width: 240px;
    display: flex;
    justify-content: space-between;
  }
</style>"#;

/// The body of a legend.
#[derive(Debug, Clone, PartialEq)]
pub enum LegendKind {
    /// One swatch row per `(label, color)` entry, in order.
    Categorical(Vec<(String, String)>),
    /// A gradient bar labelled with its end values.
    Continuous {
        vmin: f64,
        vmax: f64,
        colors: Vec<String>,
    },
}

/// A captioned legend.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub caption: String,
    pub kind: LegendKind,
}

impl Legend {
    /// Builds the legend describing a color scale.
    ///
    /// Categorical rows follow the scale's category order.
    pub fn from_scale(caption: impl Into<String>, scale: &ColorScale) -> Self {
        let kind = match scale {
            ColorScale::Categorical { categories, colors } => LegendKind::Categorical(
                categories
                    .iter()
                    .map(category_label)
                    .zip(colors.iter().cloned())
                    .collect(),
            ),
            ColorScale::Continuous { vmin, vmax, colors } => LegendKind::Continuous {
                vmin: *vmin,
                vmax: *vmax,
                colors: colors.clone(),
            },
        };
        Self {
            caption: caption.into(),
            kind,
        }
    }

    /// Number of swatch rows; zero for continuous legends.
    pub fn rows(&self) -> usize {
        match &self.kind {
            LegendKind::Categorical(entries) => entries.len(),
            LegendKind::Continuous { .. } => 0,
        }
    }

    /// Renders the legend panel.
    pub fn to_html(&self) -> String {
        let caption = escape_html(&self.caption);
        let mut html = format!(
            "<div id='maplegend {caption}' class='maplegend'>\n    <div class='legend-title'>{caption}</div>\n    <div class='legend-scale'>\n"
        );

        match &self.kind {
            LegendKind::Categorical(entries) => {
                html.push_str("        <ul class='legend-labels'>\n");
                for (label, color) in entries {
                    html.push_str(&format!(
                        "            <li><span style='background:{}'></span>{}</li>\n",
                        color,
                        escape_html(label)
                    ));
                }
                html.push_str("        </ul>\n");
            }
            LegendKind::Continuous { vmin, vmax, colors } => {
                html.push_str(&format!(
                    "        <div class='legend-gradient' style='background: linear-gradient(to right, {});'></div>\n",
                    colors.join(", ")
                ));
                html.push_str(&format!(
                    "        <div class='legend-range'><span>{vmin}</span><span>{vmax}</span></div>\n"
                ));
            }
        }

        html.push_str("    </div>\n</div>");
        html
    }

    /// Injects the shared styles into the root's header and the panel into
    /// its body.
    pub fn add_to(&self, root: &mut HtmlRoot) {
        root.add_header(LEGEND_HEADER);
        root.add_html(self.to_html());
    }
}

/// Strings are shown without quotes; other values as JSON.
fn category_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
