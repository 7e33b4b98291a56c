//! Colormaps and color assignment.
//!
//! Colormaps are resolved by name through a [`ColormapResolver`], which
//! tries the ColorBrewer tier first and then, when the
//! `extended-colormaps` feature is enabled, the extended tier. A `_r`
//! suffix reverses any map.

pub mod assign;
pub mod brewer;
#[cfg(feature = "extended-colormaps")]
pub mod extended;
pub mod resolver;

pub use assign::{
    ColorScale, DEFAULT_COLOR, MISSING_COLOR, RAMP_LENGTH, assign_categorical, assign_continuous,
    assign_fixed, is_categorical, ramp_index,
};
pub use resolver::{Backend, ColormapResolver};

/// How a scheme's colors relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    /// Unordered, distinct colors for categories.
    Qualitative,
    /// Light-to-dark ramps.
    Sequential,
    /// Two ramps meeting at a neutral midpoint.
    Diverging,
}

/// A named list of colors, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheme {
    pub name: &'static str,
    pub kind: SchemeKind,
    pub colors: &'static [u32],
}

impl Scheme {
    pub const fn new(name: &'static str, kind: SchemeKind, colors: &'static [u32]) -> Self {
        Self { name, kind, colors }
    }
}

/// Formats `0xRRGGBB` as `#rrggbb`.
pub fn format_hex(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0xff_ffff)
}

fn channels(rgb: u32) -> [f64; 3] {
    [
        ((rgb >> 16) & 0xff) as f64,
        ((rgb >> 8) & 0xff) as f64,
        (rgb & 0xff) as f64,
    ]
}

/// Samples `n` evenly spaced colors along the piecewise-linear ramp through
/// `stops`.
///
/// The first and last samples are exactly the first and last stops.
pub fn linear_gradient(stops: &[u32], n: usize) -> Vec<String> {
    match (stops.len(), n) {
        (0, _) | (_, 0) => return Vec::new(),
        (1, _) | (_, 1) => return vec![format_hex(stops[0]); n],
        _ => {}
    }

    let segments = (stops.len() - 1) as f64;
    (0..n)
        .map(|i| {
            let pos = i as f64 / (n - 1) as f64 * segments;
            let lower = (pos.floor() as usize).min(stops.len() - 2);
            let t = pos - lower as f64;

            let a = channels(stops[lower]);
            let b = channels(stops[lower + 1]);
            let mix = |k: usize| (a[k] + (b[k] - a[k]) * t).round().clamp(0.0, 255.0) as u32;
            format_hex((mix(0) << 16) | (mix(1) << 8) | mix(2))
        })
        .collect()
}
