//! Assigning colors to features.
//!
//! Features are colored either by a single fixed color, by category (one
//! color per distinct value), or along a continuous ramp between `vmin` and
//! `vmax`.

use log::{debug, warn};
use serde_json::Value;

use crate::color::ColormapResolver;
use crate::error::ExploreError;
use crate::model::FeatureCollection;

/// Color for features when no property drives styling.
pub const DEFAULT_COLOR: &str = "#26bad1";

/// Color for features lacking a value for the styled property.
pub const MISSING_COLOR: &str = "#808080";

/// Number of colors in a continuous ramp.
pub const RAMP_LENGTH: usize = 255;

/// The mapping from property values to colors that was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    /// Distinct values in first-seen order, each paired with its color.
    Categorical {
        categories: Vec<Value>,
        colors: Vec<String>,
    },
    /// A ramp spanning `vmin..=vmax`.
    Continuous {
        vmin: f64,
        vmax: f64,
        colors: Vec<String>,
    },
}

/// Returns whether values should be treated as categories.
///
/// Values are categorical when forced, or when any present value is not a
/// number.
pub fn is_categorical(values: &[Option<&Value>], force: bool) -> bool {
    force || values.iter().flatten().any(|v| !v.is_number())
}

/// Returns whether two values fall in the same category. Numbers compare by
/// value, so `4` and `4.0` are one category.
pub fn same_category(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Computes the index into a ramp of `ramp_len` colors for `value`.
///
/// Values outside `vmin..=vmax` are clamped to the nearest end. When
/// `vmin == vmax` every value maps to index 0.
pub fn ramp_index(value: f64, vmin: f64, vmax: f64, ramp_len: usize) -> usize {
    if ramp_len == 0 || vmax == vmin {
        return 0;
    }

    let last = (ramp_len - 1) as f64;
    let raw = ((value - vmin) / (vmax - vmin) * last).floor();
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, last) as usize
}

/// Gives every feature the same color.
pub fn assign_fixed(collection: &mut FeatureCollection, color: &str) {
    for feature in collection.features_mut() {
        feature.set_color(color);
    }
}

/// Colors features by the distinct values of `prop`.
///
/// Categories are ordered by first appearance. Features without a value get
/// [`MISSING_COLOR`] and no category.
pub fn assign_categorical(
    collection: &mut FeatureCollection,
    prop: &str,
    cmap: &str,
    resolver: &ColormapResolver,
) -> Result<ColorScale, ExploreError> {
    let values: Vec<Option<Value>> = collection
        .values(prop)?
        .into_iter()
        .map(|v| v.cloned())
        .collect();

    let mut categories: Vec<Value> = Vec::new();
    for value in values.iter().flatten() {
        if !categories.iter().any(|c| same_category(c, value)) {
            categories.push(value.clone());
        }
    }

    let colors = resolver.resolve(cmap, categories.len().max(1))?;
    debug!("{} categories for `{}` using {}", categories.len(), prop, cmap);

    for (feature, value) in collection.features_mut().iter_mut().zip(&values) {
        let color = value
            .as_ref()
            .and_then(|v| categories.iter().position(|c| same_category(c, v)))
            .map(|index| colors[index].as_str())
            .unwrap_or(MISSING_COLOR);
        feature.set_color(color);
    }

    Ok(ColorScale::Categorical { categories, colors })
}

/// Colors features along a continuous ramp of `prop` values.
///
/// `vmin`/`vmax` default to the data range when not given.
pub fn assign_continuous(
    collection: &mut FeatureCollection,
    prop: &str,
    cmap: &str,
    vmin: Option<f64>,
    vmax: Option<f64>,
    resolver: &ColormapResolver,
) -> Result<ColorScale, ExploreError> {
    let values: Vec<Option<f64>> = collection
        .values(prop)?
        .into_iter()
        .map(|v| {
            let number = v.and_then(Value::as_f64);
            if let (Some(v), None) = (v, number) {
                warn!("non-numeric value {} for `{}` drawn as missing", v, prop);
            }
            number
        })
        .collect();

    let present = values.iter().flatten().copied();
    let data_min = present.clone().reduce(f64::min);
    let data_max = present.reduce(f64::max);

    let vmin = vmin.or(data_min).unwrap_or(0.0);
    let vmax = vmax.or(data_max).unwrap_or(0.0);
    if vmax < vmin {
        warn!("vmax {} is below vmin {} for `{}`", vmax, vmin, prop);
    }

    let colors = resolver.resolve(cmap, RAMP_LENGTH)?;
    debug!("continuous ramp for `{}` over [{}, {}] using {}", prop, vmin, vmax, cmap);

    for (feature, value) in collection.features_mut().iter_mut().zip(&values) {
        let color = match value {
            Some(v) => colors[ramp_index(*v, vmin, vmax, colors.len())].as_str(),
            None => MISSING_COLOR,
        };
        feature.set_color(color);
    }

    Ok(ColorScale::Continuous { vmin, vmax, colors })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::model::Record;

    fn collection(values: &[Value]) -> FeatureCollection {
        FeatureCollection::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Record {
                    id: Some(format!("item-{i}")),
                    properties: [("p".to_string(), v.clone())].into_iter().collect(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn colors(fc: &FeatureCollection) -> Vec<&str> {
        fc.iter().map(|f| f.color().unwrap()).collect()
    }

    #[test]
    fn test_ramp_index_endpoints() {
        assert_eq!(ramp_index(4.0, 4.0, 20.0, 255), 0);
        assert_eq!(ramp_index(20.0, 4.0, 20.0, 255), 254);
        assert_eq!(ramp_index(12.0, 4.0, 20.0, 255), 127);
    }

    #[test]
    fn test_ramp_index_equal_bounds() {
        for value in [-5.0, 0.0, 7.0, 1e9] {
            assert_eq!(ramp_index(value, 3.0, 3.0, 255), 0);
        }
    }

    #[test]
    fn test_ramp_index_clamps() {
        assert_eq!(ramp_index(-100.0, 4.0, 20.0, 255), 0);
        assert_eq!(ramp_index(100.0, 4.0, 20.0, 255), 254);
        assert_eq!(ramp_index(f64::NAN, 4.0, 20.0, 255), 0);
    }

    #[test]
    fn test_is_categorical() {
        let a = json!("a");
        let one = json!(1);
        assert!(is_categorical(&[Some(&a), None], false));
        assert!(!is_categorical(&[Some(&one), None], false));
        assert!(is_categorical(&[Some(&one)], true));
    }

    #[test]
    fn test_assign_categorical_first_seen() {
        let mut fc = collection(&[json!("a"), json!("a"), json!("b")]);
        let scale = assign_categorical(&mut fc, "p", "Set1", &ColormapResolver::new()).unwrap();

        let ColorScale::Categorical { categories, colors: palette } = scale else {
            panic!("expected categorical scale");
        };
        assert_eq!(categories, vec![json!("a"), json!("b")]);
        assert_eq!(palette.len(), 2);
        assert_eq!(colors(&fc), vec![palette[0].as_str(), palette[0].as_str(), palette[1].as_str()]);
    }

    #[test]
    fn test_assign_categorical_equal_numbers() {
        let mut fc = collection(&[json!(4), json!(4.0), json!(5)]);
        let scale = assign_categorical(&mut fc, "p", "Set1", &ColormapResolver::new()).unwrap();

        let ColorScale::Categorical { categories, .. } = scale else {
            panic!("expected categorical scale");
        };
        assert_eq!(categories, vec![json!(4), json!(5)]);
        assert_eq!(colors(&fc), vec!["#e41a1c", "#e41a1c", "#377eb8"]);
    }

    #[test]
    fn test_same_category() {
        assert!(same_category(&json!(4), &json!(4.0)));
        assert!(!same_category(&json!(4), &json!("4")));
        assert!(same_category(&json!("a"), &json!("a")));
    }

    #[test]
    fn test_assign_categorical_missing_values() {
        let mut fc = collection(&[json!("a"), Value::Null]);
        assign_categorical(&mut fc, "p", "Set1", &ColormapResolver::new()).unwrap();
        assert_eq!(colors(&fc), vec!["#e41a1c", MISSING_COLOR]);
    }

    #[test]
    fn test_assign_continuous_data_range() {
        let mut fc = collection(&[json!(4), json!(12), json!(20)]);
        let resolver = ColormapResolver::new();
        let scale = assign_continuous(&mut fc, "p", "RdBu_r", None, None, &resolver).unwrap();

        let ColorScale::Continuous { vmin, vmax, colors: ramp } = scale else {
            panic!("expected continuous scale");
        };
        assert_eq!((vmin, vmax), (4.0, 20.0));
        assert_eq!(ramp.len(), RAMP_LENGTH);
        assert_eq!(colors(&fc), vec![ramp[0].as_str(), ramp[127].as_str(), ramp[254].as_str()]);
    }

    #[test]
    fn test_assign_continuous_overrides_clamp() {
        let mut fc = collection(&[json!(0), json!(50)]);
        let resolver = ColormapResolver::new();
        let scale = assign_continuous(&mut fc, "p", "Blues", Some(10.0), Some(20.0), &resolver).unwrap();

        let ColorScale::Continuous { colors: ramp, .. } = scale else {
            panic!("expected continuous scale");
        };
        assert_eq!(colors(&fc), vec![ramp[0].as_str(), ramp[254].as_str()]);
    }

    #[test]
    fn test_assign_unknown_property() {
        let mut fc = collection(&[json!(1)]);
        let result = assign_continuous(&mut fc, "q", "Blues", None, None, &ColormapResolver::new());
        assert!(matches!(result, Err(ExploreError::UnknownProperty { .. })));
    }

    #[test]
    fn test_assign_unknown_cmap() {
        let mut fc = collection(&[json!("a")]);
        let result = assign_categorical(&mut fc, "p", "nope", &ColormapResolver::new());
        assert!(matches!(result, Err(ExploreError::Colormap(_))));
    }

    #[test]
    fn test_assign_fixed() {
        let mut fc = collection(&[json!(1), json!(2)]);
        assign_fixed(&mut fc, DEFAULT_COLOR);
        assert_eq!(colors(&fc), vec![DEFAULT_COLOR, DEFAULT_COLOR]);
    }

    proptest! {
        #[test]
        fn prop_ramp_index_in_bounds(
            value in -1e6f64..1e6,
            vmin in -1e3f64..1e3,
            span in -1e3f64..1e3,
            len in 1usize..512,
        ) {
            let index = ramp_index(value, vmin, vmin + span, len);
            prop_assert!(index < len);
        }
    }
}
