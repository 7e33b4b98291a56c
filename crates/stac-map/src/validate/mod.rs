//! Argument checks run before anything is drawn.
//!
//! These only look at the options themselves. Checks that need the items
//! (unknown properties, missing thumbnails) happen while the layers are
//! built.

use crate::error::ExploreError;
use crate::explore::ExploreOptions;

/// Validates options that can be checked without any items.
///
/// - `bbox` and `intersects` are mutually exclusive
/// - `bbox` has 4 or 6 values
pub fn validate_options(options: &ExploreOptions) -> Result<(), ExploreError> {
    if options.bbox.is_some() && options.intersects.is_some() {
        return Err(ExploreError::ConflictingFilter);
    }
    if let Some(bbox) = &options.bbox {
        validate_bbox(bbox)?;
    }
    Ok(())
}

/// Checks the arity of a bounding box.
pub fn validate_bbox(bbox: &[f64]) -> Result<(), ExploreError> {
    match bbox.len() {
        4 | 6 => Ok(()),
        len => Err(ExploreError::InvalidBbox { len }),
    }
}

/// Returns `(west, south, east, north)` of a 4- or 6-value bbox.
pub fn bbox_edges(bbox: &[f64]) -> Result<(f64, f64, f64, f64), ExploreError> {
    match *bbox {
        [w, s, e, n] => Ok((w, s, e, n)),
        [w, s, _, e, n, _] => Ok((w, s, e, n)),
        _ => Err(ExploreError::InvalidBbox { len: bbox.len() }),
    }
}
