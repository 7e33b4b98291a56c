//! Error types for normalization, colormap resolution and map composition.

use thiserror::Error;

/// Error categories surfaced to callers.
///
/// Every error in this crate maps onto exactly one category, so callers can
/// branch on the kind of failure without matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The input container was not a recognized STAC shape.
    UnsupportedInputKind,
    /// Normalization produced zero records.
    EmptyInput,
    /// Both a bbox and an intersecting geometry were supplied.
    ConflictingFilter,
    /// The requested property is absent from every item.
    UnknownProperty,
    /// Thumbnails were requested but no item has one.
    NoThumbnails,
    /// The colormap name could not be resolved by any backend.
    UnrecognizedColormap,
    /// Some other argument was malformed.
    InvalidArgument,
    /// A catalog file could not be read.
    Io,
}

impl ErrorCode {
    /// Returns a stable, machine-readable name for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedInputKind => "unsupported_input_kind",
            ErrorCode::EmptyInput => "empty_input",
            ErrorCode::ConflictingFilter => "conflicting_filter",
            ErrorCode::UnknownProperty => "unknown_property",
            ErrorCode::NoThumbnails => "no_thumbnails",
            ErrorCode::UnrecognizedColormap => "unrecognized_colormap",
            ErrorCode::InvalidArgument => "invalid_argument",
            ErrorCode::Io => "io",
        }
    }
}

/// Error while turning an input container into records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("unsupported input kind `{kind}`")]
    UnsupportedInputKind { kind: String },

    #[error("no STAC items were found")]
    EmptyInput,

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid STAC JSON in {context}: {message}")]
    Json { context: String, message: String },
}

impl NormalizeError {
    /// Returns the error category.
    pub fn code(&self) -> ErrorCode {
        match self {
            NormalizeError::UnsupportedInputKind { .. } | NormalizeError::Json { .. } => {
                ErrorCode::UnsupportedInputKind
            }
            NormalizeError::EmptyInput => ErrorCode::EmptyInput,
            NormalizeError::Io { .. } => ErrorCode::Io,
        }
    }
}

/// Error while resolving a colormap by name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColormapError {
    #[error(
        "unrecognized cmap `{name}`; enabling the `extended-colormaps` feature of stac-map may resolve this error"
    )]
    Unrecognized { name: String },
}

impl ColormapError {
    /// Returns the error category.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::UnrecognizedColormap
    }
}

/// Error while composing a map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExploreError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Colormap(#[from] ColormapError),

    #[error("cannot specify both `bbox` and `intersects`")]
    ConflictingFilter,

    #[error("bbox must have 4 or 6 values, found {len}")]
    InvalidBbox { len: usize },

    #[error("no item has the property `{property}`; choose from {available:?}")]
    UnknownProperty {
        property: String,
        available: Vec<String>,
    },

    #[error("the selected items do not have thumbnail links")]
    NoThumbnails,

    #[error("custom tiles `{tiles}` must have an attribution")]
    MissingTileAttribution { tiles: String },
}

impl ExploreError {
    /// Returns the error category.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExploreError::Normalize(e) => e.code(),
            ExploreError::Colormap(e) => e.code(),
            ExploreError::ConflictingFilter => ErrorCode::ConflictingFilter,
            ExploreError::InvalidBbox { .. } | ExploreError::MissingTileAttribution { .. } => {
                ErrorCode::InvalidArgument
            }
            ExploreError::UnknownProperty { .. } => ErrorCode::UnknownProperty,
            ExploreError::NoThumbnails => ErrorCode::NoThumbnails,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_errors_keep_their_code() {
        let err: ExploreError = NormalizeError::EmptyInput.into();
        assert_eq!(err.code(), ErrorCode::EmptyInput);
        assert_eq!(err.to_string(), "no STAC items were found");

        let err: ExploreError = ColormapError::Unrecognized {
            name: "nope".to_string(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::UnrecognizedColormap);
        assert!(err.to_string().contains("extended-colormaps"));
    }

    #[test]
    fn test_unknown_property_lists_choices() {
        let err = ExploreError::UnknownProperty {
            property: "gsd".to_string(),
            available: vec!["datetime".to_string(), "eo:cloud_cover".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("`gsd`"));
        assert!(message.contains("eo:cloud_cover"));
        assert_eq!(err.code().as_str(), "unknown_property");
    }
}
