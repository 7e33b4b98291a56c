//! Two-tier colormap resolution.

use log::debug;

use crate::color::{Scheme, SchemeKind, brewer, format_hex, linear_gradient};
use crate::error::ColormapError;

/// A source of named colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// ColorBrewer schemes, always available.
    ColorBrewer,
    /// Perceptual maps behind the `extended-colormaps` feature.
    Extended,
}

impl Backend {
    /// Returns whether this backend was compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::ColorBrewer => true,
            Backend::Extended => cfg!(feature = "extended-colormaps"),
        }
    }

    fn lookup(&self, name: &str) -> Option<&'static Scheme> {
        match self {
            Backend::ColorBrewer => brewer::lookup(name),
            #[cfg(feature = "extended-colormaps")]
            Backend::Extended => crate::color::extended::lookup(name),
            #[cfg(not(feature = "extended-colormaps"))]
            Backend::Extended => None,
        }
    }
}

/// Resolves colormap names to lists of colors.
///
/// Backends are consulted in order; the first one that knows the name wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColormapResolver {
    backends: Vec<Backend>,
}

impl Default for ColormapResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ColormapResolver {
    /// Creates a resolver over every available backend.
    pub fn new() -> Self {
        Self::with_backends([Backend::ColorBrewer, Backend::Extended])
    }

    /// Creates a resolver over the given backends, skipping unavailable ones.
    pub fn with_backends(backends: impl IntoIterator<Item = Backend>) -> Self {
        let backends: Vec<Backend> = backends.into_iter().filter(Backend::is_available).collect();
        debug!("colormap backends: {:?}", backends);
        Self { backends }
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    /// Finds a scheme by name. Returns the scheme and whether it is reversed.
    pub fn scheme(&self, name: &str) -> Result<(&'static Scheme, bool), ColormapError> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };

        self.backends
            .iter()
            .find_map(|backend| backend.lookup(base))
            .map(|scheme| (scheme, reversed))
            .ok_or_else(|| ColormapError::Unrecognized {
                name: name.to_string(),
            })
    }

    /// Resolves `n` colors from the named colormap.
    ///
    /// Qualitative schemes hand out their colors in order, cycling when more
    /// than the scheme holds are requested. All other schemes are sampled
    /// evenly along a linear gradient.
    pub fn resolve(&self, name: &str, n: usize) -> Result<Vec<String>, ColormapError> {
        let (scheme, reversed) = self.scheme(name)?;

        let mut stops: Vec<u32> = scheme.colors.to_vec();
        if reversed {
            stops.reverse();
        }

        let colors = match scheme.kind {
            SchemeKind::Qualitative => (0..n).map(|i| format_hex(stops[i % stops.len()])).collect(),
            SchemeKind::Sequential | SchemeKind::Diverging => linear_gradient(&stops, n),
        };
        Ok(colors)
    }
}
