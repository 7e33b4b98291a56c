//! Perceptual and matplotlib-style colormaps.
//!
//! Each map is stored as evenly spaced stops and interpolated linearly.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::color::{Scheme, SchemeKind};

use SchemeKind::{Diverging, Sequential};

const SCHEMES: &[Scheme] = &[
    Scheme::new("viridis", Sequential, &[
        0x440154, 0x482878, 0x3e4a89, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
        0xfde725,
    ]),
    Scheme::new("plasma", Sequential, &[
        0x0d0887, 0x41049d, 0x6a00a8, 0x8f0da4, 0xb12a90, 0xcc4778, 0xe16462, 0xf2844b, 0xfca636,
        0xfcce25, 0xf0f921,
    ]),
    Scheme::new("inferno", Sequential, &[
        0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
        0xfcffa4,
    ]),
    Scheme::new("magma", Sequential, &[
        0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d,
        0xfcfdbf,
    ]),
    Scheme::new("cividis", Sequential, &[
        0x00224e, 0x123570, 0x3b496c, 0x575d6d, 0x707173, 0x8a8779, 0xa69d75, 0xc4b56c, 0xe4cf5b,
        0xfee838,
    ]),
    Scheme::new("turbo", Sequential, &[
        0x30123b, 0x4662d7, 0x36aaf9, 0x1ae4b6, 0x72fe5e, 0xc8ef34, 0xfaba39, 0xf66b19, 0xca2a04,
        0x7a0403,
    ]),
    Scheme::new("seismic", Diverging, &[0x00004d, 0x0000ff, 0xffffff, 0xff0000, 0x800000]),
    Scheme::new("coolwarm", Diverging, &[
        0x3b4cc0, 0x6788ee, 0x9abbff, 0xc9d7f0, 0xedd1c2, 0xf7a889, 0xe26952, 0xb40426,
    ]),
];

lazy_static! {
    static ref REGISTRY: FxHashMap<String, &'static Scheme> = SCHEMES
        .iter()
        .map(|scheme| (scheme.name.to_ascii_lowercase(), scheme))
        .collect();
}

/// Looks up an extended colormap by name (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static Scheme> {
    REGISTRY.get(&name.to_ascii_lowercase()).copied()
}

/// Names of every extended colormap.
pub fn names() -> impl Iterator<Item = &'static str> {
    SCHEMES.iter().map(|scheme| scheme.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Viridis").map(|s| s.name), Some("viridis"));
        assert!(lookup("Set1").is_none());
    }
}
