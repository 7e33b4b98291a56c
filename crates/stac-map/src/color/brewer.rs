//! ColorBrewer schemes.
//!
//! Each scheme is stored at its largest class count.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::color::{Scheme, SchemeKind};

use SchemeKind::{Diverging, Qualitative, Sequential};

const SCHEMES: &[Scheme] = &[
    // Qualitative
    Scheme::new("Set1", Qualitative, &[
        0xe41a1c, 0x377eb8, 0x4daf4a, 0x984ea3, 0xff7f00, 0xffff33, 0xa65628, 0xf781bf, 0x999999,
    ]),
    Scheme::new("Set2", Qualitative, &[
        0x66c2a5, 0xfc8d62, 0x8da0cb, 0xe78ac3, 0xa6d854, 0xffd92f, 0xe5c494, 0xb3b3b3,
    ]),
    Scheme::new("Set3", Qualitative, &[
        0x8dd3c7, 0xffffb3, 0xbebada, 0xfb8072, 0x80b1d3, 0xfdb462, 0xb3de69, 0xfccde5, 0xd9d9d9,
        0xbc80bd, 0xccebc5, 0xffed6f,
    ]),
    Scheme::new("Pastel1", Qualitative, &[
        0xfbb4ae, 0xb3cde3, 0xccebc5, 0xdecbe4, 0xfed9a6, 0xffffcc, 0xe5d8bd, 0xfddaec, 0xf2f2f2,
    ]),
    Scheme::new("Pastel2", Qualitative, &[
        0xb3e2cd, 0xfdcdac, 0xcbd5e8, 0xf4cae4, 0xe6f5c9, 0xfff2ae, 0xf1e2cc, 0xcccccc,
    ]),
    Scheme::new("Dark2", Qualitative, &[
        0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02, 0xa6761d, 0x666666,
    ]),
    Scheme::new("Accent", Qualitative, &[
        0x7fc97f, 0xbeaed4, 0xfdc086, 0xffff99, 0x386cb0, 0xf0027f, 0xbf5b17, 0x666666,
    ]),
    Scheme::new("Paired", Qualitative, &[
        0xa6cee3, 0x1f78b4, 0xb2df8a, 0x33a02c, 0xfb9a99, 0xe31a1c, 0xfdbf6f, 0xff7f00, 0xcab2d6,
        0x6a3d9a, 0xffff99, 0xb15928,
    ]),
    // Diverging
    Scheme::new("RdBu", Diverging, &[
        0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7, 0xd1e5f0, 0x92c5de, 0x4393c3,
        0x2166ac, 0x053061,
    ]),
    Scheme::new("RdYlGn", Diverging, &[
        0xa50026, 0xd73027, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xd9ef8b, 0xa6d96a, 0x66bd63,
        0x1a9850, 0x006837,
    ]),
    Scheme::new("RdYlBu", Diverging, &[
        0xa50026, 0xd73027, 0xf46d43, 0xfdae61, 0xfee090, 0xffffbf, 0xe0f3f8, 0xabd9e9, 0x74add1,
        0x4575b4, 0x313695,
    ]),
    Scheme::new("Spectral", Diverging, &[
        0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xe6f598, 0xabdda4, 0x66c2a5,
        0x3288bd, 0x5e4fa2,
    ]),
    Scheme::new("PiYG", Diverging, &[
        0x8e0152, 0xc51b7d, 0xde77ae, 0xf1b6da, 0xfde0ef, 0xf7f7f7, 0xe6f5d0, 0xb8e186, 0x7fbc41,
        0x4d9221, 0x276419,
    ]),
    Scheme::new("PRGn", Diverging, &[
        0x40004b, 0x762a83, 0x9970ab, 0xc2a5cf, 0xe7d4e8, 0xf7f7f7, 0xd9f0d3, 0xa6dba0, 0x5aae61,
        0x1b7837, 0x00441b,
    ]),
    Scheme::new("BrBG", Diverging, &[
        0x543005, 0x8c510a, 0xbf812d, 0xdfc27d, 0xf6e8c3, 0xf5f5f5, 0xc7eae5, 0x80cdc1, 0x35978f,
        0x01665e, 0x003c30,
    ]),
    Scheme::new("PuOr", Diverging, &[
        0x7f3b08, 0xb35806, 0xe08214, 0xfdb863, 0xfee0b6, 0xf7f7f7, 0xd8daeb, 0xb2abd2, 0x8073ac,
        0x542788, 0x2d004b,
    ]),
    Scheme::new("RdGy", Diverging, &[
        0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xffffff, 0xe0e0e0, 0xbababa, 0x878787,
        0x4d4d4d, 0x1a1a1a,
    ]),
    // Sequential
    Scheme::new("Blues", Sequential, &[
        0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
    ]),
    Scheme::new("Greens", Sequential, &[
        0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
    ]),
    Scheme::new("Reds", Sequential, &[
        0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
    ]),
    Scheme::new("Oranges", Sequential, &[
        0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
    ]),
    Scheme::new("Purples", Sequential, &[
        0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
    ]),
    Scheme::new("Greys", Sequential, &[
        0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525, 0x000000,
    ]),
    Scheme::new("YlOrRd", Sequential, &[
        0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c, 0xfc4e2a, 0xe31a1c, 0xbd0026, 0x800026,
    ]),
    Scheme::new("YlOrBr", Sequential, &[
        0xffffe5, 0xfff7bc, 0xfee391, 0xfec44f, 0xfe9929, 0xec7014, 0xcc4c02, 0x993404, 0x662506,
    ]),
    Scheme::new("YlGnBu", Sequential, &[
        0xffffd9, 0xedf8b1, 0xc7e9b4, 0x7fcdbb, 0x41b6c4, 0x1d91c0, 0x225ea8, 0x253494, 0x081d58,
    ]),
    Scheme::new("YlGn", Sequential, &[
        0xffffe5, 0xf7fcb9, 0xd9f0a3, 0xaddd8e, 0x78c679, 0x41ab5d, 0x238443, 0x006837, 0x004529,
    ]),
    Scheme::new("OrRd", Sequential, &[
        0xfff7ec, 0xfee8c8, 0xfdd49e, 0xfdbb84, 0xfc8d59, 0xef6548, 0xd7301f, 0xb30000, 0x7f0000,
    ]),
    Scheme::new("BuGn", Sequential, &[
        0xf7fcfd, 0xe5f5f9, 0xccece6, 0x99d8c9, 0x66c2a4, 0x41ae76, 0x238b45, 0x006d2c, 0x00441b,
    ]),
    Scheme::new("BuPu", Sequential, &[
        0xf7fcfd, 0xe0ecf4, 0xbfd3e6, 0x9ebcda, 0x8c96c6, 0x8c6bb1, 0x88419d, 0x810f7c, 0x4d004b,
    ]),
    Scheme::new("GnBu", Sequential, &[
        0xf7fcf0, 0xe0f3db, 0xccebc5, 0xa8ddb5, 0x7bccc4, 0x4eb3d3, 0x2b8cbe, 0x0868ac, 0x084081,
    ]),
    Scheme::new("PuBu", Sequential, &[
        0xfff7fb, 0xece7f2, 0xd0d1e6, 0xa6bddb, 0x74a9cf, 0x3690c0, 0x0570b0, 0x045a8d, 0x023858,
    ]),
    Scheme::new("PuBuGn", Sequential, &[
        0xfff7fb, 0xece2f0, 0xd0d1e6, 0xa6bddb, 0x67a9cf, 0x3690c0, 0x02818a, 0x016c59, 0x014636,
    ]),
    Scheme::new("PuRd", Sequential, &[
        0xf7f4f9, 0xe7e1ef, 0xd4b9da, 0xc994c7, 0xdf65b0, 0xe7298a, 0xce1256, 0x980043, 0x67001f,
    ]),
    Scheme::new("RdPu", Sequential, &[
        0xfff7f3, 0xfde0dd, 0xfcc5c0, 0xfa9fb5, 0xf768a1, 0xdd3497, 0xae017e, 0x7a0177, 0x49006a,
    ]),
];

lazy_static! {
    static ref REGISTRY: FxHashMap<String, &'static Scheme> = SCHEMES
        .iter()
        .map(|scheme| (scheme.name.to_ascii_lowercase(), scheme))
        .collect();
}

/// Looks up a ColorBrewer scheme by name (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static Scheme> {
    REGISTRY.get(&name.to_ascii_lowercase()).copied()
}

/// Names of every ColorBrewer scheme.
pub fn names() -> impl Iterator<Item = &'static str> {
    SCHEMES.iter().map(|scheme| scheme.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("set1").map(|s| s.name), Some("Set1"));
        assert_eq!(lookup("RDBU").map(|s| s.name), Some("RdBu"));
        assert!(lookup("seismic").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let count = names().count();
        assert_eq!(REGISTRY.len(), count);
    }
}
