//! Hierarchical STAC catalogs.
//!
//! A [`Catalog`] holds its own items plus any number of child catalogs. The
//! tree lives entirely in memory; [`Catalog::from_file`] can build one from a
//! self-contained catalog on the local filesystem.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use crate::error::NormalizeError;
use crate::stac::{Item, Link};

/// A STAC catalog (or collection) and its descendants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub id: String,
    pub description: String,
    pub title: Option<String>,
    /// Items linked directly from this catalog.
    pub items: Vec<Item>,
    /// Sub-catalogs, in link order.
    pub children: Vec<Catalog>,
}

/// The on-disk shape of a catalog document; only what traversal needs.
#[derive(Deserialize)]
struct CatalogDocument {
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    links: Vec<Link>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Adds an item directly under this catalog.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Adds a child catalog.
    pub fn add_child(&mut self, child: Catalog) {
        self.children.push(child);
    }

    /// Returns every item in the tree, depth-first.
    ///
    /// A catalog's own items come before those of its children, and children
    /// are visited in the order they were added.
    pub fn get_all_items(&self) -> Vec<&Item> {
        let mut out = Vec::new();
        self.collect_items(&mut out);
        out
    }

    fn collect_items<'a>(&'a self, out: &mut Vec<&'a Item>) {
        out.extend(self.items.iter());
        for child in &self.children {
            child.collect_items(out);
        }
    }

    /// Loads a catalog tree from a local `catalog.json` (or `collection.json`).
    ///
    /// Relative `child` and `item` links are followed. Absolute URLs are
    /// skipped since no network access is performed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NormalizeError> {
        let mut visited = HashSet::new();
        load_catalog(path.as_ref(), &mut visited)
    }
}

fn load_catalog(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Catalog, NormalizeError> {
    let text = read_to_string(path)?;
    let doc: CatalogDocument = serde_json::from_str(&text).map_err(|e| NormalizeError::Json {
        context: path.display().to_string(),
        message: e.to_string(),
    })?;
    visited.insert(canonical(path));

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let mut catalog = Catalog {
        id: doc.id,
        description: doc.description,
        title: doc.title,
        ..Default::default()
    };

    for link in &doc.links {
        if link.rel != "item" && link.rel != "child" {
            continue;
        }
        if is_remote(&link.href) {
            warn!("skipping remote {} link {}", link.rel, link.href);
            continue;
        }

        let target = base.join(&link.href);
        let key = canonical(&target);
        if visited.contains(&key) {
            debug!("already visited {}", target.display());
            continue;
        }

        if link.rel == "item" {
            visited.insert(key);
            let text = read_to_string(&target)?;
            let item = Item::from_json(&text).map_err(|e| match e {
                NormalizeError::Json { message, .. } => NormalizeError::Json {
                    context: target.display().to_string(),
                    message,
                },
                other => other,
            })?;
            catalog.items.push(item);
        } else {
            catalog.children.push(load_catalog(&target, visited)?);
        }
    }

    debug!(
        "loaded catalog {} ({} items, {} children)",
        catalog.id,
        catalog.items.len(),
        catalog.children.len()
    );
    Ok(catalog)
}

fn read_to_string(path: &Path) -> Result<String, NormalizeError> {
    fs::read_to_string(path).map_err(|e| NormalizeError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn is_remote(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stac-map-{}", uuid::Uuid::new_v4().simple()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn item_json(id: &str) -> String {
        format!(
            r#"{{"type": "Feature", "id": "{id}", "geometry": null, "properties": {{}}, "links": [], "assets": {{}}}}"#
        )
    }

    #[test]
    fn test_get_all_items_depth_first() {
        let mut leaf = Catalog::new("leaf", "");
        leaf.add_item(Item::new("c"));

        let mut middle = Catalog::new("middle", "");
        middle.add_item(Item::new("b"));
        middle.add_child(leaf);

        let mut root = Catalog::new("root", "");
        root.add_child(middle);
        root.add_item(Item::new("a"));
        root.add_child(Catalog::new("empty", ""));

        let ids: Vec<&str> = root.get_all_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_file_follows_relative_links() {
        let dir = scratch_dir();
        fs::create_dir_all(dir.join("sub")).unwrap();

        fs::write(
            dir.join("catalog.json"),
            r#"{"type": "Catalog", "id": "root", "description": "test", "links": [
                {"rel": "self", "href": "./catalog.json"},
                {"rel": "item", "href": "./one.json"},
                {"rel": "child", "href": "./sub/catalog.json"},
                {"rel": "child", "href": "https://example.com/remote.json"}
            ]}"#,
        )
        .unwrap();
        fs::write(dir.join("one.json"), item_json("one")).unwrap();
        fs::write(
            dir.join("sub/catalog.json"),
            r#"{"type": "Catalog", "id": "sub", "description": "child", "links": [
                {"rel": "parent", "href": "../catalog.json"},
                {"rel": "item", "href": "./two.json"}
            ]}"#,
        )
        .unwrap();
        fs::write(dir.join("sub/two.json"), item_json("two")).unwrap();

        let catalog = Catalog::from_file(dir.join("catalog.json")).unwrap();
        assert_eq!(catalog.id, "root");
        assert_eq!(catalog.children.len(), 1);

        let ids: Vec<&str> = catalog.get_all_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["one", "two"]);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_from_file_missing() {
        let dir = scratch_dir();
        let result = Catalog::from_file(dir.join("nope.json"));
        assert!(matches!(result, Err(NormalizeError::Io { .. })));
        fs::remove_dir_all(dir).ok();
    }
}
