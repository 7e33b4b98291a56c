//! Draws the STAC items in a JSON file and saves the map as HTML.
//!
//! ```text
//! cargo run --example explore_file -- items.json [property] [out.html]
//! ```
//!
//! The file may hold an item, an array of items, an item collection, or a
//! catalog whose `child`/`item` links point at local files.

use std::fs;

use serde_json::Value;
use stac_map::{Catalog, ExploreOptions, StacInput, explore};

fn load(path: &str) -> StacInput {
    let text = fs::read_to_string(path).expect("Failed to read file");
    let value: Value = serde_json::from_str(&text).expect("Failed to parse JSON");

    match value.get("type").and_then(Value::as_str) {
        Some("Catalog") | Some("Collection") => {
            StacInput::from(Catalog::from_file(path).expect("Failed to load catalog"))
        }
        _ => StacInput::from_json(value).expect("Unsupported STAC document"),
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "items.json".to_string());
    let prop = args.next();
    let out = args.next().unwrap_or_else(|| "map.html".to_string());

    println!("Reading: {}", path);
    let input = load(&path);
    println!("Input kind: {}", input.kind().name());

    let mut options = ExploreOptions::new().popup(true);
    if let Some(prop) = prop {
        println!("Color-coding by: {}", prop);
        options = options.prop(prop);
    }

    let map = match explore(&input, &options) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("error [{}]: {}", e.code().as_str(), e);
            std::process::exit(1);
        }
    };

    println!("\n=== Layers ===");
    for name in map.overlay_names() {
        println!("  - {}", name);
    }

    map.save(&out).expect("Failed to write map");
    println!("\nSaved: {}", out);
}
