//! Normalization of STAC inputs into plain records.
//!
//! Callers hand over items in whatever shape they have them: one item, a
//! list mixing typed items and raw JSON, an item collection, or a catalog
//! tree. [`normalize`] flattens all of these into `Vec<Record>`, keeping
//! input order.

use log::debug;
use serde_json::Value;

use crate::error::NormalizeError;
use crate::model::{Record, json_kind};
use crate::stac::{Catalog, Item, ItemCollection};

/// The shapes [`StacInput`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// A typed [`Item`].
    Item,
    /// An untyped JSON item.
    Record,
    /// A list of typed items and/or untyped JSON items.
    List,
    /// A typed [`ItemCollection`].
    ItemCollection,
    /// A typed [`Catalog`] tree.
    Catalog,
}

impl InputKind {
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Item => "Item",
            InputKind::Record => "record",
            InputKind::List => "list",
            InputKind::ItemCollection => "ItemCollection",
            InputKind::Catalog => "Catalog",
        }
    }
}

/// One element of a list input.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemLike {
    Item(Item),
    Record(Value),
}

impl From<Item> for ItemLike {
    fn from(item: Item) -> Self {
        ItemLike::Item(item)
    }
}

impl From<Value> for ItemLike {
    fn from(value: Value) -> Self {
        ItemLike::Record(value)
    }
}

/// Any container of STAC items accepted by [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum StacInput {
    Item(Item),
    Record(Value),
    List(Vec<ItemLike>),
    ItemCollection(ItemCollection),
    Catalog(Catalog),
}

impl StacInput {
    /// Returns the kind tag of this input.
    pub fn kind(&self) -> InputKind {
        match self {
            StacInput::Item(_) => InputKind::Item,
            StacInput::Record(_) => InputKind::Record,
            StacInput::List(_) => InputKind::List,
            StacInput::ItemCollection(_) => InputKind::ItemCollection,
            StacInput::Catalog(_) => InputKind::Catalog,
        }
    }

    /// Classifies an untyped JSON document.
    ///
    /// - `Feature` objects (or objects without a `type`) become records
    /// - `FeatureCollection` objects become item collections
    /// - arrays become lists, each element treated as a record
    ///
    /// Catalog and collection documents only hold links; load those with
    /// [`Catalog::from_file`] instead.
    pub fn from_json(value: Value) -> Result<Self, NormalizeError> {
        let doc_type = value.get("type").and_then(Value::as_str).map(str::to_string);

        match value {
            Value::Array(values) => Ok(StacInput::List(
                values.into_iter().map(ItemLike::Record).collect(),
            )),
            Value::Object(_) => match doc_type.as_deref() {
                None | Some("Feature") => Ok(StacInput::Record(value)),
                Some("FeatureCollection") => serde_json::from_value(value)
                    .map(StacInput::ItemCollection)
                    .map_err(|e| NormalizeError::Json {
                        context: "item collection".to_string(),
                        message: e.to_string(),
                    }),
                Some(other) => Err(NormalizeError::UnsupportedInputKind {
                    kind: other.to_string(),
                }),
            },
            other => Err(NormalizeError::UnsupportedInputKind {
                kind: json_kind(&other).to_string(),
            }),
        }
    }
}

impl From<Item> for StacInput {
    fn from(item: Item) -> Self {
        StacInput::Item(item)
    }
}

impl From<ItemCollection> for StacInput {
    fn from(collection: ItemCollection) -> Self {
        StacInput::ItemCollection(collection)
    }
}

impl From<Catalog> for StacInput {
    fn from(catalog: Catalog) -> Self {
        StacInput::Catalog(catalog)
    }
}

impl From<Vec<Item>> for StacInput {
    fn from(items: Vec<Item>) -> Self {
        StacInput::List(items.into_iter().map(ItemLike::Item).collect())
    }
}

impl From<Vec<ItemLike>> for StacInput {
    fn from(items: Vec<ItemLike>) -> Self {
        StacInput::List(items)
    }
}

/// Flattens an input container into records, in input order.
///
/// The input is never modified; every record is an independent copy.
/// Fails with [`NormalizeError::EmptyInput`] if no records result.
pub fn normalize(input: &StacInput) -> Result<Vec<Record>, NormalizeError> {
    let records = match input {
        StacInput::Item(item) => from_item(item),
        StacInput::Record(value) => from_record(value)?,
        StacInput::List(elements) => from_list(elements)?,
        StacInput::ItemCollection(collection) => from_item_collection(collection),
        StacInput::Catalog(catalog) => from_catalog(catalog),
    };

    debug!("normalized {} input into {} records", input.kind().name(), records.len());

    if records.is_empty() {
        return Err(NormalizeError::EmptyInput);
    }
    Ok(records)
}

fn from_item(item: &Item) -> Vec<Record> {
    vec![item.to_record()]
}

fn from_record(value: &Value) -> Result<Vec<Record>, NormalizeError> {
    Ok(vec![Record::from_json(value)?])
}

fn from_list(elements: &[ItemLike]) -> Result<Vec<Record>, NormalizeError> {
    elements
        .iter()
        .map(|element| match element {
            ItemLike::Item(item) => Ok(item.to_record()),
            ItemLike::Record(value) => Record::from_json(value),
        })
        .collect()
}

fn from_item_collection(collection: &ItemCollection) -> Vec<Record> {
    collection.iter().map(Item::to_record).collect()
}

fn from_catalog(catalog: &Catalog) -> Vec<Record> {
    catalog.get_all_items().into_iter().map(Item::to_record).collect()
}
