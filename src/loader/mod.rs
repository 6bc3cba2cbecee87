//! JSON input loading
//!
//! Turns the stock and order files into a [`StockPool`] and an
//! [`OrderTable`]. All input validation lives here: once these functions
//! return, the allocation core can assume aligned axes and known labels.

mod orders;
mod stock;

pub use orders::parse_orders;
pub use stock::parse_stock;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::debug;

use crate::error::{AllocatorError, Result};
use crate::labels::LabelVocabulary;
use crate::model::orders::OrderTable;
use crate::model::stock::StockPool;

/// Read and parse a stock file
pub fn load_stock(path: &Path) -> Result<StockPool> {
    let content = read_input(path)?;
    let pool = parse_stock(&content).map_err(|e| e.with_context(path.display()))?;
    debug!("Loaded {} ({} recipes)", path.display(), pool.len());
    Ok(pool)
}

/// Read and parse an orders file
pub fn load_orders(path: &Path, vocabulary: &LabelVocabulary) -> Result<OrderTable> {
    let content = read_input(path)?;
    let table = parse_orders(&content, vocabulary).map_err(|e| e.with_context(path.display()))?;
    debug!(
        "Loaded {} (portion sizes {:?}, recipes per box {:?})",
        path.display(),
        table.axes().portion_sizes(),
        table.axes().recipes_per_box()
    );
    Ok(table)
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| AllocatorError::from(e).with_path(path))
}

/// A JSON object decoded with its keys kept in file order
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OrderedMap<V>(pub Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    if entries.iter().any(|(existing, _): &(String, V)| *existing == key) {
                        return Err(serde::de::Error::custom(format!("duplicate key '{key}'")));
                    }
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}
