use serde::Deserialize;

use super::OrderedMap;
use crate::error::{AllocatorError, Result};
use crate::model::stock::StockPool;
use crate::model::Category;

#[derive(Debug, Deserialize)]
struct StockRecord {
    stock_count: u32,
    box_type: String,
}

/// Parse a stock document: recipe identifier -> `{stock_count, box_type}`
///
/// Recipes are indexed in the order they appear in the document.
pub fn parse_stock(json: &str) -> Result<StockPool> {
    let records: OrderedMap<StockRecord> = serde_json::from_str(json)?;

    let mut pool = StockPool::new();
    for (recipe_id, record) in records.0 {
        let category: Category = record
            .box_type
            .parse()
            .map_err(|e: AllocatorError| e.with_context(&recipe_id))?;
        pool.push(recipe_id, record.stock_count, category);
    }
    Ok(pool)
}
