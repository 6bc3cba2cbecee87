use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use super::OrderedMap;
use crate::error::{AllocatorError, ErrorCode, Result};
use crate::labels::LabelVocabulary;
use crate::model::orders::{OrderAxes, OrderTable};
use crate::model::Category;

/// portion size -> recipes per box -> order count
type CategoryGrid = BTreeMap<u32, BTreeMap<u32, u32>>;

/// Parse an orders document
///
/// Expected shape: `{"vegetarian": {<portion label>: {<recipes label>: count}}, "gourmet": {...}}`.
/// Both categories must list the same portion labels, and every portion row
/// must list the same recipes-per-box labels.
pub fn parse_orders(json: &str, vocabulary: &LabelVocabulary) -> Result<OrderTable> {
    let document: OrderedMap<Value> = serde_json::from_str(json)?;

    let mut grids: BTreeMap<Category, CategoryGrid> = BTreeMap::new();
    for (key, value) in document.0 {
        let category = match key.parse::<Category>() {
            Ok(category) => category,
            Err(_) => {
                warn!("Ignoring unknown order category '{}'", key);
                continue;
            }
        };
        let rows: OrderedMap<OrderedMap<u32>> = serde_json::from_value(value)
            .map_err(|e| AllocatorError::from(e).with_context(format!("orders.{category}")))?;
        grids.insert(category, normalize_grid(category, rows, vocabulary)?);
    }

    let mut per_category = Vec::with_capacity(Category::PRIORITY.len());
    for category in Category::PRIORITY {
        let grid = grids.remove(&category).ok_or_else(|| {
            AllocatorError::input_with_code(
                ErrorCode::VALIDATION_MISSING_CATEGORY,
                format!("orders have no '{category}' section"),
                Some(category.to_string()),
            )
        })?;
        per_category.push((category, grid));
    }

    let axes = shared_axes(&per_category)?;
    let mut table = OrderTable::new(axes);
    for (category, grid) in &per_category {
        for (&portion_size, row) in grid {
            for (&recipes_per_box, &count) in row {
                table.set(*category, portion_size, recipes_per_box, count)?;
            }
        }
    }
    Ok(table)
}

fn normalize_grid(
    category: Category,
    rows: OrderedMap<OrderedMap<u32>>,
    vocabulary: &LabelVocabulary,
) -> Result<CategoryGrid> {
    let mut grid = CategoryGrid::new();
    for (portion_label, row) in rows.0 {
        let portion_size = vocabulary.parse(&portion_label)?;
        let mut normalized = BTreeMap::new();
        for (recipes_label, count) in row.0 {
            let recipes_per_box = vocabulary.parse(&recipes_label)?;
            if normalized.insert(recipes_per_box, count).is_some() {
                return Err(duplicate_label(category, &recipes_label, recipes_per_box));
            }
        }
        if grid.insert(portion_size, normalized).is_some() {
            return Err(duplicate_label(category, &portion_label, portion_size));
        }
    }
    Ok(grid)
}

fn duplicate_label(category: Category, label: &str, value: u32) -> AllocatorError {
    AllocatorError::input_with_code(
        ErrorCode::VALIDATION_DUPLICATE_VALUE,
        format!("label '{label}' repeats the value {value} in the {category} orders"),
        Some(label.to_string()),
    )
}

/// Derive the single pair of axes every category and row must agree on
fn shared_axes(per_category: &[(Category, CategoryGrid)]) -> Result<OrderAxes> {
    let Some((reference_category, reference)) = per_category.first() else {
        return OrderAxes::new(Vec::<u32>::new(), Vec::<u32>::new());
    };
    let portions: BTreeSet<u32> = reference.keys().copied().collect();
    let recipes: BTreeSet<u32> = reference
        .values()
        .next()
        .map(|row| row.keys().copied().collect())
        .unwrap_or_default();

    for (category, grid) in per_category {
        let these: BTreeSet<u32> = grid.keys().copied().collect();
        if these != portions {
            return Err(axis_mismatch(format!(
                "{category} portion sizes {these:?} differ from {reference_category} portion sizes {portions:?}"
            )));
        }
        for (portion_size, row) in grid {
            let row_recipes: BTreeSet<u32> = row.keys().copied().collect();
            if row_recipes != recipes {
                return Err(axis_mismatch(format!(
                    "{category} orders for {portion_size} portions list recipes per box {row_recipes:?}, expected {recipes:?}"
                )));
            }
        }
    }

    OrderAxes::new(portions, recipes)
}

fn axis_mismatch(message: String) -> AllocatorError {
    AllocatorError::input_with_code(ErrorCode::VALIDATION_AXIS_MISMATCH, message, None)
}
