//! Three-axis order table
//!
//! Orders are addressed by (category, portion size, recipes per box). Both
//! categories share a single [`OrderAxes`] value, so the portion and
//! recipes-per-box axes cannot drift apart between categories once a table
//! exists.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Category;
use crate::error::{AllocatorError, ErrorCode, Result};

/// Portion-size and recipes-per-box axes, both sorted descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAxes {
    portion_sizes: Vec<u32>,
    recipes_per_box: Vec<u32>,
}

impl OrderAxes {
    /// Build axes from unsorted labels
    ///
    /// Zero and duplicate values are rejected; the remaining values are sorted
    /// descending, which is the evaluation order of the fulfillment cascade.
    pub fn new(
        portion_sizes: impl IntoIterator<Item = u32>,
        recipes_per_box: impl IntoIterator<Item = u32>,
    ) -> Result<Self> {
        Ok(Self {
            portion_sizes: sorted_axis("portion_size", portion_sizes)?,
            recipes_per_box: sorted_axis("recipes_per_box", recipes_per_box)?,
        })
    }

    /// The category axis is fixed and priority-ordered
    pub fn categories(&self) -> &'static [Category] {
        &Category::PRIORITY
    }

    pub fn portion_sizes(&self) -> &[u32] {
        &self.portion_sizes
    }

    pub fn recipes_per_box(&self) -> &[u32] {
        &self.recipes_per_box
    }

    pub fn is_empty(&self) -> bool {
        self.portion_sizes.is_empty() || self.recipes_per_box.is_empty()
    }

    fn portion_position(&self, portion_size: u32) -> Option<usize> {
        self.portion_sizes.iter().position(|&p| p == portion_size)
    }

    fn recipes_position(&self, recipes_per_box: u32) -> Option<usize> {
        self.recipes_per_box.iter().position(|&r| r == recipes_per_box)
    }
}

fn sorted_axis(name: &str, values: impl IntoIterator<Item = u32>) -> Result<Vec<u32>> {
    let mut axis: Vec<u32> = values.into_iter().collect();
    if axis.contains(&0) {
        return Err(AllocatorError::input_with_code(
            ErrorCode::VALIDATION_OUT_OF_RANGE,
            format!("{name} axis contains 0"),
            Some(name.to_string()),
        ));
    }
    axis.sort_unstable_by(|a, b| b.cmp(a));
    if let Some(pair) = axis.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(AllocatorError::input_with_code(
            ErrorCode::VALIDATION_DUPLICATE_VALUE,
            format!("{name} axis lists {} more than once", pair[0]),
            Some(name.to_string()),
        ));
    }
    Ok(axis)
}

/// One addressable cell of the order table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCell {
    pub category: Category,
    pub portion_size: u32,
    pub recipes_per_box: u32,
    pub order_count: u32,
}

impl fmt::Display for OrderCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} portions, {} recipes-per-box",
            self.category, self.portion_size, self.recipes_per_box
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTable {
    axes: OrderAxes,
    // Dense storage indexed [category][portion][recipes]
    counts: Vec<u32>,
}

impl OrderTable {
    /// Create a table with every cell set to zero orders
    pub fn new(axes: OrderAxes) -> Self {
        let len =
            Category::PRIORITY.len() * axes.portion_sizes.len() * axes.recipes_per_box.len();
        Self {
            axes,
            counts: vec![0; len],
        }
    }

    pub fn axes(&self) -> &OrderAxes {
        &self.axes
    }

    /// Set the order count for a cell addressed by its label values
    pub fn set(
        &mut self,
        category: Category,
        portion_size: u32,
        recipes_per_box: u32,
        order_count: u32,
    ) -> Result<()> {
        let slot = self.slot(category, portion_size, recipes_per_box)?;
        self.counts[slot] = order_count;
        Ok(())
    }

    /// Builder-style variant of [`OrderTable::set`]
    pub fn with_orders(
        mut self,
        category: Category,
        portion_size: u32,
        recipes_per_box: u32,
        order_count: u32,
    ) -> Result<Self> {
        self.set(category, portion_size, recipes_per_box, order_count)?;
        Ok(self)
    }

    pub fn get(&self, category: Category, portion_size: u32, recipes_per_box: u32) -> Option<u32> {
        self.slot(category, portion_size, recipes_per_box)
            .ok()
            .map(|slot| self.counts[slot])
    }

    /// Total orders placed for a category across all portion/recipe cells
    pub fn total_orders(&self, category: Category) -> u64 {
        self.cells()
            .filter(|cell| cell.category == category)
            .map(|cell| u64::from(cell.order_count))
            .sum()
    }

    /// Every cell in cascade order
    ///
    /// Portion size descending is the outer axis, then category in priority
    /// order, then recipes per box descending.
    pub fn cells(&self) -> impl Iterator<Item = OrderCell> + '_ {
        let portions = self.axes.portion_sizes.len();
        let recipes = self.axes.recipes_per_box.len();
        (0..portions).flat_map(move |pi| {
            Category::PRIORITY
                .into_iter()
                .enumerate()
                .flat_map(move |(ci, category)| {
                    (0..recipes).map(move |ri| OrderCell {
                        category,
                        portion_size: self.axes.portion_sizes[pi],
                        recipes_per_box: self.axes.recipes_per_box[ri],
                        order_count: self.counts[(ci * portions + pi) * recipes + ri],
                    })
                })
        })
    }

    fn slot(&self, category: Category, portion_size: u32, recipes_per_box: u32) -> Result<usize> {
        let pi = self.axes.portion_position(portion_size).ok_or_else(|| {
            AllocatorError::input_with_code(
                ErrorCode::VALIDATION_AXIS_MISMATCH,
                format!("portion size {portion_size} is not on the order axes"),
                Some("portion_size".to_string()),
            )
        })?;
        let ri = self.axes.recipes_position(recipes_per_box).ok_or_else(|| {
            AllocatorError::input_with_code(
                ErrorCode::VALIDATION_AXIS_MISMATCH,
                format!("recipes per box {recipes_per_box} is not on the order axes"),
                Some("recipes_per_box".to_string()),
            )
        })?;
        let ci = match category {
            Category::Vegetarian => 0,
            Category::Gourmet => 1,
        };
        let portions = self.axes.portion_sizes.len();
        let recipes = self.axes.recipes_per_box.len();
        Ok((ci * portions + pi) * recipes + ri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_are_sorted_descending() {
        let axes = OrderAxes::new([2, 4, 3], [3, 2]).unwrap();
        assert_eq!(axes.portion_sizes(), &[4, 3, 2]);
        assert_eq!(axes.recipes_per_box(), &[3, 2]);
        assert_eq!(axes.categories(), &Category::PRIORITY);
    }

    #[test]
    fn test_axes_reject_duplicates_and_zero() {
        let err = OrderAxes::new([2, 2], [3]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_DUPLICATE_VALUE);

        let err = OrderAxes::new([2], [0, 3]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_OUT_OF_RANGE);
    }

    #[test]
    fn test_set_and_get() {
        let axes = OrderAxes::new([2, 4], [2, 3]).unwrap();
        let table = OrderTable::new(axes)
            .with_orders(Category::Gourmet, 4, 2, 7)
            .unwrap();
        assert_eq!(table.get(Category::Gourmet, 4, 2), Some(7));
        assert_eq!(table.get(Category::Vegetarian, 4, 2), Some(0));
        assert_eq!(table.get(Category::Gourmet, 3, 2), None);
        assert_eq!(table.total_orders(Category::Gourmet), 7);
    }

    #[test]
    fn test_set_unknown_label_fails() {
        let axes = OrderAxes::new([2], [2]).unwrap();
        let mut table = OrderTable::new(axes);
        let err = table.set(Category::Vegetarian, 2, 5, 1).unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_AXIS_MISMATCH);
    }

    #[test]
    fn test_cells_follow_cascade_order() {
        let axes = OrderAxes::new([2, 3], [2, 4]).unwrap();
        let table = OrderTable::new(axes)
            .with_orders(Category::Vegetarian, 3, 4, 1)
            .unwrap();
        let order: Vec<(Category, u32, u32)> = table
            .cells()
            .map(|cell| (cell.category, cell.portion_size, cell.recipes_per_box))
            .collect();
        assert_eq!(
            order,
            vec![
                (Category::Vegetarian, 3, 4),
                (Category::Vegetarian, 3, 2),
                (Category::Gourmet, 3, 4),
                (Category::Gourmet, 3, 2),
                (Category::Vegetarian, 2, 4),
                (Category::Vegetarian, 2, 2),
                (Category::Gourmet, 2, 4),
                (Category::Gourmet, 2, 2),
            ]
        );
        assert_eq!(table.cells().next().unwrap().order_count, 1);
    }

    #[test]
    fn test_cell_display() {
        let cell = OrderCell {
            category: Category::Gourmet,
            portion_size: 4,
            recipes_per_box: 3,
            order_count: 2,
        };
        assert_eq!(cell.to_string(), "gourmet, 4 portions, 3 recipes-per-box");
    }
}
