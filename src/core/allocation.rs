//! Greedy per-category recipe allocation
//!
//! Orders are served one at a time. For every order the `recipes_per_box`
//! most-stocked recipes in the view are selected and each gives up
//! `portion_size` units. Re-selecting per order spreads consumption over the
//! best-stocked recipes. There is no lookahead or backtracking: a batch that
//! some other assignment could satisfy may still be reported short.
//!
//! Selection tie-break: when counts are equal the recipe with the lower
//! recipe index (earlier in the loaded stock) is chosen.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::model::stock::StockView;

/// Why an allocation stopped before serving every order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Shortfall {
    /// Fewer distinct recipes than a box needs; nothing was attempted
    InsufficientVariety { available: usize, required: u32 },
    /// The weakest selected recipe could not cover one more portion
    StockBelowPortion {
        recipe_index: usize,
        stock_count: u32,
        portion_size: u32,
    },
}

/// Result of one [`allocate`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Orders that were boxed and depleted from stock
    pub served: u32,
    /// Orders left over; zero means the whole demand was met
    pub unmet: u32,
    pub shortfall: Option<Shortfall>,
}

impl Allocation {
    pub fn is_complete(&self) -> bool {
        self.unmet == 0
    }
}

/// Allocate `order_count` boxes from the recipes visible through `stock`
///
/// On a shortfall the view keeps the depletion of every order served before
/// the failing one; the failing order itself changes nothing.
pub fn allocate(
    order_count: u32,
    stock: &mut StockView<'_>,
    portion_size: u32,
    recipes_per_box: u32,
) -> Allocation {
    if order_count == 0 {
        return Allocation {
            served: 0,
            unmet: 0,
            shortfall: None,
        };
    }

    let box_size = recipes_per_box as usize;
    if stock.len() < box_size {
        return Allocation {
            served: 0,
            unmet: order_count,
            shortfall: Some(Shortfall::InsufficientVariety {
                available: stock.len(),
                required: recipes_per_box,
            }),
        };
    }

    let mut selection = Vec::with_capacity(box_size);
    for orders_left in (1..=order_count).rev() {
        select_most_stocked(stock, box_size, &mut selection);

        let weakest = selection
            .iter()
            .copied()
            .min_by_key(|&index| (stock.count(index), Reverse(index)));
        if let Some(index) = weakest {
            let stock_count = stock.count(index);
            if stock_count < portion_size {
                return Allocation {
                    served: order_count - orders_left,
                    unmet: orders_left,
                    shortfall: Some(Shortfall::StockBelowPortion {
                        recipe_index: index,
                        stock_count,
                        portion_size,
                    }),
                };
            }
        }

        for &index in &selection {
            stock.take(index, portion_size);
        }
    }

    Allocation {
        served: order_count,
        unmet: 0,
        shortfall: None,
    }
}

/// Fill `selection` with the `k` member indices holding the most stock
///
/// Keeps a min-heap of the best `k` candidates seen so far, keyed by
/// `(count, Reverse(index))` so lower indices rank higher on equal counts.
/// The resulting indices are sorted ascending.
pub fn select_most_stocked(stock: &StockView<'_>, k: usize, selection: &mut Vec<usize>) {
    selection.clear();
    if k == 0 {
        return;
    }

    let mut heap: BinaryHeap<Reverse<(u32, Reverse<usize>)>> = BinaryHeap::with_capacity(k + 1);
    for &index in stock.members() {
        heap.push(Reverse((stock.count(index), Reverse(index))));
        if heap.len() > k {
            heap.pop();
        }
    }

    selection.extend(heap.into_iter().map(|Reverse((_, Reverse(index)))| index));
    selection.sort_unstable();
}
