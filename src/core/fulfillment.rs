//! Priority cascade over the order table
//!
//! Cells are visited portion size first (largest first), then vegetarian
//! before gourmet, then recipes per box (largest first). Vegetarian cells may
//! only draw on vegetarian recipes. Gourmet cells draw on gourmet recipes and,
//! when those run short, on the combined pool. The first cell that cannot be
//! served ends the run.
//!
//! A gourmet-only attempt is committed only when it serves the whole cell.
//! Otherwise it is rolled back and the unmet orders are allocated from the
//! combined pool as it stood before the cell; that result becomes the new
//! baseline. When a run fails, the pool keeps every depletion made up to and
//! including the partially served failing cell.

use serde::{Deserialize, Serialize};

use super::allocation::{allocate, Shortfall};
use crate::model::orders::{OrderCell, OrderTable};
use crate::model::stock::{PoolScope, StockPool};
use crate::model::Category;
use crate::observer::{AllocationEvent, AllocationObserver, NoOpObserver};

/// The cell that stopped a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFailure {
    pub cell: OrderCell,
    /// Orders of the cell still unserved after every permitted pool was tried
    pub unmet: u32,
    /// Whether the combined pool was tried before giving up
    pub widened: bool,
    pub shortfall: Option<Shortfall>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    Fulfilled,
    Unfulfilled(CellFailure),
}

impl FulfillmentOutcome {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, FulfillmentOutcome::Fulfilled)
    }

    pub fn failure(&self) -> Option<&CellFailure> {
        match self {
            FulfillmentOutcome::Fulfilled => None,
            FulfillmentOutcome::Unfulfilled(failure) => Some(failure),
        }
    }
}

/// Decide whether `stock` can satisfy every order in `orders`
pub fn fulfil_all(stock: &mut StockPool, orders: &OrderTable) -> bool {
    fulfil_orders(stock, orders, &NoOpObserver).is_fulfilled()
}

/// Run the full cascade, reporting progress to `observer`
pub fn fulfil_orders(
    stock: &mut StockPool,
    orders: &OrderTable,
    observer: &dyn AllocationObserver,
) -> FulfillmentOutcome {
    observer.on_event(&AllocationEvent::RunStarted {
        recipes: stock.len(),
        cells: orders.cells().count(),
    });

    for cell in orders.cells() {
        observer.on_event(&AllocationEvent::CellStarted { cell });

        let result = match cell.category {
            Category::Vegetarian => fulfil_vegetarian(stock, cell),
            Category::Gourmet => fulfil_gourmet(stock, cell, observer),
        };

        match result {
            Ok(scope) => observer.on_event(&AllocationEvent::fulfilled(cell, scope)),
            Err(failure) => {
                observer.on_event(&AllocationEvent::CellFailed {
                    cell,
                    unmet: failure.unmet,
                    shortfall: failure.shortfall,
                });
                observer.on_event(&AllocationEvent::RunCompleted { satisfied: false });
                return FulfillmentOutcome::Unfulfilled(failure);
            }
        }
    }

    observer.on_event(&AllocationEvent::RunCompleted { satisfied: true });
    FulfillmentOutcome::Fulfilled
}

/// Vegetarian demand has no fallback pool
fn fulfil_vegetarian(stock: &mut StockPool, cell: OrderCell) -> Result<PoolScope, CellFailure> {
    let scope = PoolScope::Category(Category::Vegetarian);
    let allocation = allocate(
        cell.order_count,
        &mut stock.view_mut(scope),
        cell.portion_size,
        cell.recipes_per_box,
    );
    if allocation.is_complete() {
        Ok(scope)
    } else {
        Err(CellFailure {
            cell,
            unmet: allocation.unmet,
            widened: false,
            shortfall: allocation.shortfall,
        })
    }
}

/// Gourmet demand widens to the combined pool for whatever gourmet stock leaves unmet
fn fulfil_gourmet(
    stock: &mut StockPool,
    cell: OrderCell,
    observer: &dyn AllocationObserver,
) -> Result<PoolScope, CellFailure> {
    let gourmet = PoolScope::Category(Category::Gourmet);
    let mut view = stock.view_mut(gourmet);
    let baseline = view.counts();
    let primary = allocate(
        cell.order_count,
        &mut view,
        cell.portion_size,
        cell.recipes_per_box,
    );
    if primary.is_complete() {
        return Ok(gourmet);
    }
    view.restore(&baseline);

    observer.on_event(&AllocationEvent::FallbackWidened {
        cell,
        unmet: primary.unmet,
    });

    let widened = allocate(
        primary.unmet,
        &mut stock.view_mut(PoolScope::Combined),
        cell.portion_size,
        cell.recipes_per_box,
    );
    if widened.is_complete() {
        Ok(PoolScope::Combined)
    } else {
        Err(CellFailure {
            cell,
            unmet: widened.unmet,
            widened: true,
            shortfall: widened.shortfall,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::orders::OrderAxes;
    use crate::observer::RecordingObserver;

    fn table(portions: &[u32], recipes: &[u32]) -> OrderTable {
        OrderTable::new(OrderAxes::new(portions.iter().copied(), recipes.iter().copied()).unwrap())
    }

    #[test]
    fn test_baseline_success() {
        let mut stock = StockPool::new()
            .with_recipe("r1", 10, Category::Vegetarian)
            .with_recipe("r2", 10, Category::Vegetarian)
            .with_recipe("r3", 10, Category::Gourmet);
        let orders = table(&[2], &[2])
            .with_orders(Category::Vegetarian, 2, 2, 3)
            .unwrap();

        assert!(fulfil_all(&mut stock, &orders));
        assert_eq!(stock.counts(), vec![4, 4, 10]);
    }

    #[test]
    fn test_vegetarian_failure() {
        let mut stock = StockPool::new()
            .with_recipe("r1", 1, Category::Vegetarian)
            .with_recipe("r2", 1, Category::Vegetarian);
        let orders = table(&[2], &[2])
            .with_orders(Category::Vegetarian, 2, 2, 1)
            .unwrap();

        let outcome = fulfil_orders(&mut stock, &orders, &NoOpObserver);
        let failure = outcome.failure().copied().unwrap();
        assert_eq!(failure.unmet, 1);
        assert!(!failure.widened);
        assert_eq!(failure.cell.category, Category::Vegetarian);
    }

    #[test]
    fn test_vegetarian_never_borrows_gourmet_stock() {
        let mut stock = StockPool::new()
            .with_recipe("v1", 2, Category::Vegetarian)
            .with_recipe("g1", 100, Category::Gourmet)
            .with_recipe("g2", 100, Category::Gourmet);
        let orders = table(&[2], &[2])
            .with_orders(Category::Vegetarian, 2, 2, 1)
            .unwrap();

        assert!(!fulfil_all(&mut stock, &orders));
        assert_eq!(stock.counts(), vec![2, 100, 100]);
    }

    #[test]
    fn test_gourmet_fallback_widens_to_combined_pool() {
        let mut stock = StockPool::new()
            .with_recipe("v1", 10, Category::Vegetarian)
            .with_recipe("v2", 10, Category::Vegetarian)
            .with_recipe("g1", 2, Category::Gourmet)
            .with_recipe("g2", 2, Category::Gourmet);
        let orders = table(&[2], &[2])
            .with_orders(Category::Gourmet, 2, 2, 3)
            .unwrap();

        let observer = RecordingObserver::new();
        let outcome = fulfil_orders(&mut stock, &orders, &observer);
        assert!(outcome.is_fulfilled());
        // g1+g2 served one box before running dry; that attempt is rolled
        // back and the two unmet boxes come from v1+v2
        assert_eq!(stock.counts(), vec![6, 6, 2, 2]);

        let widened = observer
            .events()
            .into_iter()
            .any(|e| matches!(e.event, AllocationEvent::FallbackWidened { unmet: 2, .. }));
        assert!(widened);
    }

    #[test]
    fn test_widened_pool_is_baseline_for_later_cells() {
        // The 3-portion gourmet cell falls back onto v1 and v2; the 2-portion
        // vegetarian cell evaluated afterwards must see that depletion.
        let mut stock = StockPool::new()
            .with_recipe("v1", 3, Category::Vegetarian)
            .with_recipe("v2", 3, Category::Vegetarian)
            .with_recipe("g1", 3, Category::Gourmet);
        let orders = table(&[3, 2], &[2])
            .with_orders(Category::Gourmet, 3, 2, 1)
            .unwrap()
            .with_orders(Category::Vegetarian, 2, 2, 1)
            .unwrap();

        let outcome = fulfil_orders(&mut stock, &orders, &NoOpObserver);
        assert_eq!(stock.counts(), vec![0, 0, 3]);
        let failure = outcome.failure().copied().unwrap();
        assert_eq!(failure.cell.category, Category::Vegetarian);
        assert_eq!(failure.cell.portion_size, 2);
        assert_eq!(
            failure.shortfall,
            Some(Shortfall::StockBelowPortion {
                recipe_index: 1,
                stock_count: 0,
                portion_size: 2
            })
        );
    }

    #[test]
    fn test_gourmet_failure_after_widening() {
        let mut stock = StockPool::new()
            .with_recipe("v1", 1, Category::Vegetarian)
            .with_recipe("g1", 2, Category::Gourmet);
        let orders = table(&[2], &[2])
            .with_orders(Category::Gourmet, 2, 2, 1)
            .unwrap();

        let outcome = fulfil_orders(&mut stock, &orders, &NoOpObserver);
        let failure = outcome.failure().copied().unwrap();
        assert!(failure.widened);
        assert_eq!(failure.unmet, 1);
    }

    #[test]
    fn test_failure_short_circuits_later_cells() {
        let mut stock = StockPool::new()
            .with_recipe("v1", 1, Category::Vegetarian)
            .with_recipe("v2", 1, Category::Vegetarian)
            .with_recipe("g1", 50, Category::Gourmet)
            .with_recipe("g2", 50, Category::Gourmet);
        let orders = table(&[4, 2], &[2])
            .with_orders(Category::Vegetarian, 4, 2, 1)
            .unwrap()
            .with_orders(Category::Gourmet, 4, 2, 1)
            .unwrap();

        let observer = RecordingObserver::new();
        assert!(!fulfil_orders(&mut stock, &orders, &observer).is_fulfilled());

        let started: Vec<OrderCell> = observer
            .events()
            .into_iter()
            .filter_map(|e| match e.event {
                AllocationEvent::CellStarted { cell } => Some(cell),
                _ => None,
            })
            .collect();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].category, Category::Vegetarian);
        // Gourmet stock was never touched
        assert_eq!(stock.counts(), vec![1, 1, 50, 50]);
    }

    #[test]
    fn test_larger_portions_are_served_first() {
        // Only enough for one box; the 4-portion order must win it
        let mut stock = StockPool::new()
            .with_recipe("v1", 4, Category::Vegetarian)
            .with_recipe("v2", 4, Category::Vegetarian);
        let orders = table(&[2, 4], &[2])
            .with_orders(Category::Vegetarian, 4, 2, 1)
            .unwrap()
            .with_orders(Category::Vegetarian, 2, 2, 1)
            .unwrap();

        let observer = RecordingObserver::new();
        let outcome = fulfil_orders(&mut stock, &orders, &observer);
        assert_eq!(stock.counts(), vec![0, 0]);

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.cell.portion_size, 2);
        assert_eq!(failure.cell.category, Category::Vegetarian);
        assert_eq!(failure.unmet, 1);

        let fulfilled: Vec<(u32, Category)> = observer
            .events()
            .into_iter()
            .filter_map(|e| match e.event {
                AllocationEvent::CellFulfilled { cell, .. } => {
                    Some((cell.portion_size, cell.category))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            fulfilled,
            vec![(4, Category::Vegetarian), (4, Category::Gourmet)]
        );
    }

    #[test]
    fn test_empty_table_is_satisfied() {
        let mut stock = StockPool::new();
        let orders = table(&[], &[]);
        let observer = RecordingObserver::new();
        assert!(fulfil_orders(&mut stock, &orders, &observer).is_fulfilled());
        assert_eq!(observer.events().len(), 2);
    }

    #[test]
    fn test_repeated_runs_are_deterministic() {
        let build = || {
            StockPool::new()
                .with_recipe("v1", 9, Category::Vegetarian)
                .with_recipe("v2", 9, Category::Vegetarian)
                .with_recipe("v3", 9, Category::Vegetarian)
                .with_recipe("g1", 5, Category::Gourmet)
                .with_recipe("g2", 5, Category::Gourmet)
        };
        let orders = table(&[2, 3], &[2, 3])
            .with_orders(Category::Vegetarian, 3, 2, 1)
            .unwrap()
            .with_orders(Category::Gourmet, 3, 3, 1)
            .unwrap()
            .with_orders(Category::Gourmet, 2, 2, 2)
            .unwrap();

        let mut first = build();
        let mut second = build();
        let a = fulfil_orders(&mut first, &orders, &NoOpObserver);
        let b = fulfil_orders(&mut second, &orders, &NoOpObserver);
        assert_eq!(a, b);
        assert_eq!(first, second);
    }
}
