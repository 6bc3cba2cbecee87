//! Structured events emitted during a fulfillment run
//!
//! An observer is handed to [`crate::core::fulfillment::fulfil_orders`] and
//! lives for that single call. It replaces process-wide logging state: the
//! run itself never logs, observers decide what to do with each event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::core::allocation::Shortfall;
use crate::model::orders::OrderCell;
use crate::model::stock::PoolScope;

/// Events that can occur during a fulfillment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AllocationEvent {
    /// The cascade is about to walk the order table
    RunStarted { recipes: usize, cells: usize },
    /// A cell is about to be allocated
    CellStarted { cell: OrderCell },
    /// A primary pool could not serve the whole cell and the search widens
    FallbackWidened { cell: OrderCell, unmet: u32 },
    /// A cell was fully served from `pool`
    CellFulfilled { cell: OrderCell, pool: String },
    /// A cell could not be served; the run stops here
    CellFailed {
        cell: OrderCell,
        unmet: u32,
        shortfall: Option<Shortfall>,
    },
    /// The run reached a verdict
    RunCompleted { satisfied: bool },
}

impl AllocationEvent {
    pub(crate) fn fulfilled(cell: OrderCell, scope: PoolScope) -> Self {
        AllocationEvent::CellFulfilled {
            cell,
            pool: scope.to_string(),
        }
    }

    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            AllocationEvent::RunStarted { recipes, cells } => {
                format!("Allocating recipes: {recipes} recipes in stock, {cells} order cells")
            }
            AllocationEvent::CellStarted { cell } => {
                format!("{cell}: {} order(s)", cell.order_count)
            }
            AllocationEvent::FallbackWidened { cell, unmet } => {
                format!("{cell}: {unmet} order(s) left, including vegetarian recipes")
            }
            AllocationEvent::CellFulfilled { cell, pool } => {
                format!("{cell}: fulfilled from {pool} stock")
            }
            AllocationEvent::CellFailed {
                cell,
                unmet,
                shortfall,
            } => {
                let reason = match shortfall {
                    Some(Shortfall::InsufficientVariety {
                        available,
                        required,
                    }) => format!(
                        " ({required} recipes-per-box but only {available} recipes in stock)"
                    ),
                    Some(Shortfall::StockBelowPortion {
                        recipe_index,
                        stock_count,
                        portion_size,
                    }) => format!(
                        " (recipe #{recipe_index} has {stock_count} left, needs {portion_size})"
                    ),
                    None => String::new(),
                };
                format!("{cell}: unable to fulfil, {unmet} order(s) left{reason}")
            }
            AllocationEvent::RunCompleted { satisfied: true } => {
                "All orders processed".to_string()
            }
            AllocationEvent::RunCompleted { satisfied: false } => {
                "Orders cannot be satisfied".to_string()
            }
        }
    }
}

/// Event with timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AllocationEvent,
}

impl TimestampedEvent {
    /// Create a new timestamped event
    pub fn new(event: AllocationEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Observer for allocation events
pub trait AllocationObserver: Send + Sync {
    /// Called when an event occurs
    fn on_event(&self, event: &AllocationEvent);
}

/// No-op observer implementation
pub struct NoOpObserver;

impl AllocationObserver for NoOpObserver {
    fn on_event(&self, _event: &AllocationEvent) {
        // Do nothing
    }
}

/// Forwards every event to `tracing`
pub struct TracingObserver;

impl AllocationObserver for TracingObserver {
    fn on_event(&self, event: &AllocationEvent) {
        match event {
            AllocationEvent::CellStarted { cell } if cell.order_count == 0 => {
                debug!("{}", event.description())
            }
            AllocationEvent::FallbackWidened { .. } => warn!("{}", event.description()),
            _ => info!("{}", event.description()),
        }
    }
}

/// Keeps every event for later inspection or reporting
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TimestampedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<TimestampedEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn into_events(self) -> Vec<TimestampedEvent> {
        self.events
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AllocationObserver for RecordingObserver {
    fn on_event(&self, event: &AllocationEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(TimestampedEvent::new(event.clone()));
    }
}

/// Sends each event to two observers in turn
pub struct Tee<'a> {
    first: &'a dyn AllocationObserver,
    second: &'a dyn AllocationObserver,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a dyn AllocationObserver, second: &'a dyn AllocationObserver) -> Self {
        Self { first, second }
    }
}

impl AllocationObserver for Tee<'_> {
    fn on_event(&self, event: &AllocationEvent) {
        self.first.on_event(event);
        self.second.on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn cell(order_count: u32) -> OrderCell {
        OrderCell {
            category: Category::Gourmet,
            portion_size: 2,
            recipes_per_box: 3,
            order_count,
        }
    }

    #[test]
    fn test_event_descriptions() {
        let event = AllocationEvent::FallbackWidened {
            cell: cell(4),
            unmet: 2,
        };
        assert_eq!(
            event.description(),
            "gourmet, 2 portions, 3 recipes-per-box: 2 order(s) left, including vegetarian recipes"
        );

        let event = AllocationEvent::CellFailed {
            cell: cell(4),
            unmet: 4,
            shortfall: Some(Shortfall::InsufficientVariety {
                available: 2,
                required: 3,
            }),
        };
        assert!(event
            .description()
            .ends_with("(3 recipes-per-box but only 2 recipes in stock)"));

        let event = AllocationEvent::RunCompleted { satisfied: true };
        assert_eq!(event.description(), "All orders processed");
    }

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_event(&AllocationEvent::CellStarted { cell: cell(1) });
        observer.on_event(&AllocationEvent::RunCompleted { satisfied: false });

        let events = observer.into_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].event, AllocationEvent::CellStarted { .. }));
        assert!(matches!(
            events[1].event,
            AllocationEvent::RunCompleted { satisfied: false }
        ));
        assert!(events[0].timestamp <= events[1].timestamp);
    }

    #[test]
    fn test_tee_forwards_to_both() {
        let left = RecordingObserver::new();
        let right = RecordingObserver::new();
        Tee::new(&left, &right).on_event(&AllocationEvent::RunCompleted { satisfied: true });
        assert_eq!(left.events().len(), 1);
        assert_eq!(right.events().len(), 1);
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let json = serde_json::to_value(AllocationEvent::RunCompleted { satisfied: true }).unwrap();
        assert_eq!(json["event"], "run_completed");
        assert_eq!(json["satisfied"], true);
    }
}
