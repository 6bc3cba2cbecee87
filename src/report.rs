//! Run reports
//!
//! A [`FulfillmentReport`] captures the verdict of one run together with the
//! stock left afterwards and the event trace, for human or JSON output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::core::fulfillment::{CellFailure, FulfillmentOutcome};
use crate::error::Result;
use crate::model::stock::StockPool;
use crate::model::Category;
use crate::observer::TimestampedEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualStock {
    pub recipe_id: String,
    pub category: Category,
    pub stock_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentReport {
    pub satisfied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CellFailure>,
    /// Stock after the run; partially depleted when the run failed
    pub residual_stock: Vec<ResidualStock>,
    pub events: Vec<TimestampedEvent>,
    pub generated_at: DateTime<Utc>,
}

impl FulfillmentReport {
    pub fn new(
        outcome: &FulfillmentOutcome,
        stock: &StockPool,
        events: Vec<TimestampedEvent>,
    ) -> Self {
        Self {
            satisfied: outcome.is_fulfilled(),
            failure: outcome.failure().copied(),
            residual_stock: stock
                .entries()
                .iter()
                .map(|entry| ResidualStock {
                    recipe_id: entry.recipe_id.clone(),
                    category: entry.category,
                    stock_count: entry.stock_count,
                })
                .collect(),
            events,
            generated_at: Utc::now(),
        }
    }

    /// Render for a terminal
    pub fn render_human(&self, show_stock: bool) -> String {
        let mut out = String::new();
        if self.satisfied {
            let _ = writeln!(out, "✅ All orders can be fulfilled");
        } else {
            let _ = writeln!(out, "❌ Orders cannot be fulfilled");
        }

        if let Some(failure) = &self.failure {
            let _ = writeln!(
                out,
                "   Failed at {}: {} of {} order(s) unmet{}",
                failure.cell,
                failure.unmet,
                failure.cell.order_count,
                if failure.widened {
                    " after including vegetarian recipes"
                } else {
                    ""
                }
            );
        }

        if show_stock {
            let _ = writeln!(out, "\nRemaining stock:");
            let width = self
                .residual_stock
                .iter()
                .map(|entry| entry.recipe_id.len())
                .max()
                .unwrap_or(0);
            for entry in &self.residual_stock {
                let _ = writeln!(
                    out,
                    "  {:<width$}  {:>6}  {}",
                    entry.recipe_id,
                    entry.stock_count,
                    entry.category,
                    width = width
                );
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
