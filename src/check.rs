//! File-driven entry points
//!
//! The imperative shell around [`crate::core`]: read both input files, run
//! the cascade once with a fresh observer, and hand back the verdict.

use std::path::Path;
use tracing::info;

use crate::core::fulfillment::fulfil_orders;
use crate::error::Result;
use crate::labels::LabelVocabulary;
use crate::loader::{load_orders, load_stock};
use crate::observer::{RecordingObserver, Tee, TracingObserver};
use crate::report::FulfillmentReport;

/// Whether the stock file can satisfy every order in the orders file
pub fn orders_satisfied(orders_path: &Path, stock_path: &Path) -> Result<bool> {
    Ok(check_files(orders_path, stock_path, &LabelVocabulary::default())?.satisfied)
}

/// Run a full check and keep the event trace and residual stock
pub fn check_files(
    orders_path: &Path,
    stock_path: &Path,
    vocabulary: &LabelVocabulary,
) -> Result<FulfillmentReport> {
    let mut stock = load_stock(stock_path)?;
    let orders = load_orders(orders_path, vocabulary)?;

    let recorder = RecordingObserver::new();
    let outcome = fulfil_orders(&mut stock, &orders, &Tee::new(&TracingObserver, &recorder));
    info!(
        "Checked {} against {}: {}",
        orders_path.display(),
        stock_path.display(),
        if outcome.is_fulfilled() {
            "satisfied"
        } else {
            "unsatisfied"
        }
    );

    Ok(FulfillmentReport::new(&outcome, &stock, recorder.into_events()))
}
