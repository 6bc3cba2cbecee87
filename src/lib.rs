//! # Recipe Allocator
//!
//! Decides whether a stock of recipes can fulfil a batch of meal-box orders.
//!
//! ## Usage
//!
//! ```bash
//! recipe-allocator check orders.json stock.json [--format json] [--show-stock]
//! ```
//!
//! Orders are allocated greedily: each box takes `portion_size` units from
//! each of the `recipes_per_box` most-stocked recipes it may draw on. Larger
//! portion sizes go first, vegetarian before gourmet. Gourmet boxes fall back
//! to vegetarian recipes once gourmet stock runs short; vegetarian boxes never
//! use gourmet recipes.
//!
//! ## Modules
//!
//! - `core` - Pure allocation engine and fulfillment cascade
//! - `model` - Stock pool, order table and box categories
//! - `labels` - Label words such as `two_portions` mapped to numbers
//! - `loader` - JSON stock and order files
//! - `observer` - Structured events emitted during a run
//! - `report` - Run reports in human and JSON form
//! - `check` - File-driven entry points
//! - `config` - Layered configuration
//! - `cli` - Command-line interface
//! - `error` - Error type and error codes

pub mod check;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod labels;
pub mod loader;
pub mod model;
pub mod observer;
pub mod report;

pub use check::{check_files, orders_satisfied};
pub use crate::core::fulfillment::{fulfil_all, fulfil_orders, FulfillmentOutcome};
pub use error::{AllocatorError, Result};
pub use labels::LabelVocabulary;
pub use model::orders::OrderTable;
pub use model::stock::StockPool;
pub use model::Category;
