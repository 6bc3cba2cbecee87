//! Core allocation logic with pure functions
//!
//! Following the "functional core, imperative shell" pattern, nothing here
//! touches the file system or global state. Functions take a stock pool and
//! an order table, mutate only the pool they are handed, and report through
//! an explicit observer.

pub mod allocation;
pub mod fulfillment;

pub use allocation::{allocate, Allocation, Shortfall};
pub use fulfillment::{fulfil_all, fulfil_orders, CellFailure, FulfillmentOutcome};
