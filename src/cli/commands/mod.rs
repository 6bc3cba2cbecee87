//! Command implementation modules

pub mod check;
pub mod labels;

// Re-export command execution functions
pub use check::{run_check_command, CheckParams};
pub use labels::run_labels_command;
