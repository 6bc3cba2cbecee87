//! Command routing and execution

use crate::cli::args::Commands;
use crate::cli::commands::{run_check_command, run_labels_command, CheckParams};
use crate::cli::help::generate_help;
use crate::config::AllocatorConfig;
use anyhow::Result;

/// Process exit code when every order can be fulfilled
pub const EXIT_SATISFIED: i32 = 0;
/// Process exit code when the stock falls short; input was valid
pub const EXIT_UNSATISFIED: i32 = 10;

/// Execute a CLI command and return the process exit code
pub fn execute_command(command: Option<Commands>, config: &AllocatorConfig) -> Result<i32> {
    match command {
        Some(Commands::Check {
            orders,
            stock,
            format,
            show_stock,
        }) => run_check_command(
            CheckParams {
                orders,
                stock,
                format: format.unwrap_or(config.output_format),
                show_stock,
            },
            config,
        ),
        Some(Commands::Labels) => run_labels_command(config),
        None => {
            println!("{}", generate_help());
            Ok(EXIT_SATISFIED)
        }
    }
}
