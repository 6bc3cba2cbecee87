//! `recipe-allocator check`

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::check::check_files;
use crate::cli::router::{EXIT_SATISFIED, EXIT_UNSATISFIED};
use crate::config::{AllocatorConfig, OutputFormat};

/// Parameters for the check command
#[derive(Debug, Clone)]
pub struct CheckParams {
    pub orders: PathBuf,
    pub stock: PathBuf,
    pub format: OutputFormat,
    pub show_stock: bool,
}

/// Run one allocation check and print its report
pub fn run_check_command(params: CheckParams, config: &AllocatorConfig) -> Result<i32> {
    let vocabulary = config.vocabulary()?;
    debug!(
        "Checking {} against {} ({} output)",
        params.orders.display(),
        params.stock.display(),
        params.format
    );

    let report = check_files(&params.orders, &params.stock, &vocabulary)?;
    match params.format {
        OutputFormat::Human => print!("{}", report.render_human(params.show_stock)),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(if report.satisfied {
        EXIT_SATISFIED
    } else {
        EXIT_UNSATISFIED
    })
}
