//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Check whether recipe stock can satisfy a batch of box orders
#[derive(Parser)]
#[command(name = "recipe-allocator")]
#[command(about = "recipe-allocator - Check whether recipe stock can fulfil box orders", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether the stock can fulfil every order
    #[command(name = "check")]
    Check {
        /// Orders file (JSON)
        orders: PathBuf,

        /// Stock file (JSON)
        stock: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Print the stock remaining after the run
        #[arg(long)]
        show_stock: bool,
    },

    /// List the words accepted in portion and recipe labels
    #[command(name = "labels")]
    Labels,
}
