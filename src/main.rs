use clap::Parser;
use recipe_allocator::cli::{execute_command, get_log_level, Cli};
use recipe_allocator::config::{load_config, AllocatorConfig};
use recipe_allocator::error::AllocatorError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{debug, error, trace};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = init_tracing(cli.verbose, &config) {
        exit_with(&e);
    }

    debug!("recipe-allocator started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    match execute_command(cli.command, &config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            if let Some(allocator_error) = e.downcast_ref::<AllocatorError>() {
                exit_with(allocator_error);
            }
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn exit_with(e: &AllocatorError) -> ! {
    eprintln!("Error: {}", e.user_message());
    eprintln!("  {}", e.code_summary());
    std::process::exit(e.exit_code())
}

/// Install the global subscriber; `-v` flags override the configured level
fn init_tracing(verbose: u8, config: &AllocatorConfig) -> Result<(), AllocatorError> {
    let log_level = get_log_level(verbose).unwrap_or(config.log_level.as_str());

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AllocatorError::from(e).with_path(path))?;
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_target(verbose >= 2)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_target(verbose >= 2) // Show target module for -vv and above
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
