//! # logroute CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Route file loading and validation
//! - Message dispatch from arguments or stdin
//! - Graceful shutdown handling

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::debug;

use cli::{Cli, Commands};
use commands::{run_demo, run_info, run_router, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    debug!(version = env!("CARGO_PKG_VERSION"), "logroute starting");

    let result = match &cli.command {
        Commands::Run(args) => run_router(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
        Commands::Demo(args) => run_demo(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: (&cli.log_format).into(),
        default_log_level: default_log_level.to_string(),
        respect_rust_log: !cli.quiet,
        ..ObservabilityConfig::default()
    })
}
