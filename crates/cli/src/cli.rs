//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::DeliveryPolicy;
use std::path::PathBuf;

/// logroute - filter text messages and fan them out to handlers
#[derive(Parser, Debug)]
#[command(
    name = "logroute",
    author,
    version,
    about = "Filter/handler message dispatcher",
    long_about = "Routes text messages through an ordered set of filters and delivers \n\
                  every accepted message to each configured handler (stdout, file, \n\
                  TCP socket, tracing log) in order."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LOGROUTE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all diagnostics except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic log format (written to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "LOGROUTE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Route messages through the configured filters and handlers
    Run(RunArgs),

    /// Validate a route file without running
    Validate(ValidateArgs),

    /// Display route information
    Info(InfoArgs),

    /// Run the built-in "Error" filter to stdout example
    Demo(DemoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to route file (TOML or JSON)
    #[arg(short, long, default_value = "route.toml", env = "LOGROUTE_CONFIG")]
    pub config: PathBuf,

    /// Message to dispatch (repeatable); reads stdin lines when absent
    #[arg(short, long = "message")]
    pub messages: Vec<String>,

    /// Override the delivery policy from the route file
    #[arg(long, value_enum)]
    pub delivery: Option<DeliveryArg>,

    /// Validate configuration and exit without dispatching
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "LOGROUTE_METRICS_PORT")]
    pub metrics_port: u16,

    /// Do not print the dispatch summary on exit
    #[arg(long)]
    pub no_summary: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to route file to validate
    #[arg(short, long, default_value = "route.toml", env = "LOGROUTE_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to route file
    #[arg(short, long, default_value = "route.toml", env = "LOGROUTE_CONFIG")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `demo` command
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Substring a message must contain to be printed
    #[arg(long, default_value = "Error")]
    pub pattern: String,

    /// Also route through a loopback TCP socket and show what it received
    #[arg(long)]
    pub socket: bool,
}

/// Delivery policy override
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DeliveryArg {
    /// Stop at the first failing handler
    StopOnError,
    /// Invoke every handler, report failures afterwards
    BestEffort,
}

impl From<DeliveryArg> for DeliveryPolicy {
    fn from(arg: DeliveryArg) -> Self {
        match arg {
            DeliveryArg::StopOnError => DeliveryPolicy::StopOnError,
            DeliveryArg::BestEffort => DeliveryPolicy::BestEffort,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<&LogFormat> for observability::LogFormat {
    fn from(format: &LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
