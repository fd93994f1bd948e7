//! `run` command implementation.

use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{Message, RouteBlueprint};
use dispatcher::{create_dispatcher, Dispatcher, DispatcherError, Verdict};
use observability::{DispatchOutcome, DispatchStatsAggregator};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::commands::load_route;
use crate::error::CliError;

/// Execute the `run` command
pub async fn run_router(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading route");

    let route = load_route(&args.config)?;
    for warning in &route.warnings {
        warn!(warning = %warning, "Route warning");
    }
    let mut blueprint = route.blueprint;

    if let Some(delivery) = args.delivery {
        info!(delivery = ?delivery, "Overriding delivery policy from CLI");
        blueprint.delivery = delivery.into();
    }

    info!(
        filters = blueprint.filters.len(),
        handlers = blueprint.handlers.len(),
        delivery = ?blueprint.delivery,
        "Route loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - route is valid, exiting");
        print_route_summary(&blueprint);
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let dispatcher =
        create_dispatcher(&blueprint).map_err(|e| CliError::dispatcher_setup(e.to_string()))?;
    let mut stats = DispatchStatsAggregator::new();

    if args.messages.is_empty() {
        route_stdin(&dispatcher, &mut stats).await?;
    } else {
        for text in &args.messages {
            route_line(&dispatcher, text, &mut stats);
        }
    }

    if let Err(e) = dispatcher.flush() {
        warn!(error = %e, "Flush failed on shutdown");
    }

    let summary = stats.summary();
    info!(
        messages = summary.total,
        accepted = summary.accepted,
        rejected = summary.rejected,
        "Routing finished"
    );
    if !args.no_summary {
        eprintln!("\n{}", summary);
    }

    Ok(())
}

/// Dispatch stdin lines until EOF or a shutdown signal
async fn route_stdin(dispatcher: &Dispatcher, stats: &mut DispatchStatsAggregator) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = setup_shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.map_err(CliError::Input).context("Failed to read stdin")? {
                    Some(text) => route_line(dispatcher, &text, stats),
                    None => break,
                }
            }
            _ = &mut shutdown => {
                warn!("Received shutdown signal, stopping");
                break;
            }
        }
    }

    Ok(())
}

/// Dispatch one line, recording its outcome
///
/// Failures are logged and counted; routing continues with the next line.
fn route_line(dispatcher: &Dispatcher, text: &str, stats: &mut DispatchStatsAggregator) {
    let message = Message::from(text);
    let started = Instant::now();
    let result = dispatcher.route(&message);
    let latency_us = started.elapsed().as_secs_f64() * 1_000_000.0;

    match result {
        Ok(Verdict::Accepted) => stats.record(DispatchOutcome::Delivered, &[], latency_us),
        Ok(Verdict::Rejected) => stats.record(DispatchOutcome::Rejected, &[], latency_us),
        Err(e @ DispatcherError::Filter { .. }) => {
            warn!(error = %e, "Message dropped");
            stats.record(DispatchOutcome::FilterFailed, &[], latency_us);
        }
        Err(e) => {
            let failed = e.failed_handlers();
            warn!(error = %e, failed = ?failed, "Delivery incomplete");
            stats.record(DispatchOutcome::HandlerFailed, &failed, latency_us);
        }
    }
}

/// Resolve on Ctrl+C or SIGTERM
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print route summary for dry-run mode
fn print_route_summary(blueprint: &RouteBlueprint) {
    println!("\n=== Route Summary ===\n");
    println!("Delivery: {:?}", blueprint.delivery);

    println!("\nFilters ({}):", blueprint.filters.len());
    for filter in &blueprint.filters {
        println!("  - {} ({})", filter.label(), filter.kind);
    }

    println!("\nHandlers ({}):", blueprint.handlers.len());
    for handler in &blueprint.handlers {
        println!("  - {} ({})", handler.name, handler.kind);
    }

    println!();
}
