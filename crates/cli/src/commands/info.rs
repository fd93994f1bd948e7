//! `info` command implementation.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use contracts::RouteBlueprint;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::commands::load_route;

/// Route info for JSON output
#[derive(Serialize)]
struct RouteInfo {
    version: String,
    delivery: String,
    filters: Vec<ComponentInfo>,
    handlers: Vec<ComponentInfo>,
}

#[derive(Serialize)]
struct ComponentInfo {
    name: String,
    kind: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading route info");

    let blueprint = load_route(&args.config)?.blueprint;

    if args.json {
        let info = build_route_info(&blueprint);
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize route info")?;
        println!("{}", json);
    } else {
        print_route_info(&blueprint);
    }

    Ok(())
}

fn build_route_info(blueprint: &RouteBlueprint) -> RouteInfo {
    let filters = blueprint
        .filters
        .iter()
        .map(|f| ComponentInfo {
            name: f.label().to_string(),
            kind: f.kind.clone(),
            params: f.params.clone().into_iter().collect(),
        })
        .collect();

    let handlers = blueprint
        .handlers
        .iter()
        .map(|h| ComponentInfo {
            name: h.name.clone(),
            kind: h.kind.clone(),
            params: h.params.clone().into_iter().collect(),
        })
        .collect();

    RouteInfo {
        version: format!("{:?}", blueprint.version),
        delivery: format!("{:?}", blueprint.delivery),
        filters,
        handlers,
    }
}

fn print_route_info(blueprint: &RouteBlueprint) {
    let info = build_route_info(blueprint);

    println!("Route ({}, delivery: {})", info.version, info.delivery);

    println!("\nFilters ({}), all must accept:", info.filters.len());
    print_components(&info.filters);

    println!("\nHandlers ({}), in delivery order:", info.handlers.len());
    print_components(&info.handlers);

    println!();
}

fn print_components(components: &[ComponentInfo]) {
    for (i, component) in components.iter().enumerate() {
        let prefix = if i == components.len() - 1 { "└─" } else { "├─" };
        println!("   {} {} ({})", prefix, component.name, component.kind);
        for (key, value) in &component.params {
            println!("        {} = {}", key, value);
        }
    }
}
