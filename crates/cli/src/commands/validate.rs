//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::RouteBlueprint;
use dispatcher::{FilterRegistry, HandlerRegistry};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::commands::load_route;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RouteSummary>,
}

#[derive(Serialize)]
struct RouteSummary {
    version: String,
    delivery: String,
    filter_count: usize,
    handler_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating route");

    let result = validate_route(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Route validation failed")
    }
}

fn validate_route(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    match load_route(&args.config) {
        Ok(route) => {
            let mut warnings = route.warnings;
            warnings.extend(unknown_kind_warnings(&route.blueprint));
            let blueprint = route.blueprint;

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(RouteSummary {
                    version: format!("{:?}", blueprint.version),
                    delivery: format!("{:?}", blueprint.delivery),
                    filter_count: blueprint.filters.len(),
                    handler_count: blueprint.handlers.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Kinds the built-in registries cannot construct
fn unknown_kind_warnings(blueprint: &RouteBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    let filters = FilterRegistry::builtin();
    for filter in &blueprint.filters {
        if !filters.contains(&filter.kind) {
            warnings.push(format!(
                "Filter '{}' uses kind '{}' which is not built in",
                filter.label(),
                filter.kind
            ));
        }
    }

    let handlers = HandlerRegistry::builtin();
    for handler in &blueprint.handlers {
        if !handlers.contains(&handler.kind) {
            warnings.push(format!(
                "Handler '{}' uses kind '{}' which is not built in",
                handler.name, handler.kind
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Route is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Delivery: {}", summary.delivery);
            println!("  Filters: {}", summary.filter_count);
            println!("  Handlers: {}", summary.handler_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Route is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
