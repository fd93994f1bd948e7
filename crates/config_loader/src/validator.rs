//! Route configuration validation
//!
//! Rules:
//! - every filter/handler kind is non-empty
//! - filter names, when given, are non-empty
//! - handler names are non-empty and unique
//! - built-in kinds carry their required parameters
//! - boolean/numeric/severity parameters parse
//!
//! Unknown kinds pass validation; they may be provided by a custom registry.

use std::collections::{HashMap, HashSet};

use contracts::{ContractError, RouteBlueprint, Severity};

type Params = HashMap<String, String>;

/// Validate RouteBlueprint configuration
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &RouteBlueprint) -> Result<(), ContractError> {
    validate_filters(blueprint)?;
    validate_handler_names(blueprint)?;
    validate_handlers(blueprint)?;
    Ok(())
}

/// Collect non-fatal configuration issues
pub fn collect_warnings(blueprint: &RouteBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.handlers.is_empty() {
        warnings.push("No handlers configured - accepted messages will be dropped".to_string());
    }

    if blueprint.filters.is_empty() {
        warnings.push("No filters configured - every message will be forwarded".to_string());
    }

    for handler in &blueprint.handlers {
        if handler.kind == "memory" {
            warnings.push(format!(
                "Handler '{}' captures in memory only - nothing leaves the process",
                handler.name
            ));
        }
    }

    warnings
}

/// Validate filter kinds and built-in parameters
fn validate_filters(blueprint: &RouteBlueprint) -> Result<(), ContractError> {
    for (idx, filter) in blueprint.filters.iter().enumerate() {
        let field = format!("filters[{}]", idx);
        if filter.kind.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("{field}.kind"),
                "filter kind cannot be empty",
            ));
        }
        if filter.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ContractError::config_validation(
                format!("{field}.name"),
                "filter name cannot be empty when given",
            ));
        }

        match filter.kind.as_str() {
            "text" | "regex" => {
                require_param(&field, &filter.params, "pattern")?;
            }
            "severity" => {
                let min = require_param(&field, &filter.params, "min")?;
                parse_severity(&field, "min", min)?;
                optional_bool(&field, &filter.params, "strict")?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Validate handler name uniqueness
fn validate_handler_names(blueprint: &RouteBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, handler) in blueprint.handlers.iter().enumerate() {
        if handler.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("handlers[{}].name", idx),
                "handler name cannot be empty",
            ));
        }
        if !seen.insert(handler.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("handlers[name={}]", handler.name),
                "duplicate handler name",
            ));
        }
    }
    Ok(())
}

/// Validate handler kinds and built-in parameters
fn validate_handlers(blueprint: &RouteBlueprint) -> Result<(), ContractError> {
    for handler in &blueprint.handlers {
        let field = format!("handlers[{}]", handler.name);
        if handler.kind.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("{field}.kind"),
                "handler kind cannot be empty",
            ));
        }

        match handler.kind.as_str() {
            "file" => {
                require_param(&field, &handler.params, "path")?;
                optional_bool(&field, &handler.params, "append")?;
            }
            "socket" => {
                require_param(&field, &handler.params, "addr")?;
                if let Some(timeout) = handler.params.get("timeout_ms") {
                    timeout.parse::<u64>().map_err(|_| {
                        ContractError::config_validation(
                            format!("{field}.params.timeout_ms"),
                            format!("expected milliseconds, got '{timeout}'"),
                        )
                    })?;
                }
            }
            "log" => {
                if let Some(level) = handler.params.get("level") {
                    parse_severity(&field, "level", level)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn require_param<'a>(
    field: &str,
    params: &'a Params,
    key: &str,
) -> Result<&'a str, ContractError> {
    params.get(key).map(String::as_str).ok_or_else(|| {
        ContractError::config_validation(
            format!("{field}.params.{key}"),
            format!("missing required parameter '{key}'"),
        )
    })
}

fn parse_severity(field: &str, key: &str, value: &str) -> Result<Severity, ContractError> {
    value
        .parse()
        .map_err(|e: String| ContractError::config_validation(format!("{field}.params.{key}"), e))
}

fn parse_bool(field: &str, key: &str, value: &str) -> Result<bool, ContractError> {
    value.parse().map_err(|_| {
        ContractError::config_validation(
            format!("{field}.params.{key}"),
            format!("expected 'true' or 'false', got '{value}'"),
        )
    })
}

fn optional_bool(field: &str, params: &Params, key: &str) -> Result<(), ContractError> {
    if let Some(value) = params.get(key) {
        parse_bool(field, key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ConfigVersion, DeliveryPolicy, FilterConfig, HandlerConfig};

    fn minimal_blueprint() -> RouteBlueprint {
        RouteBlueprint {
            version: ConfigVersion::V1,
            delivery: DeliveryPolicy::StopOnError,
            filters: vec![FilterConfig::new("text").with_param("pattern", "Error")],
            handlers: vec![HandlerConfig::new("console", "stdout")],
        }
    }

    #[test]
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_duplicate_handler_name() {
        let mut bp = minimal_blueprint();
        bp.handlers.push(HandlerConfig::new("console", "stderr"));
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("duplicate handler name"));
    }

    #[test]
    fn test_empty_handler_name() {
        let mut bp = minimal_blueprint();
        bp.handlers[0].name = " ".into();
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("handlers[0].name"));
    }

    #[test]
    fn test_empty_filter_name() {
        let mut bp = minimal_blueprint();
        bp.filters[0].name = Some(String::new());
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("filters[0].name"));

        bp.filters[0].name = Some("errors".into());
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_text_filter_requires_pattern() {
        let mut bp = minimal_blueprint();
        bp.filters = vec![FilterConfig::new("text")];
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("pattern"));
    }

    #[test]
    fn test_severity_filter_min_must_parse() {
        let mut bp = minimal_blueprint();
        bp.filters = vec![FilterConfig::new("severity").with_param("min", "loud")];
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("unknown severity"));

        bp.filters = vec![FilterConfig::new("severity")
            .with_param("min", "warn")
            .with_param("strict", "yes")];
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("strict"));
    }

    #[test]
    fn test_file_and_socket_params() {
        let mut bp = minimal_blueprint();
        bp.handlers = vec![HandlerConfig::new("audit", "file")];
        assert!(validate(&bp).is_err());

        bp.handlers = vec![HandlerConfig::new("net", "socket")
            .with_param("addr", "127.0.0.1:5140")
            .with_param("timeout_ms", "soon")];
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }

    #[test]
    fn test_unknown_kinds_pass() {
        let mut bp = minimal_blueprint();
        bp.filters.push(FilterConfig::new("priority_window"));
        bp.handlers.push(HandlerConfig::new("hook", "webhook"));
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_warnings() {
        let bp = RouteBlueprint::default();
        let warnings = collect_warnings(&bp);
        assert_eq!(warnings.len(), 2);
        assert!(collect_warnings(&minimal_blueprint()).is_empty());
    }
}
