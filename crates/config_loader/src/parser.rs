//! Route file parsing
//!
//! TOML is the primary format; JSON is accepted for generated routes.

use std::path::Path;

use contracts::{ContractError, RouteBlueprint};

/// Route file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Infer format from a route file path
    pub fn detect(path: &Path) -> Result<Self, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse(format!(
                "route file {} has no extension, expected .toml or .json",
                path.display()
            ))
        })?;

        Self::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported route format: .{ext}"))
        })
    }

    /// Parse a route in this format, without validation
    pub fn parse(self, content: &str) -> Result<RouteBlueprint, ContractError> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| parse_error(self, e)),
            Self::Json => serde_json::from_str(content).map_err(|e| parse_error(self, e)),
        }
    }
}

fn parse_error(
    format: ConfigFormat,
    error: impl std::error::Error + Send + Sync + 'static,
) -> ContractError {
    ContractError::ConfigParse {
        message: format!("{format:?} route parse error: {error}"),
        source: Some(Box::new(error)),
    }
}
