//! # Config Loader
//!
//! Route file loading for logroute.
//!
//! Responsibilities:
//! - Parse TOML/JSON route files
//! - Validate filters and handlers
//! - Anchor relative `file` handler paths at the route file's directory
//! - Report non-fatal warnings alongside the `RouteBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let route = ConfigLoader::load_from_path(Path::new("route.toml")).unwrap();
//! for warning in &route.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! println!("Handlers: {}", route.blueprint.handlers.len());
//! ```

mod parser;
mod validator;

pub use contracts::RouteBlueprint;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// A validated route together with its non-fatal warnings
#[derive(Debug, Clone)]
pub struct LoadedRoute {
    pub blueprint: RouteBlueprint,
    /// Issues that do not stop the route from running
    pub warnings: Vec<String>,
}

/// Route file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a route file
    ///
    /// The format comes from the extension (.toml / .json). Relative `path`
    /// parameters of `file` handlers are resolved against the directory
    /// holding the route file.
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<LoadedRoute, ContractError> {
        let format = ConfigFormat::detect(path)?;
        let content = std::fs::read_to_string(path)?;
        let mut blueprint = format.parse(&content)?;

        if let Some(base) = path.parent() {
            anchor_file_paths(&mut blueprint, base);
        }

        Self::finish(blueprint)
    }

    /// Load a route from a string, leaving handler paths untouched
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<LoadedRoute, ContractError> {
        Self::finish(format.parse(content)?)
    }

    fn finish(blueprint: RouteBlueprint) -> Result<LoadedRoute, ContractError> {
        validator::validate(&blueprint)?;
        let warnings = validator::collect_warnings(&blueprint);
        Ok(LoadedRoute {
            blueprint,
            warnings,
        })
    }
}

/// Rewrite relative `file` handler paths to live under `base`
fn anchor_file_paths(blueprint: &mut RouteBlueprint, base: &Path) {
    let file_handlers = blueprint.handlers.iter_mut().filter(|h| h.kind == "file");
    for handler in file_handlers {
        if let Some(path) = handler.params.get_mut("path") {
            if Path::new(path.as_str()).is_relative() {
                *path = base.join(path.as_str()).display().to_string();
            }
        }
    }
}
