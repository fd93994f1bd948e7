//! Command implementations.

mod demo;
mod info;
mod run;
mod validate;

pub use demo::run_demo;
pub use info::run_info;
pub use run::run_router;
pub use validate::run_validate;

use std::path::Path;

use config_loader::{ConfigLoader, LoadedRoute};

use crate::error::CliError;

/// Load and validate a route file
pub(crate) fn load_route(path: &Path) -> Result<LoadedRoute, CliError> {
    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()));
    }

    ConfigLoader::load_from_path(path)
        .map_err(|e| CliError::config_invalid(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_route_missing_file() {
        let err = load_route(Path::new("/nonexistent/route.toml")).unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_route_invalid() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[[handlers]]\nname = \"\"\nkind = \"stdout\"").unwrap();

        let err = load_route(file.path()).unwrap_err();
        assert!(matches!(err, CliError::ConfigInvalid { .. }));
    }
}
