//! SeverityFilter - minimum severity threshold

use contracts::{ContractError, Message, MessageFilter, Severity};
use std::collections::HashMap;

/// Accepts messages whose severity prefix is at least `min`
///
/// Severity comes from a leading `"<Level>:"` prefix. Messages without one
/// are rejected, or fail evaluation when the filter is strict.
#[derive(Debug, Clone)]
pub struct SeverityFilter {
    name: String,
    min: Severity,
    strict: bool,
}

impl SeverityFilter {
    /// Create a new lenient SeverityFilter named "severity"
    pub fn new(min: Severity) -> Self {
        Self {
            name: "severity".to_string(),
            min,
            strict: false,
        }
    }

    /// Set the filter name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fail evaluation on messages that carry no severity prefix
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Create from params (for registry)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let min = params
            .get("min")
            .ok_or_else(|| ContractError::config_validation(&name, "missing 'min' parameter"))?
            .parse::<Severity>()
            .map_err(|e| ContractError::config_validation(&name, e))?;

        let strict = match params.get("strict").map(String::as_str) {
            Some("true") => true,
            Some("false") | None => false,
            Some(other) => {
                return Err(ContractError::config_validation(
                    &name,
                    format!("invalid 'strict' value '{}'", other),
                ))
            }
        };

        Ok(Self::new(min).with_name(name).strict(strict))
    }

    /// Minimum accepted severity
    pub fn min(&self) -> Severity {
        self.min
    }
}

impl MessageFilter for SeverityFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, message: &Message) -> bool {
        message.severity().is_some_and(|level| level >= self.min)
    }

    fn evaluate(&self, message: &Message) -> Result<bool, ContractError> {
        match message.severity() {
            Some(level) => Ok(level >= self.min),
            None if self.strict => Err(ContractError::filter_evaluation(
                &self.name,
                "message has no severity prefix",
            )),
            None => Ok(false),
        }
    }
}
