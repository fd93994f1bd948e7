//! RegexFilter - regular expression match

use contracts::{ContractError, Message, MessageFilter};
use regex::Regex;
use std::collections::HashMap;

/// Accepts messages in which the expression finds a match
#[derive(Debug, Clone)]
pub struct RegexFilter {
    name: String,
    regex: Regex,
}

impl RegexFilter {
    /// Compile a new RegexFilter named "regex"
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::named("regex", pattern)
    }

    /// Compile a new RegexFilter with an explicit name
    pub fn named(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            regex: Regex::new(pattern)?,
        })
    }

    /// Create from params (for registry)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let pattern = params
            .get("pattern")
            .ok_or_else(|| ContractError::config_validation(&name, "missing 'pattern' parameter"))?;
        Self::named(name.clone(), pattern)
            .map_err(|e| ContractError::config_validation(&name, format!("invalid regex: {}", e)))
    }

    /// Source pattern
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl MessageFilter for RegexFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, message: &Message) -> bool {
        self.regex.is_match(message.as_str())
    }
}
