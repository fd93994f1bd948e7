//! TextFilter - substring match

use contracts::{ContractError, Message, MessageFilter};
use std::collections::HashMap;

/// Accepts messages that contain a fixed pattern
///
/// Matching is case sensitive. An empty pattern accepts everything.
#[derive(Debug, Clone)]
pub struct TextFilter {
    name: String,
    pattern: String,
}

impl TextFilter {
    /// Create a new TextFilter named "text"
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::named("text", pattern)
    }

    /// Create a new TextFilter with an explicit name
    pub fn named(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
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
        Ok(Self::named(name, pattern.clone()))
    }

    /// The substring this filter searches for
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl MessageFilter for TextFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, message: &Message) -> bool {
        message.as_str().contains(self.pattern.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_filter_matches_substring() {
        let filter = TextFilter::new("Error");
        assert!(filter.matches(&Message::from("Error: disk full")));
        assert!(filter.matches(&Message::from("Fatal Error occurred")));
        assert!(!filter.matches(&Message::from("Warning: low disk")));
    }

    #[test]
    fn test_text_filter_is_case_sensitive() {
        let filter = TextFilter::new("Error");
        assert!(!filter.matches(&Message::from("error: lowercase")));
    }

    #[test]
    fn test_empty_pattern_accepts_all() {
        let filter = TextFilter::new("");
        assert!(filter.matches(&Message::from("")));
        assert!(filter.matches(&Message::from("anything")));
    }

    #[test]
    fn test_from_params() {
        let mut params = HashMap::new();
        params.insert("pattern".to_string(), "disk".to_string());

        let filter = TextFilter::from_params("disk_only", &params).unwrap();
        assert_eq!(filter.name(), "disk_only");
        assert_eq!(filter.pattern(), "disk");

        assert!(TextFilter::from_params("empty", &HashMap::new()).is_err());
    }
}
