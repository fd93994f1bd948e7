//! Message - the immutable text value routed by the dispatcher

use std::fmt;
use std::sync::Arc;

use crate::Severity;

/// Immutable text message
///
/// Has no identity beyond its content. Cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message(Arc<str>);

impl Message {
    /// Create a new message
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    /// Borrow the message text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the message text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Severity parsed from a leading `"<Level>:"` prefix, if any
    ///
    /// `"Error: disk full"` yields [`Severity::Error`]; `"disk full"` yields `None`.
    pub fn severity(&self) -> Option<Severity> {
        let (prefix, _) = self.0.split_once(':')?;
        prefix.trim().parse().ok()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_content() {
        let msg = Message::from("Error: disk full");
        assert_eq!(msg.as_str(), "Error: disk full");
        assert_eq!(msg.to_string(), "Error: disk full");
        assert_eq!(msg.len(), 16);
        assert!(!msg.is_empty());
    }

    #[test]
    fn test_clone_shares_content() {
        let a = Message::from(String::from("shared"));
        let b = a.clone();
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(&a.0, &b.0));
    }

    #[test]
    fn test_severity_prefix() {
        assert_eq!(Message::from("Error: disk full").severity(), Some(Severity::Error));
        assert_eq!(Message::from("warning : low disk").severity(), Some(Severity::Warning));
        assert_eq!(Message::from("Ignored: not logged").severity(), None);
        assert_eq!(Message::from("no prefix at all").severity(), None);
    }
}
