//! Knowledge-base content for answer generation

use std::path::Path;

use crate::error::AgentResult;

/// Plain-text knowledge base consulted by the answer generator.
///
/// The content is loaded once at graph-construction time and shared across
/// tickets; answer generation only reads it.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    content: String,
}

impl KnowledgeBase {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> AgentResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let kb = KnowledgeBase::from_text("Devices pair over Bluetooth.");
        assert!(!kb.is_empty());
        assert!(kb.content().contains("Bluetooth"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(KnowledgeBase::from_text("  \n ").is_empty());
        assert!(KnowledgeBase::default().is_empty());
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let result = KnowledgeBase::from_file("/nonexistent/kb.md");
        assert!(matches!(result, Err(crate::AgentError::Io(_))));
    }
}
