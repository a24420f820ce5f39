//! Line-level types.

use serde::{Deserialize, Serialize};

/// One visual line of extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Text content, as produced by the line source
    pub text: String,

    /// Page the line came from (0-indexed)
    pub page: u32,

    /// Position of the line within its page (0-indexed)
    pub index: usize,
}

impl Line {
    /// Create a new line.
    pub fn new(text: impl Into<String>, page: u32, index: usize) -> Self {
        Self {
            text: text.into(),
            page,
            index,
        }
    }

    /// Get the text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
