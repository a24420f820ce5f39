//! Abstract span type.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::Document;

/// Half-open range of document lines holding the abstract body.
///
/// `start` is strictly after the heading line. When the heading shares its
/// line with the first words of the abstract, those words are kept in
/// `lead` and precede the lines of the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// First line of the body (inclusive)
    pub start: usize,

    /// End of the body (exclusive)
    pub end: usize,

    /// Text that followed the heading token on the heading line
    pub lead: Option<String>,
}

impl Span {
    /// Create a span without inline lead text.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
            lead: None,
        }
    }

    /// Attach inline lead text.
    pub fn with_lead(mut self, lead: impl Into<String>) -> Self {
        let lead = lead.into();
        self.lead = if lead.trim().is_empty() {
            None
        } else {
            Some(lead)
        };
        self
    }

    /// Line index range covered by the span.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of whole lines in the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span carries no text at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.lead.is_none()
    }

    /// Texts of the span in order: the inline lead, then each covered line.
    ///
    /// Lines past the end of `doc` are ignored.
    pub fn texts<'a>(&'a self, doc: &'a Document) -> Vec<&'a str> {
        let end = self.end.min(doc.len());
        let start = self.start.min(end);
        self.lead
            .as_deref()
            .into_iter()
            .chain(doc.lines[start..end].iter().map(|line| line.text()))
            .collect()
    }
}
