//! Abstract span location.

use crate::error::LocateError;
use crate::model::{Document, Span};
use crate::reconstruct::normalize::strip_heading_residue;

use super::HeadingCatalog;

/// Finds the abstract span in a document using a heading catalog.
#[derive(Debug, Clone, Copy)]
pub struct Locator<'c> {
    catalog: &'c HeadingCatalog,
}

impl<'c> Locator<'c> {
    /// Create a locator over `catalog`.
    pub fn new(catalog: &'c HeadingCatalog) -> Self {
        Self { catalog }
    }

    /// Locate the abstract body.
    ///
    /// The first line matching a start pattern is the heading; the span
    /// begins on the next line, with any text after the heading token kept
    /// as the span's lead. The span ends at the first later line matching
    /// an end pattern, or at the end of the document.
    pub fn locate(&self, doc: &Document) -> Result<Span, LocateError> {
        let (heading, lead) = doc
            .lines
            .iter()
            .enumerate()
            .find_map(|(i, line)| {
                self.catalog.match_start(&line.text).map(|(pattern, end)| {
                    log::debug!(
                        "Abstract heading '{}' on line {} (page {})",
                        pattern.name(),
                        i,
                        line.page
                    );
                    (i, strip_heading_residue(&line.text[end..]))
                })
            })
            .ok_or(LocateError::HeadingNotFound)?;

        let start = heading + 1;
        let end = doc.lines[start..]
            .iter()
            .position(|line| match self.catalog.match_end(&line.text) {
                Some(pattern) => {
                    log::debug!("Abstract ends at '{}' heading", pattern.name());
                    true
                }
                None => false,
            })
            .map_or(doc.len(), |offset| start + offset);

        let span = Span::new(start, end).with_lead(lead);
        log::debug!("Abstract span {:?}", span.range());
        if span.is_empty() {
            return Err(LocateError::EmptySpan);
        }
        Ok(span)
    }
}

impl Default for Locator<'static> {
    fn default() -> Self {
        Self::new(HeadingCatalog::builtin())
    }
}
