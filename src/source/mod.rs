//! Line sources: where document lines come from.
//!
//! The locator and reconstructor only see a [`Document`]. This module turns
//! a PDF (through lopdf) or a plain-text dump into one, reading only the
//! leading pages.

pub mod layout;
mod pdf;
mod text;

pub use pdf::{decode_text_simple, PdfSource};
pub use text::TextSource;

use crate::error::Result;
use crate::model::Document;
use crate::options::{ErrorMode, ExtractOptions};
use crate::reconstruct::normalize::clean_unicode;

/// Produces the text lines of a document page by page.
pub trait LineSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Lines of one page (0-indexed), top to bottom.
    fn page_lines(&self, page: u32) -> Result<Vec<String>>;
}

impl<S: LineSource + ?Sized> LineSource for &S {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page_lines(&self, page: u32) -> Result<Vec<String>> {
        (**self).page_lines(page)
    }
}

/// Read the first `options.max_pages` pages of a source into a document.
///
/// In lenient mode a page that fails to extract is logged and contributes
/// no lines; in strict mode the first failure is returned.
pub fn collect_document<S: LineSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<Document> {
    let pages = source.page_count().min(options.max_pages);
    let mut doc = Document::new();

    for page in 0..pages {
        let lines = match source.page_lines(page) {
            Ok(lines) => lines,
            Err(e) => match options.error_mode {
                ErrorMode::Strict => return Err(e),
                ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", page + 1, e);
                    Vec::new()
                }
            },
        };

        if options.unicode_cleanup {
            doc.push_page(lines.iter().map(|line| clean_unicode(line)));
        } else {
            doc.push_page(lines);
        }
    }

    log::debug!("Collected {} lines from {} pages", doc.len(), doc.page_count);
    Ok(doc)
}
