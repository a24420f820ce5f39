//! Plain-text line source.

use std::path::Path;

use crate::error::{Error, Result};

use super::LineSource;

/// Page lines from a plain-text dump, pages separated by form feeds
/// (the layout `pdftotext` writes).
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    pages: Vec<String>,
}

impl TextSource {
    /// Split text into pages on form feeds.
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split('\u{000C}').map(str::to_string).collect();
        // A trailing form feed ends the last page rather than starting a new one.
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    /// Read a text file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }
}

impl LineSource for TextSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page: u32) -> Result<Vec<String>> {
        self.pages
            .get(page as usize)
            .map(|text| text.lines().map(str::to_string).collect())
            .ok_or(Error::PageOutOfRange(page + 1, self.page_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages() {
        let source = TextSource::from_text("Abstract\nA pump.\u{000C}Background\n\u{000C}");
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page_lines(0).unwrap(), vec!["Abstract", "A pump."]);
        assert_eq!(source.page_lines(1).unwrap(), vec!["Background"]);
        assert!(matches!(
            source.page_lines(2),
            Err(Error::PageOutOfRange(3, 2))
        ));
    }
}
