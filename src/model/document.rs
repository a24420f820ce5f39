//! Document-level types.

use serde::{Deserialize, Serialize};

use super::Line;

/// Form feed separates pages in plain-text dumps.
const PAGE_BREAK: char = '\u{000C}';

/// Ordered lines of a document's leading pages, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Lines in reading order
    pub lines: Vec<Line>,

    /// Number of pages the lines were taken from
    pub page_count: u32,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a single-page document from raw line texts.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new();
        doc.push_page(lines);
        doc
    }

    /// Build a document from plain text; form feeds separate pages.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        for page in text.split(PAGE_BREAK) {
            doc.push_page(page.lines());
        }
        doc
    }

    /// Append a page of lines.
    pub fn push_page<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let page = self.page_count;
        self.lines.extend(
            lines
                .into_iter()
                .enumerate()
                .map(|(index, text)| Line::new(text, page, index)),
        );
        self.page_count += 1;
    }

    /// Keep only the first `max_pages` pages.
    pub fn truncate_pages(&mut self, max_pages: u32) {
        if self.page_count <= max_pages {
            return;
        }
        self.lines.retain(|line| line.page < max_pages);
        self.page_count = max_pages;
    }

    /// Get a line by position.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines of one page.
    pub fn page_lines(&self, page: u32) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |line| line.page == page)
    }

    /// Join all lines with newlines, pages with form feeds.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        let mut current_page = None;
        for line in &self.lines {
            match current_page {
                Some(page) if page != line.page => out.push(PAGE_BREAK),
                Some(_) => out.push('\n'),
                None => {}
            }
            current_page = Some(line.page);
            out.push_str(&line.text);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_numbering() {
        let doc = Document::from_lines(["a", "b", "c"]);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.page_count, 1);
        assert_eq!(doc.line(2).map(|l| l.index), Some(2));
        assert!(doc.lines.iter().all(|l| l.page == 0));
    }

    #[test]
    fn test_from_text_pages() {
        let doc = Document::from_text("one\ntwo\u{000C}three");
        assert_eq!(doc.page_count, 2);
        assert_eq!(doc.page_lines(1).count(), 1);
        assert_eq!(doc.line(2).map(|l| (l.page, l.index)), Some((1, 0)));
    }

    #[test]
    fn test_truncate_pages() {
        let mut doc = Document::new();
        doc.push_page(["p0"]);
        doc.push_page(["p1"]);
        doc.push_page(["p2a", "p2b"]);
        doc.truncate_pages(2);
        assert_eq!(doc.page_count, 2);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_plain_text_round_trip() {
        let text = "(57) Abstract\nA device.\u{000C}Background";
        assert_eq!(Document::from_text(text).plain_text(), text);
    }
}
