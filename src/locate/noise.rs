//! Front-page noise filtering.
//!
//! The front page of a patent interleaves the abstract with bibliographic
//! columns: classification codes, cited references, examiner names, and
//! stray labels from the representative drawing. When enabled, this filter
//! walks the lines after the abstract heading and keeps only what looks like
//! running text. It also follows `(Continued)` markers, which interrupt the
//! abstract column until the text resumes further down or on the next page.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Document, Span};
use crate::reconstruct::normalize::collapse_whitespace;

use super::HeadingCatalog;

/// Citation debris left when reference columns are cut mid-word.
const CITATION_WORDS: [&str; 6] = ["Cited", "CITED", "OCUMENTS", "DOCUMENTS", "ed", "ued"];

/// A continuation line starts lowercase and is at least this long.
const MIN_CONTINUATION_LEN: usize = 31;

/// Line filter for bibliographic noise inside the abstract span.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    classification: Regex,
    slash_code: Regex,
    ipc_code: Regex,
    numeric_label: Regex,
    page_marker: Regex,
    page_marker_line: Regex,
    search_history: Regex,
    et_al: Regex,
    suffix_name: Regex,
    garbled: Regex,
    capitalized_word: Regex,
    two_long_words: Regex,
    continued: Regex,
    edition_code: Regex,
    trailing_code: Regex,
    space_before_punct: Regex,
    spaced_hyphen: Regex,
}

impl NoiseFilter {
    /// Create a filter with the builtin rules.
    pub fn new() -> Self {
        Self::builtin().clone()
    }

    /// The shared builtin filter.
    pub fn builtin() -> &'static NoiseFilter {
        static BUILTIN: OnceLock<NoiseFilter> = OnceLock::new();
        BUILTIN.get_or_init(|| NoiseFilter {
            classification: Regex::new(r"^\d+[Oo]f\s+\d+").unwrap(),
            slash_code: Regex::new(r"^\d+/\d+").unwrap(),
            ipc_code: Regex::new(r"^[A-Z]{1,4}\d+[A-Z]?\s+\d").unwrap(),
            numeric_label: Regex::new(r"^[\d\s\-()]+$").unwrap(),
            page_marker: Regex::new(r"(?i)page\s+\d+").unwrap(),
            page_marker_line: Regex::new(r"(?i)^page\s+\d+").unwrap(),
            search_history: Regex::new(r"(?i)search history").unwrap(),
            et_al: Regex::new(r"(?i)\bet\s+al\b").unwrap(),
            suffix_name: Regex::new(r"(?i),\s+(?:jr|sr)\.?\s*$").unwrap(),
            garbled: Regex::new(r#"^[a-z]{2,8}'[a-z]'\."?\s*\d+"#).unwrap(),
            capitalized_word: Regex::new(r"^[A-Z][a-z]+$").unwrap(),
            two_long_words: Regex::new(r"[a-z]{3,}.*[a-z]{3,}").unwrap(),
            continued: Regex::new(r"(?i)\(\s*continued\s*\)").unwrap(),
            edition_code: Regex::new(r"\(\s*\d{4}\.\d{2}\s*\)").unwrap(),
            trailing_code: Regex::new(r"\(\s*\d+\s*\)$").unwrap(),
            space_before_punct: Regex::new(r"\s+([,;.!?])").unwrap(),
            spaced_hyphen: Regex::new(r"(\w)\s+-\s+(\w)").unwrap(),
        })
    }

    /// Check whether a single line is bibliographic noise.
    pub fn is_noise(&self, line: &str) -> bool {
        let line = line.trim();
        let len = line.chars().count();

        if self.classification.is_match(line)
            || self.slash_code.is_match(line)
            || self.ipc_code.is_match(line)
        {
            return true;
        }
        if len > 3 && self.numeric_label.is_match(line) {
            return true;
        }
        if line.matches('.').count() > 5 || line.matches('?').count() > 2 {
            return true;
        }
        if self.page_marker.is_match(line) || self.search_history.is_match(line) {
            return true;
        }
        if len <= 2 || CITATION_WORDS.contains(&line) {
            return true;
        }
        if self.et_al.is_match(line) || self.suffix_name.is_match(line) {
            return true;
        }
        if len < 20 && is_all_lowercase(line) {
            return true;
        }
        if self.garbled.is_match(line) {
            return true;
        }
        if len < 25 && self.capitalized_word.is_match(line) {
            return true;
        }
        len < 20
            && line.matches(' ').count() <= 2
            && line.starts_with(|c: char| c.is_ascii_uppercase())
            && !self.two_long_words.is_match(line)
    }

    /// Collect the span's lines with noise removed.
    ///
    /// Starts at the span's lead and first line. Lines between a
    /// `(Continued)` marker and the point where the text resumes are
    /// skipped, and end headings inside that gap are ignored. Outside a gap
    /// the walk stops at the first end heading in `catalog`.
    pub fn collect<'a>(
        &self,
        doc: &'a Document,
        span: &'a Span,
        catalog: &HeadingCatalog,
    ) -> Vec<&'a str> {
        let mut kept: Vec<&'a str> = span.lead.as_deref().into_iter().collect();
        let mut waiting = false;
        let mut dropped = 0usize;

        let start = span.start.min(doc.len());
        for line in &doc.lines[start..] {
            let text = line.text.trim();
            if text.is_empty() {
                continue;
            }

            if let Some(marker) = self.continued.find(text) {
                waiting = true;
                let before = text[..marker.start()].trim();
                if !before.is_empty() {
                    kept.push(before);
                }
                continue;
            }

            if waiting {
                if self.page_marker_line.is_match(text) {
                    waiting = false;
                    continue;
                }
                if !is_continuation(text) {
                    continue;
                }
                waiting = false;
            }

            if catalog.match_end(text).is_some() {
                break;
            }
            if self.is_noise(text) {
                dropped += 1;
                continue;
            }
            kept.push(text);
        }

        log::debug!("Noise filter kept {} lines, dropped {}", kept.len(), dropped);
        kept
    }

    /// Tidy reconstructed text: drop edition codes like `(2013.01)` and a
    /// trailing reference numeral, close up space before punctuation and
    /// around spaced hyphens.
    pub fn clean_text(&self, text: &str) -> String {
        let text = self.continued.replace_all(text, "");
        let text = self.edition_code.replace_all(&text, "");
        let text = collapse_whitespace(&text);
        let text = self.trailing_code.replace(&text, "");
        let text = self.space_before_punct.replace_all(&text, "$1");
        let text = self.spaced_hyphen.replace_all(&text, "$1-$2");
        collapse_whitespace(&text)
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Has cased characters and all of them are lowercase.
fn is_all_lowercase(text: &str) -> bool {
    let mut cased = text.chars().filter(|c| c.is_lowercase() || c.is_uppercase());
    let mut any = false;
    let all_lower = cased.all(|c| {
        any = true;
        c.is_lowercase()
    });
    any && all_lower
}

fn is_continuation(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_lowercase()) && text.chars().count() >= MIN_CONTINUATION_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::Locator;

    fn filter() -> &'static NoiseFilter {
        NoiseFilter::builtin()
    }

    #[test]
    fn test_classification_codes() {
        assert!(filter().is_noise("32Of 138"));
        assert!(filter().is_noise("320/109"));
        assert!(filter().is_noise("B60L 50/64"));
        assert!(filter().is_noise("12 - 14 (16)"));
    }

    #[test]
    fn test_reference_debris() {
        assert!(filter().is_noise("Smith et al."));
        assert!(filter().is_noise("Jones, Jr."));
        assert!(filter().is_noise("DOCUMENTS"));
        assert!(filter().is_noise("See application file for complete search history."));
        assert!(filter().is_noise("5,123,456 A ....... 6/1992 ....... Lee"));
        assert!(filter().is_noise("Page 2"));
    }

    #[test]
    fn test_diagram_labels() {
        assert!(filter().is_noise("Controller"));
        assert!(filter().is_noise("Fig"));
        assert!(filter().is_noise("??? ? ?"));
        assert!(filter().is_noise("xy"));
        assert!(filter().is_noise("input port"));
    }

    #[test]
    fn test_running_text_kept() {
        assert!(!filter().is_noise("A device providing improved effi-"));
        assert!(!filter().is_noise("ciency in power delivery to attached loads."));
        assert!(!filter().is_noise("The Power Supply Unit"));
    }

    #[test]
    fn test_collect_stops_at_end_heading() {
        let doc = Document::from_lines([
            "(57) ABSTRACT",
            "A valve assembly having a seat and a",
            "320/109",
            "movable member biased against the seat.",
            "12 Claims, 4 Drawing Sheets",
            "more text after the claim count line",
        ]);
        let span = Locator::default().locate(&doc).unwrap();
        let lines = filter().collect(&doc, &span, HeadingCatalog::builtin());
        assert_eq!(
            lines,
            vec![
                "A valve assembly having a seat and a",
                "movable member biased against the seat."
            ]
        );
    }

    #[test]
    fn test_collect_follows_continued_marker() {
        let mut doc = Document::new();
        doc.push_page([
            "ABSTRACT",
            "A battery pack comprising a plurality of cells (Continued)",
            "(56) References Cited",
            "U.S. PATENT DOCUMENTS",
        ]);
        doc.push_page([
            "Page 2",
            "connected in series and a controller that balances the cells.",
            "BACKGROUND",
        ]);
        let span = Locator::default().locate(&doc).unwrap();
        let lines = filter().collect(&doc, &span, HeadingCatalog::builtin());
        assert_eq!(
            lines,
            vec![
                "A battery pack comprising a plurality of cells",
                "connected in series and a controller that balances the cells."
            ]
        );
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(
            filter().clean_text("A bi - stable latch (2013.01) , and a gate (12)"),
            "A bi-stable latch, and a gate"
        );
        assert_eq!(filter().clean_text("Plain text."), "Plain text.");
    }
}
