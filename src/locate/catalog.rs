//! Ordered heading-pattern catalog.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;

/// Role of a heading pattern in bounding the abstract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Marks the start of the abstract.
    Start,
    /// Marks the section that follows the abstract.
    End,
}

/// Numbering or bullet token allowed before a heading word:
/// `(57)`, `[57]`, `2.`, `3)`, `IV.`, `•`.
const PREFIX: &str = r"(?:\(\s*\d+\s*\)|\[\s*\d+\s*\]|\d+\s*[.)]|[ivxIVX]+\.|[•●■▪*\-])";

/// Builtin patterns: (name, kind, regex).
///
/// Start patterns go from most to least anchored. End patterns either span
/// a whole line (so body text that happens to begin with "Field" does not
/// end the abstract) or match the front-page claim count.
const DEFAULT_PATTERNS: &[(&str, BoundaryKind, &str)] = &[
    (
        "inid-abstract",
        BoundaryKind::Start,
        r"(?i)^\s*[(\[]\s*57\s*[)\]]\s*abstract(?:\s+of\s+the\s+(?:disclosure|invention))?\b",
    ),
    (
        "numbered-abstract",
        BoundaryKind::Start,
        r"(?i)^\s*(?:{PREFIX}\s*)?abstract(?:\s+of\s+the\s+(?:disclosure|invention))?\b",
    ),
    (
        "abstract",
        BoundaryKind::Start,
        r"\b(?:ABSTRACT|Abstract)\b",
    ),
    (
        "background",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?background(?:\s+art|\s+of\s+the\s+(?:invention|disclosure))?\s*[:.]?\s*$",
    ),
    (
        "field",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?(?:technical\s+)?field(?:\s+of\s+the\s+(?:invention|disclosure))?\s*[:.]?\s*$",
    ),
    (
        "summary",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?summary(?:\s+of\s+the\s+(?:invention|disclosure))?\s*[:.]?\s*$",
    ),
    (
        "brief-description",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?brief\s+description\s+of\s+(?:the\s+)?(?:several\s+views\s+of\s+the\s+)?drawings?(?:\s+figures)?\s*[:.]?\s*$",
    ),
    (
        "detailed-description",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?detailed\s+description\b[^.]*[:.]?\s*$",
    ),
    (
        "description",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?description(?:\s+of\s+(?:the\s+)?(?:invention|embodiments?))?\s*[:.]?\s*$",
    ),
    (
        "claims",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?(?:claims?|what\s+is\s+claimed\s+is|we\s+claim|i\s+claim)\s*[:.]?\s*$",
    ),
    (
        "related-applications",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?(?:cross[\s-]+references?\s+to\s+)?related\s+applications?(?:\s+data)?\s*[:.]?\s*$",
    ),
    (
        "references-cited",
        BoundaryKind::End,
        r"(?i)^\s*(?:{PREFIX}\s*)?references\s+cited\b",
    ),
    (
        "claim-count",
        BoundaryKind::End,
        r"(?i)^\s*(?:\d+\s+)?claims?\s*,|\d+\s+claims?\s*,\s*\d+\s+drawing\s+sheets?",
    ),
    (
        "inid-code",
        BoundaryKind::End,
        r"^\s*\(\s*\d{2}\s*\)(?:\s+[A-Z]|\s*$)",
    ),
];

/// A named regular expression bounding the abstract on one side.
#[derive(Debug, Clone)]
pub struct HeadingPattern {
    name: String,
    kind: BoundaryKind,
    regex: Regex,
}

impl HeadingPattern {
    /// Compile a heading pattern.
    pub fn new(name: impl Into<String>, kind: BoundaryKind, pattern: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            kind,
            regex: Regex::new(pattern)?,
        })
    }

    /// Pattern name, used in log output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Which side of the abstract this pattern bounds.
    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    /// Byte offset just past the first match in `text`.
    pub fn find_end(&self, text: &str) -> Option<usize> {
        self.regex.find(text).map(|m| m.end())
    }
}

/// Ordered list of start and end heading patterns.
///
/// Patterns are tried in insertion order; the first match on a line wins.
#[derive(Debug, Clone)]
pub struct HeadingCatalog {
    patterns: Vec<HeadingPattern>,
}

impl HeadingCatalog {
    /// Create a catalog with no patterns.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The shared builtin catalog.
    pub fn builtin() -> &'static HeadingCatalog {
        static BUILTIN: OnceLock<HeadingCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let patterns = DEFAULT_PATTERNS
                .iter()
                .map(|(name, kind, pattern)| {
                    HeadingPattern::new(*name, *kind, &pattern.replace("{PREFIX}", PREFIX))
                        .unwrap()
                })
                .collect();
            HeadingCatalog { patterns }
        })
    }

    /// Append a pattern after the existing ones.
    pub fn push(&mut self, name: impl Into<String>, kind: BoundaryKind, pattern: &str) -> Result<()> {
        self.patterns.push(HeadingPattern::new(name, kind, pattern)?);
        Ok(())
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_pattern(
        mut self,
        name: impl Into<String>,
        kind: BoundaryKind,
        pattern: &str,
    ) -> Result<Self> {
        self.push(name, kind, pattern)?;
        Ok(self)
    }

    /// Iterate over all patterns in order.
    pub fn patterns(&self) -> impl Iterator<Item = &HeadingPattern> {
        self.patterns.iter()
    }

    /// Get the number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the catalog has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First start pattern matching `text`, with the offset where the
    /// heading token ends.
    pub fn match_start(&self, text: &str) -> Option<(&HeadingPattern, usize)> {
        self.of_kind(BoundaryKind::Start)
            .find_map(|p| p.find_end(text).map(|end| (p, end)))
    }

    /// First end pattern matching `text`.
    pub fn match_end(&self, text: &str) -> Option<&HeadingPattern> {
        self.of_kind(BoundaryKind::End)
            .find(|p| p.find_end(text).is_some())
    }

    fn of_kind(&self, kind: BoundaryKind) -> impl Iterator<Item = &HeadingPattern> {
        self.patterns.iter().filter(move |p| p.kind == kind)
    }
}

impl Default for HeadingCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_name(text: &str) -> Option<&'static str> {
        HeadingCatalog::builtin()
            .match_start(text)
            .map(|(p, _)| p.name())
    }

    fn end_name(text: &str) -> Option<&'static str> {
        HeadingCatalog::builtin().match_end(text).map(|p| p.name())
    }

    #[test]
    fn test_builtin_compiles() {
        let catalog = HeadingCatalog::builtin();
        assert_eq!(catalog.len(), DEFAULT_PATTERNS.len());
        assert!(catalog.patterns().any(|p| p.kind() == BoundaryKind::Start));
    }

    #[test]
    fn test_start_patterns_in_order() {
        assert_eq!(start_name("(57) Abstract"), Some("inid-abstract"));
        assert_eq!(start_name("[57]   ABSTRACT"), Some("inid-abstract"));
        assert_eq!(start_name("Abstract: A device"), Some("numbered-abstract"));
        assert_eq!(start_name("1. ABSTRACT OF THE DISCLOSURE"), Some("numbered-abstract"));
        assert_eq!(start_name("• abstract"), Some("numbered-abstract"));
        assert_eq!(
            start_name("Primary Examiner: J. Doe (57) ABSTRACT"),
            Some("abstract")
        );
    }

    #[test]
    fn test_body_text_is_not_a_start() {
        assert_eq!(start_name("an abstract data model of the network"), None);
        assert_eq!(start_name("abstraction layer"), None);
        assert_eq!(start_name("ABSTRACTS"), None);
    }

    #[test]
    fn test_match_start_offset() {
        let text = "(57) Abstract: A valve";
        let (_, end) = HeadingCatalog::builtin().match_start(text).unwrap();
        assert_eq!(&text[end..], ": A valve");
    }

    #[test]
    fn test_end_patterns() {
        assert_eq!(end_name("Background of the Invention"), Some("background"));
        assert_eq!(end_name("BACKGROUND"), Some("background"));
        assert_eq!(end_name("1. Field of the Invention"), Some("field"));
        assert_eq!(end_name("TECHNICAL FIELD"), Some("field"));
        assert_eq!(end_name("Summary:"), Some("summary"));
        assert_eq!(
            end_name("BRIEF DESCRIPTION OF THE DRAWINGS"),
            Some("brief-description")
        );
        assert_eq!(
            end_name("Detailed Description of the Preferred Embodiments"),
            Some("detailed-description")
        );
        assert_eq!(end_name("What is claimed is:"), Some("claims"));
        assert_eq!(
            end_name("CROSS-REFERENCE TO RELATED APPLICATIONS"),
            Some("related-applications")
        );
        assert_eq!(end_name("References Cited"), Some("references-cited"));
        assert_eq!(end_name("12 Claims, 5 Drawing Sheets"), Some("claim-count"));
        assert_eq!(end_name("(22) Filed: Mar. 3, 2001"), Some("inid-code"));
    }

    #[test]
    fn test_body_text_is_not_an_end() {
        assert_eq!(end_name("field effect transistor is coupled to"), None);
        assert_eq!(end_name("background noise is filtered by the"), None);
        assert_eq!(end_name("the claims of a parent case"), None);
        assert_eq!(end_name("(10) a valve"), None);
    }

    #[test]
    fn test_custom_pattern() {
        let catalog = HeadingCatalog::empty()
            .with_pattern("zusammenfassung", BoundaryKind::Start, r"(?i)^zusammenfassung")
            .unwrap()
            .with_pattern("beschreibung", BoundaryKind::End, r"(?i)^beschreibung")
            .unwrap();
        assert!(catalog.match_start("Zusammenfassung").is_some());
        assert!(catalog.match_start("Abstract").is_none());
        assert!(catalog.match_end("Beschreibung").is_some());
    }

    #[test]
    fn test_invalid_pattern() {
        let mut catalog = HeadingCatalog::empty();
        assert!(catalog.push("broken", BoundaryKind::End, "(").is_err());
        assert!(catalog.is_empty());
    }
}
