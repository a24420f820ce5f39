//! Extraction options and configuration.

/// Options for extracting an abstract from a document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode for page-level extraction failures
    pub error_mode: ErrorMode,

    /// Number of leading pages to read (abstracts live on the front page,
    /// occasionally continuing onto the second)
    pub max_pages: u32,

    /// Drop noise lines (classification codes, citations, diagram labels)
    /// from the located span and honor `(Continued)` markers
    pub strip_noise: bool,

    /// Clip the front page to the ABSTRACT column on two-column layouts
    pub column_clip: bool,

    /// Apply NFC normalization and ligature folding to extracted lines
    pub unicode_cleanup: bool,

    /// Line-boundary merge thresholds
    pub merge: MergePolicy,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on the first page that cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Skip pages that cannot be extracted.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the number of leading pages to read.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages.max(1);
        self
    }

    /// Enable or disable noise-line filtering inside the span.
    pub fn with_strip_noise(mut self, strip: bool) -> Self {
        self.strip_noise = strip;
        self
    }

    /// Enable or disable front-page column clipping.
    pub fn with_column_clip(mut self, clip: bool) -> Self {
        self.column_clip = clip;
        self
    }

    /// Enable or disable Unicode cleanup of extracted lines.
    pub fn with_unicode_cleanup(mut self, cleanup: bool) -> Self {
        self.unicode_cleanup = cleanup;
        self
    }

    /// Set the merge policy.
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge = policy;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_pages: 2,
            strip_noise: false,
            column_clip: true,
            unicode_cleanup: true,
            merge: MergePolicy::default(),
        }
    }
}

/// Error handling mode during page extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    Strict,
    /// Skip unreadable pages and continue
    #[default]
    Lenient,
}

/// Thresholds for merging a silent (unhyphenated) line-boundary split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    /// Tokens with fewer letters than this count as fragments even when
    /// they are listed in the lexicon
    pub min_word_len: usize,

    /// A trailing token shorter than this never starts a silent merge
    pub min_trailing_len: usize,
}

impl MergePolicy {
    /// Create a merge policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum standalone word length.
    pub fn with_min_word_len(mut self, len: usize) -> Self {
        self.min_word_len = len;
        self
    }

    /// Set the minimum trailing fragment length.
    pub fn with_min_trailing_len(mut self, len: usize) -> Self {
        self.min_trailing_len = len.max(1);
        self
    }
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            min_word_len: 2,
            min_trailing_len: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .strict()
            .with_max_pages(3)
            .with_strip_noise(true)
            .with_column_clip(false);

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.max_pages, 3);
        assert!(options.strip_noise);
        assert!(!options.column_clip);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.max_pages, 2);
        assert!(!options.strip_noise);
        assert!(options.unicode_cleanup);
        assert_eq!(options.merge, MergePolicy::default());
    }

    #[test]
    fn test_max_pages_at_least_one() {
        assert_eq!(ExtractOptions::new().with_max_pages(0).max_pages, 1);
    }

    #[test]
    fn test_merge_policy_builder() {
        let policy = MergePolicy::new()
            .with_min_word_len(4)
            .with_min_trailing_len(0);
        assert_eq!(policy.min_word_len, 4);
        assert_eq!(policy.min_trailing_len, 1);
    }
}
