//! Word-membership oracle used to adjudicate line-boundary merges.
//!
//! The lexicon answers one question: is this string a word? Lookups are
//! case-insensitive and ignore punctuation around the word, so tokens can be
//! passed exactly as they appear in extracted text (`"loads."`, `"(device"`).

mod word_list;

use std::sync::Arc;

pub use word_list::WordList;

/// Word-membership test.
///
/// Implementations are read-only after construction and shared freely
/// across threads.
pub trait Lexicon: Send + Sync {
    /// Check whether `word` is a known word.
    fn contains(&self, word: &str) -> bool;
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

impl<L: Lexicon + ?Sized> Lexicon for Box<L> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

impl<L: Lexicon + ?Sized> Lexicon for Arc<L> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

/// Reduce a token to its lookup key: surrounding punctuation removed, lowercased.
///
/// Returns an empty string when the token has no alphanumeric content.
pub fn lookup_key(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
