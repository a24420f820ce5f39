//! HashSet-backed word list.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result};

use super::{lookup_key, Lexicon};

/// Builtin general-language word list, one word per line.
const BUILTIN_WORDS: &str = include_str!("../../data/words.txt");

/// Inflectional endings tried when a word is not listed directly:
/// (suffix, replacement appended to the stem).
const INFLECTIONS: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ied", "y"),
    ("ier", "y"),
    ("iest", "y"),
    ("ily", "y"),
    ("es", ""),
    ("s", ""),
    ("ed", ""),
    ("ed", "e"),
    ("ing", ""),
    ("ing", "e"),
    ("er", ""),
    ("er", "e"),
    ("est", ""),
    ("est", "e"),
    ("ly", ""),
    ("ness", ""),
    ("ment", ""),
];

/// Shortest stem an inflection may reduce a word to.
const MIN_STEM_LEN: usize = 3;

/// A static set of words.
#[derive(Debug, Clone)]
pub struct WordList {
    words: HashSet<String>,
    inflections: bool,
}

impl WordList {
    /// Create an empty word list.
    pub fn new() -> Self {
        Self {
            words: HashSet::new(),
            inflections: true,
        }
    }

    /// Build a word list from an iterator of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        list.extend(words);
        list
    }

    /// Parse a word list: whitespace-separated words, `#` starts a comment line.
    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#'))
                .flat_map(str::split_whitespace),
        )
    }

    /// Read a word list from a buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut list = Self::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            list.extend(line.split_whitespace());
        }
        Ok(list)
    }

    /// Load a word list file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Lexicon(format!("{}: {}", path.display(), e)))?;
        let list = Self::from_reader(BufReader::new(file))?;
        if list.is_empty() {
            return Err(Error::Lexicon(format!(
                "{}: word list is empty",
                path.display()
            )));
        }
        log::debug!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    /// The process-wide builtin word list, parsed on first use.
    pub fn builtin() -> &'static WordList {
        static BUILTIN: OnceLock<WordList> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::parse(BUILTIN_WORDS))
    }

    /// Enable or disable inflection fallback (`-s`, `-ed`, `-ing`, ...).
    pub fn with_inflections(mut self, enabled: bool) -> Self {
        self.inflections = enabled;
        self
    }

    /// Add words to the list.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| lookup_key(w.as_ref()))
                .filter(|w| !w.is_empty()),
        );
    }

    /// Get the number of listed words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the list has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn contains_key(&self, key: &str) -> bool {
        if self.words.contains(key) {
            return true;
        }
        self.inflections && self.contains_inflected(key)
    }

    fn contains_inflected(&self, key: &str) -> bool {
        // "-ss" words (glass, process) are never plurals.
        let is_double_s = key.ends_with("ss");
        INFLECTIONS.iter().any(|(suffix, replacement)| {
            if is_double_s && *suffix == "s" {
                return false;
            }
            let Some(stem) = key.strip_suffix(suffix) else {
                return false;
            };
            if stem.chars().count() < MIN_STEM_LEN {
                return false;
            }
            if self.words.contains(&format!("{}{}", stem, replacement)) {
                return true;
            }
            // Doubled final consonant: "stopped" -> "stop".
            replacement.is_empty() && ends_with_doubled_consonant(stem) && {
                let mut chars = stem.chars();
                chars.next_back();
                self.words.contains(chars.as_str())
            }
        })
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon for WordList {
    fn contains(&self, word: &str) -> bool {
        let key = lookup_key(word);
        !key.is_empty() && self.contains_key(&key)
    }
}

fn ends_with_doubled_consonant(stem: &str) -> bool {
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) => a == b && a.is_alphabetic() && !"aeiou".contains(a),
        _ => false,
    }
}
