//! Span reconstruction engine.

use crate::lexicon::{Lexicon, WordList};
use crate::options::MergePolicy;

use super::decision::{decide, Join};
use super::normalize::collapse_whitespace;

/// Rejoins a run of lines into a single normalized string.
#[derive(Clone, Copy)]
pub struct Reconstructor<'a> {
    lexicon: &'a dyn Lexicon,
    policy: MergePolicy,
}

impl<'a> Reconstructor<'a> {
    /// Create a reconstructor backed by `lexicon` with the default policy.
    pub fn new(lexicon: &'a dyn Lexicon) -> Self {
        Self {
            lexicon,
            policy: MergePolicy::default(),
        }
    }

    /// Set the merge policy.
    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Join `lines`, resolving words split across line boundaries.
    ///
    /// Blank lines are skipped. The result has single spaces between words
    /// and no leading or trailing whitespace.
    pub fn reconstruct<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let mut out = String::new();
        let mut merges = 0usize;

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            if out.is_empty() {
                out.push_str(line);
                continue;
            }

            let trailing = out.split_whitespace().next_back().unwrap_or_default();
            let leading = line.split_whitespace().next().unwrap_or_default();
            let join = decide(trailing, leading, self.lexicon, &self.policy);
            log::trace!("{:?} | {:?} -> {:?}", trailing, leading, join);

            match join {
                Join::MergeStrippedHyphen => {
                    out.pop();
                    out.push_str(line);
                    merges += 1;
                }
                Join::MergeNoSpace => {
                    out.push_str(line);
                    merges += 1;
                }
                Join::KeepSpace => {
                    out.push(' ');
                    out.push_str(line);
                }
            }
        }

        log::debug!("Reconstructed {} lines with {} merges", lines.len(), merges);
        collapse_whitespace(&out)
    }
}

impl std::fmt::Debug for Reconstructor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconstructor")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Reconstruct with the builtin word list and default policy.
pub fn reconstruct<S: AsRef<str>>(lines: &[S]) -> String {
    Reconstructor::new(WordList::builtin()).reconstruct(lines)
}
