//! Line-boundary join decision.

use crate::lexicon::{lookup_key, Lexicon};
use crate::options::MergePolicy;

/// Characters that mark a line-wrap hyphenation.
const HYPHENS: [char; 3] = ['-', '\u{00AD}', '\u{2010}'];

/// How two tokens meeting at a line boundary are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Drop the trailing hyphen and concatenate: `effi-` + `ciency`.
    MergeStrippedHyphen,
    /// Concatenate without a space: `effi` + `ciency`.
    MergeNoSpace,
    /// Ordinary wrap between two words: join with one space.
    KeepSpace,
}

/// Classify the boundary between the last token of one line and the first
/// token of the next.
///
/// Rules, in priority order:
/// 1. a trailing hyphen after a letter or digit always merges, hyphen dropped;
/// 2. an unhyphenated pair merges when the concatenation is a word and at
///    least one side is only a fragment;
/// 3. anything else keeps the space.
pub fn decide(trailing: &str, leading: &str, lexicon: &dyn Lexicon, policy: &MergePolicy) -> Join {
    if trailing.is_empty() || leading.is_empty() {
        return Join::KeepSpace;
    }

    if ends_with_wrap_hyphen(trailing) {
        return Join::MergeStrippedHyphen;
    }

    if is_silent_split(trailing, leading, lexicon, policy) {
        return Join::MergeNoSpace;
    }

    Join::KeepSpace
}

fn ends_with_wrap_hyphen(token: &str) -> bool {
    let mut chars = token.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(last), Some(before)) => HYPHENS.contains(&last) && before.is_alphanumeric(),
        _ => false,
    }
}

fn is_silent_split(
    trailing: &str,
    leading: &str,
    lexicon: &dyn Lexicon,
    policy: &MergePolicy,
) -> bool {
    // A split word runs letter-to-letter across the break without a change
    // of case: `effi|ciency` and `EFFI|CIENCY`, never `effi|Ciency`.
    let (Some(last), Some(first)) = (trailing.chars().last(), leading.chars().next()) else {
        return false;
    };
    if !last.is_alphabetic() || !first.is_alphabetic() {
        return false;
    }
    if last.is_lowercase() != first.is_lowercase() {
        return false;
    }

    if lookup_key(trailing).chars().count() < policy.min_trailing_len {
        return false;
    }

    let joined = format!("{}{}", trailing, leading);
    if !lexicon.contains(&joined) {
        return false;
    }

    !is_standalone_word(trailing, lexicon, policy) || !is_standalone_word(leading, lexicon, policy)
}

fn is_standalone_word(token: &str, lexicon: &dyn Lexicon, policy: &MergePolicy) -> bool {
    lookup_key(token).chars().count() >= policy.min_word_len && lexicon.contains(token)
}
