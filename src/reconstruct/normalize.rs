//! Text normalization helpers.

use unicode_normalization::UnicodeNormalization;

/// Ligatures commonly emitted by PDF text extraction.
const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Punctuation left between a heading token and the text sharing its line.
const HEADING_RESIDUE: &[char] = &[
    ':', ';', '.', ',', '-', '\u{2013}', '\u{2014}', ')', ']', '}', '"', '\'', '\u{201C}',
    '\u{201D}', '\u{2018}', '\u{2019}',
];

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Quotes that may open inline abstract text, with their closers.
const OPENING_QUOTES: [(char, char); 4] = [
    ('"', '"'),
    ('\'', '\''),
    ('\u{201C}', '\u{201D}'),
    ('\u{2018}', '\u{2019}'),
];

/// Remove punctuation that a heading token left around inline abstract text.
///
/// `"(57) Abstract: A valve..."` leaves `": A valve..."` after the heading;
/// this returns `"A valve..."`. An opening quote at the start and a closing
/// quote or bracket at the end are dropped only when nothing in the text
/// pairs with them.
pub fn strip_heading_residue(fragment: &str) -> String {
    let mut text = trim_leading_residue(fragment);

    loop {
        let Some(first) = text.chars().next() else {
            break;
        };
        let Some(&(_, closer)) = OPENING_QUOTES.iter().find(|(open, _)| *open == first) else {
            break;
        };
        if !is_unbalanced(text, first, closer) {
            break;
        }
        text = trim_leading_residue(&text[first.len_utf8()..]);
    }

    let mut text = text.trim_end();
    loop {
        let Some(last) = text.chars().last() else {
            break;
        };
        let opener = match last {
            ')' => '(',
            ']' => '[',
            '"' => '"',
            '\u{201D}' => '\u{201C}',
            _ => break,
        };
        if !is_unbalanced(text, last, opener) {
            break;
        }
        text = text[..text.len() - last.len_utf8()].trim_end();
    }

    collapse_whitespace(text)
}

fn trim_leading_residue(text: &str) -> &str {
    text.trim_start_matches(|c: char| {
        c.is_whitespace()
            || (HEADING_RESIDUE.contains(&c) && !OPENING_QUOTES.iter().any(|(open, _)| *open == c))
    })
}

/// Check whether `mark` outnumbers its `partner` in `text`. A symmetric
/// mark such as `"` is unbalanced when it occurs an odd number of times.
fn is_unbalanced(text: &str, mark: char, partner: char) -> bool {
    if mark == partner {
        text.matches(mark).count() % 2 == 1
    } else {
        text.matches(mark).count() > text.matches(partner).count()
    }
}

/// NFC-normalize a line, fold ligatures, and drop replacement characters.
pub fn clean_unicode(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.nfc() {
        if c == '\u{FFFD}' {
            continue;
        }
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, replacement)) => result.push_str(replacement),
            None => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("already clean"), "already clean");
    }

    #[test]
    fn test_strip_heading_residue_leading() {
        assert_eq!(strip_heading_residue(": A valve assembly."), "A valve assembly.");
        assert_eq!(strip_heading_residue(" \u{2014} A valve"), "A valve");
        assert_eq!(strip_heading_residue("]  A valve"), "A valve");
    }

    #[test]
    fn test_strip_heading_residue_unbalanced_closer() {
        assert_eq!(strip_heading_residue("A valve (12) assembly)"), "A valve (12) assembly");
        assert_eq!(strip_heading_residue("A valve (12)"), "A valve (12)");
        assert_eq!(strip_heading_residue("\"A valve"), "A valve");
        assert_eq!(strip_heading_residue("A \"valve\""), "A \"valve\"");
    }

    #[test]
    fn test_strip_heading_residue_balanced_opener() {
        assert_eq!(
            strip_heading_residue(": \"Widget\" is a small pump."),
            "\"Widget\" is a small pump."
        );
        assert_eq!(
            strip_heading_residue("\u{201C}Widget\u{201D} pumps"),
            "\u{201C}Widget\u{201D} pumps"
        );
        assert_eq!(strip_heading_residue(": \u{201C}A valve"), "A valve");
        assert_eq!(strip_heading_residue("' A valve"), "A valve");
    }

    #[test]
    fn test_strip_heading_residue_empty() {
        assert_eq!(strip_heading_residue(" : ) "), "");
    }

    #[test]
    fn test_clean_unicode() {
        assert_eq!(clean_unicode("e\u{FB03}cient \u{FB02}ow"), "efficient flow");
        assert_eq!(clean_unicode("Hello\u{FFFD}World"), "HelloWorld");
        assert_eq!(clean_unicode("cafe\u{0301}"), "caf\u{00E9}");
    }
}
