//! Integration tests for locating and reconstructing abstracts from lines.

use std::io::Write;
use std::sync::Arc;

use patabs::{
    collect_document, decide, reconstruct, AbstractExtractor, BoundaryKind, Document,
    ExtractOptions, HeadingCatalog, Join, Lexicon, LocateError, Locator, MergePolicy,
    TextSource, WordList,
};

#[test]
fn test_end_to_end_hyphenated() {
    let lines = [
        "(57) Abstract",
        "A device providing improved effi-",
        "ciency in power deliv-",
        "ery to attached loads.",
        "Background of the Invention",
        "...",
    ];
    assert_eq!(
        patabs::extract_abstract_from_lines(&lines).as_deref(),
        Some("A device providing improved efficiency in power delivery to attached loads.")
    );
}

#[test]
fn test_end_to_end_silent_split() {
    let lines = ["Abstract", "The system main-", "tains a constant", "voltage output."];
    assert_eq!(
        patabs::extract_abstract_from_lines(&lines).as_deref(),
        Some("The system maintains a constant voltage output.")
    );
}

#[test]
fn test_heading_boundary() {
    let doc = Document::from_lines([
        "(12) United States Patent",
        "(57) Abstract",
        "A valve assembly",
        "having a seat.",
        "Background of the Invention",
        "Valves are known.",
    ]);
    let span = Locator::default().locate(&doc).unwrap();
    assert_eq!(span.range(), 2..4);
    assert!(span.lead.is_none());
    assert_eq!(span.texts(&doc), vec!["A valve assembly", "having a seat."]);
}

#[test]
fn test_no_heading() {
    let doc = Document::from_lines(["A valve assembly", "having a seat."]);
    assert_eq!(
        Locator::default().locate(&doc),
        Err(LocateError::HeadingNotFound)
    );
}

#[test]
fn test_empty_span() {
    let doc = Document::from_lines(["(57) ABSTRACT", "FIELD OF THE INVENTION", "Pumps."]);
    assert_eq!(Locator::default().locate(&doc), Err(LocateError::EmptySpan));
    assert_eq!(
        patabs::extract_abstract_from_lines(&["(57) ABSTRACT", "FIELD OF THE INVENTION"])
            .as_deref(),
        Some("")
    );
}

#[test]
fn test_single_line_is_normalized_only() {
    let line = "  A heat  exchanger with   fins.  ";
    assert_eq!(reconstruct(&[line]), "A heat exchanger with fins.");

    let normalized = "A heat exchanger with fins.";
    assert_eq!(reconstruct(&[normalized]), normalized);
}

#[test]
fn test_hyphen_split_always_merges() {
    let lexicon = WordList::new();
    let policy = MergePolicy::default();
    assert_eq!(decide("xy-", "zq", &lexicon, &policy), Join::MergeStrippedHyphen);
    assert_eq!(reconstruct(&["a xy-", "zq b"]), "a xyzq b");
}

#[test]
fn test_silent_split_uses_lexicon() {
    assert_eq!(
        reconstruct(&["a rigid hous", "ing and a conduc", "tor."]),
        "a rigid housing and a conductor."
    );
}

#[test]
fn test_complete_words_stay_apart() {
    let lexicon = WordList::builtin();
    assert!(lexicon.contains("outside"));
    assert_eq!(
        decide("out", "side", lexicon, &MergePolicy::default()),
        Join::KeepSpace
    );
    assert_eq!(reconstruct(&["mounted out", "side the housing"]), "mounted out side the housing");
}

#[test]
fn test_two_letter_words_stay_apart() {
    let lexicon = WordList::builtin();
    let policy = MergePolicy::default();
    assert!(lexicon.contains("below"));
    assert_eq!(decide("be", "low", lexicon, &policy), Join::KeepSpace);
    assert_eq!(decide("in", "to", lexicon, &policy), Join::KeepSpace);

    assert_eq!(
        reconstruct(&["The current may be", "low when idle."]),
        "The current may be low when idle."
    );
    assert_eq!(
        patabs::extract_abstract_from_lines(&["Abstract", "Power is fed in", "to the motor."])
            .as_deref(),
        Some("Power is fed in to the motor.")
    );
}

#[test]
fn test_uppercase_silent_split_merges() {
    let lexicon = WordList::builtin();
    assert_eq!(
        decide("EFFI", "CIENCY", lexicon, &MergePolicy::default()),
        Join::MergeNoSpace
    );
    assert_eq!(reconstruct(&["IMPROVED EFFI", "CIENCY."]), "IMPROVED EFFICIENCY.");
    assert_eq!(reconstruct(&["improved EFFI", "ciency"]), "improved EFFI ciency");
}

#[test]
fn test_inline_heading_with_quoted_term() {
    assert_eq!(
        patabs::extract_abstract_from_lines(&[
            "(57) Abstract: \u{201C}Widget\u{201D} is a small pump.",
            "Background of the Invention",
        ])
        .as_deref(),
        Some("\u{201C}Widget\u{201D} is a small pump.")
    );
}

#[test]
fn test_custom_catalog() {
    let catalog = HeadingCatalog::empty()
        .with_pattern("zusammenfassung", BoundaryKind::Start, r"(?i)^\s*zusammenfassung")
        .unwrap()
        .with_pattern("ansprueche", BoundaryKind::End, r"(?i)^\s*patentansprüche")
        .unwrap();
    let extractor = AbstractExtractor::new().with_catalog(catalog);
    let lines = [
        "Zusammenfassung",
        "Eine Pumpe mit einem Laufrad.",
        "Patentansprüche",
    ];
    assert_eq!(
        extractor.extract_lines(&lines).as_deref(),
        Some("Eine Pumpe mit einem Laufrad.")
    );
}

#[test]
fn test_custom_lexicon_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# domain words").unwrap();
    writeln!(file, "zircaloy").unwrap();
    writeln!(file, "electrospinning").unwrap();

    let words = WordList::from_path(file.path()).unwrap();
    let lexicon: Arc<dyn Lexicon> = Arc::new(words);
    let extractor = AbstractExtractor::new().with_lexicon(lexicon);
    assert_eq!(
        extractor
            .extract_lines(&["ABSTRACT", "Fibers formed by electro", "spinning a zirca", "loy melt."])
            .as_deref(),
        Some("Fibers formed by electrospinning a zircaloy melt.")
    );
}

#[test]
fn test_text_dump_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "(12) United States Patent\n\u{000C}(57) ABSTRACT\nA battery pack compris-\ning a plurality of cells.\nBACKGROUND\n\u{000C}Late page Abstract\n"
    )
    .unwrap();

    let source = TextSource::from_path(file.path()).unwrap();
    let doc = collect_document(&source, &ExtractOptions::default()).unwrap();
    assert_eq!(doc.page_count, 2);

    let extractor = AbstractExtractor::new();
    assert_eq!(
        extractor.extract_source(&source).unwrap().as_deref(),
        Some("A battery pack comprising a plurality of cells.")
    );
}

#[test]
fn test_abstract_beyond_page_limit_not_found() {
    let source = TextSource::from_text("Cover\u{000C}Drawings\u{000C}Abstract\nA pump.");
    let extractor = AbstractExtractor::new();
    assert_eq!(extractor.extract_source(&source).unwrap(), None);
}

#[test]
fn test_malformed_lines_never_panic() {
    let lines = [
        "Abstract",
        "",
        "-",
        "- -",
        "\u{FFFD}\u{FFFD}",
        "(",
        "x-",
        "",
        "))",
    ];
    let text = patabs::extract_abstract_from_lines(&lines).unwrap();
    assert!(!text.contains("  "));
    assert_eq!(text, text.trim());
}

#[test]
fn test_deterministic_output() {
    let lines = ["(57) Abstract", "A device providing improved effi-", "ciency."];
    let first = patabs::extract_abstract_from_lines(&lines);
    for _ in 0..10 {
        assert_eq!(patabs::extract_abstract_from_lines(&lines), first);
    }
}
