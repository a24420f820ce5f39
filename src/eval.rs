//! Scoring extracted abstracts against ground truth.
//!
//! Ground truth is a YAML file listing PDF paths and their expected
//! abstracts:
//!
//! ```yaml
//! tests:
//!   - path: pdfs/US1234567B2.pdf
//!     abstract: A device providing improved efficiency ...
//! ```
//!
//! Both sides are normalized (lowercase, punctuation removed, whitespace
//! collapsed) before comparison. A case counts as correct on exact match of
//! the normalized text; the edit distance divided by the longer length is
//! reported as a secondary measure.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One ground-truth entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// PDF path; relative paths are resolved against the YAML file
    pub path: PathBuf,

    /// Expected abstract text
    #[serde(rename = "abstract")]
    pub expected: String,
}

/// A ground-truth suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruth {
    #[serde(default)]
    pub tests: Vec<TestCase>,
}

impl GroundTruth {
    /// Parse a suite from YAML text. Paths are kept as written.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a suite, resolving relative paths against the file's directory.
    pub fn from_yaml_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::GroundTruth(format!("{}: {}", path.display(), e)))?;
        let mut truth = Self::from_yaml_str(&text)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for case in &mut truth.tests {
            if case.path.is_relative() {
                case.path = base.join(&case.path);
            }
        }
        log::debug!("Loaded {} cases from {}", truth.len(), path.display());
        Ok(truth)
    }

    /// Get the number of cases.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Check if the suite has no cases.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// Outcome of one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub path: PathBuf,
    pub expected: String,
    /// Extracted text; empty when nothing was found or extraction failed
    pub extracted: String,
    /// Normalized texts are identical
    pub exact: bool,
    /// Normalized edit distance, 0.0 (identical) to 1.0
    pub distance: f64,
    /// Extraction error message, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate scores for a suite.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvalReport {
    /// Fraction of exact matches, 0.0 to 1.0
    pub accuracy: f64,
    /// Mean normalized edit distance, 0.0 to 1.0
    pub average_distance: f64,
    pub cases: Vec<CaseResult>,
}

impl EvalReport {
    /// Number of evaluated cases.
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// Number of exact matches.
    pub fn correct(&self) -> usize {
        self.cases.iter().filter(|c| c.exact).count()
    }

    /// Cases that did not match exactly.
    pub fn mismatches(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| !c.exact)
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Other(e.to_string()))
    }
}

/// Lowercase, drop punctuation, collapse whitespace.
pub fn normalize_for_comparison(text: &str) -> String {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    let re = PUNCTUATION.get_or_init(|| Regex::new(r"[^\w\s]").unwrap());
    let lower = text.to_lowercase();
    re.replace_all(&lower, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Levenshtein distance divided by the longer string's length.
///
/// 0.0 when both are empty, 1.0 when exactly one is.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    strsim::levenshtein(a, b) as f64 / longest as f64
}

/// Score one extraction against its expected text.
pub fn score_case(case: &TestCase, outcome: Result<Option<String>>) -> CaseResult {
    let (extracted, error) = match outcome {
        Ok(text) => (text.unwrap_or_default(), None),
        Err(e) => (String::new(), Some(e.to_string())),
    };
    let expected = normalize_for_comparison(&case.expected);
    let actual = normalize_for_comparison(&extracted);

    CaseResult {
        path: case.path.clone(),
        expected: case.expected.clone(),
        extracted,
        exact: expected == actual,
        distance: levenshtein_ratio(&expected, &actual),
        error,
    }
}

/// Run `extract` on every case in parallel and aggregate the scores.
///
/// An empty suite scores 0.0 accuracy and 0.0 distance. Extraction
/// failures are scored as empty output.
pub fn evaluate<F>(truth: &GroundTruth, extract: F) -> EvalReport
where
    F: Fn(&Path) -> Result<Option<String>> + Sync,
{
    if truth.is_empty() {
        return EvalReport::default();
    }

    let cases: Vec<CaseResult> = truth
        .tests
        .par_iter()
        .map(|case| score_case(case, extract(&case.path)))
        .collect();

    let total = cases.len() as f64;
    let correct = cases.iter().filter(|c| c.exact).count() as f64;
    let distance: f64 = cases.iter().map(|c| c.distance).sum();

    let report = EvalReport {
        accuracy: correct / total,
        average_distance: distance / total,
        cases,
    };
    log::info!(
        "Evaluated {} cases: accuracy {:.3}, average distance {:.3}",
        report.total(),
        report.accuracy,
        report.average_distance
    );
    report
}
