//! Error types for patabs library.

use std::io;
use thiserror::Error;

/// Result type alias for patabs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures: the document could not be read at all.
///
/// Formatting heterogeneity inside a readable document never produces an
/// `Error`; see [`LocateError`] for the recoverable outcomes.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A word list could not be loaded.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// A ground-truth file could not be read or parsed.
    #[error("Ground truth error: {0}")]
    GroundTruth(String),

    /// A heading pattern failed to compile.
    #[error("Invalid heading pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::GroundTruth(err.to_string())
    }
}

/// Recoverable outcomes of span location.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    /// No start heading matched anywhere in the scanned lines.
    #[error("no abstract heading found")]
    HeadingNotFound,

    /// The start heading is immediately followed by an end heading.
    #[error("abstract heading is followed by no content")]
    EmptySpan,
}
