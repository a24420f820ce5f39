//! # patabs
//!
//! Abstract extraction for patent PDFs.
//!
//! Patent PDFs come from many offices and generators, and nearly all of
//! them wrap words across line boundaries: sometimes with a hyphen,
//! sometimes with a bare break in the middle of a word. This library finds
//! the abstract on the first pages of a patent and returns it as a single
//! string made of whole words.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> patabs::Result<()> {
//!     match patabs::extract_abstract("US1234567B2.pdf")? {
//!         Some(text) => println!("{}", text),
//!         None => eprintln!("no abstract heading found"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`source`]: reads page lines from a PDF (through lopdf) or a text dump
//! - [`locate`]: finds the abstract heading and the section that follows it
//! - [`reconstruct`]: rejoins words split across lines, using a [`Lexicon`]
//!   to tell a split word from two words that happen to meet at a line end
//! - [`eval`]: scores extraction output against a ground-truth suite

pub mod detect;
pub mod error;
pub mod eval;
pub mod lexicon;
pub mod locate;
pub mod model;
pub mod options;
pub mod reconstruct;
pub mod source;

pub use detect::{detect_pdf_header, is_pdf, PdfHeader};
pub use error::{Error, LocateError, Result};
pub use eval::{evaluate, EvalReport, GroundTruth};
pub use lexicon::{Lexicon, WordList};
pub use locate::{BoundaryKind, HeadingCatalog, Locator, NoiseFilter};
pub use model::{Document, Line, Span};
pub use options::{ErrorMode, ExtractOptions, MergePolicy};
pub use reconstruct::{decide, reconstruct, Join, Reconstructor};
pub use source::{collect_document, LineSource, PdfSource, TextSource};

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use reconstruct::normalize::strip_heading_residue;

/// Extract the abstract from a patent PDF.
///
/// Returns `Ok(None)` when no abstract heading is found and `Ok(Some(""))`
/// when the heading is directly followed by the next section. Errors are
/// reserved for files that cannot be read as PDF at all.
///
/// # Example
///
/// ```no_run
/// let text = patabs::extract_abstract("US1234567B2.pdf").unwrap();
/// ```
pub fn extract_abstract<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    AbstractExtractor::new().extract_file(path)
}

/// Extract the abstract from a patent PDF with custom options.
///
/// # Example
///
/// ```no_run
/// use patabs::{extract_abstract_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().strict().with_strip_noise(true);
/// let text = extract_abstract_with_options("US1234567B2.pdf", options).unwrap();
/// ```
pub fn extract_abstract_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Option<String>> {
    AbstractExtractor::new()
        .with_options(options)
        .extract_file(path)
}

/// Extract the abstract from PDF data in memory.
pub fn extract_abstract_from_bytes(data: &[u8]) -> Result<Option<String>> {
    AbstractExtractor::new().extract_bytes(data)
}

/// Extract the abstract from already-extracted text lines.
///
/// # Example
///
/// ```
/// let lines = ["Abstract", "The system main-", "tains a constant", "voltage output."];
/// assert_eq!(
///     patabs::extract_abstract_from_lines(&lines).as_deref(),
///     Some("The system maintains a constant voltage output.")
/// );
/// ```
pub fn extract_abstract_from_lines<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    AbstractExtractor::new().extract_lines(lines)
}

/// Configurable abstract extractor.
///
/// Holds the options, lexicon, and heading catalog; cheap to clone and safe
/// to share across threads.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use patabs::{AbstractExtractor, ExtractOptions, WordList};
///
/// let words = WordList::from_path("domain-words.txt").unwrap();
/// let extractor = AbstractExtractor::new()
///     .with_options(ExtractOptions::new().with_max_pages(3))
///     .with_lexicon(Arc::new(words));
///
/// for result in extractor.extract_many(&["a.pdf", "b.pdf"]) {
///     println!("{:?}", result);
/// }
/// ```
#[derive(Clone)]
pub struct AbstractExtractor {
    options: ExtractOptions,
    lexicon: Arc<dyn Lexicon>,
    catalog: HeadingCatalog,
}

impl AbstractExtractor {
    /// Create an extractor with default options, the builtin word list,
    /// and the builtin heading catalog.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            lexicon: Arc::new(WordList::builtin()),
            catalog: HeadingCatalog::default(),
        }
    }

    /// Set extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a different lexicon.
    pub fn with_lexicon(mut self, lexicon: Arc<dyn Lexicon>) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Use a different heading catalog.
    pub fn with_catalog(mut self, catalog: HeadingCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Get the options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract from a PDF file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Option<String>> {
        let source = PdfSource::open(path)?.with_column_clip(self.options.column_clip);
        self.extract_source(&source)
    }

    /// Extract from PDF data in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Option<String>> {
        let source = PdfSource::from_bytes(data)?.with_column_clip(self.options.column_clip);
        self.extract_source(&source)
    }

    /// Extract from any line source.
    pub fn extract_source<S: LineSource + ?Sized>(&self, source: &S) -> Result<Option<String>> {
        let doc = collect_document(source, &self.options)?;
        Ok(self.extract_document(&doc))
    }

    /// Extract from raw line texts.
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> Option<String> {
        let doc = Document::from_lines(lines.iter().map(|line| line.as_ref()));
        self.extract_document(&doc)
    }

    /// Locate and reconstruct the abstract of a document.
    pub fn extract_document(&self, doc: &Document) -> Option<String> {
        let span = match Locator::new(&self.catalog).locate(doc) {
            Ok(span) => span,
            Err(LocateError::HeadingNotFound) => {
                log::debug!("No abstract heading in {} lines", doc.len());
                return None;
            }
            Err(LocateError::EmptySpan) => return Some(String::new()),
        };

        let reconstructor = Reconstructor::new(&*self.lexicon).with_policy(self.options.merge);
        let mut text = if self.options.strip_noise {
            let noise = NoiseFilter::builtin();
            let lines = noise.collect(doc, &span, &self.catalog);
            noise.clean_text(&reconstructor.reconstruct(&lines))
        } else {
            reconstructor.reconstruct(&span.texts(doc))
        };
        // A quote or bracket opened before the heading token closes at the end.
        if span.lead.is_some() {
            text = strip_heading_residue(&text);
        }
        Some(text)
    }

    /// Extract from many PDF files in parallel, one task per file.
    ///
    /// Results are returned in input order.
    pub fn extract_many<P>(&self, paths: &[P]) -> Vec<Result<Option<String>>>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|path| self.extract_file(path)).collect()
    }
}

impl Default for AbstractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AbstractExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbstractExtractor")
            .field("options", &self.options)
            .field("catalog", &self.catalog.len())
            .finish_non_exhaustive()
    }
}
