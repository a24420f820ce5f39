//! PDF header sniffing.
//!
//! Patent downloads regularly turn out to be HTML error pages or truncated
//! files. Checking the `%PDF-x.y` header first gives those a clear
//! [`Error::UnknownFormat`] instead of an opaque parse failure.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header information of a PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// Declared PDF version, e.g. "1.4"
    pub version: String,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3;

/// Bytes read from the start of a file.
const HEADER_SCAN_LEN: u64 = 1024;

/// Read and validate the header of a file.
///
/// Some generators put a few bytes of junk before the magic, so the header
/// may start anywhere in the first kilobyte.
///
/// # Example
/// ```no_run
/// use patabs::detect::detect_pdf_header;
///
/// let header = detect_pdf_header("US1234567B2.pdf").unwrap();
/// println!("PDF version: {}", header.version);
/// ```
pub fn detect_pdf_header<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let mut head = Vec::new();
    File::open(path)?
        .take(HEADER_SCAN_LEN)
        .read_to_end(&mut head)?;
    detect_pdf_header_bytes(&head)
}

/// Validate the header of in-memory PDF data.
pub fn detect_pdf_header_bytes(data: &[u8]) -> Result<PdfHeader> {
    let head = &data[..data.len().min(HEADER_SCAN_LEN as usize)];
    let start = head
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version_start = start + PDF_MAGIC.len();
    let version_bytes = head
        .get(version_start..version_start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(PdfHeader { version })
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if a file starts with a PDF header.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_pdf_header(path).is_ok()
}
