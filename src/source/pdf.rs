//! lopdf-backed line source.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId, Stream};

use crate::detect::{detect_pdf_header, detect_pdf_header_bytes};
use crate::error::{Error, Result};

use super::layout::{self, ContentOp, PdfValue};
use super::LineSource;

/// US Letter width, used when a page has no usable MediaBox.
const DEFAULT_PAGE_WIDTH: f32 = 612.0;

/// Page lines read from a PDF file.
pub struct PdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    column_clip: bool,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let header = detect_pdf_header(path)?;
        log::debug!("Opening {} ({})", path.display(), header);
        Self::from_document(LopdfDocument::load(path)?)
    }

    /// Load a PDF from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_pdf_header_bytes(data)?;
        Self::from_document(LopdfDocument::load_mem(data)?)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        Ok(Self {
            doc,
            pages,
            column_clip: true,
        })
    }

    /// Enable or disable front-page column clipping.
    pub fn with_column_clip(mut self, clip: bool) -> Self {
        self.column_clip = clip;
        self
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&(page + 1))
            .copied()
            .ok_or(Error::PageOutOfRange(page + 1, self.page_count()))
    }

    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let contents = page_dict.get(b"Contents")?;

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => stream_bytes(s),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            content.extend_from_slice(&stream_bytes(s)?);
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// MediaBox width, following `Parent` links for inherited boxes.
    fn page_width(&self, page_id: ObjectId) -> f32 {
        let mut id = page_id;
        for _ in 0..16 {
            let Ok(dict) = self.doc.get_dictionary(id) else {
                break;
            };
            if let Ok(media_box) = dict.get(b"MediaBox") {
                let media_box = match media_box {
                    Object::Reference(r) => self.doc.get_object(*r).ok(),
                    other => Some(other),
                };
                if let Some(Object::Array(values)) = media_box {
                    let numbers: Vec<f32> = values.iter().filter_map(number_from_object).collect();
                    if numbers.len() == 4 {
                        return (numbers[2] - numbers[0]).abs();
                    }
                }
                break;
            }
            match dict.get(b"Parent").and_then(Object::as_reference) {
                Ok(parent) => id = parent,
                Err(_) => break,
            }
        }
        DEFAULT_PAGE_WIDTH
    }
}

impl LineSource for PdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page: u32) -> Result<Vec<String>> {
        let page_id = self.page_id(page)?;
        let fonts = self.doc.get_page_fonts(page_id)?;
        let encodings: HashMap<_, _> = fonts
            .iter()
            .filter_map(|(name, dict)| {
                dict.get_font_encoding(&self.doc)
                    .ok()
                    .map(|encoding| (name.clone(), encoding))
            })
            .collect();

        let content = self.page_content(page_id)?;
        let ops: Vec<ContentOp> = lopdf::content::Content::decode(&content)?
            .operations
            .into_iter()
            .map(|op| ContentOp::new(op.operator, op.operands.iter().map(convert_object).collect()))
            .collect();

        let mut runs = layout::extract_runs(&ops, |font, bytes| {
            encodings
                .get(font)
                .and_then(|encoding| LopdfDocument::decode_text(encoding, bytes).ok())
                .unwrap_or_else(|| decode_text_simple(bytes))
        });

        if page == 0 && self.column_clip {
            runs = layout::clip_to_abstract_column(runs, self.page_width(page_id));
        }

        let lines = layout::group_into_lines(runs);
        log::debug!("Page {}: {} lines", page + 1, lines.len());
        Ok(lines)
    }
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Raw bytes of a stream, decoded through its filters when it has any.
fn stream_bytes(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.has(b"Filter") {
        Ok(stream.decompressed_content()?)
    } else {
        Ok(stream.content.clone())
    }
}

fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

fn number_from_object(obj: &Object) -> Option<f32> {
    layout::number_from_value(&convert_object(obj))
}
