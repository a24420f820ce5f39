//! Content-stream text layout.
//!
//! Walks decoded content-stream operations, tracks the text matrix, and
//! emits positioned text runs. Runs are then grouped into visual lines by
//! baseline and ordered top to bottom.

use std::cmp::Ordering;

/// A value from a content-stream operand.
#[derive(Debug, Clone)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single content-stream operation.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    fn number(&self, index: usize) -> Option<f32> {
        self.operands.get(index).and_then(number_from_value)
    }
}

/// A run of text drawn at one position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Left edge in user space
    pub x: f32,
    /// Baseline in user space (PDF y grows upward)
    pub y: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextRun {
    /// Approximate advance width, assuming half-em glyphs.
    pub fn estimated_width(&self) -> f32 {
        self.text.chars().count() as f32 * self.font_size * AVG_CHAR_WIDTH
    }
}

/// Average glyph width as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.5;

/// Gap between runs, as a fraction of the font size, that reads as a space.
const SPACE_GAP: f32 = 0.2;

/// Runs whose baselines differ by less than this fraction of the font size
/// share a line.
const BASELINE_TOLERANCE: f32 = 0.3;

/// TJ displacement (thousandths of an em) that reads as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Default leading when a document never sets `TL`.
const DEFAULT_LEADING: f32 = 12.0;

/// Text matrix state while walking a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    /// Start of the current line; `Td` and `T*` move relative to it
    line_e: f32,
    line_f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
            leading: DEFAULT_LEADING,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
        self.line_e = e;
        self.line_f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Advance past a run drawn at the current position.
    fn advance(&mut self, width: f32) {
        self.e += width * self.a;
        self.f += width * self.b;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Extract positioned text runs from content-stream operations.
///
/// `decode` turns a string operand into text given the current font
/// resource name.
pub fn extract_runs<F>(ops: &[ContentOp], decode: F) -> Vec<TextRun>
where
    F: Fn(&[u8], &[u8]) -> String,
{
    let mut runs = Vec::new();
    let mut font: Vec<u8> = Vec::new();
    let mut font_size: f32 = 12.0;
    let mut matrix = TextMatrix::default();
    let mut in_text = false;

    for op in ops {
        let text = match op.operator.as_str() {
            "BT" => {
                in_text = true;
                matrix = TextMatrix {
                    leading: matrix.leading,
                    ..TextMatrix::default()
                };
                None
            }
            "ET" => {
                in_text = false;
                None
            }
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    font = name.clone();
                }
                font_size = op.number(1).unwrap_or(font_size);
                None
            }
            "TL" => {
                matrix.leading = op.number(0).unwrap_or(DEFAULT_LEADING);
                None
            }
            "Td" => {
                matrix.translate(op.number(0).unwrap_or(0.0), op.number(1).unwrap_or(0.0));
                None
            }
            "TD" => {
                let ty = op.number(1).unwrap_or(0.0);
                matrix.leading = -ty;
                matrix.translate(op.number(0).unwrap_or(0.0), ty);
                None
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        op.number(0).unwrap_or(1.0),
                        op.number(1).unwrap_or(0.0),
                        op.number(2).unwrap_or(0.0),
                        op.number(3).unwrap_or(1.0),
                        op.number(4).unwrap_or(0.0),
                        op.number(5).unwrap_or(0.0),
                    );
                }
                None
            }
            "T*" => {
                matrix.next_line();
                None
            }
            "Tj" => match op.operands.first() {
                Some(PdfValue::Str(bytes)) => Some(decode(&font, bytes)),
                _ => None,
            },
            "TJ" => match op.operands.first() {
                Some(PdfValue::Array(items)) => Some(decode_tj_array(items, &font, &decode)),
                _ => None,
            },
            "'" | "\"" => {
                matrix.next_line();
                let index = if op.operator == "\"" { 2 } else { 0 };
                match op.operands.get(index) {
                    Some(PdfValue::Str(bytes)) => Some(decode(&font, bytes)),
                    _ => None,
                }
            }
            _ => None,
        };

        let Some(text) = text else {
            continue;
        };
        if !in_text || text.trim().is_empty() {
            continue;
        }

        let (x, y) = matrix.position();
        let run = TextRun {
            text,
            x,
            y,
            font_size: font_size * matrix.scale(),
        };
        matrix.advance(run.text.chars().count() as f32 * font_size * AVG_CHAR_WIDTH);
        runs.push(run);
    }

    runs
}

fn decode_tj_array<F>(items: &[PdfValue], font: &[u8], decode: &F) -> String
where
    F: Fn(&[u8], &[u8]) -> String,
{
    let mut combined = String::new();
    for item in items {
        match item {
            PdfValue::Str(bytes) => combined.push_str(&decode(font, bytes)),
            PdfValue::Integer(_) | PdfValue::Real(_) => {
                let adjustment = -number_from_value(item).unwrap_or(0.0);
                if adjustment > TJ_SPACE_THRESHOLD
                    && !combined.is_empty()
                    && !combined.ends_with(char::is_whitespace)
                {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

/// Drop runs left of the abstract column on a two-column front page.
///
/// When the first run containing "ABSTRACT" starts beyond 55% of the page
/// width, only runs starting at or after 200pt left of it are kept.
pub fn clip_to_abstract_column(runs: Vec<TextRun>, page_width: f32) -> Vec<TextRun> {
    const RIGHT_COLUMN_RATIO: f32 = 0.55;
    const CLIP_MARGIN: f32 = 200.0;

    if page_width <= 0.0 {
        return runs;
    }

    let heading_x = runs
        .iter()
        .filter(|run| run.text.to_uppercase().contains("ABSTRACT"))
        .min_by(|a, b| compare_reading_order(a, b))
        .map(|run| run.x);

    match heading_x {
        Some(x) if x / page_width > RIGHT_COLUMN_RATIO => {
            let clip_x = (x - CLIP_MARGIN).max(0.0);
            log::debug!("Clipping front page left of x={:.1}", clip_x);
            runs.into_iter().filter(|run| run.x >= clip_x).collect()
        }
        _ => runs,
    }
}

/// Group runs into lines, top to bottom, joining runs on one baseline
/// left to right.
pub fn group_into_lines(mut runs: Vec<TextRun>) -> Vec<String> {
    runs.sort_by(compare_reading_order);

    let mut lines = Vec::new();
    let mut current: Vec<TextRun> = Vec::new();
    let mut current_y: Option<f32> = None;

    for run in runs {
        let tolerance = run.font_size * BASELINE_TOLERANCE;
        match current_y {
            Some(y) if (run.y - y).abs() <= tolerance => current.push(run),
            _ => {
                if !current.is_empty() {
                    lines.push(join_runs(std::mem::take(&mut current)));
                }
                current_y = Some(run.y);
                current.push(run);
            }
        }
    }
    if !current.is_empty() {
        lines.push(join_runs(current));
    }

    lines
}

fn join_runs(mut runs: Vec<TextRun>) -> String {
    runs.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));

    let mut text = String::new();
    let mut prev: Option<&TextRun> = None;
    for run in &runs {
        if let Some(prev) = prev {
            let gap = run.x - (prev.x + prev.estimated_width());
            let spaced = text.ends_with(char::is_whitespace) || run.text.starts_with(char::is_whitespace);
            if gap > run.font_size * SPACE_GAP && !spaced {
                text.push(' ');
            }
        }
        text.push_str(&run.text);
        prev = Some(run);
    }
    text
}

/// Top to bottom (descending y), then left to right.
fn compare_reading_order(a: &TextRun, b: &TextRun) -> Ordering {
    b.y.partial_cmp(&a.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// Extract a number from a [`PdfValue`].
pub fn number_from_value(value: &PdfValue) -> Option<f32> {
    match value {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}
