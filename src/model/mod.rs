//! Document model types for extracted patent text.
//!
//! This module defines the intermediate representation that bridges the
//! line source (PDF extraction) and the abstract locator. Lines are
//! produced once per document and consumed read-only.

mod document;
mod line;
mod span;

pub use document::Document;
pub use line::Line;
pub use span::Span;
