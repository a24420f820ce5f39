//! Abstract heading and span location.
//!
//! Heading recognition is driven by a [`HeadingCatalog`]: an ordered list of
//! named regular expressions, each marking either the start of the abstract
//! or the section after it. [`Locator`] applies the catalog to a
//! [`Document`](crate::model::Document) and returns the [`Span`](crate::model::Span)
//! between the two. [`NoiseFilter`] optionally cleans bibliographic debris
//! out of that span.

mod catalog;
mod locator;
mod noise;

pub use catalog::{BoundaryKind, HeadingCatalog, HeadingPattern};
pub use locator::Locator;
pub use noise::NoiseFilter;
