//! Word reconstruction across line boundaries.
//!
//! PDF text wraps words at line ends, sometimes with a hyphen and sometimes
//! without one. This module rejoins those pieces: [`decide`] classifies a
//! single boundary and [`Reconstructor`] applies it across a run of lines.

mod decision;
mod engine;
pub mod normalize;

pub use decision::{decide, Join};
pub use engine::{reconstruct, Reconstructor};
