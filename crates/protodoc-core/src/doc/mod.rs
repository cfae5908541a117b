//! Prototype summaries for documentation output
//!
//! This module turns a structured [`Prototype`](crate::prototype::Prototype)
//! into a plain, serializable summary that HTML or search-index generators
//! can consume without touching tokens.

mod extractor;
mod types;

pub use extractor::PrototypeExtractor;
pub use types::{ParameterSummary, PrototypeSummary, SectionSummary};
