//! Section segmentation
//!
//! A prototype is split into sections by `StartOfPrototypeSection` and
//! `EndOfPrototypeSection` tags. Front ends use them to separate things like a
//! line of attributes from the signature itself. Neither tag is required and
//! they need not be paired; without them the whole prototype is one section.

use tracing::{debug, trace};

use super::parameters::ParameterSection;
use crate::tokenization::{PrototypeTag, TokenRange, TokenStream};

/// A section without a parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainSection {
    range: TokenRange,
    has_name: bool,
}

impl PlainSection {
    #[must_use]
    pub const fn new(range: TokenRange, has_name: bool) -> Self {
        Self { range, has_name }
    }

    #[must_use]
    pub const fn range(&self) -> TokenRange {
        self.range
    }

    #[must_use]
    pub const fn has_name(&self) -> bool {
        self.has_name
    }
}

/// One section of a prototype
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Plain(PlainSection),
    Parameterized(ParameterSection),
}

impl Section {
    /// Bounds of the section, trimmed of whitespace
    #[must_use]
    pub const fn range(&self) -> TokenRange {
        match self {
            Self::Plain(section) => section.range(),
            Self::Parameterized(section) => section.range(),
        }
    }

    /// Whether any token in the section is tagged `Name`
    #[must_use]
    pub const fn has_name(&self) -> bool {
        match self {
            Self::Plain(section) => section.has_name(),
            Self::Parameterized(section) => section.has_name(),
        }
    }

    /// Whether the section contains a `StartOfParams` token
    #[must_use]
    pub const fn has_params(&self) -> bool {
        matches!(self, Self::Parameterized(_))
    }

    /// The parameter analysis, for parameter-bearing sections
    #[must_use]
    pub const fn parameters(&self) -> Option<&ParameterSection> {
        match self {
            Self::Plain(_) => None,
            Self::Parameterized(section) => Some(section),
        }
    }
}

/// Result of segmenting a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Sections in source order; never empty
    pub sections: Vec<Section>,
    /// The default main section
    pub main_index: usize,
}

/// Splits a token stream into sections
pub struct SectionSegmenter;

impl SectionSegmenter {
    /// Segment `stream` and choose the default main section
    ///
    /// Line breaks count as whitespace, so a section holding only blank lines
    /// is dropped like one holding only spaces.
    #[must_use]
    pub fn segment(stream: &TokenStream, supports_implied_types: bool) -> Segmentation {
        let len = stream.len();
        let mut sections = Vec::with_capacity(1);
        let mut first_with_name = None;
        let mut first_with_params = None;

        let mut start = 0;
        loop {
            let mut end = start;
            let mut is_empty = true;
            let mut has_name = false;
            let mut has_params = false;

            while end < len {
                let tag = stream.prototype_tag(end);

                // A start tag only ends the section when it isn't the section's own first token
                if tag == Some(PrototypeTag::StartOfPrototypeSection) && end > start {
                    break;
                }

                if !stream.is_whitespace(end) {
                    is_empty = false;
                }

                match tag {
                    Some(PrototypeTag::Name) => has_name = true,
                    Some(PrototypeTag::StartOfParams) => has_params = true,
                    Some(PrototypeTag::EndOfPrototypeSection) => {
                        end += 1;
                        break;
                    }
                    _ => {}
                }

                end += 1;
            }

            if !is_empty {
                let range = stream.trim(TokenRange::new(start, end));
                let section = if has_params {
                    Section::Parameterized(ParameterSection::analyze(
                        stream,
                        range,
                        has_name,
                        supports_implied_types,
                    ))
                } else {
                    Section::Plain(PlainSection::new(range, has_name))
                };
                sections.push(section);

                if has_name && first_with_name.is_none() {
                    first_with_name = Some(sections.len() - 1);
                }
                if has_params && first_with_params.is_none() {
                    first_with_params = Some(sections.len() - 1);
                }
            }

            if end < len {
                start = end;
            } else {
                break;
            }
        }

        if sections.is_empty() {
            debug!(tokens = len, "prototype has no content; using one section for the whole stream");
            sections.push(Section::Plain(PlainSection::new(stream.full_range(), false)));
            return Segmentation {
                sections,
                main_index: 0,
            };
        }

        let main_index = if sections.len() == 1 {
            0
        } else {
            first_with_name.or(first_with_params).unwrap_or(0)
        };

        trace!(sections = sections.len(), main_index, "segmented prototype");

        Segmentation {
            sections,
            main_index,
        }
    }
}
