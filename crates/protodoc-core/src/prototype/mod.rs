//! Structured prototypes
//!
//! [`Prototype`] wraps a tagged [`TokenStream`] and gives access to its
//! sections, parameters, names, types and values. Everything is derived from
//! the tags a language front end placed on the tokens; nothing here knows the
//! grammar of any language.
//!
//! Sections and parameter boundaries are computed when the prototype is built.
//! If the owner re-tags tokens through [`Prototype::stream_mut`] it must call
//! [`Prototype::recalculate_sections`] afterwards.
//!
//! # Example
//!
//! ```
//! use protodoc_core::prototype::Prototype;
//! use protodoc_core::tokenization::{PrototypeTag, TokenStream};
//!
//! let mut stream = TokenStream::default();
//! stream.push_tagged("int", Some(PrototypeTag::Type));
//! stream.push_tagged(" ", None);
//! stream.push_tagged("Foo", Some(PrototypeTag::Name));
//! stream.push_tagged("(", Some(PrototypeTag::StartOfParams));
//! stream.push_tagged("int", Some(PrototypeTag::Type));
//! stream.push_tagged(" ", None);
//! stream.push_tagged("count", Some(PrototypeTag::Name));
//! stream.push_tagged(")", Some(PrototypeTag::EndOfParams));
//!
//! let prototype = Prototype::new(stream);
//! assert_eq!(prototype.number_of_parameters(), 1);
//!
//! let name = prototype.parameter_name(0).unwrap();
//! assert_eq!(prototype.stream().range_text(name), "count");
//! ```

pub mod access;
pub mod parameters;
pub mod section;
pub mod view;

use std::sync::Arc;

use thiserror::Error;

pub use access::{AccessKeywords, AccessLevel, DEFAULT_ACCESS_KEYWORDS};
pub use parameters::{ParameterSection, ParameterStyle};
pub use section::{PlainSection, Section, SectionSegmenter, Segmentation};
pub use view::{TokenSlice, TokenView};

use crate::language::LanguageProfile;
use crate::tokenization::{TokenRange, TokenStream};

/// Errors from operations that change a prototype's state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrototypeError {
    #[error("main section index {index} is out of range for {count} section(s)")]
    MainSectionOutOfRange { index: usize, count: usize },
}

/// A tagged prototype split into sections
#[derive(Debug, Clone)]
pub struct Prototype {
    stream: TokenStream,
    sections: Vec<Section>,
    main_section_index: usize,
    supports_implied_types: bool,
    keywords: Arc<AccessKeywords>,
}

impl Prototype {
    /// Structure a prototype whose language supports implied types
    #[must_use]
    pub fn new(stream: TokenStream) -> Self {
        Self::with_options(stream, true, Arc::clone(&*DEFAULT_ACCESS_KEYWORDS))
    }

    /// Structure a prototype using a language profile's settings
    #[must_use]
    pub fn with_profile(stream: TokenStream, profile: &LanguageProfile) -> Self {
        Self::with_options(stream, profile.supports_implied_types, profile.keywords())
    }

    #[must_use]
    pub fn with_options(
        stream: TokenStream,
        supports_implied_types: bool,
        keywords: Arc<AccessKeywords>,
    ) -> Self {
        let mut prototype = Self {
            stream,
            sections: Vec::new(),
            main_section_index: 0,
            supports_implied_types,
            keywords,
        };
        prototype.recalculate_sections();
        prototype
    }

    /// Recompute sections from the current tags
    ///
    /// This resets the main section to the computed default, discarding any
    /// index set with [`set_main_section_index`](Self::set_main_section_index).
    pub fn recalculate_sections(&mut self) {
        let Segmentation {
            sections,
            main_index,
        } = SectionSegmenter::segment(&self.stream, self.supports_implied_types);
        self.sections = sections;
        self.main_section_index = main_index;
    }

    #[must_use]
    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    /// Mutable access for re-tagging; call [`recalculate_sections`](Self::recalculate_sections) afterwards
    pub fn stream_mut(&mut self) -> &mut TokenStream {
        &mut self.stream
    }

    /// Give the stream back to the caller
    #[must_use]
    pub fn into_stream(self) -> TokenStream {
        self.stream
    }

    /// All sections in source order; never empty
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub const fn main_section_index(&self) -> usize {
        self.main_section_index
    }

    /// Override the main section
    ///
    /// # Errors
    ///
    /// Returns [`PrototypeError::MainSectionOutOfRange`] if `index` does not
    /// name a section. The current main section is kept.
    pub fn set_main_section_index(&mut self, index: usize) -> Result<(), PrototypeError> {
        if index >= self.sections.len() {
            return Err(PrototypeError::MainSectionOutOfRange {
                index,
                count: self.sections.len(),
            });
        }
        self.main_section_index = index;
        Ok(())
    }

    /// The section holding the access level and parameters
    #[must_use]
    pub fn main_section(&self) -> &Section {
        // Segmentation never yields an empty list and the index is checked on every write
        &self.sections[self.main_section_index]
    }

    #[must_use]
    pub const fn supports_implied_types(&self) -> bool {
        self.supports_implied_types
    }

    #[must_use]
    pub fn access_keywords(&self) -> &AccessKeywords {
        &self.keywords
    }

    /// Bounds reported by callers that need a range for a missing feature
    ///
    /// This is the empty range at the end of the stream.
    #[must_use]
    pub fn not_found_bounds(&self) -> TokenRange {
        TokenRange::collapsed(self.stream.len())
    }

    fn main_parameters(&self) -> Option<&ParameterSection> {
        self.main_section().parameters()
    }

    /// Number of parameters in the main section; zero if it has no parameter list
    #[must_use]
    pub fn number_of_parameters(&self) -> usize {
        self.main_parameters()
            .map_or(0, ParameterSection::parameter_count)
    }

    /// C or Pascal; prototypes without parameters are C
    #[must_use]
    pub fn style(&self) -> ParameterStyle {
        self.main_parameters()
            .map_or(ParameterStyle::C, ParameterSection::style)
    }

    /// Access level from the main section's modifiers, using this prototype's keyword table
    #[must_use]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level_with(&self.keywords)
    }

    /// Access level using a caller-supplied keyword table
    ///
    /// Only modifiers before the parameter list count, so a `private` on a
    /// parameter doesn't change the access level of the function.
    #[must_use]
    pub fn access_level_with(&self, keywords: &AccessKeywords) -> AccessLevel {
        let range = match self.main_section() {
            Section::Plain(section) => section.range(),
            Section::Parameterized(section) => {
                TokenRange::new(section.range().start, section.start_of_params())
            }
        };
        keywords.resolve(&self.stream, range)
    }

    /// Everything before the parameters, including the opening symbol
    ///
    /// Without a parameter list this is the whole main section.
    #[must_use]
    pub fn before_parameters(&self) -> Option<TokenRange> {
        match self.main_section() {
            Section::Plain(section) => Some(section.range()),
            Section::Parameterized(section) => Some(section.before_parameters()),
        }
    }

    /// Everything after the parameters, including the closing symbol
    #[must_use]
    pub fn after_parameters(&self) -> Option<TokenRange> {
        self.main_parameters()?.after_parameters()
    }

    /// Trimmed bounds of a parameter
    #[must_use]
    pub fn parameter(&self, index: usize) -> Option<TokenRange> {
        self.main_parameters()?.parameter(index)
    }

    #[must_use]
    pub fn parameter_name(&self, index: usize) -> Option<TokenRange> {
        self.main_parameters()?.parameter_name(&self.stream, index)
    }

    /// The type without modifiers or qualifiers
    ///
    /// `implied_types` only has an effect if the language supports them.
    #[must_use]
    pub fn base_parameter_type(&self, index: usize, implied_types: bool) -> Option<TokenRange> {
        self.main_parameters()?
            .base_type(&self.stream, index, implied_types)
    }

    /// The type with its modifiers and qualifiers, possibly in a synthesized stream
    #[must_use]
    pub fn full_parameter_type(&self, index: usize, implied_types: bool) -> Option<TokenSlice<'_>> {
        self.main_parameters()?
            .full_type(&self.stream, index, implied_types)
    }

    #[must_use]
    pub fn is_parameter_type_implied(&self, index: usize, implied_types: bool) -> bool {
        self.main_parameters()
            .is_some_and(|section| section.is_type_implied(&self.stream, index, implied_types))
    }

    #[must_use]
    pub fn parameter_default_value(&self, index: usize) -> Option<TokenRange> {
        self.main_parameters()?
            .default_value(&self.stream, index)
    }

    #[must_use]
    pub fn parameter_property_value(&self, index: usize) -> Option<TokenRange> {
        self.main_parameters()?
            .property_value(&self.stream, index)
    }
}
