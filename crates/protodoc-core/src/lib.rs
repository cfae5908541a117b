//! Protodoc Core - language-agnostic prototype structuring for the Protodoc documentation engine
//!
//! Language front ends tokenize a declaration and tag its tokens. This crate
//! turns the tagged tokens into a queryable model without knowing any grammar:
//! - Tokenization: fundamental token types, tag taxonomies, token streams
//! - Prototype: sections, parameters, names, types, default values, access levels
//! - Language: per-language profiles loaded from TOML
//! - Doc: serializable prototype summaries for renderers
//! - Logging: tracing subscriber setup

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tokenization module - tokens, tags and token streams
pub mod tokenization;

/// Prototype module - sections, parameters and the prototype facade
pub mod prototype;

/// Language profiles - per-language settings for prototype structuring
pub mod language;

/// Prototype summaries for documentation output
pub mod doc;

/// Tracing subscriber setup for binaries and tests
pub mod logging;

/// Test utilities - tagged stream builders and canned prototypes
pub mod testutil;

/// Convenience re-export of the token stream
pub use tokenization::{PrototypeTag, TokenRange, TokenStream};

/// Convenience re-export of the prototype facade
pub use prototype::{AccessLevel, ParameterStyle, Prototype, PrototypeError, TokenSlice, TokenView};

/// Convenience re-export of language profiles
pub use language::{LanguageProfile, LanguageProfiles, ProfileError};

/// Convenience re-export of the summary extractor
pub use doc::{PrototypeExtractor, PrototypeSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_tokenize_tag_and_query() {
        let mut stream = TokenStream::tokenize("procedure Run(count: integer)");
        let tags = [
            ("Run", PrototypeTag::Name),
            ("(", PrototypeTag::StartOfParams),
            ("count", PrototypeTag::Name),
            (":", PrototypeTag::NameTypeSeparator),
            ("integer", PrototypeTag::Type),
            (")", PrototypeTag::EndOfParams),
        ];
        for (text, tag) in tags {
            let index = stream.find_text(0, text).unwrap();
            stream.set_prototype_tag(index, Some(tag));
        }

        let prototype = Prototype::new(stream);
        assert_eq!(prototype.style(), ParameterStyle::Pascal);
        assert_eq!(prototype.number_of_parameters(), 1);

        let ty = prototype.full_parameter_type(0, true).unwrap();
        assert_eq!(ty.text(), "integer");

        let summary = PrototypeExtractor::extract(&prototype);
        assert_eq!(summary.parameters[0].display(summary.style), "count: integer");
    }
}
