//! Prototype summary extractor - walks a structured prototype and resolves it to text

use tracing::warn;

use crate::prototype::{Prototype, Section, TokenView};
use crate::tokenization::TokenRange;

use super::types::{ParameterSummary, PrototypeSummary, SectionSummary};

/// Extracts renderer-ready summaries from structured prototypes
pub struct PrototypeExtractor;

impl PrototypeExtractor {
    /// Summarize a prototype, using implied types where the language allows them
    ///
    /// Derived ranges that fall outside the range they were derived from are
    /// logged and left out of the summary rather than rendered wrong.
    #[must_use]
    pub fn extract(prototype: &Prototype) -> PrototypeSummary {
        let stream = prototype.stream();
        let sections: Vec<SectionSummary> = prototype
            .sections()
            .iter()
            .map(|section| Self::extract_section(prototype, section))
            .collect();

        let main = prototype.main_section().range();
        let before_parameters =
            Self::contained(prototype, "before parameters", main, prototype.before_parameters());
        let after_parameters =
            Self::contained(prototype, "after parameters", main, prototype.after_parameters());

        let parameters = (0..prototype.number_of_parameters())
            .filter_map(|index| Self::extract_parameter(prototype, main, index))
            .collect();

        PrototypeSummary {
            text: stream.range_text(stream.trim(stream.full_range())).to_string(),
            sections,
            main_section: prototype.main_section_index(),
            style: prototype.style(),
            access_level: prototype.access_level(),
            before_parameters,
            parameters,
            after_parameters,
        }
    }

    fn extract_section(prototype: &Prototype, section: &Section) -> SectionSummary {
        SectionSummary {
            text: prototype.stream().range_text(section.range()).to_string(),
            range: section.range(),
            has_name: section.has_name(),
            has_params: section.has_params(),
        }
    }

    fn extract_parameter(
        prototype: &Prototype,
        main: TokenRange,
        index: usize,
    ) -> Option<ParameterSummary> {
        let range = prototype.parameter(index)?;
        if !main.contains_range(range) {
            warn!(
                index,
                parameter = %range,
                section = %main,
                "parameter lies outside its section; skipping"
            );
            return None;
        }

        let type_implied = prototype.is_parameter_type_implied(index, true);

        // An implied type comes from another parameter, so only its own fields are checked against it
        let base_type = prototype.base_parameter_type(index, true);
        let base_type = if type_implied {
            Self::contained(prototype, "implied base type", main, base_type)
        } else {
            Self::contained(prototype, "base type", range, base_type)
        };

        let full_type = prototype
            .full_parameter_type(index, true)
            .map(|slice| slice.text().into_owned());

        Some(ParameterSummary {
            text: prototype.stream().range_text(range).to_string(),
            name: Self::contained(prototype, "name", range, prototype.parameter_name(index)),
            base_type,
            full_type,
            type_implied,
            default_value: Self::contained(
                prototype,
                "default value",
                range,
                prototype.parameter_default_value(index),
            ),
            property_value: Self::contained(
                prototype,
                "property value",
                range,
                prototype.parameter_property_value(index),
            ),
        })
    }

    /// Text of `derived` if it lies within `parent`
    fn contained(
        prototype: &Prototype,
        what: &str,
        parent: TokenRange,
        derived: Option<TokenRange>,
    ) -> Option<String> {
        let derived = derived?;
        if parent.contains_range(derived) {
            Some(prototype.stream().range_text(derived).to_string())
        } else {
            warn!(
                what,
                range = %derived,
                parent = %parent,
                "derived range escapes its parent; dropping it"
            );
            None
        }
    }
}
