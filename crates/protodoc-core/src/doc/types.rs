//! Types for representing a structured prototype to renderers

use serde::Serialize;

use crate::prototype::{AccessLevel, ParameterStyle};
use crate::tokenization::TokenRange;

/// Snapshot of everything known about one prototype
///
/// Renderers work from this instead of the token stream, so every field is
/// already resolved to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrototypeSummary {
    /// The prototype's text, trimmed
    pub text: String,
    /// Every section in source order
    pub sections: Vec<SectionSummary>,
    /// Index into `sections` of the main section
    pub main_section: usize,
    pub style: ParameterStyle,
    pub access_level: AccessLevel,
    /// Text up to and including the opening symbol of the parameter list
    pub before_parameters: Option<String>,
    pub parameters: Vec<ParameterSummary>,
    /// The closing symbol of the parameter list and everything after it
    pub after_parameters: Option<String>,
}

impl PrototypeSummary {
    /// Serialize the summary as pretty-printed JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Find a parameter by name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterSummary> {
        self.parameters
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }

    /// Whether any parameter has a default value
    #[must_use]
    pub fn has_defaults(&self) -> bool {
        self.parameters.iter().any(|p| p.default_value.is_some())
    }
}

/// One section of a prototype
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub text: String,
    pub range: TokenRange,
    pub has_name: bool,
    pub has_params: bool,
}

/// One parameter, resolved to text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterSummary {
    /// The whole parameter as written
    pub text: String,
    pub name: Option<String>,
    pub base_type: Option<String>,
    /// Type with modifiers and qualifiers, possibly rebuilt from scattered tokens
    pub full_type: Option<String>,
    /// Whether the type was inherited from an earlier parameter
    pub type_implied: bool,
    pub default_value: Option<String>,
    pub property_value: Option<String>,
}

impl ParameterSummary {
    /// `name: type` or `type name`, depending on the style
    #[must_use]
    pub fn display(&self, style: ParameterStyle) -> String {
        match (&self.name, &self.full_type, style) {
            (Some(name), Some(ty), ParameterStyle::Pascal) => format!("{name}: {ty}"),
            (Some(name), Some(ty), ParameterStyle::C) => format!("{ty} {name}"),
            (Some(name), None, _) => name.clone(),
            (None, Some(ty), _) => ty.clone(),
            (None, None, _) => self.text.clone(),
        }
    }
}
