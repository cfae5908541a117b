//! Test utilities for Protodoc
//!
//! Front ends normally tag tokens after tokenizing a whole prototype. Tests
//! are easier to read when the prototype is assembled piece by piece with the
//! tag next to the text, which is what [`StreamBuilder`] does. A few canned
//! prototypes used across unit tests, integration tests and benchmarks live
//! here too.

use crate::prototype::{Prototype, TokenView};
use crate::tokenization::{PrototypeTag, TokenRange, TokenStream};

/// Result type for test helpers
pub type TestResult<T> = Result<T, String>;

/// Builds a tagged [`TokenStream`] one piece at a time
///
/// Each piece is tokenized on its own and every non-whitespace token in it
/// receives the piece's tag.
#[derive(Debug, Default)]
pub struct StreamBuilder {
    stream: TokenStream,
}

impl StreamBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` tagged with `tag`
    #[must_use]
    pub fn tag(mut self, text: &str, tag: PrototypeTag) -> Self {
        self.stream.push_tagged(text, Some(tag));
        self
    }

    /// Append untagged text
    #[must_use]
    pub fn raw(mut self, text: &str) -> Self {
        self.stream.push_tagged(text, None);
        self
    }

    #[must_use]
    pub fn space(self) -> Self {
        self.raw(" ")
    }

    #[must_use]
    pub fn line_break(self) -> Self {
        self.raw("\n")
    }

    #[must_use]
    pub fn ty(self, text: &str) -> Self {
        self.tag(text, PrototypeTag::Type)
    }

    #[must_use]
    pub fn name(self, text: &str) -> Self {
        self.tag(text, PrototypeTag::Name)
    }

    #[must_use]
    pub fn modifier(self, text: &str) -> Self {
        self.tag(text, PrototypeTag::TypeModifier)
    }

    /// `(` tagged `StartOfParams`
    #[must_use]
    pub fn open_params(self) -> Self {
        self.tag("(", PrototypeTag::StartOfParams)
    }

    /// `)` tagged `EndOfParams`
    #[must_use]
    pub fn close_params(self) -> Self {
        self.tag(")", PrototypeTag::EndOfParams)
    }

    /// `,` tagged `ParamSeparator`
    #[must_use]
    pub fn separator(self) -> Self {
        self.tag(",", PrototypeTag::ParamSeparator)
    }

    /// A line break tagged `StartOfPrototypeSection`
    ///
    /// Marking the break keeps the tags of the words around it intact, and
    /// the break itself is trimmed out of both sections.
    #[must_use]
    pub fn section_break(mut self) -> Self {
        let range = self.stream.push_tagged("\n", None);
        self.stream
            .set_prototype_tag(range.start, Some(PrototypeTag::StartOfPrototypeSection));
        self
    }

    #[must_use]
    pub fn build(self) -> TokenStream {
        self.stream
    }
}

/// `void Foo(int x, int y = 5)`
#[must_use]
pub fn two_parameters() -> TokenStream {
    StreamBuilder::new()
        .ty("void")
        .space()
        .name("Foo")
        .open_params()
        .ty("int")
        .space()
        .name("x")
        .separator()
        .space()
        .ty("int")
        .space()
        .name("y")
        .space()
        .tag("=", PrototypeTag::DefaultValueSeparator)
        .space()
        .tag("5", PrototypeTag::DefaultValue)
        .close_params()
        .build()
}

/// `[Obsolete]` on one line and `public void Foo(int x)` on the next
#[must_use]
pub fn attribute_and_signature() -> TokenStream {
    StreamBuilder::new()
        .raw("[Obsolete]")
        .section_break()
        .modifier("public")
        .space()
        .ty("void")
        .space()
        .name("Foo")
        .open_params()
        .ty("int")
        .space()
        .name("x")
        .close_params()
        .build()
}

/// `void Foo(int x, y)`, where `y` has no type of its own
#[must_use]
pub fn implied_pair() -> TokenStream {
    StreamBuilder::new()
        .ty("void")
        .space()
        .name("Foo")
        .open_params()
        .ty("int")
        .space()
        .name("x")
        .separator()
        .space()
        .name("y")
        .close_params()
        .build()
}

/// A C-style prototype with `count` parameters spread over several lines
///
/// Parameters alternate between a plain type, a generic map type and an
/// array suffix with a default value, so every analyzer path gets exercised.
#[must_use]
pub fn wide_prototype(count: usize) -> TokenStream {
    let mut builder = StreamBuilder::new()
        .modifier("public")
        .space()
        .modifier("static")
        .space()
        .ty("void")
        .space()
        .name("Configure")
        .open_params();

    for i in 0..count {
        if i > 0 {
            builder = builder.separator().line_break().raw("    ");
        }
        let name = format!("arg{i}");
        builder = match i % 3 {
            0 => builder.ty("int").space().name(&name),
            1 => builder
                .ty("Map")
                .tag("<", PrototypeTag::OpeningTypeModifier)
                .ty("string")
                .separator()
                .space()
                .ty("int")
                .tag(">", PrototypeTag::ClosingTypeModifier)
                .space()
                .name(&name),
            _ => builder
                .modifier("const")
                .space()
                .ty("char")
                .space()
                .name(&name)
                .tag("[", PrototypeTag::OpeningTypeModifier)
                .tag("]", PrototypeTag::ClosingTypeModifier)
                .space()
                .tag("=", PrototypeTag::DefaultValueSeparator)
                .space()
                .tag("null", PrototypeTag::DefaultValue),
        };
    }

    builder.close_params().build()
}

/// Text of a range of the prototype's stream
#[must_use]
pub fn text_of(prototype: &Prototype, range: Option<TokenRange>) -> Option<String> {
    range.map(|range| prototype.stream().range_text(range).to_string())
}

/// Check that a parameter's name, base type and full type read as expected
///
/// # Errors
/// Returns error describing the first mismatch
pub fn expect_parameter(
    prototype: &Prototype,
    index: usize,
    name: &str,
    base_type: &str,
    full_type: &str,
) -> TestResult<()> {
    let actual_name = text_of(prototype, prototype.parameter_name(index))
        .ok_or_else(|| format!("parameter {index} has no name"))?;
    if actual_name != name {
        return Err(format!("parameter {index}: expected name {name:?}, got {actual_name:?}"));
    }

    let actual_base = text_of(prototype, prototype.base_parameter_type(index, true))
        .ok_or_else(|| format!("parameter {index} has no base type"))?;
    if actual_base != base_type {
        return Err(format!(
            "parameter {index}: expected base type {base_type:?}, got {actual_base:?}"
        ));
    }

    let actual_full = prototype
        .full_parameter_type(index, true)
        .map(|slice| slice.text().into_owned())
        .ok_or_else(|| format!("parameter {index} has no full type"))?;
    if actual_full != full_type {
        return Err(format!(
            "parameter {index}: expected full type {full_type:?}, got {actual_full:?}"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_tags_pieces() {
        let stream = StreamBuilder::new().ty("unsigned int").space().name("x").build();
        assert_eq!(stream.text(), "unsigned int x");
        assert_eq!(stream.prototype_tag(0), Some(PrototypeTag::Type));
        assert_eq!(stream.prototype_tag(1), None);
        assert_eq!(stream.prototype_tag(4), Some(PrototypeTag::Name));
    }

    #[test]
    fn test_section_break_is_tagged() {
        let stream = attribute_and_signature();
        let brk = stream.find_text(0, "\n").unwrap();
        assert_eq!(
            stream.prototype_tag(brk),
            Some(PrototypeTag::StartOfPrototypeSection)
        );
        let public = stream.find_text(0, "public").unwrap();
        assert_eq!(stream.prototype_tag(public), Some(PrototypeTag::TypeModifier));
    }

    #[test]
    fn test_expect_parameter() {
        let prototype = Prototype::new(two_parameters());
        expect_parameter(&prototype, 1, "y", "int", "int").unwrap();
        let err = expect_parameter(&prototype, 0, "y", "int", "int").unwrap_err();
        assert!(err.contains("expected name"));
    }

    #[test]
    fn test_wide_prototype_shape() {
        let prototype = Prototype::new(wide_prototype(6));
        assert_eq!(prototype.number_of_parameters(), 6);
        expect_parameter(&prototype, 1, "arg1", "Map", "Map<string, int>").unwrap();
        expect_parameter(&prototype, 2, "arg2", "char", "const char[]").unwrap();
    }
}
