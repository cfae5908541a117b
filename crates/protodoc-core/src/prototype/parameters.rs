//! Parameter section analysis
//!
//! Parameter boundaries are computed once when the section is built. Names,
//! types and values are derived on demand from the tags inside each
//! parameter's range.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::view::TokenSlice;
use crate::tokenization::{FundamentalType, PrototypeTag, Span, Token, TokenRange, TokenStream};

/// How parameters are written
///
/// Typeless prototypes report [`ParameterStyle::C`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParameterStyle {
    /// `int x = 12`
    #[default]
    C,
    /// `x: int := 12`
    Pascal,
}

/// A section containing a parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSection {
    range: TokenRange,
    has_name: bool,
    start_of_params: usize,
    end_of_params: Option<usize>,
    parameters: Vec<TokenRange>,
    style: ParameterStyle,
    supports_implied_types: bool,
}

impl ParameterSection {
    /// Analyze the parameter list of the section at `range`
    ///
    /// The first `StartOfParams` token opens the list. Separators only split
    /// parameters at nesting depth zero, and the list ends at the first
    /// depth-zero `EndOfParams`, or at the section end if there isn't one.
    #[must_use]
    pub fn analyze(
        stream: &TokenStream,
        range: TokenRange,
        has_name: bool,
        supports_implied_types: bool,
    ) -> Self {
        let start_of_params = range
            .indices()
            .find(|&i| stream.prototype_tag(i) == Some(PrototypeTag::StartOfParams))
            .unwrap_or(range.start);

        let mut parameters = Vec::new();
        let mut end_of_params = None;
        let mut parameter_start = start_of_params + 1;
        let mut depth = 0usize;

        for i in (start_of_params + 1)..range.end {
            let Some(tag) = stream.prototype_tag(i) else {
                continue;
            };

            if depth == 0 {
                match tag {
                    PrototypeTag::EndOfParams => {
                        end_of_params = Some(i);
                        break;
                    }
                    PrototypeTag::ParamSeparator => {
                        parameters.push(TokenRange::new(parameter_start, i));
                        parameter_start = i + 1;
                        continue;
                    }
                    _ => {}
                }
            }

            if tag.opens_nesting() {
                depth += 1;
            } else if tag.closes_nesting() {
                if depth == 0 {
                    debug!(token = i, ?tag, "unbalanced closing tag in parameter list");
                }
                depth = depth.saturating_sub(1);
            }
        }

        let list_end = end_of_params.unwrap_or(range.end);
        if end_of_params.is_none() {
            debug!(section = %range, "parameter list has no closing token");
        }
        parameters.push(TokenRange::new(parameter_start.min(list_end), list_end));

        let parameters = parameters
            .into_iter()
            .map(|parameter| stream.trim(parameter))
            .collect();

        let style = if range
            .indices()
            .any(|i| stream.prototype_tag(i) == Some(PrototypeTag::NameTypeSeparator))
        {
            ParameterStyle::Pascal
        } else {
            ParameterStyle::C
        };

        Self {
            range,
            has_name,
            start_of_params,
            end_of_params,
            parameters,
            style,
            supports_implied_types,
        }
    }

    #[must_use]
    pub const fn range(&self) -> TokenRange {
        self.range
    }

    #[must_use]
    pub const fn has_name(&self) -> bool {
        self.has_name
    }

    #[must_use]
    pub const fn style(&self) -> ParameterStyle {
        self.style
    }

    #[must_use]
    pub const fn supports_implied_types(&self) -> bool {
        self.supports_implied_types
    }

    /// Index of the token that opens the parameter list
    #[must_use]
    pub const fn start_of_params(&self) -> usize {
        self.start_of_params
    }

    /// Index of the token that closes the parameter list, if there is one
    #[must_use]
    pub const fn end_of_params(&self) -> Option<usize> {
        self.end_of_params
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Trimmed bounds of every parameter, in order
    #[must_use]
    pub fn parameters(&self) -> &[TokenRange] {
        &self.parameters
    }

    /// Section start through the opening token of the parameter list
    #[must_use]
    pub const fn before_parameters(&self) -> TokenRange {
        TokenRange::new(self.range.start, self.start_of_params + 1)
    }

    /// The closing token of the parameter list through the section end
    #[must_use]
    pub fn after_parameters(&self) -> Option<TokenRange> {
        self.end_of_params
            .map(|end| TokenRange::new(end, self.range.end))
    }

    #[must_use]
    pub fn parameter(&self, index: usize) -> Option<TokenRange> {
        self.parameters.get(index).copied()
    }

    /// The first depth-zero run of `Name` tokens
    ///
    /// Parameter modifier brackets don't hide the name, so `cb` is found in
    /// `int (*cb)(int a)`. Names inside a nested parameter list are.
    #[must_use]
    pub fn parameter_name(&self, stream: &TokenStream, index: usize) -> Option<TokenRange> {
        first_run(
            stream,
            self.parameter(index)?,
            PrototypeTag::Name,
            Nesting::ExceptParamModifiers,
        )
    }

    /// The unqualified, unmodified type of a parameter
    ///
    /// With `implied_types`, and only if the section supports them, a
    /// parameter without a type borrows the type of the nearest preceding
    /// parameter that has one.
    #[must_use]
    pub fn base_type(
        &self,
        stream: &TokenStream,
        index: usize,
        implied_types: bool,
    ) -> Option<TokenRange> {
        let donor = self.type_donor(stream, index, implied_types)?;
        first_run(stream, self.parameters[donor], PrototypeTag::Type, Nesting::All)
    }

    /// The type with all of its modifiers and qualifiers
    ///
    /// A parameter's own modifiers, such as `*` in `char *p` or `[5]` in
    /// `int x[5]`, are part of its full type. They are not passed on to
    /// parameters that inherit the type.
    ///
    /// Borrows the original stream when the type's tokens are only separated
    /// by whitespace there, and synthesizes a new stream otherwise.
    #[must_use]
    pub fn full_type<'a>(
        &self,
        stream: &'a TokenStream,
        index: usize,
        implied_types: bool,
    ) -> Option<TokenSlice<'a>> {
        let donor = self.type_donor(stream, index, implied_types)?;
        let collected = full_type_tokens(stream, self.parameters[donor], donor == index);
        build_full_type(stream, &collected)
    }

    /// Whether the parameter at `index` has no type of its own but one is implied
    #[must_use]
    pub fn is_type_implied(&self, stream: &TokenStream, index: usize, implied_types: bool) -> bool {
        self.type_donor(stream, index, implied_types)
            .is_some_and(|donor| donor != index)
    }

    #[must_use]
    pub fn default_value(&self, stream: &TokenStream, index: usize) -> Option<TokenRange> {
        tagged_value(
            stream,
            self.parameter(index)?,
            PrototypeTag::DefaultValueSeparator,
            PrototypeTag::DefaultValue,
        )
    }

    /// The value of an annotation property, such as `12` in `id = 12`
    #[must_use]
    pub fn property_value(&self, stream: &TokenStream, index: usize) -> Option<TokenRange> {
        tagged_value(
            stream,
            self.parameter(index)?,
            PrototypeTag::PropertyValueSeparator,
            PrototypeTag::PropertyValue,
        )
    }

    /// The parameter whose type applies to `index`
    fn type_donor(&self, stream: &TokenStream, index: usize, implied_types: bool) -> Option<usize> {
        let parameter = self.parameter(index)?;
        if has_type(stream, parameter) {
            return Some(index);
        }
        if !(implied_types && self.supports_implied_types) {
            return None;
        }
        (0..index)
            .rev()
            .find(|&i| has_type(stream, self.parameters[i]))
    }
}

/// Which brackets raise the nesting depth during a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nesting {
    All,
    /// Parameter modifier brackets stay at the outer depth
    ExceptParamModifiers,
}

impl Nesting {
    fn counts(self, tag: PrototypeTag) -> bool {
        self == Self::All || !tag.brackets_param_modifier()
    }
}

/// Visits every token of `range` with its nesting depth
///
/// Opening and closing tokens report the depth outside of their group.
fn for_each_with_depth(
    stream: &TokenStream,
    range: TokenRange,
    nesting: Nesting,
    mut f: impl FnMut(usize, usize),
) {
    let mut depth = 0usize;
    for i in range.indices() {
        match stream.prototype_tag(i) {
            Some(tag) if tag.opens_nesting() && nesting.counts(tag) => {
                f(i, depth);
                depth += 1;
            }
            Some(tag) if tag.closes_nesting() && nesting.counts(tag) => {
                depth = depth.saturating_sub(1);
                f(i, depth);
            }
            _ => f(i, depth),
        }
    }
}

fn has_type(stream: &TokenStream, parameter: TokenRange) -> bool {
    first_run(stream, parameter, PrototypeTag::Type, Nesting::All).is_some()
}

/// The first depth-zero run of `tag` tokens; whitespace may sit inside the run
fn first_run(
    stream: &TokenStream,
    range: TokenRange,
    tag: PrototypeTag,
    nesting: Nesting,
) -> Option<TokenRange> {
    let mut run: Option<TokenRange> = None;
    let mut done = false;
    for_each_with_depth(stream, range, nesting, |i, depth| {
        if done {
            return;
        }
        if depth == 0 && stream.prototype_tag(i) == Some(tag) {
            if let Some(found) = run.as_mut() {
                found.end = i + 1;
            } else {
                run = Some(TokenRange::new(i, i + 1));
            }
        } else if run.is_some() && !stream.is_whitespace(i) {
            done = true;
        }
    });
    run
}

/// Tokens that make up a parameter's full type, in source order
///
/// That is every depth-zero type part plus everything enclosed by a
/// type-modifier group, the group's own symbols included. With
/// `own_modifiers` the parameter modifiers count too, and so does everything
/// in a parameter-modifier group except the name it wraps.
fn full_type_tokens(stream: &TokenStream, parameter: TokenRange, own_modifiers: bool) -> Vec<usize> {
    let mut collected = Vec::new();
    let mut type_depth = 0usize;
    let mut param_depth = 0usize;
    for_each_with_depth(stream, parameter, Nesting::All, |i, depth| {
        let in_group = type_depth > 0 || param_depth > 0;
        match stream.prototype_tag(i) {
            Some(PrototypeTag::OpeningTypeModifier) if depth == 0 || in_group => {
                collected.push(i);
                type_depth += 1;
            }
            Some(PrototypeTag::ClosingTypeModifier) if type_depth > 0 => {
                type_depth -= 1;
                collected.push(i);
            }
            Some(PrototypeTag::OpeningParamModifier) if own_modifiers && (depth == 0 || in_group) => {
                collected.push(i);
                param_depth += 1;
            }
            Some(PrototypeTag::ClosingParamModifier) if param_depth > 0 => {
                param_depth -= 1;
                collected.push(i);
            }
            Some(PrototypeTag::Name) if param_depth > 0 => {}
            _ if in_group => collected.push(i),
            Some(PrototypeTag::ParamModifier) if own_modifiers && depth == 0 => collected.push(i),
            Some(tag) if depth == 0 && tag.is_type_part() => collected.push(i),
            _ => {}
        }
    });
    collected
}

fn build_full_type<'a>(stream: &'a TokenStream, collected: &[usize]) -> Option<TokenSlice<'a>> {
    let (&first, &last) = (collected.first()?, collected.last()?);
    if !collected
        .iter()
        .any(|&i| stream.prototype_tag(i) == Some(PrototypeTag::Type))
    {
        return None;
    }

    // Split into groups separated by anything other than whitespace
    let mut groups: Vec<TokenRange> = Vec::new();
    for &i in collected {
        match groups.last_mut() {
            Some(group) if (group.end..i).all(|gap| stream.is_whitespace(gap)) => group.end = i + 1,
            _ => groups.push(TokenRange::new(i, i + 1)),
        }
    }

    if groups.len() == 1 {
        return Some(TokenSlice::borrowed(stream, TokenRange::new(first, last + 1)));
    }

    let space = Token::new(FundamentalType::Whitespace, Span::default());
    let mut pieces = Vec::new();
    let mut previous: Option<usize> = None;
    for group in groups {
        if let Some(previous) = previous {
            let both_text = stream.kind(previous) == Some(FundamentalType::Text)
                && stream.kind(group.start) == Some(FundamentalType::Text);
            if both_text {
                pieces.push((" ", space));
            }
        }
        for i in group.indices() {
            if let Some(token) = stream.token(i) {
                pieces.push((stream.token_text(i), *token));
            }
        }
        previous = Some(group.end - 1);
    }

    Some(TokenSlice::Synthesized(TokenStream::synthesize(pieces)))
}

/// Value tokens after the first depth-zero separator, or anywhere without one
fn tagged_value(
    stream: &TokenStream,
    parameter: TokenRange,
    separator: PrototypeTag,
    value: PrototypeTag,
) -> Option<TokenRange> {
    let mut search_from = parameter.start;
    let mut found_separator = false;
    for_each_with_depth(stream, parameter, Nesting::All, |i, depth| {
        if !found_separator && depth == 0 && stream.prototype_tag(i) == Some(separator) {
            found_separator = true;
            search_from = i + 1;
        }
    });

    let mut tagged = (search_from..parameter.end).filter(|&i| stream.prototype_tag(i) == Some(value));
    let first = tagged.next()?;
    let last = tagged.last().unwrap_or(first);
    Some(TokenRange::new(first, last + 1))
}
