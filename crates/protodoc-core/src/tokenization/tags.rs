//! Semantic tag taxonomies placed on tokens by language front ends
//!
//! A token carries at most one tag from each taxonomy. The absence of a tag is
//! `None` on the token's field, never a special variant.

use serde::{Deserialize, Serialize};

/// Structural role of a token within a function or variable prototype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrototypeTag {
    /// First token of a new prototype section. May appear without a matching end.
    StartOfPrototypeSection,
    /// Last token of a prototype section; the next token starts a new one.
    EndOfPrototypeSection,

    /// Start of a parameter list, such as `(`
    StartOfParams,
    /// End of a parameter list, such as `)`
    EndOfParams,
    /// Separator between parameters, such as `,`
    ParamSeparator,

    /// The type without modifiers or qualifiers: `int` in `unsigned int`, `Class` in `Pkg.Class`
    Type,
    /// A separate word modifying a type, such as `const`
    TypeModifier,
    /// Everything before the last word of a qualified type, such as `Pkg.`
    TypeQualifier,
    /// Opening symbol modifying a type, such as `<` in `List<int>` or `[` in `int[]`
    OpeningTypeModifier,
    /// Closing symbol modifying a type, such as `>` or `]`
    ClosingTypeModifier,

    /// Symbol between a name and its type in Pascal-style languages, such as `:`
    NameTypeSeparator,

    /// Name of the parameter or of the element the prototype defines
    Name,
    /// Parameter modifier that is part of the type but not shared with siblings, such as `*` in `int *x`
    ParamModifier,
    /// Opening symbol modifying a parameter, such as `[` in `int x[5]`
    OpeningParamModifier,
    /// Closing symbol modifying a parameter, such as `]` in `int x[5]`
    ClosingParamModifier,

    /// Symbol between the name/type and the default value, such as `=` or `:=`
    DefaultValueSeparator,
    DefaultValue,

    /// Symbol between a property name and its value, such as `=` in `@Rfe(id = 12)`
    PropertyValueSeparator,
    PropertyValue,
}

impl PrototypeTag {
    /// Tokens that belong to a full type outside of any modifier group, and are inherited with it
    #[must_use]
    pub const fn is_type_part(self) -> bool {
        matches!(
            self,
            Self::Type
                | Self::TypeModifier
                | Self::TypeQualifier
                | Self::OpeningTypeModifier
                | Self::ClosingTypeModifier
        )
    }

    /// Whether the tag opens a nesting level for separator matching
    #[must_use]
    pub const fn opens_nesting(self) -> bool {
        matches!(
            self,
            Self::StartOfParams | Self::OpeningTypeModifier | Self::OpeningParamModifier
        )
    }

    /// Whether the tag closes a nesting level for separator matching
    #[must_use]
    pub const fn closes_nesting(self) -> bool {
        matches!(
            self,
            Self::EndOfParams | Self::ClosingTypeModifier | Self::ClosingParamModifier
        )
    }

    /// Symbols bracketing a parameter modifier, such as `[` and `]` in `int x[5]`
    #[must_use]
    pub const fn brackets_param_modifier(self) -> bool {
        matches!(self, Self::OpeningParamModifier | Self::ClosingParamModifier)
    }

    /// Modifier tags that may carry access keywords like `public`
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(self, Self::TypeModifier | Self::ParamModifier)
    }
}

/// Structural role of a token within a class prototype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassPrototypeTag {
    /// First token of a line shown before the prototype; each one starts a new line
    StartOfPrePrototypeLine,
    PrePrototypeLine,

    StartOfParents,
    ParentSeparator,
    /// End of a parent list for languages that delimit it, like Python's `)`
    EndOfParents,

    /// A word modifying the class or a parent, such as `public` or `static`
    Modifier,
    /// The declaring keyword: `class`, `struct`, `interface`
    Keyword,
    /// Name of the class or a parent, qualifiers included
    Name,

    /// Template information after a class or parent, such as `<T>`
    TemplateSuffix,

    StartOfPostPrototypeLine,
    PostPrototypeLine,

    /// Marks that the prototype includes the class body; nothing after it is demarcated
    StartOfBody,
}

/// Syntax highlighting class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxHighlight {
    Keyword,
    Number,
    /// Strings and character constants
    String,
    Comment,
    PreprocessingDirective,
    /// Code metadata such as C# attributes
    Metadata,
}

/// Role of a token while parsing a documentation comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentTag {
    CommentSymbol,
    /// Symbols that only decorate, like a horizontal line
    CommentDecoration,
    PossibleOpeningTag,
    PossibleClosingTag,
    OpeningTag,
    ClosingTag,
    Url,
    Email,
}
