//! Fundamental token classification

use logos::Logos;
use serde::{Deserialize, Serialize};

use super::span::Span;
use super::tags::{ClassPrototypeTag, CommentTag, PrototypeTag, SyntaxHighlight};

/// The most basic lexical class of a token
///
/// Text runs are ASCII letters, digits and anything above U+007F. Underscores
/// are *not* text, so `max_value` is three tokens. Every character that is not
/// text, whitespace or a line break becomes its own one-character symbol.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundamentalType {
    /// One CR, LF or CR LF
    #[regex(r"\r\n|\r|\n")]
    LineBreak,

    /// A run of spaces and tabs
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"[a-zA-Z0-9\u{0080}-\u{10FFFF}]+")]
    Text,

    /// Any other single character, ASCII control characters included
    #[regex(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x21-\x2F\x3A-\x40\x5B-\x60\x7B-\x7F]")]
    Symbol,
}

impl FundamentalType {
    /// Whitespace for trimming purposes: spaces, tabs and line breaks
    #[must_use]
    pub const fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineBreak)
    }
}

/// A classified token
///
/// The token does not own its text; it points into the stream that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: FundamentalType,
    pub span: Span,
    pub prototype: Option<PrototypeTag>,
    pub class_prototype: Option<ClassPrototypeTag>,
    pub highlight: Option<SyntaxHighlight>,
    pub comment: Option<CommentTag>,
}

impl Token {
    /// Create an untagged token
    #[must_use]
    pub const fn new(kind: FundamentalType, span: Span) -> Self {
        Self {
            kind,
            span,
            prototype: None,
            class_prototype: None,
            highlight: None,
            comment: None,
        }
    }

    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// Whether the token carries the given prototype tag
    #[must_use]
    pub fn is(&self, tag: PrototypeTag) -> bool {
        self.prototype == Some(tag)
    }

    /// Copy every tag of `other` onto a token with a new span
    #[must_use]
    pub const fn retagged_copy(other: &Token, span: Span) -> Self {
        Self {
            kind: other.kind,
            span,
            prototype: other.prototype,
            class_prototype: other.class_prototype,
            highlight: other.highlight,
            comment: other.comment,
        }
    }
}

/// Split raw text into untagged tokens
pub(crate) fn classify(text: &str) -> Vec<Token> {
    let mut lexer = FundamentalType::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        // Every character is covered by a variant; anything logos still rejects is a symbol.
        let kind = result.unwrap_or(FundamentalType::Symbol);
        tokens.push(Token::new(kind, Span::from_range(lexer.span())));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<FundamentalType> {
        classify(text).iter().map(|t| t.kind).collect()
    }

    fn lexemes(text: &str) -> Vec<&str> {
        classify(text).iter().map(|t| &text[t.span.as_range()]).collect()
    }

    #[test]
    fn classify_simple_declaration() {
        assert_eq!(
            lexemes("int x = 12;"),
            vec!["int", " ", "x", " ", "=", " ", "12", ";"]
        );
        assert_eq!(
            kinds("int x"),
            vec![
                FundamentalType::Text,
                FundamentalType::Whitespace,
                FundamentalType::Text
            ]
        );
    }

    #[test]
    fn underscore_is_a_symbol() {
        assert_eq!(lexemes("max_value"), vec!["max", "_", "value"]);
        assert_eq!(kinds("_")[0], FundamentalType::Symbol);
    }

    #[test]
    fn symbols_are_single_characters() {
        assert_eq!(lexemes(":="), vec![":", "="]);
        assert_eq!(lexemes("->"), vec!["-", ">"]);
    }

    #[test]
    fn crlf_is_one_line_break() {
        assert_eq!(
            kinds("a\r\nb\rc\n"),
            vec![
                FundamentalType::Text,
                FundamentalType::LineBreak,
                FundamentalType::Text,
                FundamentalType::LineBreak,
                FundamentalType::Text,
                FundamentalType::LineBreak,
            ]
        );
    }

    #[test]
    fn whitespace_runs_are_merged() {
        assert_eq!(lexemes("a \t  b"), vec!["a", " \t  ", "b"]);
    }

    #[test]
    fn non_ascii_is_text() {
        assert_eq!(lexemes("größe: Zahl"), vec!["größe", ":", " ", "Zahl"]);
        assert_eq!(kinds("日本語")[0], FundamentalType::Text);
    }

    #[test]
    fn spans_tile_the_input() {
        let text = "void Foo (int\tx,\r\n  List<T> y = null) // ok";
        let tokens = classify(text);
        let mut expected_start = 0;
        for token in &tokens {
            assert_eq!(token.span.start, expected_start);
            assert!(!token.span.is_empty());
            expected_start = token.span.end;
        }
        assert_eq!(expected_start as usize, text.len());
    }

    #[test]
    fn new_tokens_are_untagged() {
        let token = classify("x")[0];
        assert!(token.prototype.is_none());
        assert!(token.class_prototype.is_none());
        assert!(token.highlight.is_none());
        assert!(token.comment.is_none());
    }
}
