//! Token and tag model
//!
//! A [`TokenStream`] owns the text of a prototype together with its classified
//! tokens. Language front ends tokenize the text with [`TokenStream::tokenize`]
//! and then place semantic tags on individual tokens before handing the stream
//! to a [`Prototype`](crate::prototype::Prototype). The prototype layer treats
//! the tags as read-only from then on.

mod span;
mod tags;
mod token;

pub use span::{LineIndex, Location, Span, TokenRange};
pub use tags::{ClassPrototypeTag, CommentTag, PrototypeTag, SyntaxHighlight};
pub use token::{FundamentalType, Token};

/// An ordered, indexable sequence of tokens plus the text they were cut from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    text: String,
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenize `text` into untagged tokens
    #[must_use]
    pub fn tokenize(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = token::classify(&text);
        Self { text, tokens }
    }

    /// Build a stream by concatenating pieces of other streams
    ///
    /// Each piece is a token's text and the token whose tags it should carry.
    /// This is how discontinuous values get a contiguous home of their own.
    pub fn synthesize<'a>(pieces: impl IntoIterator<Item = (&'a str, Token)>) -> Self {
        let mut stream = Self::default();
        for (text, source) in pieces {
            let start = stream.text.len();
            stream.text.push_str(text);
            let span = Span::from_range(start..stream.text.len());
            stream.tokens.push(Token::retagged_copy(&source, span));
        }
        stream
    }

    /// Tokenize `text` and append it, tagging every non-whitespace token with `tag`
    ///
    /// Front ends that assemble a prototype piece by piece use this instead of
    /// tagging after the fact. Pieces are tokenized independently, so a piece
    /// never merges with the end of the previous one.
    pub fn push_tagged(&mut self, text: &str, tag: Option<PrototypeTag>) -> TokenRange {
        let first = self.tokens.len();
        #[allow(clippy::cast_possible_truncation)]
        let offset = self.text.len() as u32;
        self.text.push_str(text);
        for mut token in token::classify(text) {
            token.span = token.span.shifted(offset);
            if !token.is_whitespace() {
                token.prototype = tag;
            }
            self.tokens.push(token);
        }
        TokenRange::new(first, self.tokens.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The whole text buffer
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The range covering every token
    #[must_use]
    pub fn full_range(&self) -> TokenRange {
        TokenRange::new(0, self.tokens.len())
    }

    /// Text of a single token, empty when out of bounds
    #[must_use]
    pub fn token_text(&self, index: usize) -> &str {
        self.tokens
            .get(index)
            .and_then(|t| self.text.get(t.span.as_range()))
            .unwrap_or("")
    }

    /// Text spanned by a range of tokens, empty when the range is empty or out of bounds
    #[must_use]
    pub fn range_text(&self, range: TokenRange) -> &str {
        if range.is_empty() || range.end > self.tokens.len() {
            return "";
        }
        let start = self.tokens[range.start].span.start as usize;
        let end = self.tokens[range.end - 1].span.end as usize;
        self.text.get(start..end).unwrap_or("")
    }

    #[must_use]
    pub fn prototype_tag(&self, index: usize) -> Option<PrototypeTag> {
        self.tokens.get(index).and_then(|t| t.prototype)
    }

    #[must_use]
    pub fn kind(&self, index: usize) -> Option<FundamentalType> {
        self.tokens.get(index).map(|t| t.kind)
    }

    /// Whether the token at `index` is whitespace or a line break
    #[must_use]
    pub fn is_whitespace(&self, index: usize) -> bool {
        self.tokens.get(index).is_some_and(Token::is_whitespace)
    }

    /// Line and column of a token's first character
    #[must_use]
    pub fn location(&self, index: usize) -> Option<Location> {
        let token = self.tokens.get(index)?;
        Some(LineIndex::new(&self.text).location(&self.text, token.span.start))
    }

    /// Shrink `range` so it neither starts nor ends on whitespace
    ///
    /// A range holding only whitespace collapses to an empty range at its start.
    #[must_use]
    pub fn trim(&self, range: TokenRange) -> TokenRange {
        let mut start = range.start;
        let mut end = range.end.min(self.tokens.len());
        while end > start && self.is_whitespace(end - 1) {
            end -= 1;
        }
        while start < end && self.is_whitespace(start) {
            start += 1;
        }
        if start == end {
            TokenRange::collapsed(end)
        } else {
            TokenRange::new(start, end)
        }
    }

    /// Set or clear the prototype tag of a token; out-of-bounds indices are ignored
    pub fn set_prototype_tag(&mut self, index: usize, tag: Option<PrototypeTag>) {
        if let Some(token) = self.tokens.get_mut(index) {
            token.prototype = tag;
        }
    }

    /// Tag every non-whitespace token in `range`
    pub fn set_prototype_tag_range(&mut self, range: TokenRange, tag: Option<PrototypeTag>) {
        let end = range.end.min(self.tokens.len());
        for token in self.tokens.get_mut(range.start..end).unwrap_or_default() {
            if !token.is_whitespace() {
                token.prototype = tag;
            }
        }
    }

    pub fn set_class_prototype_tag(&mut self, index: usize, tag: Option<ClassPrototypeTag>) {
        if let Some(token) = self.tokens.get_mut(index) {
            token.class_prototype = tag;
        }
    }

    pub fn set_highlight(&mut self, index: usize, highlight: Option<SyntaxHighlight>) {
        if let Some(token) = self.tokens.get_mut(index) {
            token.highlight = highlight;
        }
    }

    pub fn set_comment_tag(&mut self, index: usize, tag: Option<CommentTag>) {
        if let Some(token) = self.tokens.get_mut(index) {
            token.comment = tag;
        }
    }

    /// Index of the first token at or after `from` whose text equals `text`
    #[must_use]
    pub fn find_text(&self, from: usize, text: &str) -> Option<usize> {
        (from..self.tokens.len()).find(|&i| self.token_text(i) == text)
    }
}
