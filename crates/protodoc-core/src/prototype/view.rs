//! Read access to token ranges regardless of where they live
//!
//! Most query results are ranges of the prototype's own stream. A full type
//! whose tokens are scattered has no such range, so it is copied into a
//! synthesized stream instead. [`TokenSlice`] hides the difference.

use std::borrow::Cow;

use crate::tokenization::{PrototypeTag, Token, TokenRange, TokenStream};

/// Read capability over a run of tokens, indexed from zero
pub trait TokenView {
    /// Number of tokens in the view
    fn len(&self) -> usize;

    /// The token at `offset`, relative to the start of the view
    fn token(&self, offset: usize) -> Option<&Token>;

    /// Text of the token at `offset`, empty when out of bounds
    fn token_text(&self, offset: usize) -> &str;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prototype_tag(&self, offset: usize) -> Option<PrototypeTag> {
        self.token(offset).and_then(|t| t.prototype)
    }

    /// Concatenated text of every token in the view
    fn text(&self) -> Cow<'_, str> {
        let mut text = String::new();
        for offset in 0..self.len() {
            text.push_str(self.token_text(offset));
        }
        Cow::Owned(text)
    }
}

impl TokenView for TokenStream {
    fn len(&self) -> usize {
        TokenStream::len(self)
    }

    fn token(&self, offset: usize) -> Option<&Token> {
        TokenStream::token(self, offset)
    }

    fn token_text(&self, offset: usize) -> &str {
        TokenStream::token_text(self, offset)
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(TokenStream::text(self))
    }
}

/// A run of tokens that is either borrowed from a prototype or synthesized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSlice<'a> {
    /// A contiguous range of the original stream
    Borrowed {
        stream: &'a TokenStream,
        range: TokenRange,
    },
    /// A stream built from tokens that were not adjacent in the original
    Synthesized(TokenStream),
}

impl<'a> TokenSlice<'a> {
    #[must_use]
    pub fn borrowed(stream: &'a TokenStream, range: TokenRange) -> Self {
        Self::Borrowed { stream, range }
    }

    /// The stream backing this slice
    #[must_use]
    pub fn stream(&self) -> &TokenStream {
        match self {
            Self::Borrowed { stream, .. } => stream,
            Self::Synthesized(stream) => stream,
        }
    }

    /// Bounds of the slice within [`stream`](Self::stream)
    #[must_use]
    pub fn range(&self) -> TokenRange {
        match self {
            Self::Borrowed { range, .. } => *range,
            Self::Synthesized(stream) => stream.full_range(),
        }
    }

    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Self::Synthesized(_))
    }

    /// Detach the slice from the prototype's lifetime
    #[must_use]
    pub fn into_owned(self) -> TokenSlice<'static> {
        match self {
            Self::Borrowed { stream, range } => TokenSlice::Synthesized(TokenStream::synthesize(
                range
                    .indices()
                    .filter_map(|i| Some((stream.token_text(i), *stream.token(i)?))),
            )),
            Self::Synthesized(stream) => TokenSlice::Synthesized(stream),
        }
    }
}

impl TokenView for TokenSlice<'_> {
    fn len(&self) -> usize {
        self.range().len()
    }

    fn token(&self, offset: usize) -> Option<&Token> {
        if offset >= self.len() {
            return None;
        }
        self.stream().token(self.range().start + offset)
    }

    fn token_text(&self, offset: usize) -> &str {
        if offset >= self.len() {
            return "";
        }
        self.stream().token_text(self.range().start + offset)
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.stream().range_text(self.range()))
    }
}

impl std::fmt::Display for TokenSlice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenization::PrototypeTag;

    #[test]
    fn borrowed_slice_reads_through_offsets() {
        let stream = TokenStream::tokenize("void Foo(int x)");
        let slice = TokenSlice::borrowed(&stream, TokenRange::new(4, 7));

        assert_eq!(slice.len(), 3);
        assert_eq!(slice.token_text(0), "int");
        assert_eq!(slice.token_text(2), "x");
        assert_eq!(slice.token_text(3), "");
        assert!(slice.token(3).is_none());
        assert_eq!(slice.text(), "int x");
        assert!(!slice.is_synthesized());
    }

    #[test]
    fn synthesized_slice_covers_its_stream() {
        let mut source = TokenStream::tokenize("int x []");
        source.set_prototype_tag(0, Some(PrototypeTag::Type));
        let pieces = [0, 4, 5].map(|i| (source.token_text(i), source.tokens()[i]));
        let slice = TokenSlice::Synthesized(TokenStream::synthesize(pieces));

        assert!(slice.is_synthesized());
        assert_eq!(slice.range(), TokenRange::new(0, 3));
        assert_eq!(slice.text(), "int[]");
        assert_eq!(slice.prototype_tag(0), Some(PrototypeTag::Type));
        assert_eq!(slice.to_string(), "int[]");
    }

    #[test]
    fn both_kinds_share_one_interface() {
        fn describe(view: &dyn TokenView) -> (usize, String) {
            (view.len(), view.text().into_owned())
        }

        let stream = TokenStream::tokenize("List<int> xs");
        let borrowed = TokenSlice::borrowed(&stream, TokenRange::new(0, 4));
        let owned = borrowed.clone().into_owned();

        assert_eq!(describe(&borrowed), (4, "List<int>".to_string()));
        assert_eq!(describe(&owned), describe(&borrowed));
        assert!(owned.is_synthesized());
    }
}
