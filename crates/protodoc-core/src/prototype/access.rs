//! Access levels read from modifier keywords

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::tokenization::{TokenRange, TokenStream};

/// Visibility of a documented element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// No recognized keyword was present
    #[default]
    Unknown,
    Public,
    Private,
    Protected,
    Internal,
    ProtectedInternal,
    PrivateProtected,
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::ProtectedInternal => "protected internal",
            Self::PrivateProtected => "private protected",
        };
        f.write_str(name)
    }
}

/// The keywords `public`, `private`, `protected` and `internal`
pub static DEFAULT_ACCESS_KEYWORDS: Lazy<Arc<AccessKeywords>> = Lazy::new(|| {
    Arc::new(
        AccessKeywords::new(true)
            .with("public", AccessLevel::Public)
            .with("private", AccessLevel::Private)
            .with("protected", AccessLevel::Protected)
            .with("internal", AccessLevel::Internal),
    )
});

/// Maps modifier keywords to access levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeywords {
    keywords: HashMap<String, AccessLevel>,
    case_sensitive: bool,
}

impl AccessKeywords {
    #[must_use]
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            keywords: HashMap::new(),
            case_sensitive,
        }
    }

    #[must_use]
    pub fn with(mut self, keyword: &str, level: AccessLevel) -> Self {
        self.insert(keyword, level);
        self
    }

    pub fn insert(&mut self, keyword: &str, level: AccessLevel) {
        let key = self.normalize(keyword);
        self.keywords.insert(key, level);
    }

    #[must_use]
    pub fn lookup(&self, keyword: &str) -> Option<AccessLevel> {
        if self.case_sensitive {
            self.keywords.get(keyword).copied()
        } else {
            self.keywords.get(&keyword.to_lowercase()).copied()
        }
    }

    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Access level implied by the modifier tokens in `range`
    ///
    /// `protected` with `internal` and `private` with `protected` combine in
    /// either order. Otherwise the first recognized keyword decides.
    #[must_use]
    pub fn resolve(&self, stream: &TokenStream, range: TokenRange) -> AccessLevel {
        let found: Vec<AccessLevel> = range
            .indices()
            .filter(|&i| stream.prototype_tag(i).is_some_and(|tag| tag.is_modifier()))
            .filter_map(|i| self.lookup(stream.token_text(i)))
            .collect();

        let has = |level| found.contains(&level);
        if has(AccessLevel::Protected) && has(AccessLevel::Internal) {
            AccessLevel::ProtectedInternal
        } else if has(AccessLevel::Private) && has(AccessLevel::Protected) {
            AccessLevel::PrivateProtected
        } else {
            found.first().copied().unwrap_or_default()
        }
    }

    fn normalize(&self, keyword: &str) -> String {
        if self.case_sensitive {
            keyword.to_string()
        } else {
            keyword.to_lowercase()
        }
    }
}

impl Default for AccessKeywords {
    fn default() -> Self {
        AccessKeywords::clone(&DEFAULT_ACCESS_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenization::PrototypeTag;

    fn modifiers(text: &str) -> TokenStream {
        let mut stream = TokenStream::tokenize(text);
        for i in 0..stream.len() {
            if !stream.is_whitespace(i) {
                stream.set_prototype_tag(i, Some(PrototypeTag::TypeModifier));
            }
        }
        stream
    }

    #[test]
    fn first_keyword_wins() {
        let stream = modifiers("public static");
        let level = DEFAULT_ACCESS_KEYWORDS.resolve(&stream, stream.full_range());
        assert_eq!(level, AccessLevel::Public);
    }

    #[test]
    fn combined_keywords() {
        let keywords = AccessKeywords::default();

        let stream = modifiers("internal protected");
        assert_eq!(
            keywords.resolve(&stream, stream.full_range()),
            AccessLevel::ProtectedInternal
        );

        let stream = modifiers("private protected");
        assert_eq!(
            keywords.resolve(&stream, stream.full_range()),
            AccessLevel::PrivateProtected
        );
    }

    #[test]
    fn untagged_keywords_are_ignored() {
        let stream = TokenStream::tokenize("public void");
        assert_eq!(
            DEFAULT_ACCESS_KEYWORDS.resolve(&stream, stream.full_range()),
            AccessLevel::Unknown
        );
    }

    #[test]
    fn case_sensitivity() {
        let stream = modifiers("PUBLIC");
        assert_eq!(
            DEFAULT_ACCESS_KEYWORDS.resolve(&stream, stream.full_range()),
            AccessLevel::Unknown
        );

        let insensitive = AccessKeywords::new(false).with("Public", AccessLevel::Public);
        assert_eq!(insensitive.lookup("public"), Some(AccessLevel::Public));
        assert_eq!(
            insensitive.resolve(&stream, stream.full_range()),
            AccessLevel::Public
        );
    }

    #[test]
    fn display_and_serde_names() {
        assert_eq!(AccessLevel::ProtectedInternal.to_string(), "protected internal");
        let json = serde_json::to_string(&AccessLevel::PrivateProtected).unwrap();
        assert_eq!(json, "\"private_protected\"");
    }
}
