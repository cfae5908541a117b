//! Language profile documents
//!
//! A profile is the part of a language's configuration the prototype layer
//! needs. Profiles are plain TOML:
//!
//! ```toml
//! name = "C#"
//! supports_implied_types = false
//!
//! [access_keywords]
//! public = "public"
//! private = "private"
//! protected = "protected"
//! internal = "internal"
//! ```
//!
//! Several profiles can share one file as a `[[language]]` array.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::prototype::{AccessKeywords, AccessLevel, DEFAULT_ACCESS_KEYWORDS};

/// Errors that can occur when loading language profiles.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("language name cannot be empty")]
    EmptyName,

    #[error("language '{0}' has an empty access keyword")]
    EmptyKeyword(String),

    #[error("language '{language}' defines access keyword '{keyword}' more than once")]
    DuplicateKeyword { language: String, keyword: String },

    #[error("language '{0}' is defined more than once")]
    DuplicateLanguage(String),
}

fn default_true() -> bool {
    true
}

/// Per-language settings for prototype structuring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageProfile {
    /// Language name, such as `C#` or `Pascal`.
    pub name: String,

    /// Whether `int x, y` gives `y` the type `int`.
    #[serde(default = "default_true")]
    pub supports_implied_types: bool,

    /// Whether access keywords must match case exactly.
    #[serde(default = "default_true")]
    pub case_sensitive: bool,

    /// Modifier keywords and the access level each one means.
    ///
    /// Empty means the default `public`/`private`/`protected`/`internal` table.
    #[serde(default)]
    pub access_keywords: BTreeMap<String, AccessLevel>,
}

impl LanguageProfile {
    /// A profile with default settings.
    #[must_use]
    pub fn basic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supports_implied_types: true,
            case_sensitive: true,
            access_keywords: BTreeMap::new(),
        }
    }

    /// Load a profile from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a profile from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or the profile fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        let profile: Self = toml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Serialize the profile to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The keyword table prototypes of this language should use.
    #[must_use]
    pub fn keywords(&self) -> Arc<AccessKeywords> {
        if self.access_keywords.is_empty() && self.case_sensitive {
            return Arc::clone(&*DEFAULT_ACCESS_KEYWORDS);
        }

        let mut keywords = AccessKeywords::new(self.case_sensitive);
        if self.access_keywords.is_empty() {
            for keyword in ["public", "private", "protected", "internal"] {
                if let Some(level) = DEFAULT_ACCESS_KEYWORDS.lookup(keyword) {
                    keywords.insert(keyword, level);
                }
            }
        }
        for (keyword, level) in &self.access_keywords {
            keywords.insert(keyword, *level);
        }
        Arc::new(keywords)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }

        // Keys are unique as written; collisions only appear once case is folded
        let mut seen = std::collections::HashSet::new();
        for keyword in self.access_keywords.keys() {
            if keyword.trim().is_empty() {
                return Err(ProfileError::EmptyKeyword(self.name.clone()));
            }
            let folded = if self.case_sensitive {
                keyword.clone()
            } else {
                keyword.to_lowercase()
            };
            if !seen.insert(folded) {
                return Err(ProfileError::DuplicateKeyword {
                    language: self.name.clone(),
                    keyword: keyword.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A set of profiles loaded from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageProfiles {
    #[serde(default, rename = "language")]
    pub languages: Vec<LanguageProfile>,
}

impl LanguageProfiles {
    /// Load profiles from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse profiles from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid, a profile fails validation,
    /// or two profiles share a name.
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        let profiles: Self = toml::from_str(content)?;
        let mut names = std::collections::HashSet::new();
        for profile in &profiles.languages {
            profile.validate()?;
            if !names.insert(profile.name.to_lowercase()) {
                return Err(ProfileError::DuplicateLanguage(profile.name.clone()));
            }
        }
        Ok(profiles)
    }

    /// Find a profile by name, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&LanguageProfile> {
        self.languages
            .iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_profile() {
        let profile = LanguageProfile::from_toml_str(r#"name = "C""#).unwrap();
        assert_eq!(profile, LanguageProfile::basic("C"));
        assert!(Arc::ptr_eq(&profile.keywords(), &*DEFAULT_ACCESS_KEYWORDS));
    }

    #[test]
    fn test_parse_full_profile() {
        let toml = r#"
name = "Delphi"
supports_implied_types = false
case_sensitive = false

[access_keywords]
Public = "public"
Strict = "private"
Published = "public"
"#;
        let profile = LanguageProfile::from_toml_str(toml).unwrap();
        assert!(!profile.supports_implied_types);

        let keywords = profile.keywords();
        assert!(!keywords.is_case_sensitive());
        assert_eq!(keywords.lookup("PUBLISHED"), Some(AccessLevel::Public));
        assert_eq!(keywords.lookup("strict"), Some(AccessLevel::Private));
        assert_eq!(keywords.lookup("protected"), None);
    }

    #[test]
    fn test_case_insensitive_profile_keeps_default_keywords() {
        let toml = r#"
name = "VB"
case_sensitive = false
"#;
        let keywords = LanguageProfile::from_toml_str(toml).unwrap().keywords();
        assert_eq!(keywords.lookup("Friend"), None);
        assert_eq!(keywords.lookup("Public"), Some(AccessLevel::Public));
        assert_eq!(keywords.len(), 4);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = LanguageProfile::from_toml_str("name = \"C\"\nextensions = [\"c\"]").unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn test_rejects_unknown_access_level() {
        let toml = r#"
name = "C"
[access_keywords]
public = "everyone"
"#;
        assert!(matches!(
            LanguageProfile::from_toml_str(toml),
            Err(ProfileError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            LanguageProfile::from_toml_str(r#"name = "  ""#),
            Err(ProfileError::EmptyName)
        ));

        let toml = r#"
name = "C"
[access_keywords]
"" = "public"
"#;
        assert!(matches!(
            LanguageProfile::from_toml_str(toml),
            Err(ProfileError::EmptyKeyword(_))
        ));

        let toml = r#"
name = "Basic"
case_sensitive = false
[access_keywords]
Public = "public"
PUBLIC = "public"
"#;
        let err = LanguageProfile::from_toml_str(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "language 'Basic' defines access keyword 'Public' more than once"
        );
    }

    #[test]
    fn test_profiles_document() {
        let toml = r#"
[[language]]
name = "C#"
supports_implied_types = false

[[language]]
name = "Pascal"
case_sensitive = false
"#;
        let profiles = LanguageProfiles::from_toml_str(toml).unwrap();
        assert_eq!(profiles.len(), 2);
        assert!(!profiles.find("c#").unwrap().supports_implied_types);
        assert!(!profiles.find("PASCAL").unwrap().case_sensitive);
        assert!(profiles.find("Ruby").is_none());

        let duplicate = "[[language]]\nname = \"C\"\n[[language]]\nname = \"c\"\n";
        assert!(matches!(
            LanguageProfiles::from_toml_str(duplicate),
            Err(ProfileError::DuplicateLanguage(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let mut profile = LanguageProfile::basic("Java");
        profile
            .access_keywords
            .insert("public".to_string(), AccessLevel::Public);
        let text = profile.to_toml_string().unwrap();
        assert_eq!(LanguageProfile::from_toml_str(&text).unwrap(), profile);
    }
}
