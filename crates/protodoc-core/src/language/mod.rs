//! Per-language settings
//!
//! Language front ends own the grammar; the prototype layer only needs to know
//! whether implied types are allowed and which modifiers name access levels.

mod profile;

pub use profile::{LanguageProfile, LanguageProfiles, ProfileError};
