//! Language table and validated language codes
//!
//! The supported-language set is a fixed, process-wide table built once at
//! startup and shared by reference. A [`LanguageCode`] can only be obtained
//! through the table, so holding one proves membership.
//!
//! # Examples
//!
//! ```
//! use domain::LanguageTable;
//!
//! let table = LanguageTable::default();
//! let lang = table.select("en").unwrap();
//! assert_eq!(lang.as_str(), "en");
//! assert_eq!(table.display_name("en"), Some("English"));
//! assert!(table.select("xx").is_err());
//! ```

use std::fmt;

use serde::Serialize;

use crate::errors::DomainError;

/// A single supported language: short code plus display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Short code used by the external services (e.g. "en", "zh-CN")
    pub code: String,
    /// Human-readable name shown in the selector widget
    pub name: String,
}

/// The fixed set of supported languages, in selector display order
const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("zh-CN", "Chinese"),
];

/// Immutable mapping of supported language codes to display names
#[derive(Debug, Clone)]
pub struct LanguageTable {
    languages: Vec<Language>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self {
            languages: SUPPORTED_LANGUAGES
                .iter()
                .map(|(code, name)| Language {
                    code: (*code).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }
}

impl LanguageTable {
    /// Iterate over the supported languages in display order
    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    /// Number of supported languages
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the table is empty (never, for the default table)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Check whether a code is in the supported set
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l.code == code)
    }

    /// Display name for a code, if supported
    #[must_use]
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.name.as_str())
    }

    /// Validate a selector value, reporting `InvalidSelection` on a miss
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSelection`] if the code is not in the
    /// supported set.
    pub fn select(&self, code: &str) -> Result<LanguageCode, DomainError> {
        if self.contains(code) {
            Ok(LanguageCode {
                code: code.to_string(),
            })
        } else {
            Err(DomainError::invalid_selection("language", code))
        }
    }

    /// Validate a synthesis language, reporting `UnsupportedLanguage` on a miss
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedLanguage`] if the code is not in
    /// the supported set.
    pub fn require(&self, code: &str) -> Result<LanguageCode, DomainError> {
        if self.contains(code) {
            Ok(LanguageCode {
                code: code.to_string(),
            })
        } else {
            Err(DomainError::UnsupportedLanguage(code.to_string()))
        }
    }
}

/// A language code validated against the [`LanguageTable`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageCode {
    code: String,
}

impl LanguageCode {
    /// The short code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
