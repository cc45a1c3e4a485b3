//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A selector widget submitted a value outside its table
    #[error("Invalid {kind} selection: {value}")]
    InvalidSelection {
        /// Which selector was invalid ("language" or "speed")
        kind: String,
        /// The rejected value
        value: String,
    },

    /// Synthesis was requested for a language outside the supported set
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    /// Utterance text was empty or whitespace-only
    #[error("Text must not be empty")]
    EmptyText,
}

impl DomainError {
    /// Create an invalid-selection error
    pub fn invalid_selection(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSelection {
            kind: kind.into(),
            value: value.into(),
        }
    }
}
