//! Utterance request entity
//!
//! An utterance request captures one synthesis submission: the text to
//! speak, a validated language, and a speed tier. It is immutable once
//! constructed.

use crate::errors::DomainError;
use crate::value_objects::{LanguageCode, SpeedTier};

/// A validated request to synthesize speech from text
#[derive(Debug, Clone)]
pub struct UtteranceRequest {
    text: String,
    language: LanguageCode,
    speed: SpeedTier,
}

impl UtteranceRequest {
    /// Create a new utterance request
    ///
    /// The text is trimmed; a language code can only be obtained through
    /// the language table, so membership is already proven.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyText`] if the text is empty or
    /// whitespace-only.
    pub fn new(
        text: impl Into<String>,
        language: LanguageCode,
        speed: SpeedTier,
    ) -> Result<Self, DomainError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(DomainError::EmptyText);
        }
        Ok(Self {
            text,
            language,
            speed,
        })
    }

    /// The text to synthesize
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The validated language
    #[must_use]
    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// The requested speed tier
    #[must_use]
    pub const fn speed(&self) -> SpeedTier {
        self.speed
    }
}
