//! Speech port - Interface for speech-to-text and text-to-speech operations

use async_trait::async_trait;
use domain::{AudioFormat, LanguageCode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a transcription operation
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Language the recognizer was asked for
    pub language: Option<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: Option<f32>,
}

/// Result of a speech synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Generated audio data
    pub audio_data: Vec<u8>,
    /// Container format of the audio
    pub format: AudioFormat,
}

/// Port for speech processing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Synthesize speech from text (Text-to-Speech)
    ///
    /// # Arguments
    /// * `text` - Non-empty text to synthesize
    /// * `language` - Validated language code
    ///
    /// # Returns
    /// Synthesis result with the compressed audio buffer
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<SynthesisResult, ApplicationError>;

    /// Transcribe audio data to text (Speech-to-Text)
    ///
    /// # Arguments
    /// * `audio_data` - Raw upload bytes
    /// * `format` - Container format of the upload
    /// * `language` - Validated language hint
    ///
    /// # Returns
    /// Transcription result with text and metadata
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
        language: &LanguageCode,
    ) -> Result<TranscriptionResult, ApplicationError>;

    /// Check if the speech backends are reachable
    async fn is_available(&self) -> bool;
}
