//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech processing adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Port for Speech-to-Text (STT) implementations
///
/// Implementations of this trait convert audio data to text transcriptions.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text with a language hint
    ///
    /// # Arguments
    ///
    /// * `audio` - Audio data to transcribe
    /// * `language` - Short language code (e.g. "en", "de")
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::UnintelligibleAudio` when the recognizer
    /// produced no text, `SpeechError::ServiceUnavailable` when the
    /// backend could not be reached or rejected the call, and other
    /// variants for malformed input or responses.
    async fn transcribe(
        &self,
        audio: AudioData,
        language: &str,
    ) -> Result<Transcription, SpeechError>;

    /// Check if the STT service is reachable
    async fn is_available(&self) -> bool;
}

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations of this trait convert text to spoken audio.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// # Arguments
    ///
    /// * `text` - Text to synthesize (non-empty)
    /// * `language` - Short language code from the supported set
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::SynthesisFailed` when the backend rejected
    /// the request and `SpeechError::ServiceUnavailable` when it could
    /// not be reached.
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError>;

    /// Check if the TTS service is reachable
    async fn is_available(&self) -> bool;
}
