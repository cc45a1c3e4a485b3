//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The recognizer could not map the audio to any text
    #[error("Could not understand the audio")]
    UnintelligibleAudio,

    /// The external service rejected the request or could not be reached
    #[error("Speech service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Input container unrecognized and no transcode path exists
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Transcription failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Invalid response from service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Audio decoding, encoding, or re-timing failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),

    /// Temp file or output write failure
    #[error("I/O failure: {0}")]
    Io(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        // Transport-level failures all mean the backend was unreachable;
        // HTTP status handling stays in the providers.
        Self::ServiceUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for SpeechError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<hound::Error> for SpeechError {
    fn from(err: hound::Error) -> Self {
        Self::AudioProcessing(err.to_string())
    }
}
