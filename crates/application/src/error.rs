//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Each external-call failure mode stays distinguishable so the flow
/// boundary can surface a distinct message per panel.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The recognizer could not map the audio to any text
    #[error("Could not understand the audio")]
    UnintelligibleAudio,

    /// A speech backend rejected the request or could not be reached
    #[error("Speech service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Upload container unrecognized and no transcode path exists
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Transcription failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Audio decoding, encoding, or re-timing failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),

    /// Artifact or temp file I/O failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested artifact does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
