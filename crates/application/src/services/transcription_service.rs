//! Transcription service - the Speech-to-Text flow
//!
//! Orchestrates one transcription request: validate the language
//! selection, resolve the upload container, call the recognition port,
//! and reject whitespace-only transcripts.

use std::{fmt, sync::Arc};

use domain::{AudioFormat, LanguageTable};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{SpeechPort, TranscriptionResult};

/// Service for the Speech-to-Text flow
pub struct TranscriptionService {
    speech: Arc<dyn SpeechPort>,
    languages: Arc<LanguageTable>,
}

impl fmt::Debug for TranscriptionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionService").finish_non_exhaustive()
    }
}

impl TranscriptionService {
    /// Create a new transcription service
    pub fn new(speech: Arc<dyn SpeechPort>, languages: Arc<LanguageTable>) -> Self {
        Self { speech, languages }
    }

    /// The language table backing the selector widget
    #[must_use]
    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Run the transcription flow for an uploaded file
    ///
    /// The container is resolved from the declared MIME type first,
    /// falling back to the file extension.
    ///
    /// # Errors
    ///
    /// - [`domain::DomainError::InvalidSelection`] for an unknown
    ///   language selection
    /// - [`ApplicationError::UnsupportedFormat`] when the container
    ///   cannot be resolved
    /// - [`ApplicationError::UnintelligibleAudio`] when the recognizer
    ///   produced no text
    /// - Other speech variants for backend failures
    #[instrument(skip(self, data), fields(
        upload_size = data.len(),
        file_name = %file_name,
        language = %language
    ))]
    pub async fn transcribe(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: Option<&str>,
        language: &str,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let language = self.languages.select(language)?;

        let format = content_type
            .and_then(AudioFormat::from_mime_type)
            .or_else(|| AudioFormat::from_file_name(file_name))
            .ok_or_else(|| {
                ApplicationError::UnsupportedFormat(format!(
                    "Unrecognized audio container: {file_name}"
                ))
            })?;

        if data.is_empty() {
            return Err(ApplicationError::TranscriptionFailed(
                "Uploaded file is empty".to_string(),
            ));
        }

        info!(format = %format.extension(), "Starting transcription");
        let result = self.speech.transcribe(data, format, &language).await?;

        if result.text.trim().is_empty() {
            return Err(ApplicationError::UnintelligibleAudio);
        }

        debug!(text_len = result.text.len(), "Transcription complete");
        Ok(result)
    }

    /// Check if the speech backends are reachable
    pub async fn is_available(&self) -> bool {
        self.speech.is_available().await
    }
}
