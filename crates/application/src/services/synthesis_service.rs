//! Synthesis service - the Text-to-Speech flow
//!
//! Orchestrates one synthesis request:
//! 1. Validate language, speed tier, and text
//! 2. Call the external TTS backend
//! 3. Write the artifact under a unique timestamped name
//! 4. Apply the optional speed adjustment (in place on success)
//! 5. Build waveform chart data
//!
//! Partial failures keep the usable part: a failed adjustment or a
//! failed waveform render still returns the playable artifact.

use std::{fmt, sync::Arc};

use domain::{AudioFormat, LanguageTable, SpeedTier, UtteranceRequest};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{
    ArtifactStorePort, AudioProcessingPort, SpeechPort, StoredArtifact, WaveformData,
};

/// Base file name artifacts are derived from
const OUTPUT_BASE_NAME: &str = "output";

/// Result of one synthesis flow
#[derive(Debug)]
pub struct SynthesisOutcome {
    /// The stored artifact (post-adjustment when adjustment succeeded)
    pub artifact: StoredArtifact,
    /// Container format of the artifact
    pub format: AudioFormat,
    /// The requested speed tier
    pub speed: SpeedTier,
    /// Whether the speed adjustment was applied
    ///
    /// False for the normal tier and when adjustment failed (the
    /// original artifact is kept in that case).
    pub speed_adjusted: bool,
    /// Waveform chart data; absent when rendering failed
    pub waveform: Option<WaveformData>,
}

/// Service for the Text-to-Speech flow
pub struct SynthesisService {
    speech: Arc<dyn SpeechPort>,
    audio: Arc<dyn AudioProcessingPort>,
    store: Arc<dyn ArtifactStorePort>,
    languages: Arc<LanguageTable>,
}

impl fmt::Debug for SynthesisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthesisService").finish_non_exhaustive()
    }
}

impl SynthesisService {
    /// Create a new synthesis service
    pub fn new(
        speech: Arc<dyn SpeechPort>,
        audio: Arc<dyn AudioProcessingPort>,
        store: Arc<dyn ArtifactStorePort>,
        languages: Arc<LanguageTable>,
    ) -> Self {
        Self {
            speech,
            audio,
            store,
            languages,
        }
    }

    /// The language table backing the selector widget
    #[must_use]
    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Run the synthesis flow for raw selector values
    ///
    /// # Errors
    ///
    /// - [`domain::DomainError::UnsupportedLanguage`] for a language
    ///   outside the supported set (no file is written)
    /// - [`domain::DomainError::InvalidSelection`] for an unknown speed
    ///   tier
    /// - [`domain::DomainError::EmptyText`] for empty input text
    /// - Speech/storage variants for backend and I/O failures
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language, speed = %speed))]
    pub async fn synthesize(
        &self,
        text: &str,
        language: &str,
        speed: &str,
    ) -> Result<SynthesisOutcome, ApplicationError> {
        let language = self.languages.require(language)?;
        let speed: SpeedTier = speed.parse()?;
        let request = UtteranceRequest::new(text, language, speed)?;

        info!("Starting speech synthesis");
        let synthesis = self
            .speech
            .synthesize(request.text(), request.language())
            .await?;
        let format = synthesis.format;

        let base_name = format!("{OUTPUT_BASE_NAME}.{}", format.extension());
        let mut artifact = self.store.save(&base_name, &synthesis.audio_data).await?;
        debug!(file_name = %artifact.file_name, size = artifact.size_bytes, "Artifact stored");

        // Speed adjustment rewrites the artifact in place; any failure
        // keeps the pre-adjustment artifact usable.
        let mut audio_data = synthesis.audio_data;
        let mut speed_adjusted = false;
        if !request.speed().is_normal() {
            match self
                .audio
                .adjust_speed(audio_data.clone(), format, request.speed().multiplier())
                .await
            {
                Ok(adjusted) => match self.store.overwrite(&artifact.file_name, &adjusted).await {
                    Ok(updated) => {
                        artifact = updated;
                        audio_data = adjusted;
                        speed_adjusted = true;
                        info!(
                            multiplier = f64::from(request.speed().multiplier()),
                            "Audio speed adjusted"
                        );
                    },
                    Err(e) => {
                        warn!(error = %e, "Failed to rewrite adjusted artifact, keeping original");
                    },
                },
                Err(e) => {
                    warn!(error = %e, "Speed adjustment failed, keeping original artifact");
                },
            }
        }

        // The chart is display-only; a failed render is not fatal
        let waveform = match self.audio.waveform(audio_data, format).await {
            Ok(waveform) => Some(waveform),
            Err(e) => {
                warn!(error = %e, "Waveform rendering failed");
                None
            },
        };

        info!(
            file_name = %artifact.file_name,
            speed_adjusted,
            has_waveform = waveform.is_some(),
            "Synthesis complete"
        );

        Ok(SynthesisOutcome {
            artifact,
            format,
            speed: request.speed(),
            speed_adjusted,
            waveform,
        })
    }
}
