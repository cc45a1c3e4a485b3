//! Speech API recognition provider
//!
//! Implements `SpeechToText` against the full-duplex speech API v2: one
//! POST with a FLAC body and a language hint, response is a stream of
//! newline-delimited JSON objects of which the first non-empty `result`
//! carries the transcript alternatives.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::{AudioData, Transcription};

/// Sample rate the recognizer is handed (the converter resamples to this)
const RECOGNIZER_SAMPLE_RATE: u32 = 16_000;

/// STT provider speaking the speech API v2 protocol
#[derive(Debug, Clone)]
pub struct SpeechApiClient {
    client: Client,
    config: SpeechConfig,
}

impl SpeechApiClient {
    /// Create a new STT client
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Build the recognition endpoint URL
    fn recognize_url(&self) -> String {
        format!("{}/recognize", self.config.stt_base_url)
    }
}

/// One newline-delimited response object
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    result: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternative: Vec<RecognizeAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeAlternative {
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

/// Parse the newline-delimited response body
///
/// The endpoint emits an empty `{"result":[]}` line before the real
/// result; an entirely empty result set means the recognizer could not
/// map the audio to text.
fn parse_response(body: &str) -> Result<Transcription, SpeechError> {
    let mut parsed_any = false;

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let response: RecognizeResponse = serde_json::from_str(line)
            .map_err(|e| SpeechError::InvalidResponse(format!("Malformed response line: {e}")))?;
        parsed_any = true;

        for result in response.result {
            if let Some(alternative) = result.alternative.first() {
                if !alternative.transcript.trim().is_empty() {
                    let mut transcription = Transcription::new(alternative.transcript.clone());
                    if let Some(confidence) = alternative.confidence {
                        transcription = transcription.with_confidence(confidence);
                    }
                    return Ok(transcription);
                }
            }
        }
    }

    if parsed_any {
        Err(SpeechError::UnintelligibleAudio)
    } else {
        Err(SpeechError::InvalidResponse(
            "Empty recognition response".to_string(),
        ))
    }
}

#[async_trait]
impl SpeechToText for SpeechApiClient {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), language = %language))]
    async fn transcribe(
        &self,
        audio: AudioData,
        language: &str,
    ) -> Result<Transcription, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::TranscriptionFailed(
                "Audio data is empty".to_string(),
            ));
        }

        if !audio.format().is_recognizer_native() {
            return Err(SpeechError::UnsupportedFormat(format!(
                "Recognizer consumes FLAC, got {}",
                audio.format()
            )));
        }

        let sample_rate = audio.sample_rate().unwrap_or(RECOGNIZER_SAMPLE_RATE);
        debug!("Transcribing audio through the speech API");

        let response = self
            .client
            .post(self.recognize_url())
            .query(&[
                ("client", "chromium"),
                ("lang", language),
                ("key", self.config.stt_api_key.as_str()),
            ])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("audio/x-flac; rate={sample_rate}"),
            )
            .body(audio.into_data())
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(SpeechError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::TranscriptionFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let transcription = parse_response(&body)?;

        debug!(
            text_len = transcription.text.len(),
            confidence = ?transcription.confidence,
            "Transcription complete"
        );

        Ok(transcription.with_language(language))
    }

    async fn is_available(&self) -> bool {
        match self
            .client
            .get(&self.config.stt_base_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => !response.status().is_server_error(),
            Err(e) => {
                warn!("STT availability check failed: {}", e);
                false
            },
        }
    }
}
