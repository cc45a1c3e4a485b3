//! Speech adapter - binds the external providers to the speech port
//!
//! Synthesis passes straight through to the TTS provider. Transcription
//! materializes the upload to a scoped temp file, transcodes it to the
//! recognizer's 16 kHz mono FLAC when needed, and hands the buffered
//! stream to the recognition provider. The temp files are
//! `NamedTempFile`s, so they are deleted on every exit path - success,
//! recognized-but-empty, or error.

use std::path::PathBuf;

use ai_speech::types::{AudioData, AudioFormat};
use ai_speech::{AudioConverter, SpeechApiClient, SpeechConfig, TranslateTtsClient};
use ai_speech::ports::{SpeechToText, TextToSpeech};
use application::ApplicationError;
use application::ports::{SpeechPort, SynthesisResult, TranscriptionResult};
use async_trait::async_trait;
use domain::LanguageCode;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use super::{to_application_error, to_domain_format, to_speech_format};

/// Sample rate the recognizer consumes
const RECOGNIZER_SAMPLE_RATE: u32 = 16_000;

/// Adapter implementing [`SpeechPort`] over the HTTP providers
#[derive(Debug, Clone)]
pub struct SpeechAdapter {
    tts: TranslateTtsClient,
    stt: SpeechApiClient,
    converter: AudioConverter,
    temp_dir: Option<PathBuf>,
}

impl SpeechAdapter {
    /// Create a new speech adapter
    ///
    /// # Arguments
    /// * `config` - Speech service configuration
    /// * `temp_dir` - Directory for request-scoped temp files (system
    ///   default if `None`)
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` for invalid configuration.
    pub fn new(config: &SpeechConfig, temp_dir: Option<PathBuf>) -> Result<Self, ApplicationError> {
        let converter = config
            .ffmpeg_path
            .as_deref()
            .map_or_else(AudioConverter::new, AudioConverter::with_ffmpeg_path);

        let tts = TranslateTtsClient::new(config.clone()).map_err(to_application_error)?;
        let stt = SpeechApiClient::new(config.clone()).map_err(to_application_error)?;

        Ok(Self {
            tts,
            stt,
            converter,
            temp_dir,
        })
    }

    /// Create a scoped temp file with the given suffix
    fn temp_file(&self, suffix: &str) -> Result<NamedTempFile, ApplicationError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("voicebooth_").suffix(suffix);

        let result = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };

        result.map_err(|e| ApplicationError::Storage(format!("Failed to create temp file: {e}")))
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<SynthesisResult, ApplicationError> {
        let audio = self
            .tts
            .synthesize(text, language.as_str())
            .await
            .map_err(to_application_error)?;

        let format = to_domain_format(audio.format());
        Ok(SynthesisResult {
            audio_data: audio.into_data(),
            format,
        })
    }

    #[instrument(skip(self, audio_data), fields(
        upload_size = audio_data.len(),
        format = %format.extension(),
        language = %language
    ))]
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        format: domain::AudioFormat,
        language: &LanguageCode,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let speech_format = to_speech_format(format);

        // Materialize the upload; the handle scopes its lifetime
        let upload = self.temp_file(&format!(".{}", speech_format.extension()))?;
        tokio::fs::write(upload.path(), &audio_data)
            .await
            .map_err(|e| ApplicationError::Storage(format!("Failed to write temp file: {e}")))?;

        let flac_bytes = if speech_format.is_recognizer_native() {
            tokio::fs::read(upload.path())
                .await
                .map_err(|e| ApplicationError::Storage(format!("Failed to read temp file: {e}")))?
        } else {
            debug!(from = %speech_format, "Transcoding upload for the recognizer");
            let transcoded = self.temp_file(".flac")?;
            self.converter
                .convert_file(upload.path(), transcoded.path(), AudioFormat::Flac)
                .await
                .map_err(to_application_error)?;
            tokio::fs::read(transcoded.path())
                .await
                .map_err(|e| ApplicationError::Storage(format!("Failed to read temp file: {e}")))?
            // transcoded is dropped (and deleted) here
        };

        let audio =
            AudioData::new(flac_bytes, AudioFormat::Flac).with_sample_rate(RECOGNIZER_SAMPLE_RATE);
        let transcription = self
            .stt
            .transcribe(audio, language.as_str())
            .await
            .map_err(to_application_error)?;

        Ok(TranscriptionResult {
            text: transcription.text,
            language: transcription.language,
            confidence: transcription.confidence,
        })
    }

    async fn is_available(&self) -> bool {
        self.tts.is_available().await && self.stt.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::LanguageTable;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn english() -> LanguageCode {
        LanguageTable::default().select("en").unwrap()
    }

    fn config_for(mock_server: &MockServer, ffmpeg_path: Option<&str>) -> SpeechConfig {
        SpeechConfig {
            tts_base_url: mock_server.uri(),
            stt_base_url: mock_server.uri(),
            stt_api_key: "test-key".to_string(),
            ffmpeg_path: ffmpeg_path.map(String::from),
            ..Default::default()
        }
    }

    fn temp_file_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn synthesize_passes_through_to_the_provider() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xAA; 64]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let adapter = SpeechAdapter::new(&config_for(&mock_server, None), None).unwrap();
        let result = adapter.synthesize("Hello", &english()).await.unwrap();

        assert_eq!(result.audio_data.len(), 64);
        assert_eq!(result.format, domain::AudioFormat::Mp3);
    }

    #[tokio::test]
    async fn transcribe_flac_skips_transcode_and_cleans_up() {
        let mock_server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().unwrap();

        let body = concat!(
            "{\"result\":[]}\n",
            "{\"result\":[{\"alternative\":[{\"transcript\":\"hello world\"}]}]}\n",
        );
        Mock::given(method("POST"))
            .and(path("/recognize"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let adapter = SpeechAdapter::new(
            &config_for(&mock_server, None),
            Some(temp_dir.path().to_path_buf()),
        )
        .unwrap();

        let result = adapter
            .transcribe(vec![0x66, 0x4C, 0x61, 0x43], domain::AudioFormat::Flac, &english())
            .await
            .unwrap();

        assert!(result.text.to_lowercase().contains("hello world"));
        assert_eq!(temp_file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn transcribe_backend_failure_still_cleans_up() {
        let mock_server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .and(path("/recognize"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let adapter = SpeechAdapter::new(
            &config_for(&mock_server, None),
            Some(temp_dir.path().to_path_buf()),
        )
        .unwrap();

        let result = adapter
            .transcribe(vec![1, 2, 3], domain::AudioFormat::Flac, &english())
            .await;

        assert!(matches!(result, Err(ApplicationError::ServiceUnavailable(_))));
        assert_eq!(temp_file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn transcribe_transcode_failure_still_cleans_up() {
        let mock_server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().unwrap();

        // Broken ffmpeg: the transcode step fails before any HTTP call
        let adapter = SpeechAdapter::new(
            &config_for(&mock_server, Some("/nonexistent/ffmpeg")),
            Some(temp_dir.path().to_path_buf()),
        )
        .unwrap();

        let result = adapter
            .transcribe(vec![1, 2, 3, 4], domain::AudioFormat::Wav, &english())
            .await;

        assert!(matches!(result, Err(ApplicationError::AudioProcessing(_))));
        assert_eq!(temp_file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn transcribe_unintelligible_audio_maps_through() {
        let mock_server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .and(path("/recognize"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\":[]}\n"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let adapter = SpeechAdapter::new(
            &config_for(&mock_server, None),
            Some(temp_dir.path().to_path_buf()),
        )
        .unwrap();

        let result = adapter
            .transcribe(vec![1, 2, 3], domain::AudioFormat::Flac, &english())
            .await;

        assert!(matches!(result, Err(ApplicationError::UnintelligibleAudio)));
        assert_eq!(temp_file_count(temp_dir.path()), 0);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SpeechConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        let result = SpeechAdapter::new(&config, None);
        assert!(matches!(result, Err(ApplicationError::Internal(_))));
    }
}
