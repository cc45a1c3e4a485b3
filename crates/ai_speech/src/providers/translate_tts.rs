//! Translate TTS provider
//!
//! Implements `TextToSpeech` against the translate TTS endpoint: one GET
//! per text chunk, MP3 body per chunk, chunks concatenated in order.
//! Long input is split at whitespace into chunks of at most
//! `tts_chunk_chars` characters, the way the original client library
//! splits before requesting.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

/// Client token the endpoint expects
const CLIENT_TOKEN: &str = "tw-ob";

/// TTS provider speaking the translate TTS protocol
#[derive(Debug, Clone)]
pub struct TranslateTtsClient {
    client: Client,
    config: SpeechConfig,
}

impl TranslateTtsClient {
    /// Create a new TTS client
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

    /// Build the synthesis endpoint URL
    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.tts_base_url)
    }

    /// Fetch the MP3 bytes for a single chunk
    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, SpeechError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", CLIENT_TOKEN),
                ("tl", language),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(SpeechError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        Ok(response.bytes().await?)
    }
}

/// Split text into chunks of at most `max_chars` characters
///
/// Splits at whitespace where possible; a single word longer than the
/// limit is hard-split.
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    let flush = |current: &mut String, current_len: &mut usize, chunks: &mut Vec<String>| {
        if !current.is_empty() {
            chunks.push(std::mem::take(current));
            *current_len = 0;
        }
    };

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            flush(&mut current, &mut current_len, &mut chunks);
            let mut piece = String::new();
            let mut piece_len = 0usize;
            for ch in word.chars() {
                piece.push(ch);
                piece_len += 1;
                if piece_len == max_chars {
                    chunks.push(std::mem::take(&mut piece));
                    piece_len = 0;
                }
            }
            if !piece.is_empty() {
                current = piece;
                current_len = piece_len;
            }
        } else if current.is_empty() {
            current = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            flush(&mut current, &mut current_len, &mut chunks);
            current = word.to_string();
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl TextToSpeech for TranslateTtsClient {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let chunks = chunk_text(text, self.config.tts_chunk_chars);
        debug!(chunk_count = chunks.len(), "Synthesizing speech");

        // One sequential request per chunk; MP3 frame streams concatenate
        let mut buffer = Vec::new();
        let total = chunks.len();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, total).await?;
            buffer.extend_from_slice(&bytes);
        }

        if buffer.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Synthesis returned no audio".to_string(),
            ));
        }

        debug!(audio_size = buffer.len(), "Speech synthesis complete");
        Ok(AudioData::new(buffer, AudioFormat::Mp3))
    }

    async fn is_available(&self) -> bool {
        match self
            .client
            .get(&self.config.tts_base_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => !response.status().is_server_error(),
            Err(e) => {
                warn!("TTS availability check failed: {}", e);
                false
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> TranslateTtsClient {
        let config = SpeechConfig {
            tts_base_url: mock_server.uri(),
            ..Default::default()
        };
        TranslateTtsClient::new(config).unwrap()
    }

    mod chunking {
        use super::*;

        #[test]
        fn short_text_is_one_chunk() {
            let chunks = chunk_text("hello world", 200);
            assert_eq!(chunks, vec!["hello world".to_string()]);
        }

        #[test]
        fn long_text_splits_at_whitespace() {
            let chunks = chunk_text("aaa bbb ccc ddd", 7);
            assert_eq!(chunks, vec!["aaa bbb", "ccc ddd"]);
        }

        #[test]
        fn every_chunk_respects_the_limit() {
            let text = "the quick brown fox jumps over the lazy dog ".repeat(20);
            for chunk in chunk_text(&text, 50) {
                assert!(chunk.chars().count() <= 50, "oversized chunk: {chunk}");
            }
        }

        #[test]
        fn oversized_word_is_hard_split() {
            let chunks = chunk_text("abcdefghij", 4);
            assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
        }

        #[test]
        fn whitespace_only_text_yields_no_chunks() {
            assert!(chunk_text("   \n\t ", 10).is_empty());
        }

        #[test]
        fn chunks_preserve_word_order() {
            let text = "one two three four five six";
            let joined = chunk_text(text, 9).join(" ");
            assert_eq!(joined, text);
        }
    }

    #[tokio::test]
    async fn synthesize_success() {
        let mock_server = MockServer::start().await;
        let audio_bytes = vec![0xFFu8; 512]; // Fake MP3 data

        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("tl", "en"))
            .and(query_param("client", CLIENT_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(audio_bytes.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let audio = client.synthesize("Hello, world!", "en").await.unwrap();

        assert_eq!(audio.format(), AudioFormat::Mp3);
        assert_eq!(audio.size_bytes(), 512);
    }

    #[tokio::test]
    async fn synthesize_long_text_concatenates_chunks() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xABu8; 100]))
            .expect(2)
            .mount(&mock_server)
            .await;

        let config = SpeechConfig {
            tts_base_url: mock_server.uri(),
            tts_chunk_chars: 16,
            ..Default::default()
        };
        let client = TranslateTtsClient::new(config).unwrap();

        // Two chunks at a 16-char limit
        let audio = client
            .synthesize("first chunk here second chunk", "en")
            .await
            .unwrap();

        assert_eq!(audio.size_bytes(), 200);
    }

    #[tokio::test]
    async fn synthesize_empty_text_fails_without_request() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let result = client.synthesize("   ", "en").await;
        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
    }

    #[tokio::test]
    async fn synthesize_server_error_is_service_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.synthesize("Hello", "en").await;

        assert!(matches!(result, Err(SpeechError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn synthesize_client_error_is_synthesis_failed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.synthesize("Hello", "en").await;

        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
    }

    #[tokio::test]
    async fn synthesize_empty_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.synthesize("Hello", "en").await;

        assert!(matches!(result, Err(SpeechError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn is_available_when_endpoint_responds() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(client.is_available().await);
    }

    #[tokio::test]
    async fn is_not_available_on_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(!client.is_available().await);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SpeechConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            TranslateTtsClient::new(config),
            Err(SpeechError::Configuration(_))
        ));
    }
}
