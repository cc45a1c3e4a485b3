//! AI Speech - Speech-to-Text and Text-to-Speech adapters
//!
//! Provides the speech plumbing for VoiceBooth:
//! - `SpeechToText` / `TextToSpeech` - the ports the flows call
//! - `providers` - HTTP clients for the external synthesis and
//!   recognition services
//! - `AudioConverter` - container transcoding through the `ffmpeg` binary
//! - `SpeedAdjuster` - pitch-coupled playback-speed change
//! - `WaveformRenderer` - amplitude-vs-time chart data for the browser
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{SpeechConfig, TextToSpeech, TranslateTtsClient};
//!
//! let tts = TranslateTtsClient::new(SpeechConfig::default())?;
//! let audio = tts.synthesize("Hello, world!", "en").await?;
//! assert!(!audio.is_empty());
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod pcm;
pub mod ports;
pub mod postprocess;
pub mod providers;
pub mod types;
pub mod waveform;

pub use config::SpeechConfig;
pub use converter::AudioConverter;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use postprocess::SpeedAdjuster;
pub use providers::speech_api::SpeechApiClient;
pub use providers::translate_tts::TranslateTtsClient;
pub use types::{AudioData, AudioFormat, Transcription};
pub use waveform::{Waveform, WaveformRenderer};
