//! Concrete speech providers (adapters)
//!
//! - `translate_tts` - synthesis through the translate TTS endpoint
//! - `speech_api` - recognition through the full-duplex speech API

pub mod speech_api;
pub mod translate_tts;
