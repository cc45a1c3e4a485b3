//! Application services

pub mod synthesis_service;
pub mod transcription_service;

pub use synthesis_service::{SynthesisOutcome, SynthesisService};
pub use transcription_service::TranscriptionService;
