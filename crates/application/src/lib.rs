//! Application layer for VoiceBooth
//!
//! Orchestrates the two speech flows (synthesis, transcription) against
//! the ports it defines. Concrete adapters live in the infrastructure
//! crate.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{SynthesisOutcome, SynthesisService, TranscriptionService};
