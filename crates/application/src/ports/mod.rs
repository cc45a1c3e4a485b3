//! Ports (interfaces) the application services depend on

pub mod artifact_store_port;
pub mod audio_processing_port;
pub mod speech_port;

pub use artifact_store_port::{ArtifactStorePort, StoredArtifact};
pub use audio_processing_port::{AudioProcessingPort, WaveformData};
pub use speech_port::{SpeechPort, SynthesisResult, TranscriptionResult};

#[cfg(test)]
pub use artifact_store_port::MockArtifactStorePort;
#[cfg(test)]
pub use audio_processing_port::MockAudioProcessingPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
