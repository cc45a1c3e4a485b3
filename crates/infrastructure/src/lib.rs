//! Infrastructure layer for VoiceBooth
//!
//! Provides configuration loading and the concrete adapters behind the
//! application ports: the speech backends, the local audio processing,
//! and the filesystem artifact store.

pub mod adapters;
pub mod config;

pub use adapters::{AudioProcessingAdapter, FilesystemArtifactStore, SpeechAdapter};
pub use config::{AppConfig, ServerConfig, StorageConfig};
