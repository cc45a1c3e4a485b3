//! Application state shared across handlers

use std::sync::Arc;

use application::ports::ArtifactStorePort;
use application::{SynthesisService, TranscriptionService};
use domain::LanguageTable;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Text-to-Speech flow
    pub synthesis_service: Arc<SynthesisService>,
    /// Speech-to-Text flow
    pub transcription_service: Arc<TranscriptionService>,
    /// Artifact store, for the playback/download endpoint
    pub artifact_store: Arc<dyn ArtifactStorePort>,
    /// The fixed language table backing the selector widgets
    pub languages: Arc<LanguageTable>,
}
