//! Artifact store port - output files for synthesized speech

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Reference to an artifact written under the output directory
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    /// Unique file name within the output directory
    pub file_name: String,
    /// Full path of the artifact
    pub path: PathBuf,
    /// Size of the artifact in bytes
    pub size_bytes: u64,
}

/// Port for the synthesized-artifact store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Write a new artifact under a timestamped unique name
    ///
    /// # Arguments
    /// * `base_name` - Base file name (e.g. "output.mp3"); the store
    ///   prefixes a creation timestamp to avoid collisions
    /// * `data` - Artifact bytes
    async fn save(
        &self,
        base_name: &str,
        data: &[u8],
    ) -> Result<StoredArtifact, ApplicationError>;

    /// Rewrite an existing artifact in place
    ///
    /// Used by the synthesis flow after a successful speed adjustment.
    async fn overwrite(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<StoredArtifact, ApplicationError>;

    /// Read an artifact back for playback or download
    async fn load(&self, file_name: &str) -> Result<Vec<u8>, ApplicationError>;
}
