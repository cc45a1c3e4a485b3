//! Filesystem artifact store
//!
//! Writes synthesized artifacts under a single output directory as
//! `{unix_timestamp}_{base_filename}`. Artifacts are created on request
//! and read back for playback/download; the only rewrite is the
//! in-place speed adjustment. Nothing here deletes artifacts.

use std::path::PathBuf;

use application::ApplicationError;
use application::ports::{ArtifactStorePort, StoredArtifact};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

/// Artifact store backed by a flat directory
#[derive(Debug, Clone)]
pub struct FilesystemArtifactStore {
    output_dir: PathBuf,
}

impl FilesystemArtifactStore {
    /// Create a store rooted at `output_dir`, creating the directory if
    /// needed
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Storage` if the directory cannot be
    /// created.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ApplicationError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            ApplicationError::Storage(format!(
                "Failed to create output directory {}: {e}",
                output_dir.display()
            ))
        })?;
        Ok(Self { output_dir })
    }

    /// The directory artifacts are written under
    #[must_use]
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Reject names that could escape the output directory
    fn checked_name(name: &str) -> Result<&str, ApplicationError> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(ApplicationError::NotFound(name.to_string()));
        }
        Ok(name)
    }
}

#[async_trait]
impl ArtifactStorePort for FilesystemArtifactStore {
    #[instrument(skip(self, data), fields(base_name = %base_name, size = data.len()))]
    async fn save(
        &self,
        base_name: &str,
        data: &[u8],
    ) -> Result<StoredArtifact, ApplicationError> {
        let base = Self::checked_name(base_name)?;

        // Timestamp prefix avoids collisions across requests; a counter
        // disambiguates same-second saves
        let timestamp = Utc::now().timestamp();
        let mut file_name = format!("{timestamp}_{base}");
        let mut counter = 1u32;
        while tokio::fs::try_exists(self.output_dir.join(&file_name))
            .await
            .unwrap_or(false)
        {
            file_name = format!("{timestamp}_{counter}_{base}");
            counter += 1;
        }

        let path = self.output_dir.join(&file_name);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| ApplicationError::Storage(format!("Failed to write artifact: {e}")))?;

        debug!(file_name = %file_name, "Artifact written");
        Ok(StoredArtifact {
            file_name,
            path,
            size_bytes: data.len() as u64,
        })
    }

    #[instrument(skip(self, data), fields(file_name = %file_name, size = data.len()))]
    async fn overwrite(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<StoredArtifact, ApplicationError> {
        let name = Self::checked_name(file_name)?;
        let path = self.output_dir.join(name);

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ApplicationError::NotFound(name.to_string()));
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| ApplicationError::Storage(format!("Failed to rewrite artifact: {e}")))?;

        Ok(StoredArtifact {
            file_name: name.to_string(),
            path,
            size_bytes: data.len() as u64,
        })
    }

    #[instrument(skip(self), fields(file_name = %file_name))]
    async fn load(&self, file_name: &str) -> Result<Vec<u8>, ApplicationError> {
        let name = Self::checked_name(file_name)?;
        let path = self.output_dir.join(name);

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApplicationError::NotFound(name.to_string())
            } else {
                ApplicationError::Storage(format!("Failed to read artifact: {e}"))
            }
        })
    }
}
