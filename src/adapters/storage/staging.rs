//! Local staging with gzip compression
//!
//! [`StagedArtifactStore`] stages each artifact in a temporary file, writing
//! through a gzip encoder. Commit finishes the gzip stream and uploads the
//! file through an [`ObjectStore`]; release deletes the file.

use super::checksum::sha256_hex;
use super::key::StorageKeyFormat;
use super::traits::{ObjectStore, RDB_CONTENT_TYPE};
use crate::core::export::{ArtifactHandle, ArtifactStore};
use crate::domain::{RdbError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Artifact store staging to local temp files
pub struct StagedArtifactStore {
    object_store: Arc<dyn ObjectStore>,
    key_format: StorageKeyFormat,
    staging_dir: PathBuf,
}

impl StagedArtifactStore {
    /// Creates a store that stages in the system temp directory
    pub fn new(object_store: Arc<dyn ObjectStore>, key_format: StorageKeyFormat) -> Self {
        Self {
            object_store,
            key_format,
            staging_dir: std::env::temp_dir(),
        }
    }

    /// Stages artifacts in `dir` instead of the system temp directory
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Directory staging files are created in
    pub fn staging_dir(&self) -> &std::path::Path {
        &self.staging_dir
    }
}

impl ArtifactStore for StagedArtifactStore {
    fn storage_key(&self, suffix: &str) -> String {
        self.key_format.key(suffix)
    }

    fn open(&self, storage_key: &str) -> Result<Box<dyn ArtifactHandle>> {
        let prefix = format!("{}.", storage_key.replace('/', "_"));
        let temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(&self.staging_dir)
            .map_err(|e| {
                RdbError::Staging(format!(
                    "Failed to create staging file in {}: {}",
                    self.staging_dir.display(),
                    e
                ))
            })?;

        let file = temp
            .as_file()
            .try_clone()
            .map_err(|e| RdbError::Staging(format!("Failed to open staging file: {e}")))?;

        tracing::debug!(
            storage_key = %storage_key,
            staging_path = %temp.path().display(),
            "Opened staging file"
        );

        Ok(Box::new(StagedArtifact {
            storage_key: storage_key.to_string(),
            object_store: Arc::clone(&self.object_store),
            encoder: Some(GzEncoder::new(BufWriter::new(file), Compression::default())),
            temp: Some(temp),
        }))
    }
}

/// One staged artifact
pub struct StagedArtifact {
    storage_key: String,
    object_store: Arc<dyn ObjectStore>,
    encoder: Option<GzEncoder<BufWriter<File>>>,
    temp: Option<NamedTempFile>,
}

impl StagedArtifact {
    fn finish_gzip(&mut self) -> Result<PathBuf> {
        let encoder = self.encoder.take().ok_or_else(|| {
            RdbError::Staging(format!("Artifact {} is no longer open", self.storage_key))
        })?;

        let mut file = encoder
            .finish()
            .map_err(|e| RdbError::Staging(format!("Failed to finish gzip stream: {e}")))?
            .into_inner()
            .map_err(|e| RdbError::Staging(format!("Failed to flush staging file: {e}")))?;
        file.flush()
            .and_then(|_| file.sync_all())
            .map_err(|e| RdbError::Staging(format!("Failed to sync staging file: {e}")))?;

        self.temp
            .as_ref()
            .map(|temp| temp.path().to_path_buf())
            .ok_or_else(|| RdbError::Staging("Staging file already removed".to_string()))
    }
}

#[async_trait]
impl ArtifactHandle for StagedArtifact {
    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn writer(&mut self) -> Result<&mut (dyn Write + Send)> {
        match self.encoder.as_mut() {
            Some(encoder) => Ok(encoder),
            None => Err(RdbError::Staging(format!(
                "Artifact {} is no longer open",
                self.storage_key
            ))),
        }
    }

    async fn commit(&mut self) -> Result<()> {
        let path = self.finish_gzip()?;

        let content = tokio::fs::read(&path)
            .await
            .map_err(|e| RdbError::Staging(format!("Failed to read staging file: {e}")))?;
        let size_bytes = content.len();
        let checksum = sha256_hex(&content);

        self.object_store
            .put_object(&self.storage_key, Bytes::from(content), RDB_CONTENT_TYPE)
            .await?;

        tracing::info!(
            storage_key = %self.storage_key,
            destination = %self.object_store.describe(),
            size_bytes,
            sha256 = %checksum,
            "Published artifact"
        );
        Ok(())
    }

    fn release(&mut self) {
        self.encoder = None;
        if let Some(temp) = self.temp.take() {
            let path = temp.path().display().to_string();
            if let Err(e) = temp.close() {
                tracing::warn!(staging_path = %path, error = %e, "Failed to remove staging file");
            }
        }
    }
}

impl Drop for StagedArtifact {
    fn drop(&mut self) {
        self.release();
    }
}
