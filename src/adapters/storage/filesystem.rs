//! Local directory object store
//!
//! Objects are written to a temporary file in the target directory and renamed
//! into place, so a reader never sees a partial artifact.

use super::traits::ObjectStore;
use crate::domain::{RdbError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Publishes artifacts under a root directory
#[derive(Debug, Clone)]
pub struct FilesystemObjectStore {
    root: PathBuf,
}

impl FilesystemObjectStore {
    /// Creates a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            RdbError::Storage(format!(
                "Failed to create storage root {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.split('/').any(|part| part == "..") || key.starts_with('/') {
            return Err(RdbError::Storage(format!("Invalid object key '{key}'")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn put_object(&self, key: &str, bytes: Bytes, _content_type: &str) -> Result<()> {
        let path = self.object_path(key)?;

        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| RdbError::Storage(format!("Storage task failed: {e}")))??;

        tracing::debug!(root = %self.root.display(), key = %key, "Stored object");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file://{}", self.root.display())
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let parent = path
        .parent()
        .ok_or_else(|| RdbError::Storage(format!("No parent directory for {}", path.display())))?;
    std::fs::create_dir_all(parent)
        .map_err(|e| RdbError::Storage(format!("Failed to create {}: {}", parent.display(), e)))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .map_err(|e| RdbError::Storage(format!("Failed to create temp file: {e}")))?;
    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| RdbError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;
    temp.persist(path)
        .map_err(|e| RdbError::Storage(format!("Failed to publish {}: {}", path.display(), e)))?;
    Ok(())
}
