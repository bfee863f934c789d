//! Transactional artifact contract
//!
//! An artifact is staged locally and becomes visible in durable storage only
//! when [`ArtifactHandle::commit`] succeeds. [`ScopedArtifact`] owns a handle
//! for the length of one export attempt and releases it exactly once when it
//! goes out of scope, whichever way the attempt ends.

use crate::domain::Result;
use async_trait::async_trait;
use std::io::Write;

/// Opens artifacts and names them
pub trait ArtifactStore: Send + Sync {
    /// Builds the storage key for a region group's filename suffix
    fn storage_key(&self, suffix: &str) -> String;

    /// Creates local staging for `storage_key`
    ///
    /// # Errors
    ///
    /// Returns an error if the staging resource cannot be created.
    fn open(&self, storage_key: &str) -> Result<Box<dyn ArtifactHandle>>;
}

/// One in-flight artifact
#[async_trait]
pub trait ArtifactHandle: Send {
    /// Key the artifact is published under
    fn storage_key(&self) -> &str;

    /// Writer over the staged content; repeated calls return the same writer
    ///
    /// # Errors
    ///
    /// Returns an error once the handle has been committed or released.
    fn writer(&mut self) -> Result<&mut (dyn Write + Send)>;

    /// Publishes the staged content to durable storage
    async fn commit(&mut self) -> Result<()>;

    /// Frees local staging. Must be idempotent and must not fail.
    fn release(&mut self);
}

/// Scope guard around an [`ArtifactHandle`]
///
/// Dropping the guard releases the handle. Nothing is published unless
/// [`ScopedArtifact::commit`] was called and succeeded.
pub struct ScopedArtifact {
    handle: Box<dyn ArtifactHandle>,
}

impl ScopedArtifact {
    pub fn new(handle: Box<dyn ArtifactHandle>) -> Self {
        Self { handle }
    }

    pub fn storage_key(&self) -> &str {
        self.handle.storage_key()
    }

    pub fn writer(&mut self) -> Result<&mut (dyn Write + Send)> {
        self.handle.writer()
    }

    pub async fn commit(&mut self) -> Result<()> {
        self.handle.commit().await
    }
}

impl Drop for ScopedArtifact {
    fn drop(&mut self) {
        tracing::debug!(storage_key = %self.handle.storage_key(), "Releasing artifact staging");
        self.handle.release();
    }
}
