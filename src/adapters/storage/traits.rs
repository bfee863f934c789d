//! Object store abstraction

use crate::domain::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Content type recorded for published RDB artifacts
pub const RDB_CONTENT_TYPE: &str = "application/gzip";

/// Durable destination for finished artifacts
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key`, replacing any existing object
    async fn put_object(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<()>;

    /// Human-readable destination, used in logs
    fn describe(&self) -> String;
}
