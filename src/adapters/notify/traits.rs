//! Notification transport abstraction

use crate::domain::Result;
use async_trait::async_trait;

/// Transport that delivers text messages to a named channel
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Looks up the address of the channel called `channel_name`
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if no such channel exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel listing fails.
    async fn resolve_channel(&self, channel_name: &str) -> Result<Option<String>>;

    /// Publishes a UTF-8 text message to a resolved channel address
    async fn publish(&self, channel: &str, message: &str) -> Result<()>;
}
