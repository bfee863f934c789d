//! Operational notifications
//!
//! The [`Notifier`] is built once at process start and shared by reference with
//! every export. It resolves its channel during construction; if that fails it
//! degrades to log-only and drops every later message. Publishing never fails
//! from the caller's point of view.

use crate::adapters::notify::NotificationTransport;
use std::sync::Arc;

/// Base name of the tier-scoped notification channel
pub const DEFAULT_CHANNEL_BASE_NAME: &str = "aqts-capture-etl-rdb";

/// Builds the channel name for a tier, e.g. `aqts-capture-etl-rdb-TEST-topic`
pub fn channel_name(base_name: &str, tier: &str) -> String {
    format!("{base_name}-{tier}-topic")
}

/// Best-effort notifier
pub struct Notifier {
    transport: Option<Arc<dyn NotificationTransport>>,
    channel: Option<String>,
}

impl Notifier {
    /// Resolves `channel_name` through `transport`
    ///
    /// Resolution failures are logged and produce a log-only notifier.
    pub async fn connect(transport: Arc<dyn NotificationTransport>, channel_name: &str) -> Self {
        match transport.resolve_channel(channel_name).await {
            Ok(Some(channel)) => {
                tracing::info!(channel = %channel, "Notification channel resolved");
                Self {
                    transport: Some(transport),
                    channel: Some(channel),
                }
            }
            Ok(None) => {
                tracing::warn!(
                    channel_name = %channel_name,
                    "Notification channel not found, notifications will only be logged"
                );
                Self::disabled()
            }
            Err(e) => {
                tracing::warn!(
                    channel_name = %channel_name,
                    error = %e,
                    "Failed to resolve notification channel, notifications will only be logged"
                );
                Self::disabled()
            }
        }
    }

    /// Creates a log-only notifier
    pub fn disabled() -> Self {
        Self {
            transport: None,
            channel: None,
        }
    }

    /// Returns true if messages are delivered to a channel
    pub fn is_active(&self) -> bool {
        self.channel.is_some()
    }

    /// Resolved channel address, if any
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Publishes a message, logging instead of failing on transport errors
    pub async fn publish(&self, message: &str) {
        let (Some(transport), Some(channel)) = (&self.transport, &self.channel) else {
            tracing::debug!(message = %message, "Notification dropped (no channel)");
            return;
        };

        if let Err(e) = transport.publish(channel, message).await {
            tracing::warn!(
                channel = %channel,
                error = %e,
                message = %message,
                "Failed to publish notification"
            );
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("channel", &self.channel)
            .finish()
    }
}
