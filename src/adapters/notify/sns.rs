//! Amazon SNS notification transport

use super::traits::NotificationTransport;
use crate::domain::{RdbError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::config::Region;
use aws_sdk_sns::Client;

/// Publishes notifications to SNS topics
#[derive(Clone)]
pub struct SnsTransport {
    client: Client,
}

impl SnsTransport {
    /// Creates a transport from the default AWS credential chain
    ///
    /// # Arguments
    ///
    /// * `region` - Region override; the SDK's default region is used when `None`
    pub async fn new(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let shared_config = loader.load().await;

        Self {
            client: Client::new(&shared_config),
        }
    }
}

#[async_trait]
impl NotificationTransport for SnsTransport {
    async fn resolve_channel(&self, channel_name: &str) -> Result<Option<String>> {
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_topics()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| RdbError::Notification(format!("Error listing SNS topics: {e}")))?;

            let found = output
                .topics()
                .iter()
                .filter_map(|topic| topic.topic_arn())
                .find(|arn| arn.contains(channel_name));

            if let Some(arn) = found {
                return Ok(Some(arn.to_string()));
            }

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => return Ok(None),
            }
        }
    }

    async fn publish(&self, channel: &str, message: &str) -> Result<()> {
        self.client
            .publish()
            .topic_arn(channel)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                RdbError::Notification(format!("Error publishing SNS topic message: {e}"))
            })?;

        tracing::debug!(topic_arn = %channel, "Published SNS message");
        Ok(())
    }
}
