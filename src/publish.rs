//! Outbound notification of completed reports.

use async_trait::async_trait;

use crate::error::{Error, Result};

#[async_trait]
pub trait TopicPublisher: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<()>;
}

/// SNS-backed publisher targeting a single configured topic.
#[derive(Debug, Clone)]
pub struct SnsTopicPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsTopicPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }
}

#[async_trait]
impl TopicPublisher for SnsTopicPublisher {
    async fn publish(&self, subject: &str, message: &str) -> Result<()> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|err| Error::Publish {
                topic: self.topic_arn.clone(),
                message: aws_sdk_sns::error::DisplayErrorContext(&err).to_string(),
            })?;

        Ok(())
    }
}
