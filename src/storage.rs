//! Object storage for exported findings and reports.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{Error, Result};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;
}

/// Key for one exported finding, grouped under its assessment run.
pub fn finding_key(run_name: &str, finding_name: &str) -> String {
    format!("Assessment_run_{run_name}/Finding_{finding_name}.json")
}

/// Key for the full HTML report of an assessment run.
pub fn report_key(run_name: &str) -> String {
    format!("Report_{run_name}.html")
}

/// S3-backed store writing into a single configured bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| Error::StorageWrite {
                key: key.to_string(),
                message: aws_sdk_s3::error::DisplayErrorContext(&err).to_string(),
            })?;

        Ok(())
    }
}
