//! Download of generated reports from their presigned URLs.

use async_trait::async_trait;

use crate::error::{Error, Result};

#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTPS download of the presigned report URL returned by the service.
#[derive(Debug, Clone, Default)]
pub struct HttpReportSource {
    client: reqwest::Client,
}

impl HttpReportSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| Error::ReportDownload(err.to_string()))?
            .error_for_status()
            .map_err(|err| Error::ReportDownload(err.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| Error::ReportDownload(err.to_string()))?;

        Ok(body.to_vec())
    }
}
