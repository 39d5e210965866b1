use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy shared by both Lambda functions.
///
/// Every variant reaches the runtime boundary: the handler logs it and
/// returns it, so the invoking platform records the invocation as failed and
/// applies its own retry policy. Nothing is swallowed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed notification: {0}")]
    MalformedNotification(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("inspector call failed: {0}")]
    UpstreamService(String),

    #[error("report generation failed for {0}")]
    ReportFailed(String),

    #[error("report download failed: {0}")]
    ReportDownload(String),

    #[error("storage write failed for key {key}: {message}")]
    StorageWrite { key: String, message: String },

    #[error("publish to {topic} failed: {message}")]
    Publish { topic: String, message: String },

    #[error("report for {run_arn} not ready after {attempts} attempts ({waited:?} waited)")]
    PollTimeoutExceeded {
        run_arn: String,
        attempts: u32,
        waited: Duration,
    },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
