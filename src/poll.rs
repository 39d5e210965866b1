//! Bounded polling for report generation.
//!
//! `GetAssessmentReport` is a request-and-poll API: the first call kicks off
//! generation and every call reports the current status. The loop here polls
//! at a fixed interval up to a maximum attempt count and turns an
//! overrunning report into [`Error::PollTimeoutExceeded`] instead of spinning
//! on the service.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::error::{Error, Result};
use crate::inspector::{AssessmentApi, ReportFormat, ReportStatus, ReportType};

/// Poll cadence and cutoff for report generation.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

/// A report that reached `COMPLETED` with a download URL.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CompletedReport {
    pub status: ReportStatus,
    pub url: String,
}

/// Polls until the report is completed or the policy is exhausted.
///
/// A `FAILED` status short-circuits as [`Error::ReportFailed`]. A `COMPLETED`
/// response without a URL is treated like work in progress and polled again.
pub async fn await_report<A>(
    api: &A,
    run_arn: &str,
    format: ReportFormat,
    report_type: ReportType,
    policy: PollPolicy,
) -> Result<CompletedReport>
where
    A: AssessmentApi + ?Sized,
{
    let mut waited = Duration::ZERO;

    for attempt in 1..=policy.max_attempts {
        let job = api.request_report(run_arn, format, report_type).await?;
        debug!(
            "report poll attempt {attempt}/{} for {run_arn}: {:?}",
            policy.max_attempts, job.status
        );

        match job.status {
            ReportStatus::Completed => {
                if let Some(url) = job.url {
                    return Ok(CompletedReport {
                        status: ReportStatus::Completed,
                        url,
                    });
                }
            }
            ReportStatus::Failed => return Err(Error::ReportFailed(run_arn.to_string())),
            ReportStatus::WorkInProgress => {}
        }

        if attempt < policy.max_attempts {
            sleep(policy.interval).await;
            waited += policy.interval;
        }
    }

    Err(Error::PollTimeoutExceeded {
        run_arn: run_arn.to_string(),
        attempts: policy.max_attempts,
        waited,
    })
}
