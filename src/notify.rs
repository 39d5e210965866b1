//! Notifier workflow: wait for the findings PDF report, publish its link.

use chrono::Utc;
use tracing::info;

use crate::config::NotifierConfig;
use crate::error::Result;
use crate::inspector::{AssessmentApi, ReportFormat, ReportType};
use crate::notification::basename;
use crate::poll::await_report;
use crate::publish::TopicPublisher;

/// Waits for the FINDING/PDF report of the run and publishes the completed
/// response, serialized as JSON, to the configured topic. The subject carries
/// a timestamp so repeated deliveries for the same run stay distinguishable.
pub async fn deliver_report_link(
    run_arn: &str,
    api: &impl AssessmentApi,
    topic: &impl TopicPublisher,
    config: &NotifierConfig,
) -> Result<()> {
    info!("requesting findings report for run {}", basename(run_arn));

    let report = await_report(
        api,
        run_arn,
        ReportFormat::Pdf,
        ReportType::Finding,
        config.poll,
    )
    .await?;

    let message = serde_json::to_string(&report)?;
    let subject = format!(
        "{} {}",
        config.subject_prefix,
        Utc::now().format("%Y-%m-%d %H:%M:%S%.6f")
    );
    topic.publish(&subject, &message).await?;

    info!("report link published for run {}", basename(run_arn));
    Ok(())
}
