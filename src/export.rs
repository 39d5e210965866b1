//! Exporter workflow: findings to S3, then the full HTML report.

use tracing::info;

use crate::config::ExporterConfig;
use crate::error::Result;
use crate::inspector::{AssessmentApi, ReportFormat, ReportType};
use crate::notification::basename;
use crate::poll::await_report;
use crate::report::ReportSource;
use crate::storage::{finding_key, report_key, ObjectStore};

/// What one invocation wrote, for the final log line.
#[derive(Debug)]
pub struct ExportSummary {
    pub run_name: String,
    pub findings_exported: usize,
    pub report_key: String,
}

/// Copies every finding of the run to storage, then generates, downloads and
/// stores the full HTML report.
///
/// Findings are listed page by page; empty pages are skipped. A run with no
/// findings still produces its report. Any failure aborts the invocation.
pub async fn export_run(
    run_arn: &str,
    api: &impl AssessmentApi,
    store: &impl ObjectStore,
    reports: &impl ReportSource,
    config: &ExporterConfig,
) -> Result<ExportSummary> {
    let run_name = basename(run_arn);
    info!("exporting findings for run {run_name}");

    let mut exported = 0usize;
    let mut next_token = None;
    loop {
        let page = api.list_findings_page(run_arn, next_token.take()).await?;
        for finding_arn in &page.finding_arns {
            let detail = api.describe_finding(finding_arn, &config.locale).await?;
            let body = serde_json::to_vec_pretty(&detail)?;
            let key = finding_key(run_name, basename(finding_arn));
            store.put(&key, body, "application/json").await?;
            exported += 1;
        }

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    info!("wrote {exported} findings for run {run_name}, requesting report");
    let report = await_report(
        api,
        run_arn,
        ReportFormat::Html,
        ReportType::Full,
        config.poll,
    )
    .await?;

    let body = reports.fetch(&report.url).await?;
    let key = report_key(run_name);
    store.put(&key, body, "text/html").await?;

    Ok(ExportSummary {
        run_name: run_name.to_string(),
        findings_exported: exported,
        report_key: key,
    })
}
