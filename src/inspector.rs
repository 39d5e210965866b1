//! Domain view of the Amazon Inspector assessment API.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{Error, Result};

/// File format of a generated assessment report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Pdf,
}

/// Scope of a generated assessment report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Full,
    Finding,
}

/// Generation state as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Completed,
    WorkInProgress,
    Failed,
}

/// One `GetAssessmentReport` response.
#[derive(Debug, Clone, Serialize)]
pub struct ReportJob {
    pub status: ReportStatus,
    pub url: Option<String>,
}

/// One page of finding ARNs for an assessment run.
#[derive(Debug, Clone, Default)]
pub struct FindingPage {
    pub finding_arns: Vec<String>,
    pub next_token: Option<String>,
}

/// Serializable projection of a described finding, written to S3 as-is.
#[derive(Debug, Clone, Serialize)]
pub struct FindingDetail {
    pub arn: String,
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub recommendation: Option<String>,
    pub severity: Option<String>,
    pub numeric_severity: Option<f64>,
    pub confidence: Option<i32>,
    pub indicator_of_compromise: Option<bool>,
    pub asset_type: Option<String>,
    pub service: Option<String>,
    pub schema_version: Option<i32>,
}

/// Seam over the Inspector service consumed by both workflows.
#[async_trait]
pub trait AssessmentApi: Send + Sync {
    /// One page of the `ListFindings` results for the given run.
    async fn list_findings_page(
        &self,
        run_arn: &str,
        next_token: Option<String>,
    ) -> Result<FindingPage>;

    /// Full detail record for a single finding.
    async fn describe_finding(&self, finding_arn: &str, locale: &str) -> Result<FindingDetail>;

    /// Requests report generation and returns the current state.
    async fn request_report(
        &self,
        run_arn: &str,
        format: ReportFormat,
        report_type: ReportType,
    ) -> Result<ReportJob>;
}

/// Production implementation backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct InspectorClient {
    client: aws_sdk_inspector::Client,
}

impl InspectorClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_inspector::Client::new(config),
        }
    }
}

#[async_trait]
impl AssessmentApi for InspectorClient {
    async fn list_findings_page(
        &self,
        run_arn: &str,
        next_token: Option<String>,
    ) -> Result<FindingPage> {
        let output = self
            .client
            .list_findings()
            .assessment_run_arns(run_arn)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(upstream)?;

        Ok(FindingPage {
            finding_arns: output.finding_arns().to_vec(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn describe_finding(&self, finding_arn: &str, locale: &str) -> Result<FindingDetail> {
        let output = self
            .client
            .describe_findings()
            .finding_arns(finding_arn)
            .locale(aws_sdk_inspector::types::Locale::from(locale))
            .send()
            .await
            .map_err(upstream)?;

        match output.findings().first() {
            Some(finding) => Ok(detail_from_sdk(finding_arn, finding)),
            None => Err(Error::UpstreamService(format!(
                "describe_findings returned no record for {finding_arn}"
            ))),
        }
    }

    async fn request_report(
        &self,
        run_arn: &str,
        format: ReportFormat,
        report_type: ReportType,
    ) -> Result<ReportJob> {
        use aws_sdk_inspector::types as sdk;

        let file_format = match format {
            ReportFormat::Html => sdk::ReportFileFormat::Html,
            ReportFormat::Pdf => sdk::ReportFileFormat::Pdf,
        };
        let scope = match report_type {
            ReportType::Full => sdk::ReportType::Full,
            ReportType::Finding => sdk::ReportType::Finding,
        };

        let output = self
            .client
            .get_assessment_report()
            .assessment_run_arn(run_arn)
            .report_file_format(file_format)
            .report_type(scope)
            .send()
            .await
            .map_err(upstream)?;

        let status = match output.status() {
            sdk::ReportStatus::Completed => ReportStatus::Completed,
            sdk::ReportStatus::Failed => ReportStatus::Failed,
            sdk::ReportStatus::WorkInProgress => ReportStatus::WorkInProgress,
            other => {
                return Err(Error::UpstreamService(format!(
                    "unrecognized report status {other:?} for {run_arn}"
                )))
            }
        };

        Ok(ReportJob {
            status,
            url: output.url().map(str::to_string),
        })
    }
}

fn detail_from_sdk(
    finding_arn: &str,
    finding: &aws_sdk_inspector::types::Finding,
) -> FindingDetail {
    FindingDetail {
        arn: finding_arn.to_string(),
        id: finding.id().map(str::to_string),
        title: finding.title().map(str::to_string),
        description: finding.description().map(str::to_string),
        recommendation: finding.recommendation().map(str::to_string),
        severity: finding.severity().map(|s| s.as_str().to_string()),
        numeric_severity: Some(finding.numeric_severity()),
        confidence: Some(finding.confidence()),
        indicator_of_compromise: finding.indicator_of_compromise(),
        asset_type: finding.asset_type().map(|a| a.as_str().to_string()),
        service: finding.service().map(str::to_string),
        schema_version: Some(finding.schema_version()),
    }
}

fn upstream<E>(err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::UpstreamService(aws_sdk_inspector::error::DisplayErrorContext(&err).to_string())
}
