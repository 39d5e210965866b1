//! In-memory fakes for the service seams, shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use aws_lambda_events::event::sns::SnsEvent;
use serde_json::json;

use crate::config::{ExporterConfig, NotifierConfig};
use crate::error::{Error, Result};
use crate::inspector::{
    AssessmentApi, FindingDetail, FindingPage, ReportFormat, ReportJob, ReportType,
};
use crate::notification::basename;
use crate::poll::PollPolicy;
use crate::publish::TopicPublisher;
use crate::report::ReportSource;
use crate::storage::ObjectStore;

fn test_policy() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_secs(5),
        max_attempts: 5,
    }
}

pub(crate) fn exporter_config() -> ExporterConfig {
    ExporterConfig {
        bucket: "findings-bucket".into(),
        locale: "EN_US".into(),
        poll: test_policy(),
    }
}

pub(crate) fn notifier_config() -> NotifierConfig {
    NotifierConfig {
        topic_arn: "arn:aws:sns:us-east-1:123456789012:report-links".into(),
        subject_prefix: "Inspector_report_download_link".into(),
        poll: test_policy(),
    }
}

/// A full SNS envelope as Lambda delivers it, one record per message body.
pub(crate) fn sns_event(messages: &[&str]) -> SnsEvent {
    let records: Vec<serde_json::Value> = messages
        .iter()
        .map(|message| {
            json!({
                "EventVersion": "1.0",
                "EventSubscriptionArn":
                    "arn:aws:sns:us-east-1:123456789012:inspector-run-completed:6e13aa25",
                "EventSource": "aws:sns",
                "Sns": {
                    "Type": "Notification",
                    "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
                    "TopicArn": "arn:aws:sns:us-east-1:123456789012:inspector-run-completed",
                    "Subject": "Inspector assessment run completed",
                    "Message": message,
                    "Timestamp": "2024-08-06T12:00:00.000Z",
                    "SignatureVersion": "1",
                    "Signature": "EXAMPLE",
                    "SigningCertUrl":
                        "https://sns.us-east-1.amazonaws.com/SimpleNotificationService-example.pem",
                    "UnsubscribeUrl":
                        "https://sns.us-east-1.amazonaws.com/?Action=Unsubscribe&SubscriptionArn=example",
                    "MessageAttributes": {}
                }
            })
        })
        .collect();

    serde_json::from_value(json!({ "Records": records })).expect("valid sns event fixture")
}

/// Scripted Inspector double. Pages are served in order; the report script is
/// replayed entry by entry and its last entry repeats once exhausted, so a
/// single `WorkInProgress` entry models a report that never finishes.
pub(crate) struct FakeAssessmentApi {
    pages: Mutex<Vec<FindingPage>>,
    page_cursor: AtomicUsize,
    report_script: Mutex<Vec<ReportJob>>,
    report_cursor: AtomicUsize,
}

impl FakeAssessmentApi {
    pub(crate) fn new() -> Self {
        Self {
            pages: Mutex::new(Vec::new()),
            page_cursor: AtomicUsize::new(0),
            report_script: Mutex::new(Vec::new()),
            report_cursor: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_pages(self, pages: Vec<FindingPage>) -> Self {
        *self.pages.lock().unwrap() = pages;
        self
    }

    pub(crate) fn with_report_script(self, script: Vec<ReportJob>) -> Self {
        *self.report_script.lock().unwrap() = script;
        self
    }

    pub(crate) fn report_requests(&self) -> u32 {
        self.report_cursor.load(Ordering::SeqCst) as u32
    }
}

#[async_trait]
impl AssessmentApi for FakeAssessmentApi {
    async fn list_findings_page(
        &self,
        _run_arn: &str,
        _next_token: Option<String>,
    ) -> Result<FindingPage> {
        let pages = self.pages.lock().unwrap();
        let index = self.page_cursor.fetch_add(1, Ordering::SeqCst);
        Ok(pages.get(index).cloned().unwrap_or_default())
    }

    async fn describe_finding(&self, finding_arn: &str, _locale: &str) -> Result<FindingDetail> {
        Ok(FindingDetail {
            arn: finding_arn.to_string(),
            id: Some(basename(finding_arn).to_string()),
            title: Some("Instance is reachable from the internet".into()),
            description: Some("A network path exists to this instance.".into()),
            recommendation: Some("Restrict the offending security group.".into()),
            severity: Some("High".into()),
            numeric_severity: Some(9.0),
            confidence: Some(10),
            indicator_of_compromise: Some(false),
            asset_type: Some("ec2-instance".into()),
            service: Some("Inspector".into()),
            schema_version: Some(1),
        })
    }

    async fn request_report(
        &self,
        _run_arn: &str,
        _format: ReportFormat,
        _report_type: ReportType,
    ) -> Result<ReportJob> {
        let script = self.report_script.lock().unwrap();
        if script.is_empty() {
            return Err(Error::UpstreamService("no scripted report response".into()));
        }
        let index = self.report_cursor.fetch_add(1, Ordering::SeqCst);
        Ok(script.get(index).unwrap_or_else(|| &script[script.len() - 1]).clone())
    }
}

/// Records every put; optionally fails each one.
pub(crate) struct RecordingStore {
    puts: Mutex<Vec<(String, Vec<u8>, String)>>,
    fail: bool,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            puts: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            puts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn puts(&self) -> Vec<(String, Vec<u8>, String)> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        if self.fail {
            return Err(Error::StorageWrite {
                key: key.to_string(),
                message: "injected failure".into(),
            });
        }
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), body, content_type.to_string()));
        Ok(())
    }
}

/// Serves one fixed body for any URL and records what was fetched.
pub(crate) struct StaticReportSource {
    body: Vec<u8>,
    fetched: Mutex<Vec<String>>,
}

impl StaticReportSource {
    pub(crate) fn new(body: Vec<u8>) -> Self {
        Self {
            body,
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportSource for StaticReportSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

/// Records every publish; optionally fails each one.
pub(crate) struct RecordingPublisher {
    messages: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingPublisher {
    pub(crate) fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl TopicPublisher for RecordingPublisher {
    async fn publish(&self, subject: &str, message: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Publish {
                topic: "arn:aws:sns:us-east-1:123456789012:report-links".into(),
                message: "injected failure".into(),
            });
        }
        self.messages
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        Ok(())
    }
}
