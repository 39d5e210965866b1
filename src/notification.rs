//! SNS notification envelope handling.

use aws_lambda_events::event::sns::SnsEvent;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Inner payload of an Inspector completion notification.
#[derive(Debug, Deserialize)]
struct RunNotification {
    run: String,
}

/// Extracts the assessment-run ARN from every record in the event.
///
/// An envelope with no records, a message that is not JSON, or a message
/// without a `run` field is rejected as [`Error::MalformedNotification`].
pub fn run_arns(event: &SnsEvent) -> Result<Vec<String>> {
    if event.records.is_empty() {
        return Err(Error::MalformedNotification(
            "notification contained no records".into(),
        ));
    }

    let mut arns = Vec::with_capacity(event.records.len());
    for record in &event.records {
        let parsed: RunNotification = serde_json::from_str(&record.sns.message)
            .map_err(|err| {
                Error::MalformedNotification(format!("message is not a run notification: {err}"))
            })?;
        if parsed.run.is_empty() {
            return Err(Error::MalformedNotification(
                "run identifier is empty".into(),
            ));
        }
        arns.push(parsed.run);
    }

    Ok(arns)
}

/// Everything after the last `/` of an ARN-like identifier.
///
/// Inputs without a separator pass through unchanged, which also makes the
/// operation idempotent.
pub fn basename(arn: &str) -> &str {
    match arn.rfind('/') {
        Some(idx) => &arn[idx + 1..],
        None => arn,
    }
}
