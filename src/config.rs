//! Environment-driven configuration, resolved once at startup.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::poll::PollPolicy;

const BUCKET_NAME_VAR: &str = "BUCKET_NAME";
const TOPIC_ARN_VAR: &str = "TOPIC_ARN";
const FINDING_LOCALE_VAR: &str = "FINDING_LOCALE";
const SUBJECT_PREFIX_VAR: &str = "REPORT_SUBJECT_PREFIX";
const POLL_INTERVAL_MS_VAR: &str = "REPORT_POLL_INTERVAL_MS";
const POLL_MAX_ATTEMPTS_VAR: &str = "REPORT_POLL_MAX_ATTEMPTS";

const FINDING_LOCALE_DEFAULT: &str = "EN_US";
const SUBJECT_PREFIX_DEFAULT: &str = "Inspector_report_download_link";
const POLL_INTERVAL_MS_DEFAULT: u64 = 5_000;
const POLL_MAX_ATTEMPTS_DEFAULT: u32 = 60;

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Settings for the findings exporter.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub bucket: String,
    pub locale: String,
    pub poll: PollPolicy,
}

impl ExporterConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|var| env::var(var).ok())
    }

    fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        Ok(Self {
            bucket: require(lookup, BUCKET_NAME_VAR)?,
            locale: lookup(FINDING_LOCALE_VAR).unwrap_or(FINDING_LOCALE_DEFAULT.into()),
            poll: poll_policy(lookup)?,
        })
    }
}

/// Settings for the report notifier.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub topic_arn: String,
    pub subject_prefix: String,
    pub poll: PollPolicy,
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|var| env::var(var).ok())
    }

    fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let topic_arn = require(lookup, TOPIC_ARN_VAR)?;
        if !topic_arn.starts_with("arn:") {
            return Err(Error::Config(format!(
                "{TOPIC_ARN_VAR} is not a topic ARN: {topic_arn}"
            )));
        }

        Ok(Self {
            topic_arn,
            subject_prefix: lookup(SUBJECT_PREFIX_VAR).unwrap_or(SUBJECT_PREFIX_DEFAULT.into()),
            poll: poll_policy(lookup)?,
        })
    }
}

fn require(lookup: Lookup<'_>, var: &str) -> Result<String> {
    lookup(var)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::Config(format!("{var} must be set")))
}

fn poll_policy(lookup: Lookup<'_>) -> Result<PollPolicy> {
    let interval_ms = parse_or(lookup, POLL_INTERVAL_MS_VAR, POLL_INTERVAL_MS_DEFAULT)?;
    let max_attempts: u32 = parse_or(lookup, POLL_MAX_ATTEMPTS_VAR, POLL_MAX_ATTEMPTS_DEFAULT)?;
    if max_attempts == 0 {
        return Err(Error::Config(format!(
            "{POLL_MAX_ATTEMPTS_VAR} must be at least 1"
        )));
    }

    Ok(PollPolicy {
        interval: Duration::from_millis(interval_ms),
        max_attempts,
    })
}

fn parse_or<T: std::str::FromStr>(lookup: Lookup<'_>, var: &str, default: T) -> Result<T> {
    match lookup(var) {
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("{var} is not a valid number: {raw}"))),
        None => Ok(default),
    }
}
