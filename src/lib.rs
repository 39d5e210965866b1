//! Delivery pipeline for Amazon Inspector assessment results.
//!
//! Two Lambda entry points share this library:
//! - `export-findings` copies every finding of a completed assessment run to
//!   S3 and follows up with the full HTML report.
//! - `notify-report` waits for the findings PDF report and publishes its
//!   download link to an SNS topic.
//!
//! All AWS interactions sit behind the traits in [`inspector`], [`storage`],
//! [`report`] and [`publish`] so the workflows in [`export`] and [`notify`]
//! can be exercised without live services.

pub mod config;
pub mod error;
pub mod export;
pub mod inspector;
pub mod notification;
pub mod notify;
pub mod poll;
pub mod publish;
pub mod report;
pub mod storage;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
