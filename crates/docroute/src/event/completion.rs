use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::error::EventError;

/// Notification envelope carrying the OCR job's terminal state:
/// `{ "Records": [ { "Sns": { "Message": "<json payload>" } } ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionEvent {
    #[serde(rename = "Records")]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsEntity {
    #[serde(rename = "Message")]
    pub message: String,
}

/// Inner payload, JSON-encoded as a string inside the envelope. Fields are
/// optional here so absence is reported as a validation error rather than a
/// parse error.
#[derive(Debug, Deserialize)]
struct RawNotification {
    #[serde(rename = "JobId", default)]
    job_id: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
}

/// Terminal state of a detection job as observed on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Succeeded,
    Failed,
    PartialSuccess,
    Other(String),
}

impl JobStatus {
    fn parse(raw: &str) -> Self {
        match raw {
            "SUCCEEDED" => JobStatus::Succeeded,
            "FAILED" => JobStatus::Failed,
            "PARTIAL_SUCCESS" => JobStatus::PartialSuccess,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, JobStatus::Succeeded)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Succeeded => f.write_str("SUCCEEDED"),
            JobStatus::Failed => f.write_str("FAILED"),
            JobStatus::PartialSuccess => f.write_str("PARTIAL_SUCCESS"),
            JobStatus::Other(raw) => f.write_str(raw),
        }
    }
}

/// A validated completion notification: the job identifier that correlates
/// the two pipeline stages plus the observed terminal status.
#[derive(Debug, Clone)]
pub struct CompletionNotice {
    pub job_id: String,
    pub status: JobStatus,
}

impl CompletionEvent {
    pub fn from_json(raw: &str) -> Result<Self, EventError> {
        serde_json::from_str(raw).map_err(EventError::MalformedEnvelope)
    }

    /// Decode and validate the wrapped payload of the first record.
    pub fn notice(&self) -> Result<CompletionNotice, EventError> {
        let record = self.records.first().ok_or(EventError::NoRecords)?;
        debug!(message = %record.sns.message, "raw completion payload");

        let raw: RawNotification =
            serde_json::from_str(&record.sns.message).map_err(EventError::MalformedPayload)?;

        let job_id = raw
            .job_id
            .filter(|id| !id.is_empty())
            .ok_or(EventError::MissingField { name: "JobId" })?;
        let status = raw
            .status
            .filter(|status| !status.is_empty())
            .ok_or(EventError::MissingField { name: "Status" })?;

        Ok(CompletionNotice {
            job_id,
            status: JobStatus::parse(&status),
        })
    }
}
