//! Invocation entry points for the two pipeline components. Each takes the
//! raw event JSON the invoking infrastructure delivered and returns a
//! status/message pair; every failure is logged with context and converted,
//! so nothing terminates an invocation ungracefully.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::config::{InitiatorConfig, ProcessorConfig};
use crate::error::Result;
use crate::event::{CompletionEvent, ObjectCreatedEvent};
use crate::initiator::JobInitiator;
use crate::ocr::TextDetection;
use crate::pipeline::{PipelineOutcome, ResultProcessor};
use crate::storage::ObjectStore;

/// Status/message pair returned to the invoking infrastructure. Serializes
/// with the field names the invoker expects (`statusCode`, `body`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    pub fn bad_request(body: impl Into<String>) -> Self {
        Self::with_status(400, body)
    }

    pub fn internal_error(body: impl Into<String>) -> Self {
        Self::with_status(500, body)
    }

    pub fn with_status(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}

/// Job Initiator entry point: object-created event in, one asynchronous
/// text-detection job submitted.
pub async fn handle_object_created(
    detector: Arc<dyn TextDetection>,
    raw_event: &str,
) -> HandlerResponse {
    match submit_job(detector, raw_event).await {
        Ok(job_id) => HandlerResponse::ok(format!("Started text detection job: {job_id}")),
        Err(e) => {
            error!(error = %e, "object-created handling failed");
            HandlerResponse::with_status(e.status_code(), e.to_string())
        }
    }
}

async fn submit_job(detector: Arc<dyn TextDetection>, raw_event: &str) -> Result<String> {
    let event = ObjectCreatedEvent::from_json(raw_event)?;
    let location = event.source_location()?;
    info!(bucket = %location.bucket, key = %location.key, "processing object-created event");

    let config = InitiatorConfig::from_env()?;
    let job_id = JobInitiator::new(detector, &config)
        .start_job(&location)
        .await?;
    Ok(job_id)
}

/// Result Processor entry point: completion notification in, one
/// classification record persisted.
pub async fn handle_job_completion(
    detector: Arc<dyn TextDetection>,
    store: Arc<dyn ObjectStore>,
    raw_event: &str,
) -> HandlerResponse {
    match process_completion(detector, store, raw_event).await {
        Ok(outcome) => HandlerResponse::ok(format!(
            "Saved classification record to {}/{} as {}",
            outcome.destination, outcome.key, outcome.document_type
        )),
        Err(e) => {
            error!(error = %e, "completion handling failed");
            HandlerResponse::with_status(e.status_code(), e.to_string())
        }
    }
}

async fn process_completion(
    detector: Arc<dyn TextDetection>,
    store: Arc<dyn ObjectStore>,
    raw_event: &str,
) -> Result<PipelineOutcome> {
    let event = CompletionEvent::from_json(raw_event)?;
    let notice = event.notice()?;
    info!(job_id = %notice.job_id, status = %notice.status, "processing completion notification");

    let config = ProcessorConfig::from_env()?;
    let outcome = ResultProcessor::new(detector, store, &config)
        .run(&notice)
        .await?;
    Ok(outcome)
}
