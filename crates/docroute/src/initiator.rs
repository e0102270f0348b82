use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use crate::config::InitiatorConfig;
use crate::error::ClientError;
use crate::ocr::{DocumentLocation, NotificationChannel, TextDetection};

/// The job initiator: submits one asynchronous text-detection job per
/// object-created event and registers the completion notification channel.
/// Stateless; the job id is logged and returned, never stored.
pub struct JobInitiator {
    detector: Arc<dyn TextDetection>,
    channel: NotificationChannel,
}

impl JobInitiator {
    pub fn new(detector: Arc<dyn TextDetection>, config: &InitiatorConfig) -> Self {
        Self {
            detector,
            channel: NotificationChannel {
                topic_arn: config.topic_arn.clone(),
                role_arn: config.role_arn.clone(),
            },
        }
    }

    /// Submit one detection job for `document`. Retries are the invoking
    /// infrastructure's responsibility, not this component's.
    pub async fn start_job(&self, document: &DocumentLocation) -> Result<String, ClientError> {
        let job_id = self
            .detector
            .start_text_detection(document, &self.channel)
            .instrument(info_span!(
                "start_job",
                bucket = %document.bucket,
                key = %document.key
            ))
            .await?;

        info!(
            job_id = %job_id,
            bucket = %document.bucket,
            key = %document.key,
            "started text detection job"
        );
        Ok(job_id)
    }
}
