use thiserror::Error;

use crate::error::{ClientError, ConfigError};
use crate::event::JobStatus;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Text detection job '{job_id}' did not succeed: {status}")]
    JobNotSucceeded { job_id: String, status: JobStatus },

    #[error("Result retrieval failed: {0}")]
    Retrieve(ClientError),

    #[error("Record persistence failed: {0}")]
    Persist(ClientError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to serialize classification record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    /// HTTP-equivalent status reported back to the invoking infrastructure.
    /// Serialization is the only failure that is not the caller's or a
    /// collaborator's fault.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::Serialize(_) => 500,
            PipelineError::JobNotSucceeded { .. }
            | PipelineError::Retrieve(_)
            | PipelineError::Persist(_)
            | PipelineError::Config(_) => 400,
        }
    }
}
