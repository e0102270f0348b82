use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocrouteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Service client error: {0}")]
    Client(#[from] ClientError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] crate::pipeline::PipelineError),
}

impl DocrouteError {
    /// HTTP-equivalent status reported back to the invoking infrastructure.
    /// Configuration, event, and client failures are request errors; the
    /// pipeline distinguishes its own internal failures.
    pub fn status_code(&self) -> u16 {
        match self {
            DocrouteError::Config(_) | DocrouteError::Event(_) | DocrouteError::Client(_) => 400,
            DocrouteError::Pipeline(e) => e.status_code(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable '{name}'")]
    MissingVariable { name: &'static str },
}

/// Failures decoding or validating an inbound event envelope.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("Failed to parse event envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    #[error("Failed to parse notification payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("Event contains no notification records")]
    NoRecords,

    #[error("Notification is missing required field '{name}'")]
    MissingField { name: &'static str },

    #[error("Object key '{key}' is not valid percent-encoded UTF-8")]
    InvalidKeyEncoding { key: String },
}

/// A dependent service rejected or failed a call. Carries enough context to
/// identify which collaborator and operation failed.
#[derive(Error, Debug, Clone)]
#[error("{service} {operation} failed: {message}")]
pub struct ClientError {
    pub service: &'static str,
    pub operation: &'static str,
    pub message: String,
}

impl ClientError {
    pub fn new(
        service: &'static str,
        operation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            service,
            operation,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocrouteError>;
