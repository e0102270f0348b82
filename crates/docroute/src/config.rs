//! Per-component configuration, resolved from the process environment on
//! every invocation. Each component only requires its own variables, so a
//! misconfigured initiator does not break the processor and vice versa.

use std::env;

use crate::error::ConfigError;

pub const SNS_TOPIC_ARN: &str = "SNS_TOPIC_ARN";
pub const TEXTRACT_ROLE_ARN: &str = "TEXTRACT_ROLE_ARN";
pub const INVOICE_BUCKET: &str = "INVOICE_BUCKET";
pub const COMPANY_DATA_BUCKET: &str = "COMPANY_DATA_BUCKET";

/// Configuration for the job initiator: where completion notifications go
/// and which role the detection service publishes them with.
#[derive(Debug, Clone)]
pub struct InitiatorConfig {
    pub topic_arn: String,
    pub role_arn: String,
}

impl InitiatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            topic_arn: require(&lookup, SNS_TOPIC_ARN)?,
            role_arn: require(&lookup, TEXTRACT_ROLE_ARN)?,
        })
    }
}

/// Configuration for the result processor: the routing destinations.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub invoice_bucket: String,
    pub company_data_bucket: String,
}

impl ProcessorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            invoice_bucket: require(&lookup, INVOICE_BUCKET)?,
            company_data_bucket: require(&lookup, COMPANY_DATA_BUCKET)?,
        })
    }
}

/// An unset variable and an empty one are both treated as missing.
fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable { name }),
    }
}
