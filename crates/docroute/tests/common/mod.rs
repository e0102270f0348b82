//! Shared fixtures for the integration tests: scripted service fakes and
//! event envelope builders.

#![allow(dead_code)]

pub mod fakes;

pub use fakes::{FailingDetector, FailingStore, ScriptedDetector};

use docroute::{Block, ProcessorConfig, ResultPage};

pub fn processor_config() -> ProcessorConfig {
    ProcessorConfig {
        invoice_bucket: "invoice-bucket".to_string(),
        company_data_bucket: "company-data-bucket".to_string(),
    }
}

/// A result page with one LINE block per entry, optionally chained to a
/// following page via `next_token`.
pub fn page(lines: &[&str], next_token: Option<&str>) -> ResultPage {
    ResultPage {
        blocks: lines.iter().map(|line| Block::line(*line)).collect(),
        next_token: next_token.map(str::to_string),
    }
}

/// Chain several pages together with synthetic continuation tokens, in order.
pub fn chained_pages(pages_lines: &[&[&str]]) -> Vec<ResultPage> {
    let last = pages_lines.len().saturating_sub(1);
    pages_lines
        .iter()
        .enumerate()
        .map(|(i, lines)| {
            let token = (i < last).then(|| (i + 1).to_string());
            ResultPage {
                blocks: lines.iter().map(|line| Block::line(*line)).collect(),
                next_token: token,
            }
        })
        .collect()
}

/// Build the notification envelope wrapping a `{JobId, Status}` payload.
pub fn completion_event(job_id: &str, status: &str) -> String {
    let payload = serde_json::json!({ "JobId": job_id, "Status": status }).to_string();
    serde_json::json!({
        "Records": [ { "Sns": { "Message": payload } } ]
    })
    .to_string()
}

/// Build an object-created event envelope.
pub fn object_created_event(bucket: &str, key: &str) -> String {
    serde_json::json!({
        "detail": {
            "bucket": { "name": bucket },
            "object": { "key": key }
        }
    })
    .to_string()
}
