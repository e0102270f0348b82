use serde::Serialize;

use crate::categorizer::DocumentType;
use crate::ocr::ResultPage;

/// The persisted artifact: one per completed detection job, written to the
/// classification-chosen destination and never mutated afterwards.
/// Re-delivered notifications simply overwrite the same key, which is safe
/// because the content is a pure function of the job's results.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRecord {
    pub job_id: String,
    pub document_type: DocumentType,
    pub extracted_text: Vec<String>,
    pub raw_response: Vec<ResultPage>,
}

impl ClassificationRecord {
    /// Deterministic storage key for a job's record.
    pub fn key(job_id: &str) -> String {
        format!("output/{job_id}.json")
    }

    /// Pretty-printed JSON (2-space indent), the format downstream consumers
    /// of these records already read.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}
