use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::categorizer::{Categorization, Categorizer, DocumentType};
use crate::config::ProcessorConfig;
use crate::event::CompletionNotice;
use crate::ocr::{self, ResultPage, TextDetection};
use crate::record::ClassificationRecord;
use crate::storage::ObjectStore;

use super::error::PipelineError;

/// Everything the pipeline produced for one completion notification.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub job_id: String,
    pub document_type: DocumentType,
    pub destination: String,
    pub key: String,
    pub extracted_text: Vec<String>,
    pub page_count: usize,
}

/// The result-processing pipeline: gate → retrieve → extract → categorize →
/// persist. One invocation per completion notification; no state survives
/// between runs.
pub struct ResultProcessor {
    detector: Arc<dyn TextDetection>,
    store: Arc<dyn ObjectStore>,
    categorizer: Categorizer,
}

impl ResultProcessor {
    pub fn new(
        detector: Arc<dyn TextDetection>,
        store: Arc<dyn ObjectStore>,
        config: &ProcessorConfig,
    ) -> Self {
        Self {
            detector,
            store,
            categorizer: Categorizer::standard(config),
        }
    }

    /// Run the full pipeline for one validated completion notice.
    /// Persistence is the last step: nothing is written unless every prior
    /// step succeeded.
    pub async fn run(&self, notice: &CompletionNotice) -> Result<PipelineOutcome, PipelineError> {
        // Step 1: gate on the job's terminal status
        if !notice.status.is_succeeded() {
            warn!(
                job_id = %notice.job_id,
                status = %notice.status,
                "text detection job did not succeed"
            );
            return Err(PipelineError::JobNotSucceeded {
                job_id: notice.job_id.clone(),
                status: notice.status.clone(),
            });
        }

        // Step 2: retrieve every result page, following continuation tokens
        let pages = ocr::fetch_all_pages(self.detector.as_ref(), &notice.job_id)
            .instrument(info_span!("retrieve_results", job_id = %notice.job_id))
            .await
            .map_err(PipelineError::Retrieve)?;
        debug!(job_id = %notice.job_id, pages = pages.len(), "retrieved detection results");

        // Step 3: extract line text in page order
        let extracted_text = ocr::extract_lines(&pages);

        // Step 4: categorize on the folded concatenation
        let categorization = self.step_categorize(&notice.job_id, &extracted_text);

        // Step 5: persist the record at its deterministic key
        let outcome = self
            .step_persist(notice, pages, extracted_text, categorization)
            .await?;

        info!(
            job_id = %outcome.job_id,
            document_type = %outcome.document_type,
            destination = %outcome.destination,
            key = %outcome.key,
            "stored classification record"
        );
        Ok(outcome)
    }

    fn step_categorize(&self, job_id: &str, lines: &[String]) -> Categorization {
        let _span = info_span!("categorize", job_id = %job_id).entered();

        let categorization = self.categorizer.categorize(&lines.join(" "));
        if categorization.rule_id.is_none() {
            warn!(
                job_id = %job_id,
                destination = %categorization.destination,
                "no rule matched; routing to fallback destination"
            );
        }
        categorization
    }

    async fn step_persist(
        &self,
        notice: &CompletionNotice,
        pages: Vec<ResultPage>,
        extracted_text: Vec<String>,
        categorization: Categorization,
    ) -> Result<PipelineOutcome, PipelineError> {
        let record = ClassificationRecord {
            job_id: notice.job_id.clone(),
            document_type: categorization.document_type,
            extracted_text,
            raw_response: pages,
        };
        let body = record.to_bytes()?;
        let key = ClassificationRecord::key(&record.job_id);

        self.store
            .put_object(&categorization.destination, &key, body)
            .instrument(info_span!("persist_record", job_id = %record.job_id, key = %key))
            .await
            .map_err(PipelineError::Persist)?;

        Ok(PipelineOutcome {
            job_id: record.job_id,
            document_type: record.document_type,
            destination: categorization.destination,
            key,
            extracted_text: record.extracted_text,
            page_count: record.raw_response.len(),
        })
    }
}
