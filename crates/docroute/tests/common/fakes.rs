use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use docroute::{
    ClientError, DocumentLocation, NotificationChannel, ObjectStore, ResultPage, TextDetection,
};

/// Detection service fake serving a scripted page sequence. Continuation
/// tokens are page indices, as produced by `common::chained_pages`.
pub struct ScriptedDetector {
    job_id: String,
    pages: Vec<ResultPage>,
    start_calls: Mutex<Vec<(DocumentLocation, NotificationChannel)>>,
    get_calls: AtomicUsize,
}

impl ScriptedDetector {
    pub fn new(job_id: &str, pages: Vec<ResultPage>) -> Self {
        Self {
            job_id: job_id.to_string(),
            pages,
            start_calls: Mutex::new(Vec::new()),
            get_calls: AtomicUsize::new(0),
        }
    }

    pub fn get_call_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> Vec<(DocumentLocation, NotificationChannel)> {
        self.start_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextDetection for ScriptedDetector {
    async fn start_text_detection(
        &self,
        document: &DocumentLocation,
        channel: &NotificationChannel,
    ) -> Result<String, ClientError> {
        self.start_calls
            .lock()
            .unwrap()
            .push((document.clone(), channel.clone()));
        Ok(self.job_id.clone())
    }

    async fn get_text_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<ResultPage, ClientError> {
        assert_eq!(job_id, self.job_id, "unexpected job id in retrieval call");
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        let index: usize = match next_token {
            None => 0,
            Some(token) => token
                .parse()
                .map_err(|_| ClientError::new("textract", "get_text_detection", "bad token"))?,
        };
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| ClientError::new("textract", "get_text_detection", "no such page"))
    }
}

/// Detection service fake that rejects every call.
pub struct FailingDetector;

#[async_trait]
impl TextDetection for FailingDetector {
    async fn start_text_detection(
        &self,
        _document: &DocumentLocation,
        _channel: &NotificationChannel,
    ) -> Result<String, ClientError> {
        Err(ClientError::new(
            "textract",
            "start_text_detection",
            "access denied",
        ))
    }

    async fn get_text_detection(
        &self,
        _job_id: &str,
        _next_token: Option<&str>,
    ) -> Result<ResultPage, ClientError> {
        Err(ClientError::new(
            "textract",
            "get_text_detection",
            "throttled",
        ))
    }
}

/// Object store fake that rejects every write.
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put_object(
        &self,
        _bucket: &str,
        _key: &str,
        _body: Vec<u8>,
    ) -> Result<(), ClientError> {
        Err(ClientError::new("s3", "put_object", "access denied"))
    }
}
