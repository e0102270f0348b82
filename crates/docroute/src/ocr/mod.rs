//! Capability interface for the external text-detection service, plus the
//! pagination and line-extraction helpers the result processor builds on.
//!
//! The service runs detection jobs asynchronously: submission returns an
//! opaque job identifier, completion arrives out of band as a notification,
//! and results are fetched page by page via continuation tokens.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// A source object, identified by container and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub bucket: String,
    pub key: String,
}

/// Where the detection service publishes the completion notification, and
/// the role it assumes to do so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub topic_arn: String,
    pub role_arn: String,
}

/// Block kinds as they appear on the wire. Only `Line` is semantically
/// relevant to classification; everything unrecognized folds into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "BlockType")]
    pub block_type: BlockType,
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Block {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            block_type: BlockType::Line,
            text: Some(text.into()),
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self {
            block_type: BlockType::Word,
            text: Some(text.into()),
        }
    }
}

/// One page of detection results. `next_token` present means more pages
/// follow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(rename = "Blocks", default)]
    pub blocks: Vec<Block>,
    #[serde(rename = "NextToken", default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Capability interface for the text-detection service.
#[async_trait]
pub trait TextDetection: Send + Sync {
    /// Submit an asynchronous detection job for `document`, directing the
    /// completion notification to `channel`. Returns the assigned job id.
    async fn start_text_detection(
        &self,
        document: &DocumentLocation,
        channel: &NotificationChannel,
    ) -> Result<String, ClientError>;

    /// Fetch one page of results for `job_id`. `next_token` of `None` means
    /// the first page.
    async fn get_text_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<ResultPage, ClientError>;
}

/// Fetch the first page, then follow continuation tokens until exhausted,
/// accumulating pages in order. There is no bound on page count and no retry
/// on failure; a client error aborts the whole retrieval.
pub async fn fetch_all_pages(
    detector: &dyn TextDetection,
    job_id: &str,
) -> Result<Vec<ResultPage>, ClientError> {
    let mut pages = Vec::new();
    let mut page = detector.get_text_detection(job_id, None).await?;

    loop {
        let next = page.next_token.clone();
        pages.push(page);
        match next {
            Some(token) => page = detector.get_text_detection(job_id, Some(&token)).await?,
            None => break,
        }
    }

    Ok(pages)
}

/// Collect the text of every `Line` block, scanning pages and blocks in
/// order. Blocks of other types (and lines without text) are skipped.
pub fn extract_lines(pages: &[ResultPage]) -> Vec<String> {
    let mut lines = Vec::new();
    for page in pages {
        for block in &page.blocks {
            if block.block_type == BlockType::Line {
                if let Some(text) = &block.text {
                    lines.push(text.clone());
                }
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct PageServer {
        pages: Vec<ResultPage>,
        calls: AtomicUsize,
    }

    impl PageServer {
        fn new(pages: Vec<ResultPage>) -> Self {
            Self {
                pages,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextDetection for PageServer {
        async fn start_text_detection(
            &self,
            _document: &DocumentLocation,
            _channel: &NotificationChannel,
        ) -> Result<String, ClientError> {
            Ok("job".to_string())
        }

        async fn get_text_detection(
            &self,
            _job_id: &str,
            next_token: Option<&str>,
        ) -> Result<ResultPage, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let index = match next_token {
                None => 0,
                Some(token) => token
                    .parse::<usize>()
                    .map_err(|e| ClientError::new("textract", "get_text_detection", e.to_string()))?,
            };
            Ok(self.pages[index].clone())
        }
    }

    fn page(lines: &[&str], next_token: Option<&str>) -> ResultPage {
        ResultPage {
            blocks: lines.iter().map(|l| Block::line(*l)).collect(),
            next_token: next_token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn single_page_takes_one_call() {
        let server = PageServer::new(vec![page(&["only page"], None)]);

        let pages = fetch_all_pages(&server, "job").await.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(server.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn chained_tokens_take_n_plus_one_calls_in_order() {
        let server = PageServer::new(vec![
            page(&["first"], Some("1")),
            page(&["second"], Some("2")),
            page(&["third"], None),
        ]);

        let pages = fetch_all_pages(&server, "job").await.unwrap();
        assert_eq!(server.calls.load(Ordering::SeqCst), 3);
        assert_eq!(extract_lines(&pages), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn retrieval_error_propagates() {
        struct Failing;

        #[async_trait]
        impl TextDetection for Failing {
            async fn start_text_detection(
                &self,
                _document: &DocumentLocation,
                _channel: &NotificationChannel,
            ) -> Result<String, ClientError> {
                Ok("job".to_string())
            }

            async fn get_text_detection(
                &self,
                _job_id: &str,
                _next_token: Option<&str>,
            ) -> Result<ResultPage, ClientError> {
                Err(ClientError::new("textract", "get_text_detection", "throttled"))
            }
        }

        let err = fetch_all_pages(&Failing, "job").await.unwrap_err();
        assert_eq!(err.operation, "get_text_detection");
    }

    #[test]
    fn extract_lines_skips_non_line_blocks() {
        let pages = vec![ResultPage {
            blocks: vec![
                Block {
                    block_type: BlockType::Page,
                    text: None,
                },
                Block::line("Invoice #1"),
                Block::word("Invoice"),
                Block::line("Total: 100"),
            ],
            next_token: None,
        }];

        assert_eq!(extract_lines(&pages), vec!["Invoice #1", "Total: 100"]);
    }

    #[test]
    fn extract_lines_preserves_page_order() {
        let pages = vec![
            ResultPage {
                blocks: vec![Block::line("a"), Block::line("b")],
                next_token: Some("t".to_string()),
            },
            ResultPage {
                blocks: vec![Block::line("c")],
                next_token: None,
            },
        ];

        assert_eq!(extract_lines(&pages), vec!["a", "b", "c"]);
    }

    #[test]
    fn block_type_round_trips_and_folds_unknowns() {
        let line: BlockType = serde_json::from_str(r#""LINE""#).unwrap();
        assert_eq!(line, BlockType::Line);
        assert_eq!(serde_json::to_string(&BlockType::Line).unwrap(), r#""LINE""#);

        let unknown: BlockType = serde_json::from_str(r#""KEY_VALUE_SET""#).unwrap();
        assert_eq!(unknown, BlockType::Other);
    }

    #[test]
    fn result_page_deserializes_wire_field_names() {
        let raw = r#"{
            "Blocks": [ { "BlockType": "LINE", "Text": "hello" } ],
            "NextToken": "abc"
        }"#;

        let page: ResultPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.blocks, vec![Block::line("hello")]);
        assert_eq!(page.next_token.as_deref(), Some("abc"));
    }
}
