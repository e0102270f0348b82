pub mod categorizer;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod initiator;
pub mod ocr;
pub mod pipeline;
pub mod record;
pub mod storage;
pub mod telemetry;

pub use categorizer::{Categorization, Categorizer, DocumentType, Rule};
pub use config::{InitiatorConfig, ProcessorConfig};
pub use error::{ClientError, ConfigError, DocrouteError, EventError, Result};
pub use event::{CompletionEvent, CompletionNotice, JobStatus, ObjectCreatedEvent};
pub use handler::{handle_job_completion, handle_object_created, HandlerResponse};
pub use initiator::JobInitiator;
pub use ocr::{Block, BlockType, DocumentLocation, NotificationChannel, ResultPage, TextDetection};
pub use pipeline::{PipelineError, PipelineOutcome, ResultProcessor};
pub use record::ClassificationRecord;
pub use storage::{MemoryObjectStore, ObjectStore};
