pub mod completion;
pub mod object_created;

pub use completion::{CompletionEvent, CompletionNotice, JobStatus};
pub use object_created::ObjectCreatedEvent;
