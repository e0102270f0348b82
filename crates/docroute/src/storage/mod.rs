pub mod memory;

pub use memory::MemoryObjectStore;

use async_trait::async_trait;

use crate::error::ClientError;

/// Capability interface for the destination object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `body` at `bucket`/`key`, overwriting any existing object.
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ClientError>;
}
