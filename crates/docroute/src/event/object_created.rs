use serde::Deserialize;

use crate::error::EventError;
use crate::ocr::DocumentLocation;

/// Object-created event as delivered by the storage event bus:
/// `{ "detail": { "bucket": { "name": … }, "object": { "key": … } } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCreatedEvent {
    pub detail: ObjectCreatedDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCreatedDetail {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

impl ObjectCreatedEvent {
    pub fn from_json(raw: &str) -> Result<Self, EventError> {
        serde_json::from_str(raw).map_err(EventError::MalformedEnvelope)
    }

    /// The source object this event describes. Keys arrive percent-encoded
    /// with spaces as `+` (unquote-plus convention), so both are undone here.
    pub fn source_location(&self) -> Result<DocumentLocation, EventError> {
        let raw_key = self.detail.object.key.replace('+', " ");
        let key =
            urlencoding::decode(&raw_key).map_err(|_| EventError::InvalidKeyEncoding {
                key: self.detail.object.key.clone(),
            })?;

        Ok(DocumentLocation {
            bucket: self.detail.bucket.name.clone(),
            key: key.into_owned(),
        })
    }
}
