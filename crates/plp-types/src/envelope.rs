//! Prompt envelopes and write payloads.

use crate::content::PromptContent;
use crate::id::PromptId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open, string-keyed metadata attached to a prompt.
pub type Meta = serde_json::Map<String, Value>;

/// Metadata key whose string value tags a write with a version.
pub const VERSION_META_KEY: &str = "version";

/// The persisted record for one identifier.
///
/// The same shape is stored for the current envelope and for every version snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptEnvelope {
    pub id: PromptId,
    pub content: PromptContent,
    pub meta: Meta,
}

impl PromptEnvelope {
    pub fn new(id: PromptId, input: PromptInput) -> Self {
        Self {
            id,
            content: input.content,
            meta: input.meta,
        }
    }

    /// The `meta.version` string, if the envelope carries one.
    pub fn version(&self) -> Option<&str> {
        self.meta.get(VERSION_META_KEY).and_then(Value::as_str)
    }
}

impl std::fmt::Display for PromptEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PromptEnvelope(id='{}', version={})",
            self.id,
            self.version().unwrap_or("latest")
        )
    }
}

/// Reasons a write payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("payload is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("'meta' must be an object")]
    MetaNotAnObject,
    #[error("invalid 'content': {0}")]
    InvalidContent(String),
}

/// The body of a create-or-update request: content plus metadata, without an identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptInput {
    pub content: PromptContent,
    pub meta: Meta,
}

impl PromptInput {
    pub fn new(content: impl Into<PromptContent>, meta: Meta) -> Self {
        Self {
            content: content.into(),
            meta,
        }
    }

    /// Validates a raw JSON payload.
    ///
    /// Both `content` and `meta` are required. `meta` may be empty but must be an object;
    /// `null` and arrays are rejected. Fields other than these two are ignored, including a
    /// client-supplied `id`, which never overrides the identifier taken from the path.
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadError`] describing the first problem found.
    pub fn from_json(payload: Value) -> Result<Self, PayloadError> {
        let Value::Object(mut fields) = payload else {
            return Err(PayloadError::NotAnObject);
        };

        let content = fields
            .remove("content")
            .ok_or(PayloadError::MissingField("content"))?;
        let meta = match fields.remove("meta") {
            None => return Err(PayloadError::MissingField("meta")),
            Some(Value::Object(meta)) => meta,
            Some(_) => return Err(PayloadError::MetaNotAnObject),
        };

        let content = serde_json::from_value::<PromptContent>(content).map_err(|_| {
            PayloadError::InvalidContent(
                "expected a string or an array of text/image_url parts".into(),
            )
        })?;

        Ok(Self { content, meta })
    }

    /// The `meta.version` string, if the payload carries one.
    pub fn version(&self) -> Option<&str> {
        self.meta.get(VERSION_META_KEY).and_then(Value::as_str)
    }
}

impl TryFrom<Value> for PromptInput {
    type Error = PayloadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}
