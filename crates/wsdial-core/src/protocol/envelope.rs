//! Envelope (JSON).
//!
//! The core stores `content` as `RawValue` so the payload is only parsed once
//! the tag is known to need it.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{Result, WsDialError};

/// Outer wire object carrying a type tag and an opaque payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    /// Type tag selecting the payload schema.
    pub message_type: String,
    /// Payload, stored as raw JSON (lazy parsing). `null` and absent both map to `None`.
    #[serde(default)]
    pub content: Option<Box<RawValue>>,
}

impl Envelope {
    /// Build an envelope from a tag and any serializable payload.
    pub fn new<T: Serialize>(message_type: impl Into<String>, content: &T) -> Result<Self> {
        let raw = serde_json::value::to_raw_value(content)
            .map_err(|e| WsDialError::Internal(format!("content encode failed: {e}")))?;
        Ok(Self {
            message_type: message_type.into(),
            content: Some(raw),
        })
    }

    /// Stage 1 decode: parse a frame as an envelope without touching `content`.
    pub fn from_slice(frame: &[u8]) -> Result<Self> {
        serde_json::from_slice(frame).map_err(|e| WsDialError::Envelope(e.to_string()))
    }

    /// Serialize to wire bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| WsDialError::Internal(format!("envelope encode failed: {e}")))
    }

    /// Raw content text, if present.
    pub fn content_str(&self) -> Option<&str> {
        self.content.as_deref().map(RawValue::get)
    }
}
