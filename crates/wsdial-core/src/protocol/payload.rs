//! Payload variants keyed by `message_type`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WsDialError};
use crate::protocol::envelope::Envelope;

/// Tag of [`MessageTypeA`].
pub const TYPE_A: &str = "A";

/// Content of a `"A"` envelope.
///
/// Missing fields decode as empty strings; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTypeA {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub place: String,
}

/// A decoded payload. New tags add variants here; the envelope is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Payload {
    A(MessageTypeA),
}

impl Payload {
    /// Tag this payload is carried under.
    pub fn message_type(&self) -> &'static str {
        match self {
            Payload::A(_) => TYPE_A,
        }
    }

    /// Stage 2 decode.
    ///
    /// Returns `Ok(None)` for tags without a known variant; those frames carry
    /// no decoding obligation.
    pub fn from_envelope(env: &Envelope) -> Result<Option<Self>> {
        match env.message_type.as_str() {
            TYPE_A => decode_content(env).map(|a| Some(Payload::A(a))),
            _ => Ok(None),
        }
    }

    /// Wrap this payload in an envelope under its own tag.
    pub fn to_envelope(&self) -> Result<Envelope> {
        match self {
            Payload::A(a) => Envelope::new(TYPE_A, a),
        }
    }
}

fn decode_content<T: DeserializeOwned>(env: &Envelope) -> Result<T> {
    let raw = env.content_str().ok_or_else(|| WsDialError::Payload {
        message_type: env.message_type.clone(),
        reason: "missing content".into(),
    })?;
    serde_json::from_str(raw).map_err(|e| WsDialError::Payload {
        message_type: env.message_type.clone(),
        reason: e.to_string(),
    })
}
