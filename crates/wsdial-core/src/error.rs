//! Shared error type across wsdial crates.

use thiserror::Error;

/// How a failure is handled by the client (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// No connection could be established within budget. Ends the read loop.
    Fatal,
    /// Connection-level failure that triggers a redial.
    Recoverable,
    /// Content-level failure. The offending frame is dropped.
    Dropped,
}

impl ErrorClass {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Fatal => "FATAL",
            ErrorClass::Recoverable => "RECOVERABLE",
            ErrorClass::Dropped => "DROPPED",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WsDialError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum WsDialError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("dial {url} failed: {reason}")]
    Dial { url: String, reason: String },
    #[error("read failed: {0}")]
    Read(String),
    #[error("connection closed by peer")]
    ConnectionClosed,
    #[error("not connected")]
    NotConnected,
    #[error("could not reconnect after {attempts} attempts")]
    RetryExhausted { attempts: u32 },
    #[error("invalid envelope: {0}")]
    Envelope(String),
    #[error("invalid {message_type} payload: {reason}")]
    Payload { message_type: String, reason: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl WsDialError {
    /// Map an error onto the client's handling policy.
    pub fn class(&self) -> ErrorClass {
        match self {
            WsDialError::Read(_) | WsDialError::ConnectionClosed => ErrorClass::Recoverable,
            WsDialError::Envelope(_) | WsDialError::Payload { .. } => ErrorClass::Dropped,
            WsDialError::InvalidConfig(_)
            | WsDialError::UnsupportedVersion
            | WsDialError::Dial { .. }
            | WsDialError::NotConnected
            | WsDialError::RetryExhausted { .. }
            | WsDialError::Internal(_) => ErrorClass::Fatal,
        }
    }
}
