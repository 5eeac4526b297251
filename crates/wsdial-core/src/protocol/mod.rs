//! Protocol modules (envelope + payload variants).
//!
//! Decoding is two-stage:
//! - Stage 1: bytes -> `Envelope`, with `content` kept as `RawValue`.
//! - Stage 2: `Envelope` -> `Payload`, selected by `message_type`.
//!
//! Tags without a known variant are not errors; they simply produce no
//! payload, so new message types can be introduced without breaking clients.

pub mod envelope;
pub mod payload;

pub use envelope::Envelope;
pub use payload::{MessageTypeA, Payload, TYPE_A};
