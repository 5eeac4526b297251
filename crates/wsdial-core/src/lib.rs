//! wsdial core: transport-agnostic wire contracts and the shared error type.
//!
//! This crate defines the envelope format, the payload variants keyed by
//! `message_type`, and the error surface shared by the client runtime. It
//! carries no transport or runtime dependencies so it can be reused by any
//! producer or consumer of the wire format.
//!
//! # Panic-free decoding
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed frames surface as `WsDialError` so a single bad frame can never
//! take down the read loop.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorClass, Result, WsDialError};
