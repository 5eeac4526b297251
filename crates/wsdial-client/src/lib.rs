//! wsdial client library entry.
//!
//! This crate wires the WebSocket transport, the connection manager with its
//! retry budget, the message pipeline, metrics, and the optional ops server.
//! It is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod conn;
pub mod obs;
pub mod ops;
pub mod pipeline;
pub mod router;
pub mod transport;

pub use conn::{ConnState, Dialer, RetryBudget};
pub use pipeline::{FrameOutcome, Pipeline};
