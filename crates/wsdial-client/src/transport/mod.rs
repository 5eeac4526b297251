//! Transport layer.
//!
//! The connection manager only needs two things from a transport: establish
//! a connection to a URL, and pull the next data frame off it. Both are traits
//! so tests can script failures without a network.

use async_trait::async_trait;
use bytes::Bytes;

use wsdial_core::error::Result;

pub mod ws;

pub use ws::{WsConn, WsTransport};

/// Establishes connections.
#[async_trait]
pub trait Transport: Send + Sync {
    type Conn: FrameConn;

    /// One connection attempt. No retries here; those belong to the caller.
    async fn dial(&self, url: &str) -> Result<Self::Conn>;
}

/// A live connection that yields data frames.
#[async_trait]
pub trait FrameConn: Send + 'static {
    /// Block until the next data frame arrives.
    ///
    /// Errors mean the connection is no longer usable and must be replaced.
    async fn read_frame(&mut self) -> Result<Bytes>;
}
