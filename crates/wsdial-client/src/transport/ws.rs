//! WebSocket transport over `tokio-tungstenite`.
//!
//! Text and binary frames are surfaced as bytes. Ping/pong are answered by
//! tungstenite itself on the next poll and never reach the pipeline; a close
//! frame or end-of-stream is reported as `ConnectionClosed`.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use wsdial_core::error::{Result, WsDialError};

use super::{FrameConn, Transport};

#[derive(Debug, Default, Clone, Copy)]
pub struct WsTransport;

impl WsTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for WsTransport {
    type Conn = WsConn;

    async fn dial(&self, url: &str) -> Result<WsConn> {
        let (stream, resp) = connect_async(url).await.map_err(|e| WsDialError::Dial {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(%url, status = %resp.status(), "websocket handshake complete");
        Ok(WsConn { stream })
    }
}

pub struct WsConn {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl FrameConn for WsConn {
    async fn read_frame(&mut self) -> Result<Bytes> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Bytes::copy_from_slice(text.as_bytes()));
                }
                Some(Ok(Message::Binary(bin))) => return Ok(bin),
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "close frame received");
                    return Err(WsDialError::ConnectionClosed);
                }
                Some(Err(e)) => return Err(WsDialError::Read(e.to_string())),
                None => return Err(WsDialError::ConnectionClosed),
            }
        }
    }
}
