#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::protocol::Message;

use wsdial_client::transport::{FrameConn, Transport, WsTransport};
use wsdial_core::WsDialError;

#[tokio::test]
async fn data_frames_arrive_as_bytes_and_close_ends_the_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::Ping(Bytes::from_static(b"are you there"))).await.unwrap();
        ws.send(Message::Text("hi".into())).await.unwrap();
        ws.send(Message::Pong(Bytes::from_static(b"unsolicited"))).await.unwrap();
        ws.send(Message::Binary(Bytes::from_static(&[7, 8]))).await.unwrap();
        ws.send(Message::Close(None)).await.unwrap();
        // drive the close handshake until the client goes away
        while let Some(Ok(_)) = ws.next().await {}
    });

    let mut conn = WsTransport::new()
        .dial(&format!("ws://{addr}/talk-to-server"))
        .await
        .unwrap();

    assert_eq!(conn.read_frame().await.unwrap().as_ref(), b"hi");
    assert_eq!(conn.read_frame().await.unwrap().as_ref(), &[7, 8]);
    assert!(matches!(conn.read_frame().await, Err(WsDialError::ConnectionClosed)));

    drop(conn);
    server.await.unwrap();
}

#[tokio::test]
async fn refused_port_is_a_dial_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("ws://{addr}/talk-to-server");
    let err = match WsTransport::new().dial(&url).await {
        Ok(_) => panic!("nothing is listening on {addr}"),
        Err(e) => e,
    };
    assert!(matches!(err, WsDialError::Dial { url: ref u, .. } if *u == url), "{err:?}");
}
