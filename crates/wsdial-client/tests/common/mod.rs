//! Scripted in-memory transport shared by the client tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::time::Instant;

use wsdial_client::transport::{FrameConn, Transport};
use wsdial_core::error::{Result, WsDialError};

/// What the next dial does.
pub enum DialScript {
    Refuse,
    Accept(Vec<ReadStep>),
}

/// What the next read on an accepted connection does. Once a connection runs
/// out of steps its reads hang forever.
pub enum ReadStep {
    Frame(Bytes),
    Fail,
}

pub fn frame(s: &str) -> ReadStep {
    ReadStep::Frame(Bytes::copy_from_slice(s.as_bytes()))
}

pub fn a_frame(name: &str, place: &str) -> ReadStep {
    frame(&format!(
        r#"{{"message_type":"A","content":{{"name":"{name}","place":"{place}"}}}}"#
    ))
}

#[derive(Default)]
struct FakeState {
    script: VecDeque<DialScript>,
    dial_times: Vec<Instant>,
    accepted: usize,
}

/// Dials follow the script in order; once it is empty every dial is refused.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new(script: Vec<DialScript>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                script: script.into(),
                ..FakeState::default()
            })),
        }
    }

    pub fn dials(&self) -> usize {
        self.state.lock().unwrap().dial_times.len()
    }

    pub fn dial_times(&self) -> Vec<Instant> {
        self.state.lock().unwrap().dial_times.clone()
    }

    pub fn accepted(&self) -> usize {
        self.state.lock().unwrap().accepted
    }
}

#[async_trait]
impl Transport for FakeTransport {
    type Conn = FakeConn;

    async fn dial(&self, url: &str) -> Result<FakeConn> {
        let mut st = self.state.lock().unwrap();
        st.dial_times.push(Instant::now());
        match st.script.pop_front().unwrap_or(DialScript::Refuse) {
            DialScript::Refuse => Err(WsDialError::Dial {
                url: url.to_string(),
                reason: "connection refused".into(),
            }),
            DialScript::Accept(steps) => {
                st.accepted += 1;
                Ok(FakeConn {
                    id: st.accepted,
                    steps: steps.into(),
                })
            }
        }
    }
}

pub struct FakeConn {
    pub id: usize,
    steps: VecDeque<ReadStep>,
}

#[async_trait]
impl FrameConn for FakeConn {
    async fn read_frame(&mut self) -> Result<Bytes> {
        match self.steps.pop_front() {
            Some(ReadStep::Frame(b)) => Ok(b),
            Some(ReadStep::Fail) => Err(WsDialError::Read(format!("conn {} reset", self.id))),
            None => std::future::pending().await,
        }
    }
}
