//! Message pipeline: frame bytes -> `Envelope` -> `Payload`.
//!
//! Content-level failures stop here. A frame that fails either stage is
//! dropped with one warning and one `decode_errors` increment; the read loop
//! never sees the error. Unknown tags are skipped quietly.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use wsdial_core::error::WsDialError;
use wsdial_core::protocol::{Envelope, Payload};

use crate::obs::ClientMetrics;

/// What happened to one frame.
#[derive(Debug)]
pub enum FrameOutcome {
    /// Both stages succeeded.
    Decoded(Payload),
    /// Valid envelope whose tag has no decoder.
    Skipped { message_type: String },
    /// Malformed envelope or payload.
    Dropped(WsDialError),
}

pub struct Pipeline {
    metrics: Arc<ClientMetrics>,
    subscriber: Option<mpsc::Sender<Payload>>,
}

impl Pipeline {
    pub fn new(metrics: Arc<ClientMetrics>) -> Self {
        Self {
            metrics,
            subscriber: None,
        }
    }

    /// Forward every decoded payload to `tx`, in arrival order.
    pub fn with_subscriber(mut self, tx: mpsc::Sender<Payload>) -> Self {
        self.subscriber = Some(tx);
        self
    }

    /// Decode one frame. Never fails; see [`FrameOutcome`].
    pub fn process(&self, frame: &[u8]) -> FrameOutcome {
        let started = Instant::now();
        self.metrics.frames_received.inc(&[]);

        let outcome = decode(frame);
        match &outcome {
            FrameOutcome::Decoded(payload) => {
                let message_type = payload.message_type();
                self.metrics.payloads_decoded.inc(&[("message_type", message_type)]);
                match payload {
                    Payload::A(a) => {
                        tracing::info!(
                            message_type,
                            name = %a.name,
                            place = %a.place,
                            "payload decoded"
                        );
                    }
                    _ => tracing::info!(message_type, "payload decoded"),
                }
            }
            FrameOutcome::Skipped { message_type } => {
                self.metrics
                    .unknown_types
                    .inc(&[("message_type", message_type.as_str())]);
                tracing::debug!(%message_type, "no decoder for message type, frame skipped");
            }
            FrameOutcome::Dropped(e) => {
                let stage = match e {
                    WsDialError::Payload { .. } => "payload",
                    _ => "envelope",
                };
                self.metrics.decode_errors.inc(&[("stage", stage)]);
                tracing::warn!(stage, error = %e, bytes = frame.len(), "frame dropped");
            }
        }

        self.metrics.decode_duration.observe(&[], started.elapsed());
        outcome
    }

    /// Decode one frame and hand a decoded payload to the subscriber, if any.
    pub async fn handle_frame(&mut self, frame: &[u8]) -> FrameOutcome {
        let outcome = self.process(frame);
        let closed = match (&outcome, &self.subscriber) {
            (FrameOutcome::Decoded(payload), Some(tx)) => tx.send(payload.clone()).await.is_err(),
            _ => false,
        };
        if closed {
            tracing::warn!("payload subscriber closed, detaching");
            self.subscriber = None;
        }
        outcome
    }
}

fn decode(frame: &[u8]) -> FrameOutcome {
    let env = match Envelope::from_slice(frame) {
        Ok(env) => env,
        Err(e) => return FrameOutcome::Dropped(e),
    };
    tracing::trace!(
        message_type = %env.message_type,
        content = ?env.content_str(),
        "envelope decoded"
    );

    match Payload::from_envelope(&env) {
        Ok(Some(payload)) => FrameOutcome::Decoded(payload),
        Ok(None) => FrameOutcome::Skipped {
            message_type: env.message_type,
        },
        Err(e) => FrameOutcome::Dropped(e),
    }
}
