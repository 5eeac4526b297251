//! Connection manager.
//!
//! `Dialer` owns the only handle to the live connection. The read loop borrows
//! it mutably for each read, and `redial` replaces it wholesale, so a reader
//! can never observe a handle that has already been swapped out.
//!
//! State machine:
//! `Disconnected -> Connecting -> Connected -> Redialing -> {Connected | Failed}`

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use wsdial_core::error::{Result, WsDialError};

use crate::conn::retry::RetryBudget;
use crate::obs::ClientMetrics;
use crate::pipeline::Pipeline;
use crate::transport::{FrameConn, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    Disconnected,
    Connecting,
    Connected,
    Redialing,
    /// Retry budget exhausted; the handle has been discarded.
    Failed,
}

pub struct Dialer<T: Transport> {
    transport: T,
    url: String,
    budget: RetryBudget,
    conn: Option<T::Conn>,
    state: ConnState,
    metrics: Arc<ClientMetrics>,
}

impl<T: Transport> Dialer<T> {
    pub fn new(transport: T, budget: RetryBudget, metrics: Arc<ClientMetrics>) -> Self {
        Self {
            transport,
            url: String::new(),
            budget,
            conn: None,
            state: ConnState::Disconnected,
            metrics,
        }
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnState::Connected && self.conn.is_some()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Initial dial: exactly one attempt against `url`, which is remembered
    /// for later redials. Whether a failure here is fatal is up to the caller.
    pub async fn dial_conn(&mut self, url: &str) -> Result<()> {
        self.url = url.to_string();
        self.state = ConnState::Connecting;
        let res = self.dial().await;
        if res.is_err() {
            self.state = ConnState::Disconnected;
        }
        res
    }

    /// Re-establish a dropped connection.
    ///
    /// Makes up to `max_attempts` dials with the budget's delay between them.
    /// Returns `RetryExhausted` once all attempts fail, leaving the dialer in
    /// `Failed` with no connection installed.
    pub async fn redial(&mut self) -> Result<()> {
        self.conn = None;
        self.metrics.set_connected(false);
        self.state = ConnState::Redialing;

        let max_attempts = self.budget.max_attempts;
        for attempt in 1..=max_attempts {
            match self.dial().await {
                Ok(()) => {
                    self.metrics.redials.inc(&[("outcome", "recovered")]);
                    tracing::info!(url = %self.url, attempt, "reconnected");
                    return Ok(());
                }
                Err(_) if attempt < max_attempts => {
                    let delay = self.budget.delay_after(attempt);
                    tracing::debug!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "waiting before next dial"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(_) => {}
            }
        }

        self.state = ConnState::Failed;
        self.metrics.redials.inc(&[("outcome", "exhausted")]);
        tracing::error!(url = %self.url, attempts = max_attempts, "could not reconnect");
        Err(WsDialError::RetryExhausted {
            attempts: max_attempts,
        })
    }

    /// Read loop. Pulls frames off the current connection in arrival order and
    /// feeds them to `pipeline`, redialing on read failure.
    ///
    /// Returns `Ok(())` once `shutdown` is cancelled, even while a read, a
    /// hand-off to a full subscriber, or a redial is pending. Returns
    /// `Err(NotConnected)` if there is no connection to start from, and
    /// `Err(RetryExhausted)` if a redial runs out of attempts.
    pub async fn read(
        &mut self,
        pipeline: &mut Pipeline,
        shutdown: &CancellationToken,
    ) -> Result<()> {
        loop {
            if shutdown.is_cancelled() {
                break;
            }

            let conn = self.conn.as_mut().ok_or(WsDialError::NotConnected)?;
            let res = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                res = conn.read_frame() => res,
            };

            match res {
                Ok(frame) => {
                    // a slow subscriber must not hold off shutdown
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => break,
                        _ = pipeline.handle_frame(&frame) => {}
                    }
                }
                Err(e) => {
                    self.metrics.read_errors.inc(&[("class", e.class().as_str())]);
                    tracing::warn!(url = %self.url, error = %e, "read failed, redialing");

                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => {
                            self.state = ConnState::Disconnected;
                            break;
                        }
                        res = self.redial() => res?,
                    }
                }
            }
        }

        tracing::info!(url = %self.url, "read loop stopped");
        Ok(())
    }

    /// One dial attempt; installs the connection on success.
    async fn dial(&mut self) -> Result<()> {
        tracing::info!(url = %self.url, "dialing");
        match self.transport.dial(&self.url).await {
            Ok(conn) => {
                self.conn = Some(conn);
                self.state = ConnState::Connected;
                self.metrics.dial_attempts.inc(&[("outcome", "ok")]);
                self.metrics.set_connected(true);
                Ok(())
            }
            Err(e) => {
                self.metrics.dial_attempts.inc(&[("outcome", "err")]);
                tracing::warn!(url = %self.url, error = %e, "dial failed");
                Err(e)
            }
        }
    }
}
