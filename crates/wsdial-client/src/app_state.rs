//! Shared state for the ops server.

use std::sync::Arc;

use crate::obs::ClientMetrics;

#[derive(Clone)]
pub struct ClientState {
    metrics: Arc<ClientMetrics>,
}

impl ClientState {
    pub fn new(metrics: Arc<ClientMetrics>) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &ClientMetrics {
        &self.metrics
    }

    pub fn is_connected(&self) -> bool {
        self.metrics.is_connected()
    }
}
