//! Axum router wiring for the ops server.

use axum::{routing::get, Router};

use crate::{app_state::ClientState, ops};

pub fn build_router(state: ClientState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
