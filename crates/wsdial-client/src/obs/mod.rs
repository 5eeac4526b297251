//! Lightweight in-process metrics.
//!
//! Drop, skip, and connection counters are stored as atomics and rendered by
//! the ops server's `/metrics` handler, so frame-level failures are visible
//! without scraping logs.

pub mod metrics;

pub use metrics::ClientMetrics;
