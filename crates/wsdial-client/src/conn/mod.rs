//! Connection management: dial, redial under a retry budget, and the read loop.

pub mod dialer;
pub mod retry;

pub use dialer::{ConnState, Dialer};
pub use retry::{Backoff, RetryBudget};
