//! Retry budget governing `Dialer::redial`.
//!
//! Each redial starts from attempt 1, so the budget is never shared between
//! two failures.

use std::time::Duration;

use rand::Rng;

use crate::config::{BackoffKind, RetrySection};

/// Delay strategy between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same `interval` before every retry.
    Fixed,
    /// `interval * 2^(n-1)`, capped at `max_interval`. With `jitter`, the
    /// delay is drawn uniformly from `[delay/2, delay]`.
    Exponential { max_interval: Duration, jitter: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    pub max_attempts: u32,
    pub interval: Duration,
    pub backoff: Backoff,
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::fixed(6, Duration::from_secs(4))
    }
}

impl RetryBudget {
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            backoff: Backoff::Fixed,
        }
    }

    pub fn exponential(
        max_attempts: u32,
        interval: Duration,
        max_interval: Duration,
        jitter: bool,
    ) -> Self {
        Self {
            max_attempts,
            interval,
            backoff: Backoff::Exponential { max_interval, jitter },
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential { max_interval, jitter } => {
                let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
                let delay = self.interval.saturating_mul(factor).min(max_interval);
                if jitter && !delay.is_zero() {
                    rand::thread_rng().gen_range(delay / 2..=delay)
                } else {
                    delay
                }
            }
        }
    }
}

impl From<&RetrySection> for RetryBudget {
    fn from(s: &RetrySection) -> Self {
        let interval = Duration::from_millis(s.interval_ms);
        match s.backoff {
            BackoffKind::Fixed => Self::fixed(s.max_attempts, interval),
            BackoffKind::Exponential => Self::exponential(
                s.max_attempts,
                interval,
                Duration::from_millis(s.max_interval_ms),
                s.jitter,
            ),
        }
    }
}
