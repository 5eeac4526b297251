#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use wsdial_client::config;
use wsdial_client::conn::{Backoff, RetryBudget};

#[test]
fn default_budget_is_six_attempts_four_seconds_apart() {
    let b = RetryBudget::default();
    assert_eq!(b.max_attempts, 6);
    assert_eq!(b.interval, Duration::from_secs(4));
    assert_eq!(b.backoff, Backoff::Fixed);
    for attempt in 1..=6 {
        assert_eq!(b.delay_after(attempt), Duration::from_secs(4));
    }
}

#[test]
fn exponential_doubles_and_caps() {
    let b = RetryBudget::exponential(10, Duration::from_millis(500), Duration::from_secs(5), false);
    let delays: Vec<u128> = (1..=6).map(|n| b.delay_after(n).as_millis()).collect();
    assert_eq!(delays, vec![500, 1000, 2000, 4000, 5000, 5000]);
    assert_eq!(b.delay_after(64), Duration::from_secs(5));
}

#[test]
fn jitter_stays_within_half_to_full_delay() {
    let b = RetryBudget::exponential(10, Duration::from_secs(1), Duration::from_secs(30), true);
    for _ in 0..200 {
        let d = b.delay_after(3);
        assert!(d >= Duration::from_secs(2) && d <= Duration::from_secs(4), "{d:?}");
    }
}

#[test]
fn budget_from_config() {
    let cfg = config::load_from_str(
        r#"
version: 1
client:
  retry:
    max_attempts: 3
    interval_ms: 250
    backoff: exponential
    max_interval_ms: 1000
    jitter: true
"#,
    )
    .unwrap();

    let b = RetryBudget::from(&cfg.client.retry);
    assert_eq!(b.max_attempts, 3);
    assert_eq!(b.interval, Duration::from_millis(250));
    assert_eq!(
        b.backoff,
        Backoff::Exponential { max_interval: Duration::from_secs(1), jitter: true }
    );
}
