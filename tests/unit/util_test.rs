//! Tests for utility functions

use std::time::Duration;

use prometheus_depot::util::{Clock, LogicalClock};

#[tokio::test]
async fn test_logical_clock_accumulates_without_waiting() {
    let clock = LogicalClock::new();
    let started = std::time::Instant::now();

    for _ in 0..1_000 {
        clock.sleep(Duration::from_secs(1)).await;
    }

    assert_eq!(clock.sleeps(), 1_000);
    assert_eq!(clock.elapsed(), Duration::from_secs(1_000));
    assert!(started.elapsed() < Duration::from_secs(5));
}
