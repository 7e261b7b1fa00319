//! Metering integration tests
//!
//! Each ear context owns a tick meter that the engine exposes read-only.

use crate::helpers::*;
use binaura::prelude::*;
use std::time::Duration;

#[test]
fn test_both_ears_count_ticks() {
    let mut engine = test_engine_builder().build().unwrap();

    assert!(wait_until(Duration::from_secs(3), || {
        engine.metrics(Ear::Left).ticks > 1_000 && engine.metrics(Ear::Right).ticks > 1_000
    }));
    engine.stop().unwrap();

    let left = engine.metrics(Ear::Left);
    let right = engine.metrics(Ear::Right);
    assert_eq!(left.period_us, 25);
    assert_eq!(right.period_us, 25);

    // Stopped: the counters no longer move.
    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(engine.metrics(Ear::Left).ticks, left.ticks);
}

#[test]
fn test_load_is_within_bounds() {
    let mut engine = test_engine_builder().build().unwrap();
    assert!(wait_until(Duration::from_secs(3), || {
        engine.metrics(Ear::Left).ticks > 2_000
    }));
    engine.stop().unwrap();

    let metrics = engine.metrics(Ear::Left);
    assert!(metrics.average_load >= 0.0);
    assert!(metrics.average_load.is_finite());
    assert!(metrics.worst_us > 0.0);
    assert!(metrics.overruns <= metrics.ticks);
}

#[test]
fn test_disabled_metering_counts_ticks_only() {
    let mut engine = test_engine_builder().metering(false).build().unwrap();
    assert!(wait_until(Duration::from_secs(3), || {
        engine.metrics(Ear::Right).ticks > 100
    }));
    engine.stop().unwrap();

    let metrics = engine.metrics(Ear::Right);
    assert_eq!(metrics.worst_us, 0.0);
    assert_eq!(metrics.overruns, 0);
    assert_eq!(metrics.average_load, 0.0);
}
