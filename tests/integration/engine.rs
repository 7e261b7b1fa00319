//! Engine integration tests
//!
//! Lifecycle, stick steering and output routing on real threads.

use crate::helpers::*;
use binaura::io::FnSink;
use binaura::prelude::*;
use binaura::{AtomicU32, Ordering, RuntimeOptions};
use std::sync::Arc;
use std::time::Duration;

const SETTLE: Duration = Duration::from_secs(3);

/// Sink that keeps only the most recent word.
fn latest_word() -> (Arc<AtomicU32>, impl OutputSink) {
    let latest = Arc::new(AtomicU32::new(u32::MAX));
    let writer = Arc::clone(&latest);
    let sink = FnSink(move |word: DacWord| writer.store(u32::from(word.raw()), Ordering::Relaxed));
    (latest, sink)
}

fn decode(latest: &AtomicU32) -> Option<DacWord> {
    u16::try_from(latest.load(Ordering::Relaxed))
        .ok()
        .map(DacWord::from_raw)
}

#[test]
fn test_engine_starts_centered_and_stops() {
    let mut engine = test_engine_builder().build().unwrap();
    assert!(engine.is_running());
    assert_eq!(engine.direction(), Sector::Center);
    assert_eq!(engine.direction_generation(), 0);

    engine.stop().unwrap();
    assert!(!engine.is_running());

    // Second stop is a no-op.
    engine.stop().unwrap();
}

#[test]
fn test_engine_drop_stops_threads() {
    let stick = SharedStick::new(StickReading::CENTER);
    let engine = test_engine_builder().stick(stick.clone()).build().unwrap();
    let direction = Arc::clone(engine.direction_state());
    drop(engine);

    // Nothing publishes once the poller is gone.
    stick.set(FAR_RIGHT_STICK);
    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(direction.sector(), Sector::Center);
}

/// Steering the stick commits a new sector after the debounce window.
#[test]
fn test_stick_steers_committed_direction() {
    let stick = SharedStick::new(StickReading::CENTER);
    let mut engine = test_engine_builder().stick(stick.clone()).build().unwrap();

    stick.set(FAR_LEFT_STICK);
    assert!(
        wait_until(SETTLE, || engine.direction() == Sector::FarLeft),
        "direction never reached FarLeft, still {:?}",
        engine.direction()
    );
    assert_eq!(engine.direction_generation(), 1);

    stick.set(RIGHT_STICK);
    assert!(wait_until(SETTLE, || engine.direction() == Sector::Right));
    assert_eq!(engine.direction_generation(), 2);

    engine.stop().unwrap();
}

#[test]
fn test_each_ear_writes_its_config_code() {
    let left = RecordingSink::with_capacity(2_000);
    let right = RecordingSink::with_capacity(2_000);
    let mut engine = test_engine_builder()
        .input(Ear::Left, ConstantSource(3000))
        .input(Ear::Right, ConstantSource(3000))
        .output(Ear::Left, left.clone())
        .output(Ear::Right, right.clone())
        .build()
        .unwrap();

    assert!(wait_until(SETTLE, || left.len() >= 100 && right.len() >= 100));
    engine.stop().unwrap();

    let left_words = left.words();
    let right_words = right.words();
    assert!(left_words
        .iter()
        .all(|w| w.config_code() == binaura::LEFT_CONFIG_CODE));
    assert!(right_words
        .iter()
        .all(|w| w.config_code() == binaura::RIGHT_CONFIG_CODE));

    // Centered passthrough: both ears carry the input unchanged.
    assert!(left_words.iter().all(|w| w.signed_level() == 952));
    assert!(right_words.iter().all(|w| w.signed_level() == 952));
}

#[test]
fn test_far_left_attenuates_right_ear() {
    let stick = SharedStick::new(FAR_LEFT_STICK);
    let (left, left_sink) = latest_word();
    let (right, right_sink) = latest_word();
    let mut engine = test_engine_builder()
        .stick(stick)
        .input(Ear::Left, ConstantSource(3000))
        .input(Ear::Right, ConstantSource(3000))
        .output(Ear::Left, left_sink)
        .output(Ear::Right, right_sink)
        .build()
        .unwrap();

    assert!(wait_until(SETTLE, || engine.direction() == Sector::FarLeft));
    // Let both ears pass the commit and the 20-tick delay line.
    std::thread::sleep(Duration::from_millis(50));
    assert!(wait_until(SETTLE, || {
        decode(&right).map(|w| w.signed_level()) == Some(476)
    }));
    engine.stop().unwrap();

    assert_eq!(decode(&left).map(|w| w.signed_level()), Some(952));
}

#[test]
fn test_tone_burst_ignores_input() {
    let left = RecordingSink::with_capacity(2_000);
    let mut engine = test_engine_builder()
        .mode(SynthMode::ToneBurst)
        .output(Ear::Left, left.clone())
        .build()
        .unwrap();

    assert!(wait_until(SETTLE, || left.len() >= 2_000));
    engine.stop().unwrap();

    // Silent input, yet the attack of the first burst is audible.
    let levels: Vec<i16> = left.words().iter().map(|w| w.signed_level()).collect();
    assert!(peak(&levels) > 500, "peak {}", peak(&levels));
}

#[test]
fn test_settings_from_toml() {
    let settings = BinauraConfig::from_toml_str(
        r#"
        [engine]
        mode = "tone-burst"
        tone_frequency_hz = 880

        [runtime]
        heartbeat = false
        realtime_priority = false
        "#,
    )
    .unwrap();

    let mut engine = BinauraEngine::builder().settings(settings).build().unwrap();
    assert_eq!(engine.config().mode, SynthMode::ToneBurst);
    assert_eq!(engine.config().tone_frequency_hz, 880);
    assert!(!engine.runtime().realtime_priority);
    assert_eq!(engine.heartbeat_count(), None);
    engine.stop().unwrap();
}

#[test]
fn test_invalid_config_is_rejected_before_start() {
    let config = EngineConfig {
        poll_period_us: 10,
        ..EngineConfig::default()
    };
    let result = test_engine_builder().config(config).build();
    assert!(matches!(result, Err(binaura::Error::Core(_))));
}

#[test]
fn test_heartbeat_counts_round_trips() {
    let mut engine = test_engine_builder()
        .runtime(RuntimeOptions {
            heartbeat: true,
            metering: true,
            realtime_priority: false,
        })
        .build()
        .unwrap();

    assert!(wait_until(SETTLE, || engine.heartbeat_count() >= Some(1)));
    engine.stop().unwrap();
}
