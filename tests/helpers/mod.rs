//! Test helpers and fixtures for Binaura integration tests
//!
//! Offline scenarios drive [`OfflineRenderer`] with scripted sticks and
//! staircase inputs, so every expected word can be computed by hand. Threaded
//! tests use [`test_engine_builder`], which keeps ordinary thread priority.
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FIX15_EPSILON`: one Q15 step, for exact fixed-point conversions
//! - `PCM16_STEP`: one 12-bit output step after widening to 16-bit PCM

#![allow(dead_code)]

pub mod tolerances;

use binaura::io::FnSource;
use binaura::prelude::*;
use std::time::{Duration, Instant};

/// Hard left, front band.
pub const FAR_LEFT_STICK: StickReading = StickReading::new(500, 3500);
/// Half left, front band.
pub const LEFT_STICK: StickReading = StickReading::new(1200, 3500);
/// Half right, front band.
pub const RIGHT_STICK: StickReading = StickReading::new(3300, 3500);
/// Hard right, front band.
pub const FAR_RIGHT_STICK: StickReading = StickReading::new(4000, 3500);

/// Ticks between polls at the default periods.
pub fn ticks_per_poll() -> usize {
    EngineConfig::default().ticks_per_poll() as usize
}

/// Input whose 12-bit value rises by `step` each tick and wraps inside
/// [1024, 3072), so a delayed copy is easy to recognise.
pub fn staircase(step: u16) -> impl SampleSource {
    let mut value = 1024u16;
    FnSource(move || {
        let current = value;
        value = if value + step >= 3072 { 1024 } else { value + step };
        current
    })
}

/// The first `ticks` values [`staircase`] produces.
pub fn staircase_values(step: u16, ticks: usize) -> Vec<u16> {
    let mut source = staircase(step);
    (0..ticks).map(|_| source.next_sample()).collect()
}

/// Render `ticks` ticks with a stick held at `stick`.
pub fn render_held(
    config: &EngineConfig,
    stick: StickReading,
    input: impl SampleSource + 'static,
    ticks: usize,
) -> RenderResult {
    OfflineRenderer::new(config)
        .expect("valid config")
        .input(input)
        .stick(FixedStick(stick))
        .render(ticks)
}

/// Expected signed output level for `raw` through `attenuation`.
pub fn expected_level(raw: u16, attenuation: Fix15) -> i16 {
    (Fix15::from_sample12(raw) * attenuation).to_sample12()
}

/// Index of the first non-zero level, if any.
pub fn first_sound(levels: &[i16]) -> Option<usize> {
    levels.iter().position(|&level| level != 0)
}

pub fn peak(levels: &[i16]) -> i16 {
    levels.iter().map(|l| l.saturating_abs()).max().unwrap_or(0)
}

pub fn assert_silent(levels: &[i16]) {
    let max = peak(levels);
    assert_eq!(max, 0, "Expected silence, but peak level was {}", max);
}

/// Builder for threaded tests: ordinary priority, no heartbeat.
pub fn test_engine_builder() -> BinauraEngineBuilder {
    BinauraEngine::builder()
        .realtime_priority(false)
        .heartbeat(false)
}

/// Poll `condition` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    condition()
}
