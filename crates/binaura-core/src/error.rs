//! Error types for binaura-core.
//!
//! Only configuration can fail. The tick path has no error returns.

use thiserror::Error;

/// Error type for binaura-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid tick period: {0} us. Must be at least 1 us")]
    InvalidTickPeriod(u32),

    #[error("Invalid poll period: {poll_us} us must be longer than the tick period {tick_us} us")]
    InvalidPollPeriod { poll_us: u32, tick_us: u32 },

    #[error("Invalid cue delay: {delay} samples exceeds the history capacity {capacity}")]
    InvalidCueDelay { delay: usize, capacity: usize },

    #[error("Invalid attenuation: raw Q15 value {0} is outside (0, 1]")]
    InvalidAttenuation(i32),

    #[error("Invalid amplitude: raw Q15 value {0} is outside [0, 1]")]
    InvalidAmplitude(i32),

    #[error("Invalid tone frequency: {frequency_hz} Hz. Must be in 1..{nyquist_hz} Hz")]
    InvalidToneFrequency { frequency_hz: u32, nyquist_hz: u32 },

    #[error("Invalid output config code {0:#06x}: only the upper 4 bits may be set")]
    InvalidConfigCode(u16),

    #[error("Invalid threshold table: {0}")]
    InvalidThresholds(&'static str),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
