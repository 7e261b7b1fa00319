//! Centralized error type for the binaura umbrella crate.
//!
//! Wraps the tick-path crate errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] binaura_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] binaura_dsp::Error),

    #[error("Config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[cfg(feature = "wav")]
    #[error("WAV: {0}")]
    Wav(#[from] hound::Error),

    #[error("Failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
