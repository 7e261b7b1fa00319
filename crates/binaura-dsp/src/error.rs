//! Error types for binaura-dsp

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] binaura_core::Error),

    #[error("Cue delay of {delay} samples does not fit a history of {capacity} samples")]
    DelayExceedsHistory { delay: usize, capacity: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
