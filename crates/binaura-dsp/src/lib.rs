//! RT-safe per-tick DSP for the binaural renderer: stick classification with
//! debounce, the five-sector ILD/ITD cue table, the per-ear input history, and
//! the two ear synthesis strategies (delayed passthrough and DDS tone bursts).
//! Nothing in this crate allocates, locks, or touches floating point per tick.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::{Error, Result};

mod classifier;
pub use classifier::{classify, DebounceWindow, DirectionClassifier};

mod cue;
pub use cue::{CueParameters, CueState, CueTable};

mod history;
pub use history::SampleHistory;

pub mod synth;
pub use synth::{EarSynthesizer, Envelope, EnvelopePhase, EnvelopeState, SineOscillator};

mod ear;
pub use ear::EarChannel;
