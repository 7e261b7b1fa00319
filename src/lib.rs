//! # Binaura - Joystick-steered binaural renderer
//!
//! Renders one audio source as a left/right pair that is heard as coming from
//! the direction a two-axis stick points to.
//!
//! ## Architecture
//!
//! Binaura is an umbrella crate that coordinates:
//! - **binaura-core** - Fixed-point math, sectors, published direction state, output words, metering
//! - **binaura-dsp** - Stick classification and debounce, ILD/ITD cue table, sample history, ear synthesis
//! - **scheduler** - One real-time thread per ear, fixed-rate ticks
//! - **poller** - Stick polling thread that publishes committed directions
//! - **render** - Deterministic offline rendering
//!
//! ## Quick Start
//!
//! ```no_run
//! use binaura::prelude::*;
//!
//! let stick = SharedStick::new(StickReading::CENTER);
//! let mut engine = BinauraEngine::builder()
//!     .stick(stick.clone())
//!     .input(Ear::Left, ConstantSource(3000))
//!     .input(Ear::Right, ConstantSource(3000))
//!     .build()?;
//!
//! stick.set(StickReading::new(3300, 3500));
//! std::thread::sleep(std::time::Duration::from_millis(200));
//! println!("now steering {}", engine.direction().name());
//!
//! engine.stop()?;
//! # Ok::<(), binaura::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default) - std support in the tick-path crates
//! - `wav` (default) - WAV output for offline renders
//! - `cli` (default) - the `binaura-render` binary

/// Re-export of binaura-core for direct access
pub use binaura_core as core;

/// Re-export of binaura-dsp for direct access
pub use binaura_dsp as dsp;

// Core types
pub use binaura_core::{
    timing,
    // Lock-free primitives
    AtomicFlag,
    AtomicFloat,
    // Output
    DacWord,
    DirectionSnapshot,
    Ear,
    // Configuration
    EngineConfig,
    Fix15,
    // Direction model
    Sector,
    SectorCue,
    SharedDirectionState,
    Side,
    SynthMode,
    ThresholdTable,
    // Metering
    TickMeter,
    TickMetrics,
    LEFT_CONFIG_CODE,
    RIGHT_CONFIG_CODE,
};

// Atomic types
pub use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

// DSP
pub use binaura_dsp::{
    classify, CueParameters, CueState, CueTable, DebounceWindow, DirectionClassifier, EarChannel,
    EarSynthesizer, SampleHistory,
};

mod error;
pub use error::{Error, Result};

mod config;
pub use config::{BinauraConfig, RuntimeOptions};

pub mod heartbeat;
pub mod io;
pub mod poller;
pub mod render;
pub mod scheduler;

pub use heartbeat::Heartbeat;
pub use poller::DirectionPoller;
pub use render::{OfflineRenderer, RenderResult};
pub use scheduler::{EarContext, PeriodicTimer, RealTimeScheduler, SchedulerConfig};

mod builder;
mod engine;

pub use builder::BinauraEngineBuilder;
pub use engine::BinauraEngine;

/// Convenience prelude for common imports
pub mod prelude {
    // Main engine
    pub use crate::{BinauraConfig, BinauraEngine, BinauraEngineBuilder};

    // Essential types
    pub use crate::{DacWord, Ear, EngineConfig, Fix15, Sector, SynthMode};

    // I/O seams
    pub use crate::io::{
        ConstantSource, FixedStick, NullSink, OutputSink, RecordingSink, SampleSource,
        ScriptedSource, ScriptedStick, SharedStick, StickReading, StickSource,
    };

    // Offline rendering
    pub use crate::{OfflineRenderer, RenderResult};
}
