//! Core types for the binaural renderer.
//!
//! Everything here is usable from an interrupt context: no allocation, no
//! locks, no floating point on the tick path.
//!
//! # Primary API
//!
//! - [`Fix15`]: Q15 fixed-point sample/gain type with saturating arithmetic
//! - [`Sector`], [`Ear`], [`Side`]: the discrete direction model
//! - [`SharedDirectionState`]: single-writer published direction snapshot
//! - [`DacWord`]: packed 16-bit output word for the DAC sink
//! - [`EngineConfig`]: validated engine configuration
//! - [`TickMeter`]: deadline metering for the periodic audio contexts, on
//!   targets with 64-bit atomics

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub use error::{Error, Result};

pub mod fixed;
pub use fixed::Fix15;

mod sector;
pub use sector::{Ear, Sector, Side};

mod shared;
pub use shared::{DirectionSnapshot, SharedDirectionState};

mod dac;
pub use dac::{DacWord, LEFT_CONFIG_CODE, RIGHT_CONFIG_CODE};

pub mod timing;

mod config;
pub use config::{EngineConfig, SectorCue, SynthMode, ThresholdTable};

pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, AtomicFloat};

#[cfg(target_has_atomic = "64")]
mod metering;
#[cfg(target_has_atomic = "64")]
pub use metering::{TickMeter, TickMetrics};

pub use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
#[cfg(target_has_atomic = "64")]
pub use core::sync::atomic::AtomicU64;
