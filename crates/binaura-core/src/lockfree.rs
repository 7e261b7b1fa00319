//! Flags and gauges shared between the ear contexts and the host.
//!
//! Only plain loads and stores, so both types build on cores without
//! compare-and-swap (Cortex-M0+).

use crate::{AtomicBool, Ordering};
use atomic_float::AtomicF32;

/// Boolean written by one side and polled by the other, such as the
/// shutdown request checked between ticks.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFlag(AtomicBool);

impl AtomicFlag {
    pub const fn new(value: bool) -> Self {
        Self(AtomicBool::new(value))
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }
}

/// Last value published by a single writer, e.g. a meter's smoothed load.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFloat(AtomicF32);

impl AtomicFloat {
    pub fn new(value: f32) -> Self {
        Self(AtomicF32::new(value))
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.0.store(value, Ordering::Release);
    }
}
