//! Deadline tracking for the periodic audio contexts.

use crate::{AtomicFlag, AtomicFloat, AtomicU64, Ordering};
use core::time::Duration;

/// Snapshot of one context's timing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickMetrics {
    pub ticks: u64,
    /// Callbacks that ran longer than one tick period.
    pub overruns: u64,
    /// Ticks that started after the following deadline had already passed.
    pub late_starts: u64,
    pub worst_us: f64,
    /// Smoothed fraction of the period spent in the callback, in percent.
    pub average_load: f32,
    pub period_us: u32,
}

/// Per-context tick meter. Written by one audio context, read by anyone.
#[derive(Debug)]
pub struct TickMeter {
    ticks: AtomicU64,
    overruns: AtomicU64,
    late_starts: AtomicU64,
    worst_ns: AtomicU64,
    average_load: AtomicFloat,
    period_us: u32,
    enabled: AtomicFlag,
}

impl TickMeter {
    pub fn new(period_us: u32) -> Self {
        Self {
            ticks: AtomicU64::new(0),
            overruns: AtomicU64::new(0),
            late_starts: AtomicU64::new(0),
            worst_ns: AtomicU64::new(0),
            average_load: AtomicFloat::new(0.0),
            period_us,
            enabled: AtomicFlag::new(true),
        }
    }

    pub fn enable(&self) {
        self.enabled.set(true);
    }

    pub fn disable(&self) {
        self.enabled.set(false);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Record one callback that took `elapsed`.
    pub fn record(&self, elapsed: Duration) {
        let count = self.ticks.fetch_add(1, Ordering::Relaxed);
        if !self.is_enabled() {
            return;
        }

        let elapsed_ns = elapsed.as_nanos() as u64;
        let period_ns = self.period_us as u64 * 1_000;
        if elapsed_ns > period_ns {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
        self.worst_ns.fetch_max(elapsed_ns, Ordering::Relaxed);

        // Exponential moving average
        let load = elapsed_ns as f32 / period_ns.max(1) as f32;
        let alpha = 1.0 / (count.min(1_000) + 1) as f32;
        let avg = self.average_load.get();
        self.average_load.set(avg * (1.0 - alpha) + load * alpha);
    }

    /// Record a tick whose scheduled start had already been overtaken by the
    /// next deadline when it ran.
    pub fn record_late_start(&self) {
        self.late_starts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn overruns(&self) -> u64 {
        self.overruns.load(Ordering::Relaxed)
    }

    pub fn metrics(&self) -> TickMetrics {
        TickMetrics {
            ticks: self.ticks(),
            overruns: self.overruns(),
            late_starts: self.late_starts.load(Ordering::Relaxed),
            worst_us: self.worst_ns.load(Ordering::Relaxed) as f64 / 1_000.0,
            average_load: self.average_load.get() * 100.0,
            period_us: self.period_us,
        }
    }

    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
        self.overruns.store(0, Ordering::Relaxed);
        self.late_starts.store(0, Ordering::Relaxed);
        self.worst_ns.store(0, Ordering::Relaxed);
        self.average_load.set(0.0);
    }
}
