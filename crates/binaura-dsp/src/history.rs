//! Per-ear ring of recent input samples, read back at the cue delay.

use binaura_core::timing::HISTORY_CAPACITY;
use binaura_core::Fix15;

/// Fixed-capacity input history, most recent first.
///
/// `at(0)` is the sample pushed this tick and `at(d)` is exactly `d` ticks
/// old. Reads past the filled depth return silence.
#[derive(Debug, Clone)]
pub struct SampleHistory<const N: usize = HISTORY_CAPACITY> {
    samples: [Fix15; N],
    head: usize,
    filled: usize,
}

impl<const N: usize> SampleHistory<N> {
    pub const fn new() -> Self {
        Self {
            samples: [Fix15::ZERO; N],
            head: 0,
            filled: 0,
        }
    }

    /// Call exactly once per tick, before any [`at`](Self::at) read.
    #[inline]
    pub fn push(&mut self, sample: Fix15) {
        if N == 0 {
            return;
        }
        self.head = if self.head + 1 == N { 0 } else { self.head + 1 };
        self.samples[self.head] = sample;
        if self.filled < N {
            self.filled += 1;
        }
    }

    #[inline]
    pub fn at(&self, delay: usize) -> Fix15 {
        if delay >= self.filled {
            return Fix15::ZERO;
        }
        let index = if delay <= self.head {
            self.head - delay
        } else {
            N + self.head - delay
        };
        self.samples[index]
    }

    #[inline]
    pub fn latest(&self) -> Fix15 {
        self.at(0)
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Samples pushed so far, saturating at the capacity.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn clear(&mut self) {
        self.samples = [Fix15::ZERO; N];
        self.head = 0;
        self.filled = 0;
    }
}

impl<const N: usize> Default for SampleHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}
