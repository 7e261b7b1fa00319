//! Hardware seams: where input samples and stick readings come from, and where
//! output words go.
//!
//! The renderer never talks to an ADC, a GPIO block or a DAC bus directly.
//! Real targets implement these traits over their drivers; the types here
//! cover hosts, tests and offline renders.

use crate::DacWord;
use parking_lot::Mutex;
use std::sync::Arc;

/// Mid-scale 12-bit reading, silence for a biased input.
pub const MID_SCALE: u16 = 2048;

/// One raw 12-bit input sample per tick.
pub trait SampleSource: Send {
    fn next_sample(&mut self) -> u16;
}

/// Raw two-axis stick reading, each axis 0..=4095.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StickReading {
    pub x: u16,
    pub y: u16,
}

impl StickReading {
    pub const CENTER: StickReading = StickReading {
        x: MID_SCALE,
        y: MID_SCALE,
    };

    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl Default for StickReading {
    fn default() -> Self {
        Self::CENTER
    }
}

pub trait StickSource: Send {
    fn read(&mut self) -> StickReading;
}

/// Receives one packed word per tick. Writes are fire-and-forget.
pub trait OutputSink: Send {
    fn write(&mut self, word: DacWord);
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn next_sample(&mut self) -> u16 {
        (**self).next_sample()
    }
}

impl<S: StickSource + ?Sized> StickSource for Box<S> {
    fn read(&mut self) -> StickReading {
        (**self).read()
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn write(&mut self, word: DacWord) {
        (**self).write(word)
    }
}

// ============================================================================
// Sample sources
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ConstantSource(pub u16);

impl ConstantSource {
    pub const SILENCE: ConstantSource = ConstantSource(MID_SCALE);
}

impl SampleSource for ConstantSource {
    fn next_sample(&mut self) -> u16 {
        self.0
    }
}

/// Source backed by a closure, e.g. a driver read or a generator.
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> u16 + Send> SampleSource for FnSource<F> {
    fn next_sample(&mut self) -> u16 {
        (self.0)()
    }
}

/// Plays a fixed buffer, then either loops or holds mid-scale.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    samples: Vec<u16>,
    position: usize,
    looping: bool,
}

impl ScriptedSource {
    pub fn new(samples: Vec<u16>) -> Self {
        Self {
            samples,
            position: 0,
            looping: false,
        }
    }

    pub fn looping(samples: Vec<u16>) -> Self {
        Self {
            looping: true,
            ..Self::new(samples)
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len().saturating_sub(self.position)
    }
}

impl SampleSource for ScriptedSource {
    fn next_sample(&mut self) -> u16 {
        if self.position >= self.samples.len() {
            if !self.looping || self.samples.is_empty() {
                return MID_SCALE;
            }
            self.position = 0;
        }
        let sample = self.samples[self.position];
        self.position += 1;
        sample
    }
}

// ============================================================================
// Stick sources
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStick(pub StickReading);

impl StickSource for FixedStick {
    fn read(&mut self) -> StickReading {
        self.0
    }
}

/// One reading per poll from a script. The last reading is held once the
/// script runs out.
#[derive(Debug, Clone)]
pub struct ScriptedStick {
    readings: Vec<StickReading>,
    position: usize,
}

impl ScriptedStick {
    pub fn new(readings: Vec<StickReading>) -> Self {
        Self {
            readings,
            position: 0,
        }
    }

    /// `polls` readings of each `(reading, polls)` pair, in order.
    pub fn hold(segments: &[(StickReading, usize)]) -> Self {
        let readings = segments
            .iter()
            .flat_map(|&(reading, polls)| std::iter::repeat(reading).take(polls))
            .collect();
        Self::new(readings)
    }
}

impl StickSource for ScriptedStick {
    fn read(&mut self) -> StickReading {
        let reading = match self.readings.get(self.position) {
            Some(&reading) => reading,
            None => self.readings.last().copied().unwrap_or_default(),
        };
        self.position = self.position.saturating_add(1);
        reading
    }
}

/// Stick position that another thread can move while the engine runs.
#[derive(Debug, Clone, Default)]
pub struct SharedStick {
    reading: Arc<Mutex<StickReading>>,
}

impl SharedStick {
    pub fn new(initial: StickReading) -> Self {
        Self {
            reading: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn set(&self, reading: StickReading) {
        *self.reading.lock() = reading;
    }

    pub fn get(&self) -> StickReading {
        *self.reading.lock()
    }
}

impl StickSource for SharedStick {
    fn read(&mut self) -> StickReading {
        self.get()
    }
}

// ============================================================================
// Output sinks
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn write(&mut self, _word: DacWord) {}
}

/// Sink backed by a closure, e.g. an SPI transfer.
pub struct FnSink<F>(pub F);

impl<F: FnMut(DacWord) + Send> OutputSink for FnSink<F> {
    fn write(&mut self, word: DacWord) {
        (self.0)(word)
    }
}

/// Keeps every word written, up to a fixed capacity reserved up front.
/// Words beyond the capacity are dropped and counted.
///
/// Takes an uncontended lock per word, so it is meant for tests and host
/// runs rather than a hardware tick.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    inner: Arc<Mutex<Recording>>,
}

#[derive(Debug, Default)]
struct Recording {
    words: Vec<DacWord>,
    capacity: usize,
    dropped: u64,
}

impl RecordingSink {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Recording {
                words: Vec::with_capacity(capacity),
                capacity,
                dropped: 0,
            })),
        }
    }

    pub fn words(&self) -> Vec<DacWord> {
        self.inner.lock().words.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dropped(&self) -> u64 {
        self.inner.lock().dropped
    }
}

impl OutputSink for RecordingSink {
    fn write(&mut self, word: DacWord) {
        let mut recording = self.inner.lock();
        if recording.words.len() < recording.capacity {
            recording.words.push(word);
        } else {
            recording.dropped += 1;
        }
    }
}
