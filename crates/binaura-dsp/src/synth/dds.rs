//! Direct digital synthesis: a phase accumulator indexing a Q15 sine table.

use binaura_core::timing::SINE_TABLE_SIZE;
use binaura_core::Fix15;

/// One full sine cycle in Q15, `32767` is `+1.0`.
#[rustfmt::skip]
pub static SINE_TABLE: [i16; SINE_TABLE_SIZE] = [
    0, 804, 1608, 2410, 3212, 4011, 4808, 5602,
    6393, 7179, 7962, 8739, 9512, 10278, 11039, 11793,
    12539, 13279, 14010, 14732, 15446, 16151, 16846, 17530,
    18204, 18868, 19519, 20159, 20787, 21403, 22005, 22594,
    23170, 23731, 24279, 24811, 25329, 25832, 26319, 26790,
    27245, 27683, 28105, 28510, 28898, 29268, 29621, 29956,
    30273, 30571, 30852, 31113, 31356, 31580, 31785, 31971,
    32137, 32285, 32412, 32521, 32609, 32678, 32728, 32757,
    32767, 32757, 32728, 32678, 32609, 32521, 32412, 32285,
    32137, 31971, 31785, 31580, 31356, 31113, 30852, 30571,
    30273, 29956, 29621, 29268, 28898, 28510, 28105, 27683,
    27245, 26790, 26319, 25832, 25329, 24811, 24279, 23731,
    23170, 22594, 22005, 21403, 20787, 20159, 19519, 18868,
    18204, 17530, 16846, 16151, 15446, 14732, 14010, 13279,
    12539, 11793, 11039, 10278, 9512, 8739, 7962, 7179,
    6393, 5602, 4808, 4011, 3212, 2410, 1608, 804,
    0, -804, -1608, -2410, -3212, -4011, -4808, -5602,
    -6393, -7179, -7962, -8739, -9512, -10278, -11039, -11793,
    -12539, -13279, -14010, -14732, -15446, -16151, -16846, -17530,
    -18204, -18868, -19519, -20159, -20787, -21403, -22005, -22594,
    -23170, -23731, -24279, -24811, -25329, -25832, -26319, -26790,
    -27245, -27683, -28105, -28510, -28898, -29268, -29621, -29956,
    -30273, -30571, -30852, -31113, -31356, -31580, -31785, -31971,
    -32137, -32285, -32412, -32521, -32609, -32678, -32728, -32757,
    -32767, -32757, -32728, -32678, -32609, -32521, -32412, -32285,
    -32137, -31971, -31785, -31580, -31356, -31113, -30852, -30571,
    -30273, -29956, -29621, -29268, -28898, -28510, -28105, -27683,
    -27245, -26790, -26319, -25832, -25329, -24811, -24279, -23731,
    -23170, -22594, -22005, -21403, -20787, -20159, -19519, -18868,
    -18204, -17530, -16846, -16151, -15446, -14732, -14010, -13279,
    -12539, -11793, -11039, -10278, -9512, -8739, -7962, -7179,
    -6393, -5602, -4808, -4011, -3212, -2410, -1608, -804,
];

/// Fixed-frequency sine oscillator.
///
/// The top 8 bits of a 32-bit phase accumulator index [`SINE_TABLE`], so
/// the frequency resolution is `tick_rate / 2^32`.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    phase: u32,
    increment: u32,
}

impl SineOscillator {
    pub fn new(frequency_hz: u32, tick_rate_hz: u32) -> Self {
        Self {
            phase: 0,
            increment: Self::phase_increment(frequency_hz, tick_rate_hz),
        }
    }

    /// `increment = frequency * 2^32 / tick_rate`
    #[inline]
    pub fn phase_increment(frequency_hz: u32, tick_rate_hz: u32) -> u32 {
        if tick_rate_hz == 0 {
            return 0;
        }
        ((u64::from(frequency_hz) << 32) / u64::from(tick_rate_hz)) as u32
    }

    #[inline]
    pub fn next_sample(&mut self) -> Fix15 {
        let index = (self.phase >> 24) as usize;
        self.phase = self.phase.wrapping_add(self.increment);
        Fix15::from_raw(i32::from(SINE_TABLE[index]))
    }

    pub fn increment(&self) -> u32 {
        self.increment
    }

    pub fn reset(&mut self) {
        self.phase = 0;
    }
}
