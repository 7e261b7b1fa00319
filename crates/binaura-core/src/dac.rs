//! 16-bit output words for the dual-channel 12-bit DAC.
//!
//! Layout: `[config:4][level:12]`. The level is the signed sample biased by
//! 2048 so that silence sits at mid-scale.

use crate::Fix15;
use serde::{Deserialize, Serialize};

/// Channel A, 1x gain, output active.
pub const LEFT_CONFIG_CODE: u16 = 0b0011 << 12;
/// Channel B, 1x gain, output active.
pub const RIGHT_CONFIG_CODE: u16 = 0b1011 << 12;

const LEVEL_MASK: u16 = 0x0FFF;
const CONFIG_MASK: u16 = 0xF000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DacWord(u16);

impl DacWord {
    /// Packs a signed sample behind `config_code`. Samples outside [-1, 1)
    /// clamp to the rails; bits of `config_code` below the top nibble are
    /// ignored.
    #[inline]
    pub const fn pack(config_code: u16, sample: Fix15) -> Self {
        let level = (sample.to_sample12() as i32 + Fix15::SAMPLE12_BIAS) as u16;
        Self((config_code & CONFIG_MASK) | (level & LEVEL_MASK))
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn config_code(self) -> u16 {
        self.0 & CONFIG_MASK
    }

    /// Unsigned 12-bit level, 0..=4095.
    #[inline]
    pub const fn level(self) -> u16 {
        self.0 & LEVEL_MASK
    }

    /// Level with the mid-scale bias removed, -2048..=2047.
    #[inline]
    pub const fn signed_level(self) -> i16 {
        self.level() as i16 - Fix15::SAMPLE12_BIAS as i16
    }

    pub const fn is_silent(self) -> bool {
        self.signed_level() == 0
    }
}
