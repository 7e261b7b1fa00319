//! Engine configuration.

use crate::timing::{self, MAX_DELAY_SAMPLES};
use crate::{Error, Fix15, Result, LEFT_CONFIG_CODE, RIGHT_CONFIG_CODE};
use serde::{Deserialize, Serialize};

/// Fix15 fields are written as plain decimals in config files.
mod unit_float {
    use crate::Fix15;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Fix15, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(value.to_f32())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Fix15, D::Error> {
        f32::deserialize(deserializer).map(Fix15::from_f32)
    }
}

/// Signal-generation strategy run by both ears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SynthMode {
    /// Re-spatialize the live input through the per-ear delay line.
    #[default]
    Passthrough,
    /// Emit enveloped DDS tone bursts, ignoring the input.
    ToneBurst,
}

/// Cue heard by the ear facing away from a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorCue {
    /// Interaural level difference as a linear gain in (0, 1].
    #[serde(with = "unit_float")]
    pub attenuation: Fix15,
    /// Interaural time difference in ticks.
    pub delay_samples: usize,
}

impl SectorCue {
    pub const IDENTITY: SectorCue = SectorCue {
        attenuation: Fix15::ONE,
        delay_samples: 0,
    };

    /// About 45 degrees off center.
    pub const NEAR: SectorCue = SectorCue {
        attenuation: Fix15::from_ratio(7, 10),
        delay_samples: 16,
    };

    /// About 80 degrees off center.
    pub const FAR: SectorCue = SectorCue {
        attenuation: Fix15::from_ratio(1, 2),
        delay_samples: 20,
    };

    pub fn validate(&self) -> Result<()> {
        if self.attenuation <= Fix15::ZERO || self.attenuation > Fix15::ONE {
            return Err(Error::InvalidAttenuation(self.attenuation.raw()));
        }
        if self.delay_samples > MAX_DELAY_SAMPLES {
            return Err(Error::InvalidCueDelay {
                delay: self.delay_samples,
                capacity: timing::HISTORY_CAPACITY,
            });
        }
        Ok(())
    }
}

/// Raw-reading boundaries between sectors. Changing these moves the stereo
/// image boundaries the listener hears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    /// `y` above this is the front band.
    pub front_y: u16,
    /// `y` below this is the back band.
    pub back_y: u16,
    /// Front band: `x` below this is far-left.
    pub far_left_x: u16,
    /// Front band: `x` below this (and not far-left) is left.
    pub left_x: u16,
    /// Front band: `x` above this (and not far-right) is right.
    pub right_x: u16,
    /// Front band: `x` above this is far-right.
    pub far_right_x: u16,
    /// Back band: `x` below is far-left, above is far-right, equal is center.
    pub back_split_x: u16,
}

impl ThresholdTable {
    pub const DEFAULT: ThresholdTable = ThresholdTable {
        front_y: 2500,
        back_y: 2000,
        far_left_x: 1000,
        left_x: 1700,
        right_x: 3000,
        far_right_x: 3600,
        back_split_x: 2000,
    };

    pub fn validate(&self) -> Result<()> {
        const MAX: u16 = 4095;
        if self.back_y > self.front_y {
            return Err(Error::InvalidThresholds("back_y must not exceed front_y"));
        }
        if !(self.far_left_x <= self.left_x
            && self.left_x <= self.right_x
            && self.right_x <= self.far_right_x)
        {
            return Err(Error::InvalidThresholds(
                "front band x thresholds must be ordered left to right",
            ));
        }
        if [self.front_y, self.far_right_x, self.back_split_x]
            .iter()
            .any(|&v| v > MAX)
        {
            return Err(Error::InvalidThresholds("thresholds must be within 0..=4095"));
        }
        Ok(())
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_period_us: u32,
    pub poll_period_us: u32,
    pub mode: SynthMode,
    pub thresholds: ThresholdTable,
    /// Contralateral cue for the +-45 degree sectors.
    pub near_cue: SectorCue,
    /// Contralateral cue for the +-80 degree sectors.
    pub far_cue: SectorCue,
    pub tone_frequency_hz: u32,
    /// Peak envelope amplitude of a tone burst at the ipsilateral ear.
    #[serde(with = "unit_float")]
    pub tone_amplitude: Fix15,
    /// Gain applied to both ears just before packing.
    #[serde(with = "unit_float")]
    pub output_gain: Fix15,
    pub left_config_code: u16,
    pub right_config_code: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period_us: timing::TICK_PERIOD_US,
            poll_period_us: timing::POLL_PERIOD_US,
            mode: SynthMode::Passthrough,
            thresholds: ThresholdTable::DEFAULT,
            near_cue: SectorCue::NEAR,
            far_cue: SectorCue::FAR,
            tone_frequency_hz: 440,
            tone_amplitude: Fix15::ONE,
            output_gain: Fix15::ONE,
            left_config_code: LEFT_CONFIG_CODE,
            right_config_code: RIGHT_CONFIG_CODE,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_period_us == 0 {
            return Err(Error::InvalidTickPeriod(self.tick_period_us));
        }
        if self.poll_period_us <= self.tick_period_us {
            return Err(Error::InvalidPollPeriod {
                poll_us: self.poll_period_us,
                tick_us: self.tick_period_us,
            });
        }
        self.thresholds.validate()?;
        self.near_cue.validate()?;
        self.far_cue.validate()?;

        let nyquist_hz = self.tick_rate_hz() / 2;
        if self.tone_frequency_hz == 0 || self.tone_frequency_hz >= nyquist_hz {
            return Err(Error::InvalidToneFrequency {
                frequency_hz: self.tone_frequency_hz,
                nyquist_hz,
            });
        }
        for amplitude in [self.tone_amplitude, self.output_gain] {
            if amplitude < Fix15::ZERO || amplitude > Fix15::ONE {
                return Err(Error::InvalidAmplitude(amplitude.raw()));
            }
        }
        for code in [self.left_config_code, self.right_config_code] {
            if code & 0x0FFF != 0 {
                return Err(Error::InvalidConfigCode(code));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn tick_rate_hz(&self) -> u32 {
        timing::tick_rate_hz(self.tick_period_us)
    }

    #[inline]
    pub fn ticks_per_poll(&self) -> u32 {
        timing::ticks_per_poll(self.tick_period_us, self.poll_period_us)
    }
}
