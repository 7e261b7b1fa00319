//! Per-ear sample generation.
//!
//! Two sources are supported: the live input played back through the cue
//! (passthrough), or a repeating enveloped sine burst whose level and start
//! time carry the cue (tone burst).

mod dds;
mod envelope;

pub use dds::{SineOscillator, SINE_TABLE};
pub use envelope::{Envelope, EnvelopePhase, EnvelopeState};

use crate::{CueParameters, SampleHistory};
use binaura_core::{EngineConfig, Fix15, Sector, SynthMode};

#[derive(Debug, Clone)]
pub enum EarSynthesizer {
    Passthrough,
    ToneBurst {
        envelope: Envelope,
        oscillator: SineOscillator,
    },
}

impl EarSynthesizer {
    pub fn tone_burst(frequency_hz: u32, tick_rate_hz: u32, amplitude: Fix15) -> Self {
        EarSynthesizer::ToneBurst {
            envelope: Envelope::new(amplitude),
            oscillator: SineOscillator::new(frequency_hz, tick_rate_hz),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        match config.mode {
            SynthMode::Passthrough => EarSynthesizer::Passthrough,
            SynthMode::ToneBurst => Self::tone_burst(
                config.tone_frequency_hz,
                config.tick_rate_hz(),
                config.tone_amplitude,
            ),
        }
    }

    pub fn mode(&self) -> SynthMode {
        match self {
            EarSynthesizer::Passthrough => SynthMode::Passthrough,
            EarSynthesizer::ToneBurst { .. } => SynthMode::ToneBurst,
        }
    }

    /// Whether the input history has to be fed every tick.
    #[inline]
    pub fn uses_input(&self) -> bool {
        matches!(self, EarSynthesizer::Passthrough)
    }

    /// React to a newly applied cue.
    ///
    /// Bursts restart only when the source crosses to another side (or on
    /// the first cue ever applied), so the lagging ear's start offset is
    /// re-established. Moving within one side only rescales the level.
    pub fn on_cue_change(&mut self, previous: Option<Sector>, sector: Sector, cue: CueParameters) {
        if let EarSynthesizer::ToneBurst { envelope, .. } = self {
            envelope.set_level(cue.attenuation);
            let crossed = previous.map_or(true, |p| p.side() != sector.side());
            if crossed {
                envelope.reset(cue.delay_samples as u32);
            }
        }
    }

    #[inline]
    pub fn next_sample<const N: usize>(
        &mut self,
        cue: CueParameters,
        history: &SampleHistory<N>,
    ) -> Fix15 {
        match self {
            EarSynthesizer::Passthrough => history.at(cue.delay_samples) * cue.attenuation,
            EarSynthesizer::ToneBurst {
                envelope,
                oscillator,
            } => {
                let amplitude = envelope.step();
                oscillator.next_sample() * amplitude
            }
        }
    }

    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            EarSynthesizer::ToneBurst { envelope, .. } => Some(envelope),
            EarSynthesizer::Passthrough => None,
        }
    }
}
