//! Attack / sustain / decay / gap envelope for repeating tone bursts.
//!
//! A burst lasts [`BEEP_DURATION`] ticks and bursts start every
//! [`BEEP_REPEAT_INTERVAL`] ticks. The first gap after a reset is set by
//! the caller, which is how the lagging ear starts its bursts late.

use binaura_core::timing::{ATTACK_TIME, BEEP_DURATION, BEEP_REPEAT_INTERVAL, DECAY_TIME};
use binaura_core::Fix15;

const SUSTAIN_END: u32 = BEEP_DURATION - DECAY_TIME;
const REPEAT_GAP: u32 = BEEP_REPEAT_INTERVAL - BEEP_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopePhase {
    Attack,
    Sustain,
    Decay,
    Gap,
}

/// Phase, tick counter and current amplitude.
///
/// During a burst `counter` is the number of ticks since the burst began.
/// During a gap it is the number of silent ticks so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeState {
    pub phase: EnvelopePhase,
    pub counter: u32,
    pub amplitude: Fix15,
}

impl EnvelopeState {
    pub const IDLE: EnvelopeState = EnvelopeState {
        phase: EnvelopePhase::Gap,
        counter: 0,
        amplitude: Fix15::ZERO,
    };
}

impl Default for EnvelopeState {
    fn default() -> Self {
        Self::IDLE
    }
}

#[derive(Debug, Clone)]
pub struct Envelope {
    state: EnvelopeState,
    max_amplitude: Fix15,
    peak: Fix15,
    attack_step: Fix15,
    decay_step: Fix15,
    gap_ticks: u32,
}

impl Envelope {
    /// `max_amplitude` bounds every level set later through
    /// [`set_level`](Self::set_level).
    pub fn new(max_amplitude: Fix15) -> Self {
        let max_amplitude = max_amplitude.clamp(Fix15::ZERO, Fix15::ONE);
        let mut envelope = Self {
            state: EnvelopeState::IDLE,
            max_amplitude,
            peak: Fix15::ZERO,
            attack_step: Fix15::ZERO,
            decay_step: Fix15::ZERO,
            gap_ticks: 0,
        };
        envelope.set_level(Fix15::ONE);
        envelope
    }

    /// Scale the burst peak to `attenuation * max_amplitude` and recompute
    /// the attack and decay slopes. The current phase is kept.
    pub fn set_level(&mut self, attenuation: Fix15) {
        self.peak = (self.max_amplitude * attenuation).clamp(Fix15::ZERO, self.max_amplitude);
        self.attack_step = self.peak.div_int(ATTACK_TIME as i32);
        self.decay_step = self.peak.div_int(DECAY_TIME as i32);
    }

    /// Silence, then start a new burst after `initial_gap` ticks.
    pub fn reset(&mut self, initial_gap: u32) {
        self.state = EnvelopeState::IDLE;
        self.gap_ticks = initial_gap;
    }

    /// Advance one tick and return the new amplitude.
    #[inline]
    pub fn step(&mut self) -> Fix15 {
        let state = &mut self.state;

        if state.phase == EnvelopePhase::Gap {
            if state.counter < self.gap_ticks {
                state.counter += 1;
                state.amplitude = Fix15::ZERO;
                return Fix15::ZERO;
            }
            state.phase = EnvelopePhase::Attack;
            state.counter = 0;
        }

        match state.phase {
            EnvelopePhase::Attack => {
                state.amplitude = (state.amplitude + self.attack_step).clamp(Fix15::ZERO, self.peak);
                state.counter += 1;
                if state.counter >= ATTACK_TIME {
                    state.phase = EnvelopePhase::Sustain;
                }
            }
            EnvelopePhase::Sustain => {
                state.amplitude = state.amplitude.clamp(Fix15::ZERO, self.peak);
                state.counter += 1;
                if state.counter >= SUSTAIN_END {
                    state.phase = EnvelopePhase::Decay;
                }
            }
            EnvelopePhase::Decay => {
                state.amplitude = (state.amplitude - self.decay_step).clamp(Fix15::ZERO, self.peak);
                state.counter += 1;
                if state.counter >= BEEP_DURATION {
                    state.phase = EnvelopePhase::Gap;
                    state.counter = 0;
                    state.amplitude = Fix15::ZERO;
                    self.gap_ticks = REPEAT_GAP;
                }
            }
            EnvelopePhase::Gap => {}
        }

        state.amplitude
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    pub fn peak(&self) -> Fix15 {
        self.peak
    }

    pub fn attack_step(&self) -> Fix15 {
        self.attack_step
    }

    pub fn decay_step(&self) -> Fix15 {
        self.decay_step
    }

    /// Length of the gap currently in progress, or of the next one.
    pub fn gap_ticks(&self) -> u32 {
        self.gap_ticks
    }
}
