//! One ear's complete tick: history, cue hysteresis, synthesis, packing.

use crate::synth::EarSynthesizer;
use crate::{CueState, CueTable, Error, Result, SampleHistory};
use binaura_core::timing::HISTORY_CAPACITY;
use binaura_core::{DacWord, Ear, EngineConfig, Fix15, Sector, SharedDirectionState};

/// Everything one ear's periodic context owns.
///
/// The two ears never share an `EarChannel`; the only state they have in
/// common is the published direction, read once per tick.
#[derive(Debug, Clone)]
pub struct EarChannel<const N: usize = HISTORY_CAPACITY> {
    ear: Ear,
    config_code: u16,
    output_gain: Fix15,
    cue: CueState,
    history: SampleHistory<N>,
    synth: EarSynthesizer,
}

impl<const N: usize> EarChannel<N> {
    pub fn new(ear: Ear, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let table = CueTable::from_config(config)?;
        if table.max_delay() >= N {
            return Err(Error::DelayExceedsHistory {
                delay: table.max_delay(),
                capacity: N,
            });
        }

        let config_code = match ear {
            Ear::Left => config.left_config_code,
            Ear::Right => config.right_config_code,
        };

        Ok(Self {
            ear,
            config_code,
            output_gain: config.output_gain,
            cue: CueState::new(ear, table),
            history: SampleHistory::new(),
            synth: EarSynthesizer::from_config(config),
        })
    }

    /// Produce this tick's output word.
    ///
    /// `input` is the raw 12-bit reading for this tick. It is ignored in
    /// tone-burst mode.
    #[inline]
    pub fn tick(&mut self, input: u16, sector: Sector) -> DacWord {
        if self.synth.uses_input() {
            self.history.push(Fix15::from_sample12(input));
        }

        let previous = self.cue.last_applied();
        if self.cue.apply(sector) {
            self.synth.on_cue_change(previous, sector, self.cue.active());
        }

        let sample = self.synth.next_sample(self.cue.active(), &self.history) * self.output_gain;
        DacWord::pack(self.config_code, sample)
    }

    /// [`tick`](Self::tick) against the published direction.
    #[inline]
    pub fn tick_shared(&mut self, input: u16, direction: &SharedDirectionState) -> DacWord {
        self.tick(input, direction.sector())
    }

    pub fn ear(&self) -> Ear {
        self.ear
    }

    pub fn config_code(&self) -> u16 {
        self.config_code
    }

    pub fn cue(&self) -> &CueState {
        &self.cue
    }

    pub fn history(&self) -> &SampleHistory<N> {
        &self.history
    }

    pub fn synth(&self) -> &EarSynthesizer {
        &self.synth
    }
}
