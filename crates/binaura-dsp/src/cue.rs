//! Interaural cue table (ILD + ITD per sector) and its per-ear hysteresis.
//!
//! The ear facing the source hears the live signal at full level. The ear
//! facing away hears a copy delayed by the ITD and scaled by the ILD.

use binaura_core::{EngineConfig, Ear, Fix15, Sector, SectorCue};

/// Level and delay one ear applies to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueParameters {
    pub attenuation: Fix15,
    pub delay_samples: usize,
}

impl CueParameters {
    pub const IDENTITY: CueParameters = CueParameters {
        attenuation: Fix15::ONE,
        delay_samples: 0,
    };
}

impl From<SectorCue> for CueParameters {
    fn from(cue: SectorCue) -> Self {
        Self {
            attenuation: cue.attenuation,
            delay_samples: cue.delay_samples,
        }
    }
}

/// Static sector → cue lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueTable {
    near: CueParameters,
    far: CueParameters,
}

impl CueTable {
    pub const DEFAULT: CueTable = CueTable {
        near: CueParameters {
            attenuation: SectorCue::NEAR.attenuation,
            delay_samples: SectorCue::NEAR.delay_samples,
        },
        far: CueParameters {
            attenuation: SectorCue::FAR.attenuation,
            delay_samples: SectorCue::FAR.delay_samples,
        },
    };

    pub fn new(near: SectorCue, far: SectorCue) -> binaura_core::Result<Self> {
        near.validate()?;
        far.validate()?;
        Ok(Self {
            near: near.into(),
            far: far.into(),
        })
    }

    pub fn from_config(config: &EngineConfig) -> binaura_core::Result<Self> {
        Self::new(config.near_cue, config.far_cue)
    }

    /// Cue for the ear facing away from `sector`.
    pub fn contralateral(&self, sector: Sector) -> CueParameters {
        match sector {
            Sector::Center => CueParameters::IDENTITY,
            Sector::Left | Sector::Right => self.near,
            Sector::FarLeft | Sector::FarRight => self.far,
        }
    }

    pub fn for_ear(&self, sector: Sector, ear: Ear) -> CueParameters {
        if sector.is_contralateral(ear) {
            self.contralateral(sector)
        } else {
            CueParameters::IDENTITY
        }
    }

    pub fn max_delay(&self) -> usize {
        self.near.delay_samples.max(self.far.delay_samples)
    }
}

impl Default for CueTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The cue one ear is currently playing, re-derived only when the committed
/// sector changes. Attenuation and delay are always swapped as a pair.
#[derive(Debug, Clone)]
pub struct CueState {
    ear: Ear,
    table: CueTable,
    last_applied: Option<Sector>,
    active: CueParameters,
}

impl CueState {
    pub fn new(ear: Ear, table: CueTable) -> Self {
        Self {
            ear,
            table,
            last_applied: None,
            active: CueParameters::IDENTITY,
        }
    }

    /// Returns `true` if `sector` differs from the last applied one and the
    /// active parameters were replaced.
    #[inline]
    pub fn apply(&mut self, sector: Sector) -> bool {
        if self.last_applied == Some(sector) {
            return false;
        }
        self.active = self.table.for_ear(sector, self.ear);
        self.last_applied = Some(sector);
        true
    }

    #[inline]
    pub fn active(&self) -> CueParameters {
        self.active
    }

    pub fn last_applied(&self) -> Option<Sector> {
        self.last_applied
    }

    pub fn ear(&self) -> Ear {
        self.ear
    }

    pub fn table(&self) -> &CueTable {
        &self.table
    }
}
