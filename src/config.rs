//! TOML configuration files.
//!
//! ```toml
//! [engine]
//! mode = "tone-burst"
//! tone_frequency_hz = 880
//!
//! [engine.far_cue]
//! attenuation = 0.4
//! delay_samples = 18
//!
//! [runtime]
//! heartbeat = true
//! ```
//!
//! Every key is optional. Missing keys take their defaults.

use crate::{EngineConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Host-side options that do not affect the rendered signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeOptions {
    /// Run the diagnostic heartbeat thread pair alongside the ears.
    pub heartbeat: bool,
    /// Record per-tick timing in each ear's meter.
    pub metering: bool,
    /// Raise the ear and poller threads to maximum priority.
    pub realtime_priority: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            heartbeat: false,
            metering: true,
            realtime_priority: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinauraConfig {
    pub engine: EngineConfig,
    pub runtime: RuntimeOptions,
}

impl BinauraConfig {
    /// Parse and validate.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: BinauraConfig = toml::from_str(text)?;
        config.engine.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
