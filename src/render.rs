//! Deterministic, thread-free rendering.
//!
//! Runs the poller and both ears in lock-step on the calling thread, so a
//! scripted stick and input always produce the same words. Useful for tests
//! and for listening to a configuration without hardware.

use crate::io::{ConstantSource, FixedStick, SampleSource, StickSource};
use crate::poller::DirectionPoller;
use crate::{DacWord, Ear, EarChannel, EngineConfig, Result, Sector, SharedDirectionState};
use std::sync::Arc;

/// Output of an offline render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderResult {
    pub left: Vec<DacWord>,
    pub right: Vec<DacWord>,
    /// `(tick, sector)` for every direction commit during the render.
    pub commits: Vec<(u64, Sector)>,
    pub tick_rate_hz: u32,
}

impl RenderResult {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn words(&self, ear: Ear) -> &[DacWord] {
        match ear {
            Ear::Left => &self.left,
            Ear::Right => &self.right,
        }
    }

    /// Signed 12-bit levels for one ear.
    pub fn levels(&self, ear: Ear) -> Vec<i16> {
        self.words(ear).iter().map(|w| w.signed_level()).collect()
    }

    /// Interleaved L/R 16-bit PCM, 12-bit levels shifted to full scale.
    pub fn to_pcm16(&self) -> Vec<i16> {
        self.left
            .iter()
            .zip(&self.right)
            .flat_map(|(l, r)| [l.signed_level() << 4, r.signed_level() << 4])
            .collect()
    }

    /// Write a stereo 16-bit WAV at the tick rate.
    #[cfg(feature = "wav")]
    pub fn write_wav<W: std::io::Write + std::io::Seek>(&self, writer: W) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: self.tick_rate_hz,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut wav = hound::WavWriter::new(writer, spec)?;
        for sample in self.to_pcm16() {
            wav.write_sample(sample)?;
        }
        wav.finalize()?;
        Ok(())
    }

    #[cfg(feature = "wav")]
    pub fn save_wav(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_wav(file)
    }
}

pub struct OfflineRenderer {
    left: EarChannel,
    right: EarChannel,
    input: Box<dyn SampleSource>,
    poller: DirectionPoller,
    direction: Arc<SharedDirectionState>,
    ticks_per_poll: u64,
    tick: u64,
    tick_rate_hz: u32,
}

impl OfflineRenderer {
    /// Silent input and a centered stick until replaced.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let left = EarChannel::new(Ear::Left, config)?;
        let right = EarChannel::new(Ear::Right, config)?;
        let direction = Arc::new(SharedDirectionState::default());
        let poller = DirectionPoller::new(
            config.thresholds,
            Box::new(FixedStick::default()),
            Arc::clone(&direction),
        );

        Ok(Self {
            left,
            right,
            input: Box::new(ConstantSource::SILENCE),
            poller,
            direction,
            ticks_per_poll: u64::from(config.ticks_per_poll()),
            tick: 0,
            tick_rate_hz: config.tick_rate_hz(),
        })
    }

    /// Feed both ears from `input`, one sample per tick.
    pub fn input(mut self, input: impl SampleSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Replace the stick. The committed direction is kept.
    pub fn stick(mut self, stick: impl StickSource + 'static) -> Self {
        let thresholds = *self.poller.classifier().table();
        self.poller = DirectionPoller::new(thresholds, Box::new(stick), Arc::clone(&self.direction));
        self
    }

    /// Render `ticks` more ticks. Polls happen on tick 0 and every
    /// `poll_period / tick_period` ticks after it, before that tick's audio.
    pub fn render(&mut self, ticks: usize) -> RenderResult {
        let mut result = RenderResult {
            left: Vec::with_capacity(ticks),
            right: Vec::with_capacity(ticks),
            commits: Vec::new(),
            tick_rate_hz: self.tick_rate_hz,
        };

        for _ in 0..ticks {
            if self.tick % self.ticks_per_poll == 0 {
                if let Some(sector) = self.poller.poll_once() {
                    result.commits.push((self.tick, sector));
                }
            }

            let sample = if self.left.synth().uses_input() {
                self.input.next_sample()
            } else {
                0
            };
            result.left.push(self.left.tick_shared(sample, &self.direction));
            result.right.push(self.right.tick_shared(sample, &self.direction));
            self.tick += 1;
        }

        tracing::debug!(
            "Rendered {} ticks ({} commits, now at tick {})",
            ticks,
            result.commits.len(),
            self.tick
        );
        result
    }

    pub fn direction(&self) -> Sector {
        self.direction.sector()
    }

    pub fn ticks_rendered(&self) -> u64 {
        self.tick
    }

    pub fn ticks_per_poll(&self) -> u64 {
        self.ticks_per_poll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StickReading;

    #[test]
    fn test_center_is_symmetric() {
        let mut renderer = OfflineRenderer::new(&EngineConfig::default())
            .unwrap()
            .input(ConstantSource(3000));
        let result = renderer.render(100);
        assert_eq!(result.len(), 100);
        assert_eq!(result.levels(Ear::Left), result.levels(Ear::Right));
        assert!(result.commits.is_empty());
    }

    #[test]
    fn test_commit_lands_on_fourth_poll() {
        let config = EngineConfig::default();
        let mut renderer = OfflineRenderer::new(&config)
            .unwrap()
            .stick(FixedStick(StickReading::new(500, 3500)));
        let per_poll = renderer.ticks_per_poll();
        let result = renderer.render((per_poll * 4) as usize);
        assert_eq!(result.commits, vec![(per_poll * 3, Sector::FarLeft)]);
        assert_eq!(renderer.direction(), Sector::FarLeft);
    }

    #[test]
    fn test_render_continues_where_it_left_off() {
        let mut a = OfflineRenderer::new(&EngineConfig::default()).unwrap();
        let mut b = OfflineRenderer::new(&EngineConfig::default()).unwrap();
        let whole = a.render(200);
        let mut split = b.render(120);
        split.left.extend(b.render(80).left);
        assert_eq!(whole.left, split.left);
        assert_eq!(b.ticks_rendered(), 200);
    }

    #[test]
    fn test_pcm_is_interleaved() {
        let result = RenderResult {
            left: vec![DacWord::from_raw(2048 + 1)],
            right: vec![DacWord::from_raw(2048 - 1)],
            commits: Vec::new(),
            tick_rate_hz: 40_000,
        };
        assert_eq!(result.to_pcm16(), vec![16, -16]);
    }
}
