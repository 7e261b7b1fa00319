//! Builder for configuring and constructing a `BinauraEngine`.

use crate::heartbeat::Heartbeat;
use crate::io::{ConstantSource, FixedStick, NullSink, OutputSink, SampleSource, StickSource};
use crate::poller::DirectionPoller;
use crate::scheduler::{EarContext, RealTimeScheduler, SchedulerConfig};
use crate::{
    AtomicFlag, BinauraConfig, BinauraEngine, Ear, EarChannel, EngineConfig, Result,
    RuntimeOptions, SharedDirectionState, SynthMode,
};
use std::sync::Arc;
use std::time::Duration;

/// Interval between heartbeat round trips.
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(500);

/// Every piece has a default: silent inputs, a centered stick and sinks that
/// discard their words. A real target supplies its own drivers through the
/// [`io`](crate::io) traits.
///
/// # Example
///
/// ```no_run
/// use binaura::prelude::*;
///
/// let left = RecordingSink::with_capacity(40_000);
/// let _engine = BinauraEngine::builder()
///     .config(EngineConfig::default())
///     .input(Ear::Left, ConstantSource(3000))
///     .output(Ear::Left, left.clone())
///     .heartbeat(true)
///     .build()?;
/// # Ok::<(), binaura::Error>(())
/// ```
pub struct BinauraEngineBuilder {
    config: BinauraConfig,
    inputs: [Option<Box<dyn SampleSource>>; 2],
    outputs: [Option<Box<dyn OutputSink>>; 2],
    stick: Option<Box<dyn StickSource>>,
}

impl Default for BinauraEngineBuilder {
    fn default() -> Self {
        Self {
            config: BinauraConfig::default(),
            inputs: [None, None],
            outputs: [None, None],
            stick: None,
        }
    }
}

impl BinauraEngineBuilder {
    /// Engine and runtime settings, typically from [`BinauraConfig::load`].
    pub fn settings(mut self, config: BinauraConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config.engine = config;
        self
    }

    pub fn runtime(mut self, runtime: RuntimeOptions) -> Self {
        self.config.runtime = runtime;
        self
    }

    /// Default: passthrough
    pub fn mode(mut self, mode: SynthMode) -> Self {
        self.config.engine.mode = mode;
        self
    }

    /// Default: disabled
    pub fn heartbeat(mut self, enabled: bool) -> Self {
        self.config.runtime.heartbeat = enabled;
        self
    }

    /// Default: enabled
    pub fn realtime_priority(mut self, enabled: bool) -> Self {
        self.config.runtime.realtime_priority = enabled;
        self
    }

    /// Default: enabled
    pub fn metering(mut self, enabled: bool) -> Self {
        self.config.runtime.metering = enabled;
        self
    }

    pub fn input(mut self, ear: Ear, source: impl SampleSource + 'static) -> Self {
        self.inputs[ear.index()] = Some(Box::new(source));
        self
    }

    pub fn output(mut self, ear: Ear, sink: impl OutputSink + 'static) -> Self {
        self.outputs[ear.index()] = Some(Box::new(sink));
        self
    }

    pub fn stick(mut self, stick: impl StickSource + 'static) -> Self {
        self.stick = Some(Box::new(stick));
        self
    }

    /// Validate the configuration and start every thread.
    pub fn build(self) -> Result<BinauraEngine> {
        let BinauraEngineBuilder {
            config,
            inputs: [left_input, right_input],
            outputs: [left_output, right_output],
            stick,
        } = self;

        config.engine.validate()?;
        let engine_config = &config.engine;
        let runtime = &config.runtime;

        let left = EarContext::new(
            EarChannel::new(Ear::Left, engine_config)?,
            left_input.unwrap_or_else(silent_input),
            left_output.unwrap_or_else(discard_output),
        );
        let right = EarContext::new(
            EarChannel::new(Ear::Right, engine_config)?,
            right_input.unwrap_or_else(silent_input),
            right_output.unwrap_or_else(discard_output),
        );

        let direction = Arc::new(SharedDirectionState::default());
        let shutdown = Arc::new(AtomicFlag::new(false));

        let scheduler = RealTimeScheduler::start(
            SchedulerConfig {
                tick_period: micros(engine_config.tick_period_us),
                realtime_priority: runtime.realtime_priority,
                metering: runtime.metering,
            },
            left,
            right,
            Arc::clone(&direction),
            Arc::clone(&shutdown),
        )?;

        let poller = DirectionPoller::new(
            engine_config.thresholds,
            stick.unwrap_or_else(centered_stick),
            Arc::clone(&direction),
        );
        let poller = match poller.spawn(
            micros(engine_config.poll_period_us),
            Arc::clone(&shutdown),
            runtime.realtime_priority,
        ) {
            Ok(handle) => handle,
            Err(e) => {
                shutdown.set(true);
                drop(scheduler);
                return Err(e);
            }
        };

        let heartbeat = if runtime.heartbeat {
            match Heartbeat::start(HEARTBEAT_INTERVAL) {
                Ok(heartbeat) => Some(heartbeat),
                Err(e) => {
                    shutdown.set(true);
                    drop(scheduler);
                    let _ = poller.join();
                    return Err(e);
                }
            }
        } else {
            None
        };

        tracing::info!(
            "Engine started: {:?} mode, {} Hz tick, {} ticks per poll",
            engine_config.mode,
            engine_config.tick_rate_hz(),
            engine_config.ticks_per_poll()
        );

        Ok(BinauraEngine::from_parts(
            config, direction, scheduler, poller, heartbeat, shutdown,
        ))
    }
}

fn micros(us: u32) -> Duration {
    Duration::from_micros(u64::from(us))
}

fn silent_input() -> Box<dyn SampleSource> {
    Box::new(ConstantSource::SILENCE)
}

fn discard_output() -> Box<dyn OutputSink> {
    Box::new(NullSink)
}

fn centered_stick() -> Box<dyn StickSource> {
    Box::new(FixedStick::default())
}
