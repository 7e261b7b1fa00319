//! Per-ear real-time contexts.
//!
//! Each ear runs on its own thread at maximum priority, woken by a
//! [`PeriodicTimer`] once per tick. The two threads share nothing mutable
//! except the published direction, which they only read.

mod timer;

pub use timer::{PeriodicTimer, Wakeup};

use crate::io::{OutputSink, SampleSource};
use crate::{AtomicFlag, DacWord, Ear, EarChannel, Error, Result, SharedDirectionState, TickMeter};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thread_priority::ThreadPriority;

/// One ear's channel together with its input and output.
pub struct EarContext {
    channel: EarChannel,
    input: Box<dyn SampleSource>,
    output: Box<dyn OutputSink>,
}

impl EarContext {
    pub fn new(
        channel: EarChannel,
        input: Box<dyn SampleSource>,
        output: Box<dyn OutputSink>,
    ) -> Self {
        Self {
            channel,
            input,
            output,
        }
    }

    /// Read input (passthrough only), apply the published direction,
    /// synthesize, pack and emit.
    #[inline]
    pub fn tick(&mut self, direction: &SharedDirectionState) -> DacWord {
        let input = if self.channel.synth().uses_input() {
            self.input.next_sample()
        } else {
            0
        };
        let word = self.channel.tick_shared(input, direction);
        self.output.write(word);
        word
    }

    pub fn ear(&self) -> Ear {
        self.channel.ear()
    }

    pub fn channel(&self) -> &EarChannel {
        &self.channel
    }
}

/// Scheduler settings shared by both ears.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub tick_period: Duration,
    pub realtime_priority: bool,
    pub metering: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_micros(u64::from(crate::timing::TICK_PERIOD_US)),
            realtime_priority: true,
            metering: true,
        }
    }
}

/// Owns the two ear threads.
pub struct RealTimeScheduler {
    handles: Vec<(Ear, JoinHandle<()>)>,
    meters: [Arc<TickMeter>; 2],
    shutdown: Arc<AtomicFlag>,
}

impl RealTimeScheduler {
    /// Spawn both ear threads. They stop when `shutdown` is set.
    pub fn start(
        config: SchedulerConfig,
        left: EarContext,
        right: EarContext,
        direction: Arc<SharedDirectionState>,
        shutdown: Arc<AtomicFlag>,
    ) -> Result<Self> {
        let period_us = config.tick_period.as_micros().min(u32::MAX as u128) as u32;
        let meters = [
            Arc::new(TickMeter::new(period_us)),
            Arc::new(TickMeter::new(period_us)),
        ];
        if !config.metering {
            meters.iter().for_each(|meter| meter.disable());
        }

        let mut scheduler = Self {
            handles: Vec::with_capacity(2),
            meters,
            shutdown,
        };

        // Both ears share the first deadline so their ticks line up.
        let first_deadline = Instant::now() + config.tick_period;
        for context in [left, right] {
            let ear = context.ear();
            let timer = PeriodicTimer::starting_at(first_deadline, config.tick_period);
            let spawned = scheduler.spawn_ear(context, timer, &direction, config.realtime_priority);
            if let Err(e) = spawned {
                scheduler.shutdown.set(true);
                scheduler.join_all();
                return Err(e);
            }
            tracing::debug!("Started {} ear context", ear.name());
        }

        tracing::info!(
            "Real-time scheduler started ({} us tick)",
            config.tick_period.as_micros()
        );
        Ok(scheduler)
    }

    fn spawn_ear(
        &mut self,
        mut context: EarContext,
        mut timer: PeriodicTimer,
        direction: &Arc<SharedDirectionState>,
        realtime_priority: bool,
    ) -> Result<()> {
        let ear = context.ear();
        let name = thread_name(ear);
        let meter = Arc::clone(&self.meters[ear.index()]);
        let direction = Arc::clone(direction);
        let shutdown = Arc::clone(&self.shutdown);

        let handle = thread::Builder::new()
            .name(name.into())
            .spawn(move || {
                if realtime_priority {
                    raise_priority(name);
                }

                while !shutdown.get() {
                    if timer.wait() == Wakeup::Overtaken {
                        meter.record_late_start();
                    }
                    let started = Instant::now();
                    context.tick(&direction);
                    meter.record(started.elapsed());
                }
            })
            .map_err(|source| Error::Spawn { name, source })?;

        self.handles.push((ear, handle));
        Ok(())
    }

    pub fn meter(&self, ear: Ear) -> &Arc<TickMeter> {
        &self.meters[ear.index()]
    }

    pub fn is_running(&self) -> bool {
        !self.handles.is_empty() && !self.shutdown.get()
    }

    /// Signal shutdown and join both ear threads.
    pub fn stop(&mut self) -> Result<()> {
        self.shutdown.set(true);
        let panicked = self.join_all();
        tracing::info!("Real-time scheduler stopped");
        match panicked {
            Some(ear) => Err(Error::ThreadPanicked(thread_name(ear))),
            None => Ok(()),
        }
    }

    /// Join every thread, returning the first ear whose thread panicked.
    fn join_all(&mut self) -> Option<Ear> {
        let mut panicked = None;
        for (ear, handle) in self.handles.drain(..) {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(ear);
            }
        }
        panicked
    }
}

impl Drop for RealTimeScheduler {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            let _ = self.stop();
        }
    }
}

pub(crate) fn raise_priority(name: &str) {
    if let Err(e) = thread_priority::set_current_thread_priority(ThreadPriority::Max) {
        tracing::warn!("Could not raise {} thread priority: {:?}", name, e);
    }
}

fn thread_name(ear: Ear) -> &'static str {
    match ear {
        Ear::Left => "binaura-left-ear",
        Ear::Right => "binaura-right-ear",
    }
}
