//! BinauraEngine that runs the poller and both ear contexts

use crate::heartbeat::Heartbeat;
use crate::scheduler::RealTimeScheduler;
use crate::{
    AtomicFlag, BinauraConfig, Ear, EngineConfig, Error, Result, RuntimeOptions, Sector,
    SharedDirectionState, TickMetrics,
};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Running binaural renderer.
///
/// Owns the direction poller thread, the two ear threads and, if enabled,
/// the heartbeat pair. Dropping the engine stops all of them.
///
/// # Example
///
/// ```no_run
/// use binaura::prelude::*;
///
/// let stick = SharedStick::new(StickReading::CENTER);
/// let mut engine = BinauraEngine::builder()
///     .mode(SynthMode::ToneBurst)
///     .stick(stick.clone())
///     .build()?;
///
/// // Push the stick hard left; the poller commits after four polls.
/// stick.set(StickReading::new(500, 3500));
/// std::thread::sleep(std::time::Duration::from_millis(200));
/// assert_eq!(engine.direction(), Sector::FarLeft);
///
/// engine.stop()?;
/// # Ok::<(), binaura::Error>(())
/// ```
pub struct BinauraEngine {
    config: BinauraConfig,
    direction: Arc<SharedDirectionState>,
    scheduler: RealTimeScheduler,
    poller: Option<JoinHandle<()>>,
    heartbeat: Option<Heartbeat>,
    shutdown: Arc<AtomicFlag>,
}

impl BinauraEngine {
    pub fn builder() -> crate::BinauraEngineBuilder {
        crate::BinauraEngineBuilder::default()
    }

    pub(crate) fn from_parts(
        config: BinauraConfig,
        direction: Arc<SharedDirectionState>,
        scheduler: RealTimeScheduler,
        poller: JoinHandle<()>,
        heartbeat: Option<Heartbeat>,
        shutdown: Arc<AtomicFlag>,
    ) -> Self {
        Self {
            config,
            direction,
            scheduler,
            poller: Some(poller),
            heartbeat,
            shutdown,
        }
    }

    /// Currently committed direction.
    pub fn direction(&self) -> Sector {
        self.direction.sector()
    }

    /// Number of direction commits since start.
    pub fn direction_generation(&self) -> u32 {
        self.direction.load().generation
    }

    pub fn direction_state(&self) -> &Arc<SharedDirectionState> {
        &self.direction
    }

    /// Tick timing for one ear's context.
    pub fn metrics(&self, ear: Ear) -> TickMetrics {
        self.scheduler.meter(ear).metrics()
    }

    /// Heartbeat counter, if the heartbeat is running.
    pub fn heartbeat_count(&self) -> Option<u64> {
        self.heartbeat.as_ref().map(Heartbeat::count)
    }

    pub fn is_running(&self) -> bool {
        !self.shutdown.get()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config.engine
    }

    pub fn runtime(&self) -> &RuntimeOptions {
        &self.config.runtime
    }

    /// Stop every thread and wait for them. Safe to call more than once.
    pub fn stop(&mut self) -> Result<()> {
        self.shutdown.set(true);

        let mut result = self.scheduler.stop();
        if let Some(poller) = self.poller.take() {
            if poller.join().is_err() && result.is_ok() {
                result = Err(Error::ThreadPanicked("poller"));
            }
        }
        if let Some(mut heartbeat) = self.heartbeat.take() {
            let stopped = heartbeat.stop();
            if result.is_ok() {
                result = stopped;
            }
        }

        tracing::info!(
            "Engine stopped after {} direction commits",
            self.direction_generation()
        );
        result
    }
}

impl Drop for BinauraEngine {
    fn drop(&mut self) {
        if self.poller.is_some() {
            let _ = self.stop();
        }
    }
}
