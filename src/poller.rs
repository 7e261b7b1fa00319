//! Stick polling: classify, debounce, publish.

use crate::io::StickSource;
use crate::scheduler::{raise_priority, PeriodicTimer};
use crate::{
    AtomicFlag, DirectionClassifier, Error, Result, Sector, SharedDirectionState, ThresholdTable,
};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const THREAD_NAME: &str = "binaura-poller";

/// Reads the stick once per poll and publishes a sector only when the
/// debounced classification commits to a new one.
pub struct DirectionPoller {
    classifier: DirectionClassifier,
    stick: Box<dyn StickSource>,
    direction: Arc<SharedDirectionState>,
    polls: u64,
}

impl DirectionPoller {
    /// Starts committed to whatever `direction` currently holds.
    pub fn new(
        thresholds: ThresholdTable,
        stick: Box<dyn StickSource>,
        direction: Arc<SharedDirectionState>,
    ) -> Self {
        let initial = direction.sector();
        Self {
            classifier: DirectionClassifier::new(thresholds, initial),
            stick,
            direction,
            polls: 0,
        }
    }

    /// One poll cycle. Returns the newly committed sector, if any.
    pub fn poll_once(&mut self) -> Option<Sector> {
        let reading = self.stick.read();
        self.polls += 1;

        let sector = self.classifier.poll(reading.x, reading.y)?;
        let snapshot = self.direction.publish(sector);
        tracing::debug!(
            sector = sector.name(),
            generation = snapshot.generation,
            x = reading.x,
            y = reading.y,
            "Direction committed"
        );
        Some(sector)
    }

    pub fn committed(&self) -> Sector {
        self.classifier.committed()
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn classifier(&self) -> &DirectionClassifier {
        &self.classifier
    }

    /// Run on a dedicated thread until `shutdown` is set.
    pub fn spawn(
        mut self,
        period: Duration,
        shutdown: Arc<AtomicFlag>,
        realtime_priority: bool,
    ) -> Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                if realtime_priority {
                    raise_priority(THREAD_NAME);
                }
                let mut timer = PeriodicTimer::new(period);
                while !shutdown.get() {
                    timer.wait();
                    self.poll_once();
                }
                tracing::debug!("Poller stopped after {} polls", self.polls);
            })
            .map_err(|source| Error::Spawn {
                name: THREAD_NAME,
                source,
            })
    }
}
