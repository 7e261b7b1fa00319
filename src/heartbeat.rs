//! Diagnostic ping-pong between two threads.
//!
//! A counter bounces through two single-slot channels; the pinger sends it,
//! the ponger increments it and sends it back. A counter that keeps climbing
//! shows both sides are alive. Nothing here touches the tick path.

use crate::{AtomicFlag, AtomicU64, Error, Ordering, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const PING_THREAD: &str = "binaura-heartbeat-ping";
const PONG_THREAD: &str = "binaura-heartbeat-pong";

/// How often the pinger rechecks the shutdown flag while waiting for a reply.
const REPLY_POLL: Duration = Duration::from_millis(20);

pub struct Heartbeat {
    count: Arc<AtomicU64>,
    shutdown: Arc<AtomicFlag>,
    handles: Vec<JoinHandle<()>>,
}

impl Heartbeat {
    /// One round trip per `interval`.
    pub fn start(interval: Duration) -> Result<Self> {
        let (to_pong, from_ping) = bounded::<u64>(1);
        let (to_ping, from_pong) = bounded::<u64>(1);

        let mut heartbeat = Self {
            count: Arc::new(AtomicU64::new(0)),
            shutdown: Arc::new(AtomicFlag::new(false)),
            handles: Vec::with_capacity(2),
        };

        let pong = thread::Builder::new()
            .name(PONG_THREAD.into())
            .spawn(move || pong_loop(from_ping, to_ping))
            .map_err(|source| Error::Spawn {
                name: PONG_THREAD,
                source,
            })?;
        heartbeat.handles.push(pong);

        let count = Arc::clone(&heartbeat.count);
        let shutdown = Arc::clone(&heartbeat.shutdown);
        let ping = thread::Builder::new()
            .name(PING_THREAD.into())
            .spawn(move || ping_loop(to_pong, from_pong, &count, &shutdown, interval))
            .map_err(|source| Error::Spawn {
                name: PING_THREAD,
                source,
            })?;
        heartbeat.handles.push(ping);

        tracing::debug!("Heartbeat started ({:?} interval)", interval);
        Ok(heartbeat)
    }

    /// Latest counter value seen by the pinger.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        !self.handles.is_empty()
    }

    pub fn stop(&mut self) -> Result<()> {
        self.shutdown.set(true);
        let mut result = Ok(());
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                result = Err(Error::ThreadPanicked("heartbeat"));
            }
        }
        tracing::debug!("Heartbeat stopped at {}", self.count());
        result
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        if self.is_running() {
            let _ = self.stop();
        }
    }
}

fn ping_loop(
    to_pong: Sender<u64>,
    from_pong: Receiver<u64>,
    count: &AtomicU64,
    shutdown: &AtomicFlag,
    interval: Duration,
) {
    let mut value = 0u64;
    'beats: while !shutdown.get() {
        if to_pong.send(value).is_err() {
            break;
        }
        loop {
            match from_pong.recv_timeout(REPLY_POLL) {
                Ok(reply) => {
                    value = reply;
                    count.store(reply, Ordering::Relaxed);
                    tracing::trace!(count = reply, "Heartbeat");
                    break;
                }
                Err(RecvTimeoutError::Timeout) if shutdown.get() => break 'beats,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break 'beats,
            }
        }
        thread::sleep(interval);
    }
    // Dropping `to_pong` here ends the ponger's receive loop.
}

fn pong_loop(from_ping: Receiver<u64>, to_ping: Sender<u64>) {
    for value in from_ping.iter() {
        if to_ping.send(value.wrapping_add(1)).is_err() {
            break;
        }
    }
}
