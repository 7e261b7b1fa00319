//! Fixed-rate periodic deadlines.

use std::thread;
use std::time::{Duration, Instant};

/// Waits longer than this are mostly slept; the tail is spun.
const SPIN_WINDOW: Duration = Duration::from_millis(1);

/// Deadline `n + 1` is always deadline `n` plus one period, however long the
/// work between waits took. A slow tick shifts the next start (jitter) but
/// never the schedule (drift).
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period: Duration,
    next: Instant,
}

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// Woke at or just after the deadline.
    OnTime,
    /// The deadline had already passed when the wait began.
    Late,
    /// Even the following deadline had passed: at least one tick is behind.
    Overtaken,
}

impl PeriodicTimer {
    /// First deadline one period from now.
    pub fn new(period: Duration) -> Self {
        Self::starting_at(Instant::now() + period, period)
    }

    pub fn starting_at(first_deadline: Instant, period: Duration) -> Self {
        Self {
            period,
            next: first_deadline,
        }
    }

    pub fn from_micros(period_us: u32) -> Self {
        Self::new(Duration::from_micros(u64::from(period_us)))
    }

    /// Block until the next deadline and schedule the one after it.
    pub fn wait(&mut self) -> Wakeup {
        let deadline = self.next;
        self.next += self.period;

        let now = Instant::now();
        if now >= deadline {
            return if now >= self.next {
                Wakeup::Overtaken
            } else {
                Wakeup::Late
            };
        }

        let remaining = deadline - now;
        if remaining > SPIN_WINDOW {
            thread::sleep(remaining - SPIN_WINDOW);
        }
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
        Wakeup::OnTime
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// The deadline the next [`wait`](Self::wait) will block on.
    pub fn next_deadline(&self) -> Instant {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadlines_advance_by_exact_period() {
        let start = Instant::now();
        let period = Duration::from_micros(500);
        let mut timer = PeriodicTimer::starting_at(start, period);
        for n in 1..=10u32 {
            timer.wait();
            assert_eq!(timer.next_deadline(), start + period * n);
        }
    }

    #[test]
    fn test_slow_work_does_not_drift() {
        let start = Instant::now();
        let period = Duration::from_millis(2);
        let mut timer = PeriodicTimer::starting_at(start + period, period);
        for _ in 0..5 {
            timer.wait();
            thread::sleep(Duration::from_millis(3));
        }
        // Five waits always consume exactly five periods of schedule.
        assert_eq!(timer.next_deadline(), start + period * 6);
    }

    #[test]
    fn test_never_wakes_early() {
        let period = Duration::from_millis(3);
        let mut timer = PeriodicTimer::new(period);
        let deadline = timer.next_deadline();
        timer.wait();
        assert!(Instant::now() >= deadline);
    }

    #[test]
    fn test_reports_overtaken_deadlines() {
        let period = Duration::from_millis(1);
        let mut timer = PeriodicTimer::starting_at(Instant::now(), period);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(timer.wait(), Wakeup::Overtaken);
    }
}
