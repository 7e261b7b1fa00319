//! Timing constants shared by the scheduler, the poller and the synthesizer.
//!
//! Tick counts assume the default 40 kHz tick rate.

/// Audio tick period (40 kHz).
pub const TICK_PERIOD_US: u32 = 25;

/// Direction poll period.
pub const POLL_PERIOD_US: u32 = 40_000;

/// Consecutive agreeing classifications required to commit a direction.
pub const DEBOUNCE_DEPTH: usize = 4;

/// Ticks in the linear fade-in at the start of a tone burst.
pub const ATTACK_TIME: u32 = 200;

/// Ticks in the linear fade-out at the end of a tone burst.
pub const DECAY_TIME: u32 = 200;

/// Ticks in one tone burst, attack and decay included.
pub const BEEP_DURATION: u32 = 3_000;

/// Ticks from the start of one burst to the start of the next.
pub const BEEP_REPEAT_INTERVAL: u32 = 40_000;

/// Entries in the DDS sine table.
pub const SINE_TABLE_SIZE: usize = 256;

/// Input history per ear: the longest cue delay plus the current sample.
pub const HISTORY_CAPACITY: usize = 21;

/// Longest delay a cue may request.
pub const MAX_DELAY_SAMPLES: usize = HISTORY_CAPACITY - 1;

/// Ticks per second for a given tick period.
#[inline]
pub const fn tick_rate_hz(tick_period_us: u32) -> u32 {
    if tick_period_us == 0 {
        return 0;
    }
    1_000_000 / tick_period_us
}

/// Number of audio ticks between two direction polls, at least one.
#[inline]
pub const fn ticks_per_poll(tick_period_us: u32, poll_period_us: u32) -> u32 {
    if tick_period_us == 0 {
        return 1;
    }
    let ticks = poll_period_us / tick_period_us;
    if ticks == 0 {
        1
    } else {
        ticks
    }
}
