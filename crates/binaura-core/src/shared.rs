//! Direction state published from the poller to both ear contexts.
//!
//! The committed sector and a commit generation are packed into a single
//! `AtomicU32`, so a reader sees either the previous snapshot or the new one,
//! never a mix. There is exactly one writer; readers never block it.

use crate::{AtomicU32, Ordering, Sector};

const SECTOR_MASK: u32 = 0xFF;
const GENERATION_SHIFT: u32 = 8;
const GENERATION_MASK: u32 = 0x00FF_FFFF;

/// A consistent view of the committed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSnapshot {
    pub sector: Sector,
    /// Number of commits so far, wrapping at 2^24.
    pub generation: u32,
}

impl DirectionSnapshot {
    #[inline]
    const fn pack(self) -> u32 {
        ((self.generation & GENERATION_MASK) << GENERATION_SHIFT) | self.sector.index() as u32
    }

    #[inline]
    const fn unpack(word: u32) -> Self {
        Self {
            sector: Sector::from_index((word & SECTOR_MASK) as u8),
            generation: (word >> GENERATION_SHIFT) & GENERATION_MASK,
        }
    }
}

/// Single-writer, multi-reader published direction.
#[derive(Debug)]
#[repr(align(64))]
pub struct SharedDirectionState {
    word: AtomicU32,
}

impl SharedDirectionState {
    pub const fn new(initial: Sector) -> Self {
        let snapshot = DirectionSnapshot {
            sector: initial,
            generation: 0,
        };
        Self {
            word: AtomicU32::new(snapshot.pack()),
        }
    }

    /// Called once per tick by each ear context.
    #[inline]
    pub fn load(&self) -> DirectionSnapshot {
        DirectionSnapshot::unpack(self.word.load(Ordering::Acquire))
    }

    #[inline]
    pub fn sector(&self) -> Sector {
        self.load().sector
    }

    /// Publish a newly committed sector. Must only be called from the
    /// single writer (the direction poller).
    pub fn publish(&self, sector: Sector) -> DirectionSnapshot {
        let previous = DirectionSnapshot::unpack(self.word.load(Ordering::Relaxed));
        let next = DirectionSnapshot {
            sector,
            generation: previous.generation.wrapping_add(1) & GENERATION_MASK,
        };
        self.word.store(next.pack(), Ordering::Release);
        next
    }
}

impl Default for SharedDirectionState {
    fn default() -> Self {
        Self::new(Sector::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot() {
        let state = SharedDirectionState::new(Sector::Left);
        let snap = state.load();
        assert_eq!(snap.sector, Sector::Left);
        assert_eq!(snap.generation, 0);
    }

    #[test]
    fn test_publish_bumps_generation() {
        let state = SharedDirectionState::default();
        let first = state.publish(Sector::FarRight);
        let second = state.publish(Sector::FarLeft);
        assert_eq!(first.generation, 1);
        assert_eq!(second.generation, 2);
        assert_eq!(state.load(), second);
    }

    #[test]
    fn test_generation_wraps_without_touching_sector() {
        let state = SharedDirectionState::default();
        state.word.store(
            DirectionSnapshot {
                sector: Sector::Right,
                generation: GENERATION_MASK,
            }
            .pack(),
            Ordering::Relaxed,
        );
        let snap = state.publish(Sector::Right);
        assert_eq!(snap.generation, 0);
        assert_eq!(state.sector(), Sector::Right);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        use std::sync::Arc;

        let state = Arc::new(SharedDirectionState::default());
        let reader = {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for _ in 0..10_000 {
                    let snap = state.load();
                    // Odd generations are always FarLeft, even ones FarRight.
                    if snap.generation > 0 {
                        let expected = if snap.generation % 2 == 1 {
                            Sector::FarLeft
                        } else {
                            Sector::FarRight
                        };
                        assert_eq!(snap.sector, expected);
                    }
                }
            })
        };
        for i in 0..10_000u32 {
            let sector = if i % 2 == 0 {
                Sector::FarLeft
            } else {
                Sector::FarRight
            };
            state.publish(sector);
        }
        reader.join().unwrap();
    }
}
