//! Discrete direction model: five azimuth sectors and the two ears.

use serde::{Deserialize, Serialize};

/// One of the five azimuth bins the stick resolves into, ordered left to right.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Sector {
    /// About 80 degrees left.
    FarLeft = 0,
    /// About 45 degrees left.
    Left = 1,
    #[default]
    Center = 2,
    /// About 45 degrees right.
    Right = 3,
    /// About 80 degrees right.
    FarRight = 4,
}

impl Sector {
    pub const ALL: [Sector; 5] = [
        Sector::FarLeft,
        Sector::Left,
        Sector::Center,
        Sector::Right,
        Sector::FarRight,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`index`](Self::index). Unknown indices map to `Center`.
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Sector::FarLeft,
            1 => Sector::Left,
            3 => Sector::Right,
            4 => Sector::FarRight,
            _ => Sector::Center,
        }
    }

    #[inline]
    pub const fn side(self) -> Side {
        match self {
            Sector::FarLeft | Sector::Left => Side::Left,
            Sector::Center => Side::Center,
            Sector::Right | Sector::FarRight => Side::Right,
        }
    }

    /// Approximate azimuth in degrees, negative to the left.
    pub const fn azimuth_degrees(self) -> i16 {
        match self {
            Sector::FarLeft => -80,
            Sector::Left => -45,
            Sector::Center => 0,
            Sector::Right => 45,
            Sector::FarRight => 80,
        }
    }

    /// True if `ear` faces away from this sector and hears the delayed,
    /// attenuated copy. Never true at `Center`.
    #[inline]
    pub const fn is_contralateral(self, ear: Ear) -> bool {
        matches!(
            (self.side(), ear),
            (Side::Left, Ear::Right) | (Side::Right, Ear::Left)
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Sector::FarLeft => "far-left",
            Sector::Left => "left",
            Sector::Center => "center",
            Sector::Right => "right",
            Sector::FarRight => "far-right",
        }
    }
}

/// Which half of the sound stage a sector lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    pub const BOTH: [Ear; 2] = [Ear::Left, Ear::Right];

    /// Slot in per-ear arrays: left 0, right 1.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Ear::Left => 0,
            Ear::Right => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Ear::Left => "left",
            Ear::Right => "right",
        }
    }
}
