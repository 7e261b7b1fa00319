//! Q15 fixed-point arithmetic for the tick path.
//!
//! A [`Fix15`] stores a signed value with 15 fractional bits in an `i32`, so
//! `1.0` is `32768`. Every arithmetic operation saturates instead of wrapping,
//! which keeps a runaway envelope or an over-driven gain from folding over into
//! a full-scale click at the DAC.
//!
//! # Example
//!
//! ```
//! use binaura_core::Fix15;
//!
//! let gain = Fix15::from_ratio(7, 10);
//! let sample = Fix15::from_sample12(4095);
//! let out = sample * gain;
//! assert!(out < sample);
//! ```

use core::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

#[inline]
const fn saturate(value: i64) -> i32 {
    if value > i32::MAX as i64 {
        i32::MAX
    } else if value < i32::MIN as i64 {
        i32::MIN
    } else {
        value as i32
    }
}

/// Signed Q15 fixed-point number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fix15(i32);

impl Fix15 {
    pub const FRAC_BITS: u32 = 15;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);
    pub const HALF: Self = Self(1 << (Self::FRAC_BITS - 1));
    pub const MAX: Self = Self(i32::MAX);
    pub const MIN: Self = Self(i32::MIN);

    /// Raw 12-bit midpoint. ADC input and DAC output are centered here.
    pub const SAMPLE12_BIAS: i32 = 2048;

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn from_int(value: i16) -> Self {
        Self((value as i32) << Self::FRAC_BITS)
    }

    /// `num / den` as a fixed-point value. A zero denominator saturates
    /// toward the sign of the numerator.
    pub const fn from_ratio(num: i32, den: i32) -> Self {
        if den == 0 {
            return if num < 0 { Self::MIN } else { Self::MAX };
        }
        Self(saturate(((num as i64) << Self::FRAC_BITS) / den as i64))
    }

    /// Not for the tick path.
    pub fn from_f32(value: f32) -> Self {
        Self((value * Self::ONE.0 as f32) as i32)
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::ONE.0 as f32
    }

    /// Integer part, rounded toward negative infinity.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRAC_BITS
    }

    #[inline]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    pub const fn saturating_mul(self, rhs: Self) -> Self {
        Self(saturate((self.0 as i64 * rhs.0 as i64) >> Self::FRAC_BITS))
    }

    /// Division by zero saturates toward the sign of `self`.
    #[inline]
    pub const fn saturating_div(self, rhs: Self) -> Self {
        if rhs.0 == 0 {
            return if self.0 < 0 { Self::MIN } else { Self::MAX };
        }
        Self(saturate(((self.0 as i64) << Self::FRAC_BITS) / rhs.0 as i64))
    }

    #[inline]
    pub const fn mul_int(self, n: i32) -> Self {
        Self(saturate(self.0 as i64 * n as i64))
    }

    /// Truncating division by an integer. `n == 0` saturates.
    #[inline]
    pub const fn div_int(self, n: i32) -> Self {
        if n == 0 {
            return if self.0 < 0 { Self::MIN } else { Self::MAX };
        }
        Self(saturate(self.0 as i64 / n as i64))
    }

    #[inline]
    pub const fn clamp(self, lo: Self, hi: Self) -> Self {
        if self.0 < lo.0 {
            lo
        } else if self.0 > hi.0 {
            hi
        } else {
            self
        }
    }

    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts a raw unsigned 12-bit reading (0..=4095) into a signed sample
    /// in [-1, 1). Values above 4095 are clamped first.
    #[inline]
    pub const fn from_sample12(raw: u16) -> Self {
        let raw = if raw > 0x0FFF { 0x0FFF } else { raw };
        Self((raw as i32 - Self::SAMPLE12_BIAS) << (Self::FRAC_BITS - 11))
    }

    /// Signed 12-bit sample in [-2048, 2047], the inverse of
    /// [`from_sample12`](Self::from_sample12) before biasing.
    #[inline]
    pub const fn to_sample12(self) -> i16 {
        let value = self.0 >> (Self::FRAC_BITS - 11);
        if value > 2047 {
            2047
        } else if value < -2048 {
            -2048
        } else {
            value as i16
        }
    }
}

impl Add for Fix15 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl Sub for Fix15 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl Mul for Fix15 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.saturating_mul(rhs)
    }
}

impl Neg for Fix15 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}
