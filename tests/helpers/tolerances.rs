//! Tolerance constants for fixed-point testing.

/// One Q15 step as a float.
pub const FIX15_EPSILON: f32 = 1.0 / 32768.0;

/// One 12-bit output step after widening to 16-bit PCM.
pub const PCM16_STEP: i16 = 16;
