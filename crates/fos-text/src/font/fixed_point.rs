//! 26.6 Fixed-Point Arithmetic
//!
//! Pen positions and glyph advances are carried in 26.6 fixed point, the
//! unit font rasterizers report metrics in. One pixel is 64 units.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Neg, Sub};

/// 26.6 fixed-point number (32-bit total)
///
/// - 26 bits for integer part
/// - 6 bits for fractional part: precision of 1/64 pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct F26Dot6(i32);

impl F26Dot6 {
    pub const FRAC_BITS: u32 = 6;
    pub const SCALE: i32 = 1 << Self::FRAC_BITS;

    pub const ZERO: F26Dot6 = F26Dot6(0);
    pub const ONE: F26Dot6 = F26Dot6(Self::SCALE);

    /// Create from raw bits
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Get raw bits
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Create from whole pixels
    #[inline]
    pub const fn from_i32(value: i32) -> Self {
        Self(value << Self::FRAC_BITS)
    }

    /// Whole pixels, rounded toward negative infinity
    #[inline]
    pub const fn floor(self) -> i32 {
        self.0 >> Self::FRAC_BITS
    }

    /// Whole pixels, rounded to nearest (halves away from zero)
    #[inline]
    pub const fn round(self) -> i32 {
        if self.0 >= 0 {
            (self.0 + Self::SCALE / 2) >> Self::FRAC_BITS
        } else {
            -((-self.0 + Self::SCALE / 2) >> Self::FRAC_BITS)
        }
    }

    /// Create from f32 pixels
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self((value * Self::SCALE as f32).round() as i32)
    }
}

impl Add for F26Dot6 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for F26Dot6 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for F26Dot6 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for F26Dot6 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl PartialOrd for F26Dot6 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for F26Dot6 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Advance vector in 26.6 units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advance {
    pub x: F26Dot6,
    pub y: F26Dot6,
}

impl Advance {
    /// Horizontal advance of whole pixels
    pub const fn horizontal(px: i32) -> Self {
        Self {
            x: F26Dot6::from_i32(px),
            y: F26Dot6::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f26dot6_basic() {
        let a = F26Dot6::from_i32(10);
        let b = F26Dot6::from_i32(3);

        assert_eq!(a.to_bits(), 640);
        assert_eq!((a + b).floor(), 13);
        assert_eq!((a - b).floor(), 7);
    }

    #[test]
    fn test_f26dot6_floor_is_arithmetic() {
        // -1/64 of a pixel still belongs to pixel -1
        assert_eq!(F26Dot6::from_bits(-1).floor(), -1);
        assert_eq!(F26Dot6::from_bits(-64).floor(), -1);
        assert_eq!(F26Dot6::from_bits(-65).floor(), -2);
        assert_eq!(F26Dot6::from_bits(127).floor(), 1);
    }

    #[test]
    fn test_f26dot6_round() {
        assert_eq!(F26Dot6::from_bits(95).round(), 1);
        assert_eq!(F26Dot6::from_bits(96).round(), 2);
        assert_eq!(F26Dot6::from_bits(-96).round(), -2);
        assert_eq!(F26Dot6::from_f32(2.5).to_bits(), 160);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut pen = F26Dot6::ZERO;
        for _ in 0..3 {
            pen += Advance::horizontal(7).x;
        }
        assert_eq!(pen, F26Dot6::from_i32(21));
    }
}
