use std::ops::{Mul, Sub};

/// A floating point number `f * 2^e`, with a 64-bit significand and no hidden bit.
///
/// Unlike an [`f64`], a DiyFp has no special values, no sign and no implicit normalization. All
/// operations are exact except [`Mul`], which rounds the 128-bit product to its upper 64 bits, so
/// its result is off by at most half a unit in the last place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiyFp {
    pub f: u64,
    pub e: i32,
}

impl DiyFp {
    pub const SIGNIFICAND_SIZE: i32 = u64::BITS as i32;

    pub const fn new(f: u64, e: i32) -> DiyFp {
        DiyFp { f, e }
    }

    /// Shifts the significand left until its most significant bit is set, adjusting the exponent
    /// to keep the value.
    ///
    /// # Panics
    /// Panics if the significand is zero, which can't be normalized.
    pub const fn normalize(self) -> DiyFp {
        assert!(self.f != 0, "Can't normalize a zero DiyFp!");
        let shift = self.f.leading_zeros();
        DiyFp {
            f: self.f << shift,
            e: self.e - shift as i32,
        }
    }
}

impl Sub for DiyFp {
    type Output = DiyFp;

    /// Subtracts two DiyFps with the same exponent, where `self.f >= other.f`.
    fn sub(self, other: DiyFp) -> DiyFp {
        debug_assert_eq!(self.e, other.e, "DiyFp subtraction requires equal exponents.");
        debug_assert!(self.f >= other.f, "DiyFp subtraction would underflow.");
        DiyFp {
            f: self.f - other.f,
            e: self.e,
        }
    }
}

impl Mul for DiyFp {
    type Output = DiyFp;

    fn mul(self, other: DiyFp) -> DiyFp {
        let product = self.f as u128 * other.f as u128;
        // Round half up on the discarded lower 64 bits.
        let rounded = (product + (1 << 63)) >> 64;
        DiyFp {
            f: rounded as u64,
            e: self.e + other.e + 64,
        }
    }
}
