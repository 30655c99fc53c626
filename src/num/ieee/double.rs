use super::DiyFp;

/// A bit level view of an [`f64`].
///
/// The value is interpreted as `significand * 2^exponent`, with the hidden bit restored for
/// normal numbers. All accessors except [`Double::sign`] and the predicates require a finite
/// value, which is checked in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Double(u64);

impl Double {
    pub const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
    pub const EXPONENT_MASK: u64 = 0x7FF0_0000_0000_0000;
    pub const SIGNIFICAND_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
    pub const HIDDEN_BIT: u64 = 0x0010_0000_0000_0000;
    pub const INFINITY_BITS: u64 = 0x7FF0_0000_0000_0000;
    pub const NAN_BITS: u64 = 0x7FF8_0000_0000_0000;

    /// The number of stored significand bits, without the hidden bit.
    pub const PHYSICAL_SIGNIFICAND_SIZE: i32 = 52;
    /// The number of significand bits, including the hidden bit.
    pub const SIGNIFICAND_SIZE: i32 = 53;

    pub const EXPONENT_BIAS: i32 = 0x3FF + Self::PHYSICAL_SIGNIFICAND_SIZE;
    pub const DENORMAL_EXPONENT: i32 = -Self::EXPONENT_BIAS + 1;
    pub const MAX_EXPONENT: i32 = 0x7FF - Self::EXPONENT_BIAS;

    pub const fn new(value: f64) -> Double {
        Double(value.to_bits())
    }

    pub const fn from_bits(bits: u64) -> Double {
        Double(bits)
    }

    /// Creates the [`f64`] closest to `diy_fp`, rounding towards zero for the bits that don't
    /// fit. Values too large become infinity and values too small become zero.
    pub const fn from_diy_fp(diy_fp: DiyFp) -> Double {
        let mut significand = diy_fp.f;
        let mut exponent = diy_fp.e;
        while significand > Self::HIDDEN_BIT + Self::SIGNIFICAND_MASK {
            significand >>= 1;
            exponent += 1;
        }
        if exponent >= Self::MAX_EXPONENT {
            return Double(Self::INFINITY_BITS);
        }
        if exponent < Self::DENORMAL_EXPONENT {
            return Double(0);
        }
        while exponent > Self::DENORMAL_EXPONENT && significand & Self::HIDDEN_BIT == 0 {
            significand <<= 1;
            exponent -= 1;
        }
        let biased_exponent = if exponent == Self::DENORMAL_EXPONENT
            && significand & Self::HIDDEN_BIT == 0
        {
            0
        } else {
            (exponent + Self::EXPONENT_BIAS) as u64
        };
        Double(
            (significand & Self::SIGNIFICAND_MASK)
                | (biased_exponent << Self::PHYSICAL_SIGNIFICAND_SIZE)
        )
    }

    pub const fn infinity() -> f64 {
        f64::from_bits(Self::INFINITY_BITS)
    }

    pub const fn nan() -> f64 {
        f64::from_bits(Self::NAN_BITS)
    }

    pub const fn value(self) -> f64 {
        f64::from_bits(self.0)
    }

    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Returns `-1` if the sign bit is set, `1` otherwise. Zero and NaN have a sign too.
    pub const fn sign(self) -> i32 {
        if self.0 & Self::SIGN_MASK == 0 { 1 } else { -1 }
    }

    pub const fn exponent(self) -> i32 {
        if self.is_denormal() {
            return Self::DENORMAL_EXPONENT;
        }
        let biased = ((self.0 & Self::EXPONENT_MASK) >> Self::PHYSICAL_SIGNIFICAND_SIZE) as i32;
        biased - Self::EXPONENT_BIAS
    }

    pub const fn significand(self) -> u64 {
        let significand = self.0 & Self::SIGNIFICAND_MASK;
        if self.is_denormal() {
            significand
        } else {
            significand + Self::HIDDEN_BIT
        }
    }

    /// Returns true for subnormal numbers and zero.
    pub const fn is_denormal(self) -> bool {
        self.0 & Self::EXPONENT_MASK == 0
    }

    /// Returns true for infinities and NaN, whose exponent bits are all set.
    pub const fn is_special(self) -> bool {
        self.0 & Self::EXPONENT_MASK == Self::EXPONENT_MASK
    }

    pub const fn is_nan(self) -> bool {
        self.is_special() && self.0 & Self::SIGNIFICAND_MASK != 0
    }

    pub const fn is_infinite(self) -> bool {
        self.is_special() && self.0 & Self::SIGNIFICAND_MASK == 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 & !Self::SIGN_MASK == 0
    }

    /// The exact value as a [`DiyFp`], without normalization.
    pub fn to_exact_diy_fp(self) -> DiyFp {
        debug_assert!(!self.is_special());
        DiyFp::new(self.significand(), self.exponent())
    }

    /// The exact value as a [`DiyFp`] with the most significant bit of the significand set.
    pub fn as_normalized_diy_fp(self) -> DiyFp {
        debug_assert!(self.value() > 0.0);
        let mut f = self.significand();
        let mut e = self.exponent();
        while f & Self::HIDDEN_BIT == 0 {
            f <<= 1;
            e -= 1;
        }
        let shift = DiyFp::SIGNIFICAND_SIZE - Self::SIGNIFICAND_SIZE;
        DiyFp::new(f << shift, e - shift)
    }

    /// The next representable double towards positive infinity. Infinity stays infinity and
    /// `-0.0` steps to `0.0`.
    pub const fn next_double(self) -> f64 {
        if self.0 == Self::INFINITY_BITS {
            return Self::infinity();
        }
        if self.sign() < 0 && self.significand() == 0 {
            return 0.0;
        }
        if self.sign() < 0 {
            f64::from_bits(self.0 - 1)
        } else {
            f64::from_bits(self.0 + 1)
        }
    }

    /// The next representable double towards negative infinity. Negative infinity stays negative
    /// infinity and `0.0` steps to `-0.0`.
    pub const fn previous_double(self) -> f64 {
        if self.0 == Self::INFINITY_BITS | Self::SIGN_MASK {
            return -Self::infinity();
        }
        if self.sign() < 0 {
            f64::from_bits(self.0 + 1)
        } else if self.significand() == 0 {
            -0.0
        } else {
            f64::from_bits(self.0 - 1)
        }
    }

    /// The gap to the next smaller double is half the gap to the next larger double when the
    /// value is an exact power of two (and not the smallest normal).
    pub const fn lower_boundary_is_closer(self) -> bool {
        let physical_significand_is_zero = self.0 & Self::SIGNIFICAND_MASK == 0;
        physical_significand_is_zero && self.exponent() != Self::DENORMAL_EXPONENT
    }

    /// The midpoint between this value and the next larger double.
    pub fn upper_boundary(self) -> DiyFp {
        debug_assert!(self.sign() > 0);
        DiyFp::new(self.significand() * 2 + 1, self.exponent() - 1)
    }

    /// Returns the midpoints to the neighbouring doubles, `(m_minus, m_plus)`, where `m_plus` is
    /// normalized and `m_minus` shares its exponent.
    ///
    /// Any decimal strictly between the boundaries reads back as this double.
    pub fn normalized_boundaries(self) -> (DiyFp, DiyFp) {
        debug_assert!(self.value() > 0.0);
        let v = self.to_exact_diy_fp();
        boundaries(v, self.lower_boundary_is_closer())
    }

    /// Returns the number of significand bits a double can hold when its value is around
    /// `2^order`, which is less than 53 only for subnormals.
    pub const fn significand_size_for_order_of_magnitude(order: i32) -> i32 {
        if order >= Self::DENORMAL_EXPONENT + Self::SIGNIFICAND_SIZE {
            Self::SIGNIFICAND_SIZE
        } else if order <= Self::DENORMAL_EXPONENT {
            0
        } else {
            order - Self::DENORMAL_EXPONENT
        }
    }
}

impl From<f64> for Double {
    fn from(value: f64) -> Double {
        Double::new(value)
    }
}

/// A bit level view of an [`f32`], with the same interpretation as [`Double`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Single(u32);

impl Single {
    pub const SIGN_MASK: u32 = 0x8000_0000;
    pub const EXPONENT_MASK: u32 = 0x7F80_0000;
    pub const SIGNIFICAND_MASK: u32 = 0x007F_FFFF;
    pub const HIDDEN_BIT: u32 = 0x0080_0000;
    pub const INFINITY_BITS: u32 = 0x7F80_0000;
    pub const NAN_BITS: u32 = 0x7FC0_0000;

    pub const PHYSICAL_SIGNIFICAND_SIZE: i32 = 23;
    pub const SIGNIFICAND_SIZE: i32 = 24;

    pub const EXPONENT_BIAS: i32 = 0x7F + Self::PHYSICAL_SIGNIFICAND_SIZE;
    pub const DENORMAL_EXPONENT: i32 = -Self::EXPONENT_BIAS + 1;
    pub const MAX_EXPONENT: i32 = 0xFF - Self::EXPONENT_BIAS;

    pub const fn new(value: f32) -> Single {
        Single(value.to_bits())
    }

    pub const fn from_bits(bits: u32) -> Single {
        Single(bits)
    }

    pub const fn infinity() -> f32 {
        f32::from_bits(Self::INFINITY_BITS)
    }

    pub const fn nan() -> f32 {
        f32::from_bits(Self::NAN_BITS)
    }

    pub const fn value(self) -> f32 {
        f32::from_bits(self.0)
    }

    pub const fn to_bits(self) -> u32 {
        self.0
    }

    pub const fn sign(self) -> i32 {
        if self.0 & Self::SIGN_MASK == 0 { 1 } else { -1 }
    }

    pub const fn exponent(self) -> i32 {
        if self.is_denormal() {
            return Self::DENORMAL_EXPONENT;
        }
        let biased = ((self.0 & Self::EXPONENT_MASK) >> Self::PHYSICAL_SIGNIFICAND_SIZE) as i32;
        biased - Self::EXPONENT_BIAS
    }

    pub const fn significand(self) -> u32 {
        let significand = self.0 & Self::SIGNIFICAND_MASK;
        if self.is_denormal() {
            significand
        } else {
            significand + Self::HIDDEN_BIT
        }
    }

    pub const fn is_denormal(self) -> bool {
        self.0 & Self::EXPONENT_MASK == 0
    }

    pub const fn is_special(self) -> bool {
        self.0 & Self::EXPONENT_MASK == Self::EXPONENT_MASK
    }

    pub const fn is_nan(self) -> bool {
        self.is_special() && self.0 & Self::SIGNIFICAND_MASK != 0
    }

    pub const fn is_infinite(self) -> bool {
        self.is_special() && self.0 & Self::SIGNIFICAND_MASK == 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 & !Self::SIGN_MASK == 0
    }

    pub fn to_exact_diy_fp(self) -> DiyFp {
        debug_assert!(!self.is_special());
        DiyFp::new(self.significand() as u64, self.exponent())
    }

    pub const fn lower_boundary_is_closer(self) -> bool {
        let physical_significand_is_zero = self.0 & Self::SIGNIFICAND_MASK == 0;
        physical_significand_is_zero && self.exponent() != Self::DENORMAL_EXPONENT
    }

    pub fn upper_boundary(self) -> DiyFp {
        debug_assert!(self.sign() > 0);
        DiyFp::new(self.significand() as u64 * 2 + 1, self.exponent() - 1)
    }

    pub fn normalized_boundaries(self) -> (DiyFp, DiyFp) {
        debug_assert!(self.value() > 0.0);
        let v = self.to_exact_diy_fp();
        boundaries(v, self.lower_boundary_is_closer())
    }
}

impl From<f32> for Single {
    fn from(value: f32) -> Single {
        Single::new(value)
    }
}

fn boundaries(v: DiyFp, lower_boundary_is_closer: bool) -> (DiyFp, DiyFp) {
    let m_plus = DiyFp::new((v.f << 1) + 1, v.e - 1).normalize();
    let m_minus = if lower_boundary_is_closer {
        DiyFp::new((v.f << 2) - 1, v.e - 2)
    } else {
        DiyFp::new((v.f << 1) - 1, v.e - 1)
    };
    // m_minus is never larger than m_plus, so bringing it to the same exponent only shifts left.
    let m_minus = DiyFp::new(m_minus.f << (m_minus.e - m_plus.e), m_plus.e);
    (m_minus, m_plus)
}
