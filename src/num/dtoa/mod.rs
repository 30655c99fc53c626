//! Raw decimal digit generation for [`f64`] values.
//!
//! Every routine in here writes ASCII digits into a caller provided buffer and describes them with
//! a [`Digits`]: the number of digits written and the position of the decimal point relative to
//! the first digit. The value is `0.d1 d2 ... dn * 10^decimal_point`. There is never a sign, a
//! point or an exponent in the buffer, those are the job of
//! [`DoubleToStringConverter`](crate::num::convert::DoubleToStringConverter).
//!
//! The fast routines ([`fast_dtoa`] and [`fast_fixed_dtoa`]) may refuse with
//! [`NeedsExactFallback`], while [`bignum_dtoa`] always produces the correct digits.
//! [`double_to_ascii`] glues the two together.

use derive_more::{Display, Error};
use tracing::trace;

use crate::num::ieee::Double;

mod bignum_dtoa;
mod fast_dtoa;
mod fixed_dtoa;

pub use bignum_dtoa::*;
pub use fast_dtoa::*;
pub use fixed_dtoa::*;

/// The maximal number of digits needed to distinguish any two doubles.
pub const BASE_10_MAXIMAL_LENGTH: usize = 17;

/// The maximal number of digits needed to distinguish any two singles.
pub const BASE_10_MAXIMAL_LENGTH_SINGLE: usize = 9;

/// The kind of digits to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtoaMode {
    /// The shortest digits that read back as the same [`f64`], with ties between equally short
    /// candidates going to the one closest to the exact value.
    Shortest,
    /// Like [`DtoaMode::Shortest`], but for a value that is exactly representable as an [`f32`].
    /// The digits only need to read back as the same [`f32`].
    ShortestSingle,
    /// The given number of digits after the decimal point, correctly rounded. Trailing zeros may
    /// be left out, so fewer digits may be written. A value that rounds to zero writes no digits
    /// at all.
    Fixed(usize),
    /// The given number of significant digits, correctly rounded. Trailing zeros may be written.
    Precision(usize),
}

/// A description of the digits written to a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digits {
    /// The number of digits written, starting at the beginning of the buffer.
    pub length: usize,
    /// The position of the decimal point relative to the first digit. Can be negative, or beyond
    /// the last digit.
    pub decimal_point: i32,
}

/// A fast path couldn't guarantee correct digits. The result is unusable and an exact method has
/// to be used instead.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("fast digit generation could not guarantee a correct result")]
pub struct NeedsExactFallback;

/// Generates the digits of `v` according to `mode`, returning whether `v` is negative along with
/// the description of the digits written to `buffer`.
///
/// Zero is written as the single digit `0` with a decimal point of `1`, except for
/// `Precision(0)` which never writes anything.
///
/// The fast algorithms are tried first, when they refuse the exact fallback is used, so the
/// result is always correct.
///
/// # Panics
/// Panics if `v` is NaN or infinite, or if `buffer` is too small for the requested digits. A
/// buffer of `BASE_10_MAXIMAL_LENGTH + 1` bytes is enough for the shortest modes, the requested
/// count plus one is enough for precision mode, and fixed mode may need up to 309 digits before the
/// point on top of the requested count.
///
/// # Examples
/// ```
/// # use float_conv::num::dtoa::{double_to_ascii, DtoaMode};
/// let mut buffer = [0_u8; 18];
/// let (negative, digits) = double_to_ascii(-0.3, DtoaMode::Shortest, &mut buffer);
/// assert!(negative);
/// assert_eq!(&buffer[..digits.length], b"3");
/// assert_eq!(digits.decimal_point, 0);
/// ```
pub fn double_to_ascii(v: f64, mode: DtoaMode, buffer: &mut [u8]) -> (bool, Digits) {
    assert!(!Double::new(v).is_special(), "Can't generate digits for NaN or infinity!");

    let negative = Double::new(v).sign() < 0;
    let v = v.abs();

    if mode == DtoaMode::Precision(0) {
        return (negative, Digits { length: 0, decimal_point: 0 });
    }

    if v == 0.0 {
        buffer[0] = b'0';
        return (negative, Digits { length: 1, decimal_point: 1 });
    }

    let fast = match mode {
        DtoaMode::Shortest => fast_dtoa(v, FastDtoaMode::Shortest, buffer),
        DtoaMode::ShortestSingle => fast_dtoa(v, FastDtoaMode::ShortestSingle, buffer),
        DtoaMode::Fixed(requested) => fast_fixed_dtoa(v, requested, buffer),
        DtoaMode::Precision(requested) => fast_dtoa(v, FastDtoaMode::Precision(requested), buffer),
    };

    match fast {
        Ok(digits) => (negative, digits),
        Err(NeedsExactFallback) => {
            trace!(value = v, ?mode, "fast digit generation declined, using bignum fallback");
            (negative, bignum_dtoa(v, mode, buffer))
        }
    }
}

/// Propagates the carry of a last digit that was incremented past `9`, towards the first digit.
///
/// Returns true if the carry overflowed the first digit, in which case the digits now read
/// `1000...` and the caller needs to move the decimal point.
pub(crate) fn propagate_carry(digits: &mut [u8]) -> bool {
    for i in (1..digits.len()).rev() {
        if digits[i] != b'0' + 10 {
            return false;
        }
        digits[i] = b'0';
        digits[i - 1] += 1;
    }
    if digits[0] == b'0' + 10 {
        digits[0] = b'1';
        true
    } else {
        false
    }
}
