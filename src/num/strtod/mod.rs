//! Decimal digits to the nearest binary floating point number.
//!
//! The input is already taken apart: a string of ASCII digits without sign or point, and a
//! decimal exponent, so that the value is `digits * 10^exponent`. Scanning text into that shape
//! is the job of [`StringToDoubleConverter`](crate::num::convert::StringToDoubleConverter).
//!
//! The result is always the correctly rounded value, with ties going to the even significand.
//! Most inputs are settled with plain double arithmetic or a 64-bit [`DiyFp`] approximation with
//! a tracked error bound. Only when that bound straddles a halfway point between two doubles is
//! the input compared exactly against the halfway point using a [`Bignum`].
//!
//! [`DiyFp`]: crate::num::ieee::DiyFp
//! [`Bignum`]: crate::num::bignum::Bignum

mod strtod;

pub use strtod::*;
