//! Bit level views of IEEE-754 floating point numbers and the helpers the fast conversion paths
//! are built from.
//!
//! - [`Double`] and [`Single`] pull apart the sign, exponent and significand of an [`f64`] or
//!   [`f32`], and compute the neighbouring values and rounding boundaries.
//! - [`DiyFp`] is a "do it yourself" floating point number with a full 64-bit significand and no
//!   hidden bit, rounding or special values.
//! - [`cached_powers`] is a table of normalized powers of ten as [`DiyFp`]s.

pub mod cached_powers;
mod diy_fp;
mod double;
mod tests;

pub use diy_fp::*;
pub use double::*;
