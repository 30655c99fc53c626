//! Conversions between IEEE-754 binary floating point numbers and decimal text.
//!
//! # Purpose
//! Everything a serialization format needs to print and read back doubles without losing a bit:
//! - [`DoubleToStringConverter`](convert::DoubleToStringConverter) prints the shortest string
//!   that round-trips, or a fixed, exponential or precision representation.
//! - [`StringToDoubleConverter`](convert::StringToDoubleConverter) scans a decimal (or
//!   hexadecimal) literal and produces the correctly rounded double.
//!
//! # Method
//! The lower level modules are public as well, because they are useful on their own:
//! - [`bignum`]: a fixed capacity unsigned integer, large enough for any double conversion.
//! - [`ieee`]: bit level views of [`f64`]/[`f32`] and the small "do it yourself" float used by the
//!   fast paths.
//! - [`dtoa`]: raw digit generation, without sign, decimal point or exponent.
//! - [`strtod`]: raw digits plus decimal exponent to the nearest double.
//!
//! None of these allocate, and none of them touch any mutable global state, so they are safe to
//! call from any number of threads at once.

pub mod bignum;
pub mod convert;
pub mod ieee;

#[cfg(feature = "dtoa")]
pub mod dtoa;
#[cfg(feature = "strtod")]
pub mod strtod;
