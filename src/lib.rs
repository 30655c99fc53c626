//! This crate is my attempt at writing the number conversion part of a standard library: turning
//! an [`f64`] into decimal text and decimal text back into an [`f64`].
//!
//! # Purpose
//! Like the rest of my standard library experiments, this is a learning project. Printing a
//! double "correctly" turns out to be one of the harder problems hiding in a standard library:
//! the shortest string that reads back as the exact same double needs exact rational arithmetic
//! in the worst case, but nobody wants to pay for a big integer on every `to_string`.
//!
//! # Method
//! The conversions follow the classic two tier approach. A fast path does everything with 64-bit
//! integers (Grisu for shortest and precision output, a small fixed-point expansion for fixed
//! output, a few exact floating point tricks for parsing) and refuses whenever it can't prove its
//! answer. Only then does the exact path run, using [`Bignum`](num::bignum::Bignum), a fixed
//! capacity integer that lives entirely on the stack.
//!
//! Nothing in here allocates. Every routine writes into a buffer provided by the caller.
//!
//! # Error Handling
//! Asking for an unsupported digit count or formatting a value that is too large for fixed
//! notation returns a strongly typed error from [`num::convert`]. Breaking an internal invariant
//! (overflowing a [`Bignum`](num::bignum::Bignum) or a
//! [`StringBuilder`](num::convert::StringBuilder)) is a bug in the caller and panics, with the
//! conditions documented under `# Panics`.
//!
//! # Dependencies
//! The error types use `derive_more` to skip the boilerplate. Whenever a fast path gives up and
//! the exact fallback runs, a `trace` level event is emitted through `tracing`, which costs next to
//! nothing when no subscriber is listening.
//!
//! # Features
//! - `dtoa`: double to string conversion.
//! - `strtod`: string to double conversion.
//!
//! - `demo`: the `float-conv` binary, which prints every conversion of its arguments along with
//!   the trace events of the fallbacks.
//!
//! `dtoa` and `strtod` are enabled by default. [`num::bignum`] and [`num::ieee`] are always
//! available.

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod num;

pub(crate) mod util;
