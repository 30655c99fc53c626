//! A module containing [`Bignum`], the fixed capacity integer used by every exact conversion path.
//!
//! Only the operations needed for correctly rounded conversions exist: there is no general
//! division and no negative values.

mod bignum;
mod tests;

pub use bignum::*;
