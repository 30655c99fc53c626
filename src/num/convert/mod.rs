//! Complete conversions between doubles and text, with signs, points, exponents and special
//! values taken care of.
//!
//! Both converters are plain configuration, built once with chained setters and then shared:
//! ```
//! # use float_conv::num::convert::{DoubleToStringConverter, StringBuilder, StringToDoubleConverter};
//! let mut printer = DoubleToStringConverter::new();
//! printer.emit_trailing_decimal_point(true).emit_trailing_zero_after_point(true);
//!
//! let mut buffer = [0_u8; 32];
//! let mut builder = StringBuilder::new(&mut buffer);
//! printer.to_shortest(2.0, &mut builder).unwrap();
//! assert_eq!(builder.as_str(), "2.0");
//!
//! let mut input = builder.as_str().as_bytes();
//! assert_eq!(StringToDoubleConverter::new().string_to_double(&mut input), Ok(2.0));
//! ```

#[cfg(any(feature = "dtoa", feature = "strtod"))]
mod error;
mod string_builder;
#[cfg(feature = "dtoa")]
mod double_to_string;
#[cfg(feature = "strtod")]
mod string_to_double;
mod tests;

#[cfg(any(feature = "dtoa", feature = "strtod"))]
pub use error::*;
pub use string_builder::*;
#[cfg(feature = "dtoa")]
pub use double_to_string::*;
#[cfg(feature = "strtod")]
pub use string_to_double::*;
