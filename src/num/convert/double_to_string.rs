use crate::num::dtoa::{
    BASE_10_MAXIMAL_LENGTH, BASE_10_MAXIMAL_LENGTH_SINGLE, DtoaMode, double_to_ascii,
};
use crate::num::ieee::Double;

use super::{DigitCountError, DtoaError, SpecialValueError, StringBuilder, ValueOutOfRangeError};

/// [`DoubleToStringConverter::to_fixed`] refuses values with more digits than this before the
/// point.
pub const MAX_FIXED_DIGITS_BEFORE_POINT: usize = 60;
pub const MAX_FIXED_DIGITS_AFTER_POINT: usize = 100;
pub const MAX_EXPONENTIAL_DIGITS: usize = 120;
pub const MIN_PRECISION_DIGITS: usize = 1;
pub const MAX_PRECISION_DIGITS: usize = 120;

const FIRST_NON_FIXED: f64 = 1e60;
/// Exponents never have more digits than this, even when a wider minimum width is configured.
const MAX_EXPONENT_LENGTH: usize = 5;

const UNIQUE_ZERO: u8 = 1 << 0;
const EMIT_POSITIVE_EXPONENT_SIGN: u8 = 1 << 1;
const EMIT_TRAILING_DECIMAL_POINT: u8 = 1 << 2;
const EMIT_TRAILING_ZERO_AFTER_POINT: u8 = 1 << 3;

/// Formats doubles as text, configured once and then used for any number of conversions.
///
/// Every conversion writes into a [`StringBuilder`]. A conversion that returns an error hasn't
/// written anything.
///
/// # Layout
/// - Shortest: the shortest digits that read back as the same value. Decimal notation is used
///   while the decimal exponent is in `decimal_in_shortest_low..decimal_in_shortest_high`,
///   exponential notation otherwise.
/// - Fixed: a set number of digits after the point, always in decimal notation.
/// - Exponential: one digit before the point and a set number after it (or the shortest
///   digits), always in exponential notation.
/// - Precision: a set number of significant digits, in decimal notation unless that would need
///   too many padding zeros.
///
/// # Flags
/// - `unique_zero`: `-0.0` is written as `0`, without the sign.
/// - `emit_positive_exponent_sign`: positive exponents get a `+`, as in `1e+21`.
/// - `emit_trailing_decimal_point`: decimal output without fraction digits ends in a point, as in
///   `1.`. Exponential output with a single digit is unaffected.
/// - `emit_trailing_zero_after_point`: with the above, adds a zero, as in `1.0`.
///
/// # Examples
/// ```
/// # use float_conv::num::convert::{DoubleToStringConverter, StringBuilder};
/// let converter = DoubleToStringConverter::ecma_script();
/// let mut buffer = [0_u8; 64];
///
/// let mut builder = StringBuilder::new(&mut buffer);
/// converter.to_shortest(1e21, &mut builder).unwrap();
/// assert_eq!(builder.finalize(), "1e+21");
///
/// let mut builder = StringBuilder::new(&mut buffer);
/// converter.to_fixed(1.0 / 3.0, 4, &mut builder).unwrap();
/// assert_eq!(builder.finalize(), "0.3333");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleToStringConverter {
    flags: u8,
    infinity_symbol: Option<&'static str>,
    nan_symbol: Option<&'static str>,
    exponent_character: u8,
    decimal_in_shortest_low: i32,
    decimal_in_shortest_high: i32,
    max_leading_padding_zeroes_in_precision_mode: usize,
    max_trailing_padding_zeroes_in_precision_mode: usize,
    min_exponent_width: usize,
}

macro_rules! set_flag {
    ($self:ident, $value:expr, $flag:expr) => {
        if $value {
            $self.flags |= $flag;
        } else {
            $self.flags &= !$flag;
        }
    };
}

macro_rules! get_flag {
    ($self:ident, $flag:expr) => {
        $self.flags & $flag != 0
    };
}

impl DoubleToStringConverter {
    /// A converter with no flags, `Infinity` and `NaN` as symbols, `e` as the exponent character,
    /// decimal shortest output for exponents in `-6..21` and up to 6 leading and 0 trailing
    /// padding zeros in precision mode.
    pub const fn new() -> DoubleToStringConverter {
        DoubleToStringConverter {
            flags: 0,
            infinity_symbol: Some("Infinity"),
            nan_symbol: Some("NaN"),
            exponent_character: b'e',
            decimal_in_shortest_low: -6,
            decimal_in_shortest_high: 21,
            max_leading_padding_zeroes_in_precision_mode: 6,
            max_trailing_padding_zeroes_in_precision_mode: 0,
            min_exponent_width: 0,
        }
    }

    /// A converter that matches JavaScript's `Number.prototype.toString` and friends.
    pub const fn ecma_script() -> DoubleToStringConverter {
        DoubleToStringConverter {
            flags: UNIQUE_ZERO | EMIT_POSITIVE_EXPONENT_SIGN,
            ..DoubleToStringConverter::new()
        }
    }

    pub const fn unique_zero(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, UNIQUE_ZERO);
        self
    }

    pub const fn emit_positive_exponent_sign(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, EMIT_POSITIVE_EXPONENT_SIGN);
        self
    }

    pub const fn emit_trailing_decimal_point(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, EMIT_TRAILING_DECIMAL_POINT);
        self
    }

    /// Only has an effect together with
    /// [`emit_trailing_decimal_point`](Self::emit_trailing_decimal_point).
    pub const fn emit_trailing_zero_after_point(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, EMIT_TRAILING_ZERO_AFTER_POINT);
        self
    }

    /// The text for infinite values, after a `-` if negative. With `None`, infinite values are
    /// refused.
    pub const fn infinity_symbol(&mut self, value: Option<&'static str>) -> &mut Self {
        self.infinity_symbol = value;
        self
    }

    /// The text for NaN, never signed. With `None`, NaN is refused.
    pub const fn nan_symbol(&mut self, value: Option<&'static str>) -> &mut Self {
        self.nan_symbol = value;
        self
    }

    /// # Panics
    /// Panics if `value` isn't ASCII.
    pub const fn exponent_character(&mut self, value: u8) -> &mut Self {
        assert!(value.is_ascii(), "Exponent character must be ASCII!");
        self.exponent_character = value;
        self
    }

    pub const fn decimal_in_shortest_low(&mut self, value: i32) -> &mut Self {
        self.decimal_in_shortest_low = value;
        self
    }

    pub const fn decimal_in_shortest_high(&mut self, value: i32) -> &mut Self {
        self.decimal_in_shortest_high = value;
        self
    }

    pub const fn max_leading_padding_zeroes_in_precision_mode(&mut self, value: usize) -> &mut Self {
        self.max_leading_padding_zeroes_in_precision_mode = value;
        self
    }

    pub const fn max_trailing_padding_zeroes_in_precision_mode(&mut self, value: usize) -> &mut Self {
        self.max_trailing_padding_zeroes_in_precision_mode = value;
        self
    }

    /// Pads exponents with leading zeros up to this many digits, at most 5.
    pub const fn min_exponent_width(&mut self, value: usize) -> &mut Self {
        self.min_exponent_width = value;
        self
    }

    /// Writes the shortest representation that reads back as exactly `value`.
    ///
    /// | value    | output      |
    /// |----------|-------------|
    /// | 0.000001 | `0.000001`  |
    /// | 1e-7     | `1e-7`      |
    /// | 111111.0 | `111111`    |
    /// | 1e21     | `1e21`      |
    /// | -0.0     | `-0`        |
    ///
    /// # Errors
    /// Refuses infinity or NaN when no symbol is configured for it.
    ///
    /// # Panics
    /// Panics if `result_builder` runs out of space. 32 bytes are always enough, unless long
    /// symbols or a wide decimal range are configured.
    pub fn to_shortest(
        &self,
        value: f64,
        result_builder: &mut StringBuilder,
    ) -> Result<(), DtoaError> {
        self.to_shortest_ieee_number(value, DtoaMode::Shortest, result_builder)
    }

    /// Like [`to_shortest`](Self::to_shortest), but the output only has to read back as the same
    /// [`f32`], so it is often shorter: `0.1f32` gives `0.1` rather than `0.10000000149011612`.
    pub fn to_shortest_single(
        &self,
        value: f32,
        result_builder: &mut StringBuilder,
    ) -> Result<(), DtoaError> {
        self.to_shortest_ieee_number(value as f64, DtoaMode::ShortestSingle, result_builder)
    }

    fn to_shortest_ieee_number(
        &self,
        value: f64,
        mode: DtoaMode,
        result_builder: &mut StringBuilder,
    ) -> Result<(), DtoaError> {
        if Double::new(value).is_special() {
            return self.handle_special_values(value, result_builder);
        }

        let mut decimal_rep = [0_u8; BASE_10_MAXIMAL_LENGTH + 1];
        debug_assert!(BASE_10_MAXIMAL_LENGTH_SINGLE <= BASE_10_MAXIMAL_LENGTH);
        let (sign, digits) = double_to_ascii(value, mode, &mut decimal_rep);
        let decimal_rep = &decimal_rep[..digits.length];

        self.add_sign(sign, value, result_builder);
        let exponent = digits.decimal_point - 1;
        if (self.decimal_in_shortest_low..self.decimal_in_shortest_high).contains(&exponent) {
            let digits_after_point = (decimal_rep.len() as i32 - digits.decimal_point).max(0);
            self.create_decimal_representation(
                decimal_rep,
                digits.decimal_point,
                digits_after_point as usize,
                result_builder,
            );
        } else {
            self.create_exponential_representation(decimal_rep, exponent, result_builder);
        }
        Ok(())
    }

    /// Writes `value` in decimal notation with exactly `requested_digits` after the point,
    /// rounding half up (away from zero).
    ///
    /// | value  | digits | output    |
    /// |--------|--------|-----------|
    /// | 3.12   | 1      | `3.1`     |
    /// | 3.1415 | 3      | `3.142`   |
    /// | 1.25   | 1      | `1.3`     |
    /// | 0.5    | 0      | `1`       |
    /// | 123.0  | 2      | `123.00`  |
    /// | -0.001 | 2      | `-0.00`   |
    ///
    /// # Errors
    /// Refuses more than [`MAX_FIXED_DIGITS_AFTER_POINT`] digits, and values with a magnitude
    /// of `10^60` or more. Refuses infinity or NaN when no symbol is configured for it.
    ///
    /// # Panics
    /// Panics if `result_builder` runs out of space. 162 bytes are always enough for finite
    /// values.
    pub fn to_fixed(
        &self,
        value: f64,
        requested_digits: usize,
        result_builder: &mut StringBuilder,
    ) -> Result<(), DtoaError> {
        if Double::new(value).is_special() {
            return self.handle_special_values(value, result_builder);
        }
        if requested_digits > MAX_FIXED_DIGITS_AFTER_POINT {
            return Err(DigitCountError {
                requested: requested_digits,
                min: 0,
                max: MAX_FIXED_DIGITS_AFTER_POINT,
            }
            .into());
        }
        if value.abs() >= FIRST_NON_FIXED {
            return Err(ValueOutOfRangeError.into());
        }

        let mut decimal_rep = [0_u8; MAX_FIXED_DIGITS_BEFORE_POINT + MAX_FIXED_DIGITS_AFTER_POINT + 1];
        let (sign, digits) =
            double_to_ascii(value, DtoaMode::Fixed(requested_digits), &mut decimal_rep);

        self.add_sign(sign, value, result_builder);
        self.create_decimal_representation(
            &decimal_rep[..digits.length],
            digits.decimal_point,
            requested_digits,
            result_builder,
        );
        Ok(())
    }

    /// Writes `value` in exponential notation with `requested_digits` after the point, or the
    /// shortest digits that read back as `value` for `None`. The last digit is rounded half up.
    ///
    /// | value    | digits | output      |
    /// |----------|--------|-------------|
    /// | 3.12     | 1      | `3.1e0`     |
    /// | 5.0      | 3      | `5.000e0`   |
    /// | 0.001    | 2      | `1.00e-3`   |
    /// | 3.1415   | 3      | `3.142e0`   |
    /// | 123456.0 | None   | `1.23456e5` |
    ///
    /// # Errors
    /// Refuses more than [`MAX_EXPONENTIAL_DIGITS`] digits. Refuses infinity or NaN when no
    /// symbol is configured for it.
    ///
    /// # Panics
    /// Panics if `result_builder` runs out of space. 130 bytes are always enough for finite
    /// values.
    pub fn to_exponential(
        &self,
        value: f64,
        requested_digits: Option<usize>,
        result_builder: &mut StringBuilder,
    ) -> Result<(), DtoaError> {
        if Double::new(value).is_special() {
            return self.handle_special_values(value, result_builder);
        }
        if let Some(requested) = requested_digits
            && requested > MAX_EXPONENTIAL_DIGITS
        {
            return Err(DigitCountError {
                requested,
                min: 0,
                max: MAX_EXPONENTIAL_DIGITS,
            }
            .into());
        }

        // One digit before the point, and one spare.
        let mut decimal_rep = [0_u8; MAX_EXPONENTIAL_DIGITS + 2];
        let (sign, length, decimal_point) = match requested_digits {
            None => {
                let (sign, digits) = double_to_ascii(value, DtoaMode::Shortest, &mut decimal_rep);
                (sign, digits.length, digits.decimal_point)
            },
            Some(requested) => {
                let (sign, digits) =
                    double_to_ascii(value, DtoaMode::Precision(requested + 1), &mut decimal_rep);
                debug_assert!(digits.length <= requested + 1);
                decimal_rep[digits.length..=requested].fill(b'0');
                (sign, requested + 1, digits.decimal_point)
            },
        };

        self.add_sign(sign, value, result_builder);
        self.create_exponential_representation(
            &decimal_rep[..length],
            decimal_point - 1,
            result_builder,
        );
        Ok(())
    }

    /// Writes `value` with `precision` significant digits, rounding the last one half up.
    ///
    /// Decimal notation is used unless it needs more than
    /// `max_leading_padding_zeroes_in_precision_mode` zeros after the point before the first
    /// digit, or more than `max_trailing_padding_zeroes_in_precision_mode` zeros after the last
    /// digit. With the trailing zero flag set, that zero counts towards the trailing padding.
    ///
    /// With the defaults:
    ///
    /// | value         | precision | output      |
    /// |---------------|-----------|-------------|
    /// | 0.0000012345  | 2         | `0.0000012` |
    /// | 0.00000012345 | 2         | `1.2e-7`    |
    /// | 230.0         | 2         | `2.3e2`     |
    /// | 23.0          | 2         | `23`        |
    /// | 2.3           | 2         | `2.3`       |
    /// | 123.456       | 4         | `123.5`     |
    ///
    /// # Errors
    /// Refuses a precision outside of
    /// [`MIN_PRECISION_DIGITS`]`..=`[`MAX_PRECISION_DIGITS`]. Refuses infinity or NaN when no
    /// symbol is configured for it.
    ///
    /// # Panics
    /// Panics if `result_builder` runs out of space. 130 bytes plus the configured padding are
    /// always enough for finite values.
    pub fn to_precision(
        &self,
        value: f64,
        precision: usize,
        result_builder: &mut StringBuilder,
    ) -> Result<(), DtoaError> {
        if Double::new(value).is_special() {
            return self.handle_special_values(value, result_builder);
        }
        if !(MIN_PRECISION_DIGITS..=MAX_PRECISION_DIGITS).contains(&precision) {
            return Err(DigitCountError {
                requested: precision,
                min: MIN_PRECISION_DIGITS,
                max: MAX_PRECISION_DIGITS,
            }
            .into());
        }

        let mut decimal_rep = [0_u8; MAX_PRECISION_DIGITS + 1];
        let (sign, digits) =
            double_to_ascii(value, DtoaMode::Precision(precision), &mut decimal_rep);
        debug_assert!(digits.length <= precision);

        self.add_sign(sign, value, result_builder);

        let decimal_point = digits.decimal_point as i64;
        let extra_zero = get_flag!(self, EMIT_TRAILING_ZERO_AFTER_POINT) as i64;
        let as_exponential = -decimal_point + 1
            > self.max_leading_padding_zeroes_in_precision_mode as i64
            || decimal_point - precision as i64 + extra_zero
                > self.max_trailing_padding_zeroes_in_precision_mode as i64;

        if as_exponential {
            // Precision mode may leave out trailing zeros.
            decimal_rep[digits.length..precision].fill(b'0');
            self.create_exponential_representation(
                &decimal_rep[..precision],
                digits.decimal_point - 1,
                result_builder,
            );
        } else {
            let digits_after_point = (precision as i32 - digits.decimal_point).max(0);
            self.create_decimal_representation(
                &decimal_rep[..digits.length],
                digits.decimal_point,
                digits_after_point as usize,
                result_builder,
            );
        }
        Ok(())
    }

    fn handle_special_values(
        &self,
        value: f64,
        result_builder: &mut StringBuilder,
    ) -> Result<(), DtoaError> {
        let double = Double::new(value);
        let symbol = if double.is_infinite() {
            self.infinity_symbol
        } else {
            self.nan_symbol
        };
        let symbol = symbol.ok_or(SpecialValueError)?;

        if double.is_infinite() && value < 0.0 {
            result_builder.add_character(b'-');
        }
        result_builder.add_string(symbol);
        Ok(())
    }

    fn add_sign(&self, sign: bool, value: f64, result_builder: &mut StringBuilder) {
        if sign && (value != 0.0 || !get_flag!(self, UNIQUE_ZERO)) {
            result_builder.add_character(b'-');
        }
    }

    /// Writes `d.ddd` followed by the exponent character and the exponent, for example `1.5e-7`.
    fn create_exponential_representation(
        &self,
        decimal_digits: &[u8],
        exponent: i32,
        result_builder: &mut StringBuilder,
    ) {
        debug_assert!(!decimal_digits.is_empty());
        result_builder.add_character(decimal_digits[0]);
        if decimal_digits.len() > 1 {
            result_builder.add_character(b'.');
            result_builder.add_substring(&decimal_digits[1..]);
        }

        result_builder.add_character(self.exponent_character);
        if exponent < 0 {
            result_builder.add_character(b'-');
        } else if get_flag!(self, EMIT_POSITIVE_EXPONENT_SIGN) {
            result_builder.add_character(b'+');
        }

        let mut exponent = exponent.unsigned_abs();
        let mut buffer = [b'0'; MAX_EXPONENT_LENGTH];
        let mut first_char = MAX_EXPONENT_LENGTH;
        loop {
            first_char -= 1;
            buffer[first_char] = b'0' + (exponent % 10) as u8;
            exponent /= 10;
            if exponent == 0 {
                break;
            }
        }
        // The buffer is already filled with zeros.
        first_char = first_char.min(MAX_EXPONENT_LENGTH - self.min_exponent_width.min(MAX_EXPONENT_LENGTH));
        result_builder.add_substring(&buffer[first_char..]);
    }

    /// Writes `decimal_digits` in decimal notation, padding with zeros up to the decimal point
    /// and then up to `digits_after_point`.
    fn create_decimal_representation(
        &self,
        decimal_digits: &[u8],
        decimal_point: i32,
        digits_after_point: usize,
        result_builder: &mut StringBuilder,
    ) {
        let length = decimal_digits.len();
        if decimal_point <= 0 {
            // 0.000ddd or 0.000ddd000
            let leading_zeros = decimal_point.unsigned_abs() as usize;
            result_builder.add_character(b'0');
            if digits_after_point > 0 {
                result_builder.add_character(b'.');
                result_builder.add_padding(b'0', leading_zeros);
                debug_assert!(length <= digits_after_point - leading_zeros);
                result_builder.add_substring(decimal_digits);
                result_builder.add_padding(b'0', digits_after_point - leading_zeros - length);
            }
        } else if decimal_point as usize >= length {
            // ddd000 or ddd000.000
            result_builder.add_substring(decimal_digits);
            result_builder.add_padding(b'0', decimal_point as usize - length);
            if digits_after_point > 0 {
                result_builder.add_character(b'.');
                result_builder.add_padding(b'0', digits_after_point);
            }
        } else {
            // dd.d or dd.d000
            let (integrals, fractionals) = decimal_digits.split_at(decimal_point as usize);
            debug_assert!(digits_after_point >= fractionals.len());
            result_builder.add_substring(integrals);
            result_builder.add_character(b'.');
            result_builder.add_substring(fractionals);
            result_builder.add_padding(b'0', digits_after_point - fractionals.len());
        }

        if digits_after_point == 0 && get_flag!(self, EMIT_TRAILING_DECIMAL_POINT) {
            result_builder.add_character(b'.');
            if get_flag!(self, EMIT_TRAILING_ZERO_AFTER_POINT) {
                result_builder.add_character(b'0');
            }
        }
    }
}

impl Default for DoubleToStringConverter {
    fn default() -> DoubleToStringConverter {
        DoubleToStringConverter::new()
    }
}
