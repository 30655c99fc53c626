use crate::num::ieee::{DiyFp, Double, Single};
use crate::num::strtod::{strtod, strtof};

use super::{NoDigitsError, ParseError, TrailingJunkError};

/// Digits beyond this many are dropped while scanning, with only a note of whether any of them
/// was non-zero. That note still decides the rounding.
pub const MAX_SIGNIFICANT_DIGITS: usize = 772;

/// Decimal exponents are clamped to this magnitude while scanning, far beyond anything finite
/// and non-zero, without overflowing when digits are added.
const MAX_EXPONENT: i32 = i32::MAX / 2;

const ALLOW_HEX: u8 = 1 << 0;
const ALLOW_TRAILING_JUNK: u8 = 1 << 1;
const ALLOW_LEADING_SPACES: u8 = 1 << 2;
const ALLOW_TRAILING_SPACES: u8 = 1 << 3;
const ALLOW_SPACES_AFTER_SIGN: u8 = 1 << 4;
const ALLOW_CASE_INSENSITIVITY: u8 = 1 << 5;

/// Reads doubles from text, configured once and then used for any number of conversions.
///
/// The accepted syntax is an optional sign, digits with an optional fraction (`1`, `1.5`, `.5`,
/// `5.`) and an optional exponent (`e3`, `E-3`, `e+3`). Optionally also hexadecimal integers
/// (`0x1F`) and configured symbols for infinity and NaN.
///
/// The input is a `&mut &[u8]`: a successful conversion moves it past the consumed text, an
/// error leaves it untouched. An exponent that is cut short, as in `1e` or `1e+`, isn't part of
/// the number and is left unconsumed.
///
/// # Flags
/// - `allow_hex`: `0x` or `0X` followed by hexadecimal digits, rounded correctly however many
///   digits there are.
/// - `allow_trailing_junk`: anything may follow the number, and is left in the input. Enabled
///   by default.
/// - `allow_leading_spaces`, `allow_trailing_spaces`: whitespace around the number is skipped.
/// - `allow_spaces_after_sign`: `- 1` is accepted.
/// - `allow_case_insensitivity`: the infinity and NaN symbols match regardless of case.
///
/// # Examples
/// ```
/// # use float_conv::num::convert::StringToDoubleConverter;
/// let converter = StringToDoubleConverter::new();
///
/// let mut input: &[u8] = b"1.5e3, 2";
/// assert_eq!(converter.string_to_double(&mut input), Ok(1500.0));
/// assert_eq!(input, b", 2");
///
/// let mut input: &[u8] = b"1e";
/// assert_eq!(converter.string_to_double(&mut input), Ok(1.0));
/// assert_eq!(input, b"e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringToDoubleConverter {
    flags: u8,
    infinity_symbol: Option<&'static str>,
    nan_symbol: Option<&'static str>,
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

/// Which of the two binary formats the digits are rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Double,
    Single,
}

impl StringToDoubleConverter {
    /// A converter that only allows trailing junk, without symbols for infinity or NaN.
    pub const fn new() -> StringToDoubleConverter {
        StringToDoubleConverter {
            flags: ALLOW_TRAILING_JUNK,
            infinity_symbol: None,
            nan_symbol: None,
        }
    }

    /// A converter that matches JavaScript's `Number(string)`: whitespace around the number,
    /// hexadecimal integers and `Infinity`, but nothing else.
    pub const fn ecma_script() -> StringToDoubleConverter {
        StringToDoubleConverter {
            flags: ALLOW_HEX | ALLOW_LEADING_SPACES | ALLOW_TRAILING_SPACES,
            infinity_symbol: Some("Infinity"),
            nan_symbol: None,
        }
    }

    pub const fn allow_hex(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, ALLOW_HEX);
        self
    }

    pub const fn allow_trailing_junk(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, ALLOW_TRAILING_JUNK);
        self
    }

    pub const fn allow_leading_spaces(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, ALLOW_LEADING_SPACES);
        self
    }

    pub const fn allow_trailing_spaces(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, ALLOW_TRAILING_SPACES);
        self
    }

    pub const fn allow_spaces_after_sign(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, ALLOW_SPACES_AFTER_SIGN);
        self
    }

    pub const fn allow_case_insensitivity(&mut self, value: bool) -> &mut Self {
        set_flag!(self, value, ALLOW_CASE_INSENSITIVITY);
        self
    }

    /// The text read as infinity, after an optional sign. An empty symbol is never read.
    pub const fn infinity_symbol(&mut self, value: Option<&'static str>) -> &mut Self {
        self.infinity_symbol = value;
        self
    }

    /// The text read as NaN, after an optional sign. An empty symbol is never read.
    pub const fn nan_symbol(&mut self, value: Option<&'static str>) -> &mut Self {
        self.nan_symbol = value;
        self
    }

    /// Reads the [`f64`] at the start of `input`, correctly rounded with ties to even, and moves
    /// `input` past it. Values too large become infinity, values too small become zero, both
    /// keeping their sign.
    ///
    /// # Errors
    /// - [`ParseError::NoDigits`] if there is no number at the start of `input`, for example an
    ///   empty input, only whitespace, a lone sign or a lone point.
    /// - [`ParseError::TrailingJunk`] if something other than (allowed) whitespace follows the
    ///   number and trailing junk isn't allowed.
    ///
    /// `input` is left untouched on error.
    pub fn string_to_double(&self, input: &mut &[u8]) -> Result<f64, ParseError> {
        let (value, consumed) = self.string_to_ieee(input, Target::Double)?;
        *input = &input[consumed..];
        Ok(value)
    }

    /// Like [`string_to_double`](Self::string_to_double), but rounds directly to the nearest
    /// [`f32`] rather than rounding twice.
    pub fn string_to_float(&self, input: &mut &[u8]) -> Result<f32, ParseError> {
        let (value, consumed) = self.string_to_ieee(input, Target::Single)?;
        *input = &input[consumed..];
        // Exact, the value was rounded to a single already.
        Ok(value as f32)
    }

    /// Scans a number, returning it along with the number of bytes consumed.
    fn string_to_ieee(&self, input: &[u8], target: Target) -> Result<(f64, usize), ParseError> {
        let mut cursor = 0;

        if get_flag!(self, ALLOW_LEADING_SPACES) {
            cursor = skip_whitespace(input, cursor);
        }

        let negative = match input.get(cursor) {
            Some(&sign @ (b'+' | b'-')) => {
                cursor += 1;
                if get_flag!(self, ALLOW_SPACES_AFTER_SIGN) {
                    cursor = skip_whitespace(input, cursor);
                }
                sign == b'-'
            },
            Some(_) => false,
            None => return Err(NoDigitsError.into()),
        };
        let signed = |value: f64| if negative { -value } else { value };

        if let Some(symbol) = self.infinity_symbol
            && let Some(end) = self.match_symbol(input, cursor, symbol)
        {
            let end = self.finish(input, end)?;
            return Ok((signed(f64::INFINITY), end));
        }
        if let Some(symbol) = self.nan_symbol
            && let Some(end) = self.match_symbol(input, cursor, symbol)
        {
            let end = self.finish(input, end)?;
            return Ok((signed(f64::NAN), end));
        }

        if get_flag!(self, ALLOW_HEX)
            && input.get(cursor) == Some(&b'0')
            && matches!(input.get(cursor + 1), Some(b'x' | b'X'))
            && input.get(cursor + 2).is_some_and(u8::is_ascii_hexdigit)
        {
            let start = cursor + 2;
            let length = input[start..].iter().take_while(|c| c.is_ascii_hexdigit()).count();
            let end = self.finish(input, start + length)?;
            let value = hex_to_ieee(&input[start..start + length], target);
            return Ok((signed(value), end));
        }

        let mut digits = [0_u8; MAX_SIGNIFICANT_DIGITS + 1];
        let mut scanned = DecimalDigits {
            digits: &mut digits,
            length: 0,
            exponent: 0,
            nonzero_digit_dropped: false,
        };
        let mut digits_seen = false;

        // Leading zeros don't count towards the significant digits.
        while input.get(cursor) == Some(&b'0') {
            cursor += 1;
            digits_seen = true;
        }

        while let Some(&digit) = input.get(cursor).filter(|c| c.is_ascii_digit()) {
            scanned.push_integral(digit);
            cursor += 1;
            digits_seen = true;
        }

        if input.get(cursor) == Some(&b'.') {
            cursor += 1;
            while let Some(&digit) = input.get(cursor).filter(|c| c.is_ascii_digit()) {
                scanned.push_fractional(digit);
                cursor += 1;
                digits_seen = true;
            }
        }

        if !digits_seen {
            return Err(NoDigitsError.into());
        }

        if let Some((exponent, end)) = scan_exponent(input, cursor) {
            scanned.exponent = scanned.exponent.saturating_add(exponent);
            cursor = end;
        }

        let end = self.finish(input, cursor)?;
        Ok((signed(scanned.to_ieee(target)), end))
    }

    /// Returns the end of `symbol` if it is found at `start`. An empty symbol never matches.
    fn match_symbol(&self, input: &[u8], start: usize, symbol: &str) -> Option<usize> {
        if symbol.is_empty() {
            return None;
        }
        let end = start + symbol.len();
        let candidate = input.get(start..end)?;
        let matches = if get_flag!(self, ALLOW_CASE_INSENSITIVITY) {
            candidate.eq_ignore_ascii_case(symbol.as_bytes())
        } else {
            candidate == symbol.as_bytes()
        };
        matches.then_some(end)
    }

    /// Skips trailing whitespace if allowed and checks for junk, returning the final end of the
    /// number.
    fn finish(&self, input: &[u8], mut cursor: usize) -> Result<usize, ParseError> {
        if get_flag!(self, ALLOW_TRAILING_SPACES) {
            cursor = skip_whitespace(input, cursor);
        }
        if cursor != input.len() && !get_flag!(self, ALLOW_TRAILING_JUNK) {
            return Err(TrailingJunkError.into());
        }
        Ok(cursor)
    }
}

impl Default for StringToDoubleConverter {
    fn default() -> StringToDoubleConverter {
        StringToDoubleConverter::new()
    }
}

/// The significant digits scanned so far, with the value being `digits * 10^exponent`.
struct DecimalDigits<'a> {
    digits: &'a mut [u8; MAX_SIGNIFICANT_DIGITS + 1],
    length: usize,
    exponent: i32,
    nonzero_digit_dropped: bool,
}

impl DecimalDigits<'_> {
    /// A digit before the point. Dropped digits still scale the value by ten.
    fn push_integral(&mut self, digit: u8) {
        if !self.push(digit) {
            self.exponent = self.exponent.saturating_add(1);
        }
    }

    /// A digit after the point. Zeros before the first significant digit only scale the value.
    fn push_fractional(&mut self, digit: u8) {
        if self.length == 0 && digit == b'0' {
            self.exponent = self.exponent.saturating_sub(1);
        } else if self.push(digit) {
            self.exponent = self.exponent.saturating_sub(1);
        }
    }

    /// Returns whether the digit was kept.
    fn push(&mut self, digit: u8) -> bool {
        if self.length < MAX_SIGNIFICANT_DIGITS {
            self.digits[self.length] = digit;
            self.length += 1;
            true
        } else {
            self.nonzero_digit_dropped |= digit != b'0';
            false
        }
    }

    fn to_ieee(mut self, target: Target) -> f64 {
        if self.nonzero_digit_dropped {
            // Anything non-zero past the significant digits rounds the same way as a single one
            // right after them.
            self.digits[self.length] = b'1';
            self.length += 1;
            self.exponent = self.exponent.saturating_sub(1);
        }

        let digits = &self.digits[..self.length];
        match target {
            Target::Double => strtod(digits, self.exponent),
            Target::Single => strtof(digits, self.exponent) as f64,
        }
    }
}

/// Scans an exponent suffix at `start`, returning its value and end. Returns `None` if there is
/// no well formed exponent, in which case the number ends at `start`.
fn scan_exponent(input: &[u8], start: usize) -> Option<(i32, usize)> {
    let mut cursor = start;
    if !matches!(input.get(cursor), Some(b'e' | b'E')) {
        return None;
    }
    cursor += 1;

    let negative = match input.get(cursor) {
        Some(b'-') => {
            cursor += 1;
            true
        },
        Some(b'+') => {
            cursor += 1;
            false
        },
        _ => false,
    };

    let digits = input.get(cursor..)?.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let mut exponent: i32 = 0;
    for &digit in &input[cursor..cursor + digits] {
        let digit = (digit - b'0') as i32;
        exponent = if exponent >= MAX_EXPONENT / 10 {
            MAX_EXPONENT
        } else {
            exponent * 10 + digit
        };
    }
    cursor += digits;

    Some((if negative { -exponent } else { exponent }, cursor))
}

fn skip_whitespace(input: &[u8], start: usize) -> usize {
    start
        + input[start..]
            .iter()
            .take_while(|&&c| matches!(c, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r'))
            .count()
}

/// Converts hexadecimal digits to the nearest value of the target format, with ties to even.
///
/// Digits are added until the significand overflows, after that the remaining digits only move
/// the exponent and decide the rounding.
fn hex_to_ieee(hex_digits: &[u8], target: Target) -> f64 {
    let significand_size = match target {
        Target::Double => Double::SIGNIFICAND_SIZE,
        Target::Single => Single::SIGNIFICAND_SIZE,
    };

    let mut number: u64 = 0;
    let mut exponent: i32 = 0;
    for (i, &c) in hex_digits.iter().enumerate() {
        number = number * 16 + hex_value(c);
        let overflow = number >> significand_size;
        if overflow == 0 {
            continue;
        }

        let overflow_bits_count = (u64::BITS - overflow.leading_zeros()) as i32;
        let dropped_bits_mask = (1_u64 << overflow_bits_count) - 1;
        let dropped_bits = number & dropped_bits_mask;
        number >>= overflow_bits_count;

        let rest = &hex_digits[i + 1..];
        let zero_tail = rest.iter().all(|&c| c == b'0');
        exponent = overflow_bits_count.saturating_add(4_i32.saturating_mul(rest.len() as i32));

        let middle_value = 1_u64 << (overflow_bits_count - 1);
        if dropped_bits > middle_value || (dropped_bits == middle_value && (number & 1 == 1 || !zero_tail)) {
            number += 1;
        }
        // Rounding up can carry into a new bit.
        if number >> significand_size != 0 {
            number >>= 1;
            exponent = exponent.saturating_add(1);
        }
        break;
    }

    let value = Double::from_diy_fp(DiyFp::new(number, exponent)).value();
    match target {
        Target::Double => value,
        // Exact unless out of range, where the cast gives infinity.
        Target::Single => value as f32 as f64,
    }
}

fn hex_value(c: u8) -> u64 {
    match c {
        b'0'..=b'9' => (c - b'0') as u64,
        b'a'..=b'f' => (c - b'a' + 10) as u64,
        b'A'..=b'F' => (c - b'A' + 10) as u64,
        _ => unreachable!("Hex digits are checked while scanning!"),
    }
}
