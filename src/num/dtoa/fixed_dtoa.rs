use crate::num::ieee::Double;

use super::{Digits, NeedsExactFallback, propagate_carry};

/// The largest binary exponent supported by [`fast_fixed_dtoa`], values are below `2^73`.
pub const MAX_FIXED_EXPONENT: i32 = 20;

/// The largest number of fractional digits supported by [`fast_fixed_dtoa`].
pub const MAX_FIXED_FRACTIONAL_COUNT: usize = 20;

const FIVE_17: u64 = 0xB1_A2BC_2EC5;
const TEN_7: u64 = 10_000_000;

/// Generates the digits of a positive, finite `v` rounded to `fractional_count` digits after the
/// decimal point, with nothing but integer arithmetic.
///
/// Leading and trailing zeros are trimmed. If `v` rounds to zero there are no digits at all and the
/// decimal point is `-fractional_count`. Ties round up, away from zero.
///
/// Refuses with [`NeedsExactFallback`] for values of `2^73` and above and for more than
/// [`MAX_FIXED_FRACTIONAL_COUNT`] fractional digits.
///
/// # Panics
/// Panics if `buffer` is too short, it needs at most 22 digits before the point plus
/// `fractional_count`.
pub fn fast_fixed_dtoa(
    v: f64,
    fractional_count: usize,
    buffer: &mut [u8],
) -> Result<Digits, NeedsExactFallback> {
    let double = Double::new(v);
    let significand = double.significand();
    let exponent = double.exponent();

    if exponent > MAX_FIXED_EXPONENT || fractional_count > MAX_FIXED_FRACTIONAL_COUNT {
        return Err(NeedsExactFallback);
    }

    let mut writer = DigitWriter { buffer, length: 0 };
    let mut decimal_point: i32;

    if exponent + Double::SIGNIFICAND_SIZE > 64 {
        // v = q * 10^17 + r, where the quotient is at most 3 digits and the remainder fits into a
        // u64. Dividing by 10^17 is done as a division by 5^17 and a shift by 17.
        let divisor_power = 17;
        let (quotient, remainder) = if exponent > divisor_power {
            let dividend = significand << (exponent - divisor_power);
            (dividend / FIVE_17, (dividend % FIVE_17) << divisor_power)
        } else {
            let divisor = FIVE_17 << (divisor_power - exponent);
            (significand / divisor, (significand % divisor) << exponent)
        };
        writer.fill_digits_32(quotient as u32);
        writer.fill_digits_64_fixed_length(remainder);
        decimal_point = writer.length as i32;
    } else if exponent >= 0 {
        writer.fill_digits_64(significand << exponent);
        decimal_point = writer.length as i32;
    } else if exponent > -Double::SIGNIFICAND_SIZE {
        let integrals = significand >> -exponent;
        let fractionals = significand - (integrals << -exponent);
        writer.fill_digits_64(integrals);
        decimal_point = writer.length as i32;
        writer.fill_fractionals(fractionals, exponent, fractional_count, &mut decimal_point);
    } else if exponent < -128 {
        // With at most 20 fractional digits everything is zero.
        decimal_point = -(fractional_count as i32);
    } else {
        decimal_point = 0;
        writer.fill_fractionals(significand, exponent, fractional_count, &mut decimal_point);
    }

    let length = writer.trim_zeros(&mut decimal_point);
    if length == 0 {
        decimal_point = -(fractional_count as i32);
    }
    Ok(Digits { length, decimal_point })
}

struct DigitWriter<'a> {
    buffer: &'a mut [u8],
    length: usize,
}

impl DigitWriter<'_> {
    /// Writes exactly `requested_length` digits, with leading zeros.
    fn fill_digits_32_fixed_length(&mut self, mut number: u32, requested_length: usize) {
        for i in (0..requested_length).rev() {
            self.buffer[self.length + i] = b'0' + (number % 10) as u8;
            number /= 10;
        }
        self.length += requested_length;
    }

    /// Writes the digits without leading zeros, nothing at all for zero.
    fn fill_digits_32(&mut self, mut number: u32) {
        let start = self.length;
        while number != 0 {
            self.buffer[self.length] = b'0' + (number % 10) as u8;
            self.length += 1;
            number /= 10;
        }
        self.buffer[start..self.length].reverse();
    }

    /// Writes exactly 17 digits, with leading zeros.
    fn fill_digits_64_fixed_length(&mut self, number: u64) {
        let part2 = (number % TEN_7) as u32;
        let number = number / TEN_7;
        let part1 = (number % TEN_7) as u32;
        let part0 = (number / TEN_7) as u32;
        self.fill_digits_32_fixed_length(part0, 3);
        self.fill_digits_32_fixed_length(part1, 7);
        self.fill_digits_32_fixed_length(part2, 7);
    }

    fn fill_digits_64(&mut self, number: u64) {
        let part2 = (number % TEN_7) as u32;
        let number = number / TEN_7;
        let part1 = (number % TEN_7) as u32;
        let part0 = (number / TEN_7) as u32;
        if part0 != 0 {
            self.fill_digits_32(part0);
            self.fill_digits_32_fixed_length(part1, 7);
            self.fill_digits_32_fixed_length(part2, 7);
        } else if part1 != 0 {
            self.fill_digits_32(part1);
            self.fill_digits_32_fixed_length(part2, 7);
        } else {
            self.fill_digits_32(part2);
        }
    }

    /// Writes up to `fractional_count` digits of `fractionals * 2^exponent`, which is below one,
    /// and rounds the last one based on the next bit.
    ///
    /// Multiplying by 5 and moving the point one bit to the left is a multiplication by 10 that
    /// keeps the number small.
    fn fill_fractionals(
        &mut self,
        fractionals: u64,
        exponent: i32,
        fractional_count: usize,
        decimal_point: &mut i32,
    ) {
        debug_assert!((-128..=0).contains(&exponent));
        if -exponent <= 64 {
            debug_assert!(fractionals >> 56 == 0);
            let mut fractionals = fractionals;
            let mut point = -exponent;
            for _ in 0..fractional_count {
                if fractionals == 0 {
                    break;
                }
                fractionals *= 5;
                point -= 1;
                let digit = fractionals >> point;
                self.push_digit(digit as u8);
                fractionals -= digit << point;
            }
            if point > 0 && (fractionals >> (point - 1)) & 1 == 1 {
                self.round_up(decimal_point);
            }
        } else {
            // The significand has at most 53 bits, so 128 bits of fixed point leave enough room
            // for the multiplications.
            let mut fractionals = (fractionals as u128) << (128 + exponent);
            let mut point: i32 = 128;
            for _ in 0..fractional_count {
                if fractionals == 0 {
                    break;
                }
                fractionals *= 5;
                point -= 1;
                let digit = fractionals >> point;
                self.push_digit(digit as u8);
                fractionals -= digit << point;
            }
            if point > 0 && (fractionals >> (point - 1)) & 1 == 1 {
                self.round_up(decimal_point);
            }
        }
    }

    fn push_digit(&mut self, digit: u8) {
        self.buffer[self.length] = b'0' + digit;
        self.length += 1;
    }

    fn round_up(&mut self, decimal_point: &mut i32) {
        // An empty buffer means everything so far was zero, so rounding up gives the first digit.
        if self.length == 0 {
            self.buffer[0] = b'1';
            self.length = 1;
            *decimal_point = 1;
            return;
        }
        self.buffer[self.length - 1] += 1;
        if propagate_carry(&mut self.buffer[..self.length]) {
            *decimal_point += 1;
        }
    }

    /// Removes leading and trailing zeros, returning the final length.
    fn trim_zeros(&mut self, decimal_point: &mut i32) -> usize {
        while self.length > 0 && self.buffer[self.length - 1] == b'0' {
            self.length -= 1;
        }
        let first_non_zero = self.buffer[..self.length]
            .iter()
            .position(|&digit| digit != b'0')
            .unwrap_or(self.length);
        if first_non_zero != 0 {
            self.buffer.copy_within(first_non_zero..self.length, 0);
            self.length -= first_non_zero;
            *decimal_point -= first_non_zero as i32;
        }
        self.length
    }
}
