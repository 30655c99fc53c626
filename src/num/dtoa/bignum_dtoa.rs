use crate::num::bignum::Bignum;
use crate::num::ieee::{Double, Single};

use super::{Digits, DtoaMode, propagate_carry};

/// Generates the digits of a positive, finite `v` according to `mode`, using exact [`Bignum`]
/// arithmetic.
///
/// This never refuses and is always correct, but it is a lot slower than
/// [`fast_dtoa`](super::fast_dtoa) and [`fast_fixed_dtoa`](super::fast_fixed_dtoa).
///
/// In shortest mode a tie between two equally short candidates is broken towards the one with an
/// even last digit. In the counted modes a remainder of exactly one half rounds up.
///
/// # Panics
/// Panics if `buffer` is too short, or if the mode is [`DtoaMode::ShortestSingle`] and `v` isn't
/// exactly representable as an [`f32`].
pub fn bignum_dtoa(v: f64, mode: DtoaMode, buffer: &mut [u8]) -> Digits {
    debug_assert!(v > 0.0 && !Double::new(v).is_special());

    let (significand, exponent, lower_boundary_is_closer) = match mode {
        DtoaMode::ShortestSingle => {
            let single = Single::new(v as f32);
            assert!(single.value() as f64 == v, "Value isn't exactly representable as a single!");
            (
                single.significand() as u64,
                single.exponent(),
                single.lower_boundary_is_closer(),
            )
        },
        _ => {
            let double = Double::new(v);
            (double.significand(), double.exponent(), double.lower_boundary_is_closer())
        },
    };
    let need_boundary_deltas = matches!(mode, DtoaMode::Shortest | DtoaMode::ShortestSingle);

    let is_even = significand & 1 == 0;
    // Might be too low by one, which is fixed up below.
    let estimated_power = estimate_power(normalized_exponent(significand, exponent));

    // Much too small for the requested digits, even when rounding up.
    if let DtoaMode::Fixed(requested_digits) = mode
        && -estimated_power - 1 > requested_digits as i32
    {
        return Digits {
            length: 0,
            decimal_point: -(requested_digits as i32),
        };
    }

    let mut scaled = ScaledValues::new(
        significand,
        exponent,
        lower_boundary_is_closer,
        estimated_power,
        need_boundary_deltas,
    );
    // v = numerator / denominator * 10^estimated_power
    let mut decimal_point = scaled.fixup_multiply_10(estimated_power, is_even);
    // v = numerator / denominator * 10^(decimal_point - 1), with 1 <= (numerator + delta_plus) /
    // denominator < 10

    let length = match mode {
        DtoaMode::Shortest | DtoaMode::ShortestSingle => {
            scaled.generate_shortest_digits(is_even, buffer)
        },
        DtoaMode::Fixed(requested_digits) => {
            scaled.to_fixed(requested_digits, &mut decimal_point, buffer)
        },
        DtoaMode::Precision(requested_digits) => {
            scaled.generate_counted_digits(requested_digits, &mut decimal_point, buffer)
        },
    };

    Digits { length, decimal_point }
}

/// Estimates `ceil(log10(v))` for a value with the given normalized binary exponent, where the
/// estimate might be one too low but never too high.
fn estimate_power(exponent: i32) -> i32 {
    // 1 / log2(10), slightly rounded down so that the estimate errs on the low side.
    const ONE_LOG_10: f64 = 0.30102999566398114;
    let estimate = ((exponent + Double::SIGNIFICAND_SIZE - 1) as f64 * ONE_LOG_10 - 1e-10).ceil();
    estimate as i32
}

/// The exponent of the value once its significand has the double hidden bit set.
fn normalized_exponent(mut significand: u64, mut exponent: i32) -> i32 {
    debug_assert!(significand != 0);
    while significand & Double::HIDDEN_BIT == 0 {
        significand <<= 1;
        exponent -= 1;
    }
    exponent
}

/// The value and its boundaries as fractions over a common denominator:
///
/// - `v = numerator / denominator`
/// - `m- = (numerator - delta_minus) / denominator`
/// - `m+ = (numerator + delta_plus) / denominator`
///
/// The deltas are only set up in the shortest modes, in the counted modes they stay zero.
struct ScaledValues {
    numerator: Bignum,
    denominator: Bignum,
    delta_minus: Bignum,
    delta_plus: Bignum,
}

impl ScaledValues {
    /// Sets up the fractions so that `v = numerator / denominator * 10^estimated_power`. Every
    /// factor stays an integer: powers of ten and two with negative exponents go to the other side
    /// of the fraction.
    fn new(
        significand: u64,
        exponent: i32,
        lower_boundary_is_closer: bool,
        estimated_power: i32,
        need_boundary_deltas: bool,
    ) -> ScaledValues {
        let mut numerator = Bignum::new();
        let mut denominator = Bignum::new();
        let mut delta_minus = Bignum::new();
        let mut delta_plus = Bignum::new();

        if exponent >= 0 {
            debug_assert!(estimated_power >= 0);
            numerator.assign_u64(significand);
            numerator.shift_left(exponent as usize);
            denominator.assign_power_u16(10, estimated_power as usize);

            if need_boundary_deltas {
                // A common denominator of 2 makes the half ulp deltas integers: delta = 2^e.
                denominator.shift_left(1);
                numerator.shift_left(1);
                delta_plus.assign_u16(1);
                delta_plus.shift_left(exponent as usize);
                delta_minus.assign_u16(1);
                delta_minus.shift_left(exponent as usize);
            }
        } else if estimated_power >= 0 {
            numerator.assign_u64(significand);
            denominator.assign_power_u16(10, estimated_power as usize);
            denominator.shift_left((-exponent) as usize);

            if need_boundary_deltas {
                // The denominator already contains 2^-e, so the deltas are simply one.
                denominator.shift_left(1);
                numerator.shift_left(1);
                delta_plus.assign_u16(1);
                delta_minus.assign_u16(1);
            }
        } else {
            // Multiply the numerator and the deltas by 10^-estimated_power instead of dividing
            // the denominator.
            numerator.assign_power_u16(10, (-estimated_power) as usize);
            if need_boundary_deltas {
                delta_plus.assign_bignum(&numerator);
                delta_minus.assign_bignum(&numerator);
            }
            numerator.multiply_by_u64(significand);

            denominator.assign_u16(1);
            denominator.shift_left((-exponent) as usize);

            if need_boundary_deltas {
                numerator.shift_left(1);
                denominator.shift_left(1);
            }
        }

        if need_boundary_deltas && lower_boundary_is_closer {
            // The lower boundary is half as far away, so double everything but delta_minus.
            denominator.shift_left(1);
            numerator.shift_left(1);
            delta_plus.shift_left(1);
        }

        ScaledValues {
            numerator,
            denominator,
            delta_minus,
            delta_plus,
        }
    }

    /// Corrects an estimated power that was one too low, returning the decimal point. Afterwards
    /// `1 <= (numerator + delta_plus) / denominator < 10`.
    fn fixup_multiply_10(&mut self, estimated_power: i32, is_even: bool) -> i32 {
        let in_range = if is_even {
            // Ties go to the double with the even significand, so the upper boundary itself
            // belongs to this double.
            Bignum::plus_compare(&self.numerator, &self.delta_plus, &self.denominator).is_ge()
        } else {
            Bignum::plus_compare(&self.numerator, &self.delta_plus, &self.denominator).is_gt()
        };

        if in_range {
            estimated_power + 1
        } else {
            self.numerator.times_10();
            self.delta_minus.times_10();
            self.delta_plus.times_10();
            estimated_power
        }
    }

    /// Generates digits until the remainder is within the boundaries, then rounds the last digit
    /// towards the value. Returns the number of digits.
    fn generate_shortest_digits(&mut self, is_even: bool, buffer: &mut [u8]) -> usize {
        // Most of the time both deltas are the same, so only one of them needs updating.
        let shared_delta = Bignum::equal(&self.delta_minus, &self.delta_plus);
        let mut length = 0;

        loop {
            let digit = self.numerator.divide_modulo_int_bignum(&self.denominator);
            debug_assert!(digit <= 9);
            buffer[length] = b'0' + digit as u8;
            length += 1;

            let delta_plus = if shared_delta { &self.delta_minus } else { &self.delta_plus };
            // If the remainder is within the lower delta the digits can stop here, rounding
            // down. Likewise rounding up within the upper delta.
            let (in_delta_room_minus, in_delta_room_plus) = if is_even {
                (
                    Bignum::less_equal(&self.numerator, &self.delta_minus),
                    Bignum::plus_compare(&self.numerator, delta_plus, &self.denominator).is_ge(),
                )
            } else {
                (
                    Bignum::less(&self.numerator, &self.delta_minus),
                    Bignum::plus_compare(&self.numerator, delta_plus, &self.denominator).is_gt(),
                )
            };

            match (in_delta_room_minus, in_delta_room_plus) {
                (false, false) => {
                    self.numerator.times_10();
                    self.delta_minus.times_10();
                    if !shared_delta {
                        self.delta_plus.times_10();
                    }
                },
                (true, true) => {
                    // Either works, so round to the closer one.
                    let compare =
                        Bignum::plus_compare(&self.numerator, &self.numerator, &self.denominator);
                    let round_up = compare.is_gt()
                        || (compare.is_eq() && (buffer[length - 1] - b'0') % 2 == 1);
                    if round_up {
                        // The last digit can't be a 9, the loop would have stopped earlier.
                        debug_assert!(buffer[length - 1] != b'9');
                        buffer[length - 1] += 1;
                    }
                    return length;
                },
                (true, false) => return length,
                (false, true) => {
                    debug_assert!(buffer[length - 1] != b'9');
                    buffer[length - 1] += 1;
                    return length;
                },
            }
        }
    }

    /// Generates exactly `count` digits, rounding half up on the last one. Returns the number of
    /// digits, which is always `count`.
    fn generate_counted_digits(
        &mut self,
        count: usize,
        decimal_point: &mut i32,
        buffer: &mut [u8],
    ) -> usize {
        if count == 0 {
            return 0;
        }
        for slot in &mut buffer[..count - 1] {
            let digit = self.numerator.divide_modulo_int_bignum(&self.denominator);
            debug_assert!(digit <= 9);
            *slot = b'0' + digit as u8;
            self.numerator.times_10();
        }

        let mut digit = self.numerator.divide_modulo_int_bignum(&self.denominator);
        if Bignum::plus_compare(&self.numerator, &self.numerator, &self.denominator).is_ge() {
            digit += 1;
        }
        debug_assert!(digit <= 10);
        // A 10 is fixed up by the carry below.
        buffer[count - 1] = b'0' + digit as u8;
        if propagate_carry(&mut buffer[..count]) {
            *decimal_point += 1;
        }
        count
    }

    /// Generates the digits up to `requested_digits` after the point. Returns the number of
    /// digits.
    fn to_fixed(
        &mut self,
        requested_digits: usize,
        decimal_point: &mut i32,
        buffer: &mut [u8],
    ) -> usize {
        let requested = requested_digits as i32;
        if -*decimal_point > requested {
            // Too small to show up at all, for example 0.001 with one digit.
            *decimal_point = -requested;
            0
        } else if -*decimal_point == requested {
            // Only the rounding decides, for example 0.04 and 0.06 with one digit. The fraction is
            // in [1, 10), compare against half of ten.
            self.denominator.times_10();
            if Bignum::plus_compare(&self.numerator, &self.numerator, &self.denominator).is_ge() {
                buffer[0] = b'1';
                *decimal_point += 1;
                1
            } else {
                0
            }
        } else {
            let needed_digits = (*decimal_point + requested) as usize;
            self.generate_counted_digits(needed_digits, decimal_point, buffer)
        }
    }
}
