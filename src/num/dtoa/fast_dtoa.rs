use crate::num::ieee::cached_powers;
use crate::num::ieee::{DiyFp, Double, Single};

use super::{Digits, NeedsExactFallback, propagate_carry};

// The scaled value is generated with an integral part of at most 32 bits and a fractional part
// of at least 32 bits, which is what these exponents guarantee.
const MINIMAL_TARGET_EXPONENT: i32 = -60;
const MAXIMAL_TARGET_EXPONENT: i32 = -32;

const SMALL_POWERS_OF_TEN: [u32; 11] = [
    0, 1, 10, 100, 1000, 10000, 100000, 1000000, 10000000, 100000000, 1000000000,
];

/// The kinds of digits Grisu can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastDtoaMode {
    Shortest,
    ShortestSingle,
    Precision(usize),
}

/// Generates the digits of a positive, finite `v` with Grisu3, using nothing but 64-bit integer
/// arithmetic.
///
/// For about 0.5% of all doubles the approximation is too coarse to decide the last digit, in
/// which case this returns [`NeedsExactFallback`] rather than a possibly wrong result. When the
/// digits are returned they are always correct, and in shortest mode also the shortest.
///
/// Precision mode gives up for more than about 17 requested digits, as a 64-bit significand
/// doesn't carry enough information for the rest.
///
/// # Panics
/// Panics if `buffer` is too short for the generated digits.
pub fn fast_dtoa(
    v: f64,
    mode: FastDtoaMode,
    buffer: &mut [u8],
) -> Result<Digits, NeedsExactFallback> {
    debug_assert!(v > 0.0 && !Double::new(v).is_special());

    if mode == FastDtoaMode::Precision(0) {
        return Ok(Digits { length: 0, decimal_point: 0 });
    }

    let (length, decimal_exponent) = match mode {
        FastDtoaMode::Shortest | FastDtoaMode::ShortestSingle => grisu3(v, mode, buffer)?,
        FastDtoaMode::Precision(requested_digits) => {
            grisu3_counted(v, requested_digits, buffer)?
        },
    };

    Ok(Digits {
        length,
        decimal_point: length as i32 + decimal_exponent,
    })
}

/// Scales `w` by a cached power of ten `10^-mk`, so that the result has an exponent within the
/// target range. Returns the power and `mk`.
fn cached_power_for(w: DiyFp) -> (DiyFp, i32) {
    let min = MINIMAL_TARGET_EXPONENT - (w.e + DiyFp::SIGNIFICAND_SIZE);
    let max = MAXIMAL_TARGET_EXPONENT - (w.e + DiyFp::SIGNIFICAND_SIZE);
    cached_powers::for_binary_exponent_range(min, max)
}

/// Returns the number of decimal digits `exponent_plus_one` of `number` along with the power
/// `10^(exponent_plus_one - 1)`, given that `number < 2^(number_bits + 1)`.
fn biggest_power_ten(number: u32, number_bits: i32) -> (u32, i32) {
    debug_assert!((number as u64) < (1_u64 << (number_bits + 1)));
    // 1233 / 4096 is roughly log10(2).
    let mut exponent_plus_one_guess = ((number_bits + 1) * 1233 >> 12) + 1;
    if number < SMALL_POWERS_OF_TEN[exponent_plus_one_guess as usize] {
        exponent_plus_one_guess -= 1;
    }
    (
        SMALL_POWERS_OF_TEN[exponent_plus_one_guess as usize],
        exponent_plus_one_guess,
    )
}

fn grisu3(
    v: f64,
    mode: FastDtoaMode,
    buffer: &mut [u8],
) -> Result<(usize, i32), NeedsExactFallback> {
    let w = Double::new(v).as_normalized_diy_fp();
    let (boundary_minus, boundary_plus) = match mode {
        FastDtoaMode::ShortestSingle => Single::new(v as f32).normalized_boundaries(),
        _ => Double::new(v).normalized_boundaries(),
    };
    debug_assert_eq!(boundary_plus.e, w.e);

    let (ten_mk, mk) = cached_power_for(w);

    // The scaled boundaries are off by at most one unit each, the digit generation widens the
    // interval accordingly.
    let scaled_w = w * ten_mk;
    let scaled_boundary_minus = boundary_minus * ten_mk;
    let scaled_boundary_plus = boundary_plus * ten_mk;

    let (length, kappa) = digit_gen(scaled_boundary_minus, scaled_w, scaled_boundary_plus, buffer)?;
    Ok((length, -mk + kappa))
}

fn grisu3_counted(
    v: f64,
    requested_digits: usize,
    buffer: &mut [u8],
) -> Result<(usize, i32), NeedsExactFallback> {
    let w = Double::new(v).as_normalized_diy_fp();
    let (ten_mk, mk) = cached_power_for(w);
    let scaled_w = w * ten_mk;

    let (length, kappa) = digit_gen_counted(scaled_w, requested_digits, buffer)?;
    Ok((length, -mk + kappa))
}

/// Generates the shortest digits for any number within `(low, high)`, as close to `w` as
/// possible. Returns the number of digits and `kappa`, such that the digits times
/// `10^kappa` are the scaled value.
///
/// `low`, `w` and `high` are imprecise by one unit each, so the interval that is definitely safe
/// is narrower than the one used to generate the digits. When the chosen digits might fall outside
/// of the safe interval, or can't be proven to be the closest, this gives up.
fn digit_gen(
    low: DiyFp,
    w: DiyFp,
    high: DiyFp,
    buffer: &mut [u8],
) -> Result<(usize, i32), NeedsExactFallback> {
    debug_assert!(low.e == w.e && w.e == high.e);
    debug_assert!(low.f + 1 <= high.f - 1);
    debug_assert!((MINIMAL_TARGET_EXPONENT..=MAXIMAL_TARGET_EXPONENT).contains(&w.e));

    let mut unit: u64 = 1;
    let too_low = DiyFp::new(low.f - unit, low.e);
    let too_high = DiyFp::new(high.f + unit, high.e);
    // too_low and too_high are guaranteed to lie outside the interval we want the digits in.
    let mut unsafe_interval = too_high - too_low;

    let one = DiyFp::new(1 << -w.e, w.e);
    let one_shift = -one.e;
    let mut integrals = (too_high.f >> one_shift) as u32;
    let mut fractionals = too_high.f & (one.f - 1);

    let (mut divisor, divisor_exponent_plus_one) =
        biggest_power_ten(integrals, DiyFp::SIGNIFICAND_SIZE - one_shift);
    let mut kappa = divisor_exponent_plus_one;
    let mut length = 0;

    // Generate the integral digits, stopping as soon as the rest is within the unsafe interval.
    while kappa > 0 {
        let digit = integrals / divisor;
        buffer[length] = b'0' + digit as u8;
        length += 1;
        integrals %= divisor;
        kappa -= 1;

        let rest = ((integrals as u64) << one_shift) + fractionals;
        if rest < unsafe_interval.f {
            round_weed(
                &mut buffer[..length],
                (too_high - w).f,
                unsafe_interval.f,
                rest,
                (divisor as u64) << one_shift,
                unit,
            )?;
            return Ok((length, kappa));
        }
        divisor /= 10;
    }

    // The fractional digits, where the unit and interval grow with every digit to keep up with
    // the growing fractionals.
    debug_assert!(one.e >= -60);
    debug_assert!(fractionals < one.f);
    debug_assert!(u64::MAX / 10 >= one.f);
    loop {
        fractionals *= 10;
        unit *= 10;
        unsafe_interval.f *= 10;

        let digit = (fractionals >> one_shift) as u8;
        buffer[length] = b'0' + digit;
        length += 1;
        fractionals &= one.f - 1;
        kappa -= 1;

        if fractionals < unsafe_interval.f {
            round_weed(
                &mut buffer[..length],
                (too_high - w).f * unit,
                unsafe_interval.f,
                fractionals,
                one.f,
                unit,
            )?;
            return Ok((length, kappa));
        }
    }
}

/// Generates `requested_digits` digits of `w`, where `w` is off by at most one unit. Returns the
/// number of digits and `kappa`, see [`digit_gen`].
fn digit_gen_counted(
    w: DiyFp,
    mut requested_digits: usize,
    buffer: &mut [u8],
) -> Result<(usize, i32), NeedsExactFallback> {
    debug_assert!((MINIMAL_TARGET_EXPONENT..=MAXIMAL_TARGET_EXPONENT).contains(&w.e));

    let mut w_error: u64 = 1;
    let one = DiyFp::new(1 << -w.e, w.e);
    let one_shift = -one.e;
    let mut integrals = (w.f >> one_shift) as u32;
    let mut fractionals = w.f & (one.f - 1);

    let (mut divisor, divisor_exponent_plus_one) =
        biggest_power_ten(integrals, DiyFp::SIGNIFICAND_SIZE - one_shift);
    let mut kappa = divisor_exponent_plus_one;
    let mut length = 0;

    while kappa > 0 {
        let digit = integrals / divisor;
        buffer[length] = b'0' + digit as u8;
        length += 1;
        requested_digits -= 1;
        integrals %= divisor;
        kappa -= 1;
        if requested_digits == 0 {
            break;
        }
        divisor /= 10;
    }

    if requested_digits == 0 {
        let rest = ((integrals as u64) << one_shift) + fractionals;
        let carried = round_weed_counted(
            &mut buffer[..length],
            rest,
            (divisor as u64) << one_shift,
            w_error,
        )?;
        return Ok((length, kappa + carried as i32));
    }

    // Stop once the error is larger than what is left, the digits would be garbage.
    while requested_digits > 0 && fractionals > w_error {
        fractionals *= 10;
        w_error *= 10;

        let digit = (fractionals >> one_shift) as u8;
        buffer[length] = b'0' + digit;
        length += 1;
        requested_digits -= 1;
        fractionals &= one.f - 1;
        kappa -= 1;
    }
    if requested_digits != 0 {
        return Err(NeedsExactFallback);
    }

    let carried = round_weed_counted(&mut buffer[..length], fractionals, one.f, w_error)?;
    Ok((length, kappa + carried as i32))
}

/// Adjusts the last digit of `buffer` down towards `w`, as long as the result stays within the
/// unsafe interval, then checks that the result is safe.
///
/// All values are in the scaled units of the digit generation:
/// - `distance_too_high_w`: the distance from `too_high` to `w`.
/// - `unsafe_interval`: the distance from `too_low` to `too_high`.
/// - `rest`: the distance from the digits to `too_high`.
/// - `ten_kappa`: the value of one unit of the last digit.
/// - `unit`: the imprecision of every boundary.
///
/// The digits are safe if they lie strictly within the safe interval, which is the unsafe interval
/// shrunk by `unit` on both sides, and are provably the closest candidate to `w` despite `w` being
/// imprecise too.
fn round_weed(
    buffer: &mut [u8],
    distance_too_high_w: u64,
    unsafe_interval: u64,
    mut rest: u64,
    ten_kappa: u64,
    unit: u64,
) -> Result<(), NeedsExactFallback> {
    let length = buffer.len();
    // w_low and w_high are the extremes of where the real w could be.
    let small_distance = distance_too_high_w - unit;
    let big_distance = distance_too_high_w + unit;
    debug_assert!(rest <= unsafe_interval);

    // Move the digits towards w_high, which is the conservative choice. The loop stops once the
    // next candidate would leave the unsafe interval or would be further away from w_high.
    while rest < small_distance
        && unsafe_interval - rest >= ten_kappa
        && (rest + ten_kappa < small_distance
            || small_distance - rest >= rest + ten_kappa - small_distance)
    {
        buffer[length - 1] -= 1;
        rest += ten_kappa;
    }

    // If the same move would bring the digits closer to w_low, the real w could be on either side
    // and there is no way of knowing which candidate is closer.
    if rest < big_distance
        && unsafe_interval - rest >= ten_kappa
        && (rest + ten_kappa < big_distance
            || big_distance - rest > rest + ten_kappa - big_distance)
    {
        return Err(NeedsExactFallback);
    }

    // The digits must be at least 2 units away from too_low and too_high respectively, the other
    // units being lost to the imprecision of the boundaries.
    if 2 * unit <= rest && unsafe_interval.checked_sub(4 * unit).is_some_and(|limit| rest <= limit) {
        Ok(())
    } else {
        Err(NeedsExactFallback)
    }
}

/// Rounds the counted digits in `buffer` based on the `rest` after the last digit, if the rounding
/// direction is certain despite `w` being off by up to `unit`.
///
/// Returns true if rounding up carried past the first digit, which leaves the buffer as `10...0`
/// with the decimal point one place further right.
fn round_weed_counted(
    buffer: &mut [u8],
    rest: u64,
    ten_kappa: u64,
    unit: u64,
) -> Result<bool, NeedsExactFallback> {
    debug_assert!(rest < ten_kappa);
    // If the error is as large as the last digit the rounding can't be decided. The second check
    // avoids overflows in the arithmetic below.
    if unit >= ten_kappa || ten_kappa - unit <= unit {
        return Err(NeedsExactFallback);
    }

    // Round down if even the largest possible rest is below half a digit.
    if ten_kappa - rest > rest && ten_kappa - 2 * rest >= 2 * unit {
        return Ok(false);
    }

    // Round up if even the smallest possible rest is above half a digit.
    if rest > unit && ten_kappa - (rest - unit) <= rest - unit {
        let last = buffer.len() - 1;
        buffer[last] += 1;
        return Ok(propagate_carry(buffer));
    }

    Err(NeedsExactFallback)
}
