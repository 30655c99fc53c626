use std::cmp::Ordering;

use tracing::trace;

use crate::num::bignum::Bignum;
use crate::num::ieee::{DiyFp, Double, Single, cached_powers};

/// The number of significant digits considered. Any digits beyond this are replaced by a single
/// non-zero digit, which is enough to round in the right direction.
pub const MAX_SIGNIFICANT_DECIMAL_DIGITS: usize = 780;

/// 10^15 < 2^53, so any integer with up to 15 digits is exact as a double.
const MAX_EXACT_DOUBLE_INTEGER_DECIMAL_DIGITS: usize = 15;
const MAX_U64_DECIMAL_DIGITS: i32 = 19;

/// Everything with more digits before the point is infinity.
const MAX_DECIMAL_POWER: i32 = 309;
/// Everything with less digits before the point (counting negative) is zero.
const MIN_DECIMAL_POWER: i32 = -324;

const EXACT_POWERS_OF_TEN: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// `10^1` through `10^7` as exact, normalized [`DiyFp`]s.
const ADJUSTMENT_POWERS_OF_TEN: [DiyFp; 7] = [
    DiyFp::new(0xA000_0000_0000_0000, -60),
    DiyFp::new(0xC800_0000_0000_0000, -57),
    DiyFp::new(0xFA00_0000_0000_0000, -54),
    DiyFp::new(0x9C40_0000_0000_0000, -50),
    DiyFp::new(0xC350_0000_0000_0000, -47),
    DiyFp::new(0xF424_0000_0000_0000, -44),
    DiyFp::new(0x9896_8000_0000_0000, -40),
];

/// Errors of the DiyFp approximation are counted in eighths of a unit in the last place.
const DENOMINATOR_LOG: i32 = 3;
const DENOMINATOR: u64 = 1 << DENOMINATOR_LOG;

/// Returns the [`f64`] closest to `digits * 10^exponent`, with ties going to the even
/// significand.
///
/// `digits` may have any number of leading or trailing zeros and may be empty, which is zero.
/// Values too large for a double become infinity and values too small become zero, the result is
/// never negative.
///
/// # Panics
/// Panics if `digits` contains anything but ASCII digits.
///
/// # Examples
/// ```
/// # use float_conv::num::strtod::strtod;
/// assert_eq!(strtod(b"12345", -2), 123.45);
/// assert_eq!(strtod(b"9007199254740993", 0), 9007199254740992.0);
/// assert_eq!(strtod(b"1", 400), f64::INFINITY);
/// ```
pub fn strtod(digits: &[u8], exponent: i32) -> f64 {
    assert!(digits.iter().all(u8::is_ascii_digit), "Strtod input contains a non-digit!");

    let mut cut_space = [0_u8; MAX_SIGNIFICANT_DECIMAL_DIGITS];
    let (trimmed, exponent) = trim_and_cut(digits, exponent, &mut cut_space);

    let (guess, is_correct) = compute_guess(trimmed, exponent);
    if is_correct {
        return guess;
    }

    trace!(
        digits = trimmed.len(),
        exponent,
        "approximation too close to a halfway point, comparing with a bignum"
    );
    let guess_double = Double::new(guess);
    match compare_buffer_with_diy_fp(trimmed, exponent, guess_double.upper_boundary()) {
        Ordering::Less => guess,
        Ordering::Greater => guess_double.next_double(),
        Ordering::Equal if guess_double.significand() & 1 == 0 => guess,
        Ordering::Equal => guess_double.next_double(),
    }
}

/// Returns the [`f32`] closest to `digits * 10^exponent`, with ties going to the even
/// significand.
///
/// The double result is narrowed with a check for double rounding: a decimal value just above a
/// single precision halfway point might round down to that halfway point as a double, and then
/// to the wrong single.
///
/// # Panics
/// Panics if `digits` contains anything but ASCII digits.
///
/// # Examples
/// ```
/// # use float_conv::num::strtod::strtof;
/// assert_eq!(strtof(b"16777217", 0), 16777216.0);
/// assert_eq!(strtof(b"1000000059604644775390625000001", -30), 1.0000001);
/// ```
pub fn strtof(digits: &[u8], exponent: i32) -> f32 {
    assert!(digits.iter().all(u8::is_ascii_digit), "Strtof input contains a non-digit!");

    let mut cut_space = [0_u8; MAX_SIGNIFICANT_DECIMAL_DIGITS];
    let (trimmed, exponent) = trim_and_cut(digits, exponent, &mut cut_space);

    let (double_guess, is_correct) = compute_guess(trimmed, exponent);
    let float_guess = double_guess as f32;
    if float_guess as f64 == double_guess {
        // Exactly representable, integers mostly.
        return float_guess;
    }

    // The correct double is either the guess or its successor. Each of them, and the doubles
    // around them, have to round to the same single for the guess to be safe.
    let double_next = Double::new(double_guess).next_double();
    let double_previous = Double::new(double_guess).previous_double();

    let f1 = double_previous as f32;
    let f3 = double_next as f32;
    let f4 = if is_correct {
        f3
    } else {
        Double::new(double_next).next_double() as f32
    };
    debug_assert!(f1 <= float_guess && float_guess <= f3 && f3 <= f4);

    if f1 == f4 {
        return float_guess;
    }

    trace!(
        digits = trimmed.len(),
        exponent,
        "double guess too close to a single halfway point, comparing with a bignum"
    );
    let guess = f1;
    let next = f4;
    let upper_boundary = if guess == 0.0 {
        // Half of the smallest denormal single, which is a normal double.
        let min_float = f32::from_bits(1);
        Double::new(min_float as f64 / 2.0).to_exact_diy_fp()
    } else {
        Single::new(guess).upper_boundary()
    };

    match compare_buffer_with_diy_fp(trimmed, exponent, upper_boundary) {
        Ordering::Less => guess,
        Ordering::Greater => next,
        Ordering::Equal if Single::new(guess).significand() & 1 == 0 => guess,
        Ordering::Equal => next,
    }
}

/// Removes leading and trailing zeros, moving the exponent to compensate, and cuts the digits
/// down to [`MAX_SIGNIFICANT_DECIMAL_DIGITS`] using `cut_space` if needed.
fn trim_and_cut<'a>(
    digits: &'a [u8],
    exponent: i32,
    cut_space: &'a mut [u8; MAX_SIGNIFICANT_DECIMAL_DIGITS],
) -> (&'a [u8], i32) {
    let leading_zeros = digits.iter().take_while(|&&digit| digit == b'0').count();
    let left_trimmed = &digits[leading_zeros..];
    let trailing_zeros = left_trimmed.iter().rev().take_while(|&&digit| digit == b'0').count();
    let trimmed = &left_trimmed[..left_trimmed.len() - trailing_zeros];
    let exponent = exponent.saturating_add(trailing_zeros.try_into().unwrap_or(i32::MAX));

    if trimmed.len() <= MAX_SIGNIFICANT_DECIMAL_DIGITS {
        return (trimmed, exponent);
    }

    // The trimmed digits end in a non-zero digit, which is all that matters for rounding once
    // they are this far from the significant ones.
    let last = MAX_SIGNIFICANT_DECIMAL_DIGITS - 1;
    cut_space[..last].copy_from_slice(&trimmed[..last]);
    cut_space[last] = b'1';
    let dropped = trimmed.len() - MAX_SIGNIFICANT_DECIMAL_DIGITS;
    let exponent = exponent.saturating_add(dropped.try_into().unwrap_or(i32::MAX));
    (&cut_space[..], exponent)
}

/// Computes a guess for trimmed digits, returning whether it is known to be correct. If it isn't,
/// the correct double is either the guess or the next double up.
fn compute_guess(trimmed: &[u8], exponent: i32) -> (f64, bool) {
    if trimmed.is_empty() {
        return (0.0, true);
    }
    // At most MAX_SIGNIFICANT_DECIMAL_DIGITS, so this can't overflow.
    let length = trimmed.len() as i32;
    if exponent.saturating_add(length - 1) >= MAX_DECIMAL_POWER {
        return (f64::INFINITY, true);
    }
    if exponent.saturating_add(length) <= MIN_DECIMAL_POWER {
        return (0.0, true);
    }

    if let Some(value) = double_strtod(trimmed, exponent) {
        return (value, true);
    }
    let (guess, is_correct) = diy_fp_strtod(trimmed, exponent);
    (guess, is_correct || guess == f64::INFINITY)
}

/// Reads as many digits as fit into a u64 without overflowing, returning the value and the
/// number of digits read.
fn read_u64(digits: &[u8]) -> (u64, usize) {
    let mut result: u64 = 0;
    let mut read = 0;
    while read < digits.len() && result <= u64::MAX / 10 - 1 {
        result = result * 10 + (digits[read] - b'0') as u64;
        read += 1;
    }
    (result, read)
}

/// Reads the first 19 digits (or less) into a [`DiyFp`], rounding on the next digit. Returns the
/// number of digits that didn't make it in.
fn read_diy_fp(digits: &[u8]) -> (DiyFp, usize) {
    let (mut significand, read) = read_u64(digits);
    if read == digits.len() {
        return (DiyFp::new(significand, 0), 0);
    }
    if digits[read] >= b'5' {
        significand += 1;
    }
    (DiyFp::new(significand, 0), digits.len() - read)
}

/// Tries plain double arithmetic, which is correctly rounded as long as both the digits and the
/// power of ten are exact doubles.
fn double_strtod(trimmed: &[u8], exponent: i32) -> Option<f64> {
    if trimmed.len() > MAX_EXACT_DOUBLE_INTEGER_DECIMAL_DIGITS {
        return None;
    }
    let exact_powers = EXACT_POWERS_OF_TEN.len() as i32;
    let (digits, read) = read_u64(trimmed);
    debug_assert_eq!(read, trimmed.len());
    let digits = digits as f64;

    if exponent < 0 && -exponent < exact_powers {
        return Some(digits / EXACT_POWERS_OF_TEN[(-exponent) as usize]);
    }
    if (0..exact_powers).contains(&exponent) {
        return Some(digits * EXACT_POWERS_OF_TEN[exponent as usize]);
    }

    // A short integer can take part of the power of ten and still be exact, for example
    // 123 * 10^25 = 123000 * 10^22.
    let remaining_digits = (MAX_EXACT_DOUBLE_INTEGER_DECIMAL_DIGITS - trimmed.len()) as i32;
    if exponent >= 0 && exponent - remaining_digits < exact_powers {
        return Some(
            digits
                * EXACT_POWERS_OF_TEN[remaining_digits as usize]
                * EXACT_POWERS_OF_TEN[(exponent - remaining_digits) as usize],
        );
    }
    None
}

/// Approximates the value with a [`DiyFp`] while keeping track of the accumulated error, in
/// eighths of a unit in the last place. Returns the rounded guess and whether the error interval
/// is clear of the halfway point, in which case the guess is correct. Otherwise the guess is the
/// double below the correct one or the correct one itself.
fn diy_fp_strtod(trimmed: &[u8], exponent: i32) -> (f64, bool) {
    let (input, remaining_decimals) = read_diy_fp(trimmed);
    // Rounding the dropped digits costs half a unit.
    let mut error: u64 = if remaining_decimals == 0 { 0 } else { DENOMINATOR / 2 };
    let exponent = exponent + remaining_decimals as i32;

    let mut input = input;
    let old_e = input.e;
    input = input.normalize();
    error <<= old_e - input.e;

    debug_assert!(exponent <= cached_powers::MAX_DECIMAL_EXPONENT);
    if exponent < cached_powers::MIN_DECIMAL_EXPONENT {
        return (0.0, true);
    }
    let (cached_power, cached_decimal_exponent) = cached_powers::for_decimal_exponent(exponent);

    if cached_decimal_exponent != exponent {
        let adjustment_exponent = exponent - cached_decimal_exponent;
        input = input * ADJUSTMENT_POWERS_OF_TEN[(adjustment_exponent - 1) as usize];
        // The adjustment powers are exact, the product only loses bits when it doesn't fit into
        // 64 bits.
        if MAX_U64_DECIMAL_DIGITS - (trimmed.len() as i32) < adjustment_exponent {
            error += DENOMINATOR / 2;
        }
    }

    input = input * cached_power;
    // The cached power is off by at most half a unit, the product of the two errors adds at most
    // one eighth (rounded up to a full eighth), and the multiplication itself rounds by half a
    // unit.
    let error_cached_power = DENOMINATOR / 2;
    let error_product = if error == 0 { 0 } else { 1 };
    let error_rounding = DENOMINATOR / 2;
    error += error_cached_power + error_product + error_rounding;

    let old_e = input.e;
    input = input.normalize();
    error <<= old_e - input.e;

    let order_of_magnitude = DiyFp::SIGNIFICAND_SIZE + input.e;
    let effective_significand_size =
        Double::significand_size_for_order_of_magnitude(order_of_magnitude);
    let mut precision_digits_count = DiyFp::SIGNIFICAND_SIZE - effective_significand_size;
    if precision_digits_count + DENOMINATOR_LOG >= DiyFp::SIGNIFICAND_SIZE {
        // Tiny denormals, where the halfway point times the denominator wouldn't fit into a u64.
        let shift_amount = precision_digits_count + DENOMINATOR_LOG - DiyFp::SIGNIFICAND_SIZE + 1;
        input = DiyFp::new(input.f >> shift_amount, input.e + shift_amount);
        // One for the precision lost on the error, and a full unit for the one lost on the input.
        error = (error >> shift_amount) + 1 + DENOMINATOR;
        precision_digits_count -= shift_amount;
    }
    debug_assert!(precision_digits_count > 0 && precision_digits_count < 64);

    let precision_bits_mask = (1_u64 << precision_digits_count) - 1;
    let precision_bits = (input.f & precision_bits_mask) * DENOMINATOR;
    let half_way = (1_u64 << (precision_digits_count - 1)) * DENOMINATOR;

    let mut rounded_input = DiyFp::new(
        input.f >> precision_digits_count,
        input.e + precision_digits_count,
    );
    if precision_bits >= half_way + error {
        rounded_input.f += 1;
    }

    let guess = Double::from_diy_fp(rounded_input).value();
    // Within the error of the halfway point the guess was rounded down, and might be one too low.
    let is_correct = !(half_way - error < precision_bits && precision_bits < half_way + error);
    (guess, is_correct)
}

/// Compares `buffer * 10^exponent` with `diy_fp` exactly.
fn compare_buffer_with_diy_fp(buffer: &[u8], exponent: i32, diy_fp: DiyFp) -> Ordering {
    debug_assert!(buffer.len() as i32 + exponent <= MAX_DECIMAL_POWER + 1);
    debug_assert!(buffer.len() as i32 + exponent > MIN_DECIMAL_POWER);
    debug_assert!(buffer.len() <= MAX_SIGNIFICANT_DECIMAL_DIGITS);

    let mut buffer_bignum = Bignum::new();
    let mut diy_fp_bignum = Bignum::new();
    buffer_bignum.assign_decimal_string(buffer);
    diy_fp_bignum.assign_u64(diy_fp.f);

    if exponent >= 0 {
        buffer_bignum.multiply_by_power_of_ten(exponent as usize);
    } else {
        diy_fp_bignum.multiply_by_power_of_ten((-exponent) as usize);
    }
    if diy_fp.e > 0 {
        diy_fp_bignum.shift_left(diy_fp.e as usize);
    } else {
        buffer_bignum.shift_left((-diy_fp.e) as usize);
    }

    buffer_bignum.cmp(&diy_fp_bignum)
}
