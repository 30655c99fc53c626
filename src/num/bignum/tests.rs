#![cfg(test)]

use std::cmp::Ordering;

use num_bigint::BigUint;
use rand::Rng;

use super::*;
use crate::util::panic::assert_panics;

fn hex(big: &Bignum) -> String {
    format!("{:X}", big)
}

fn from_decimal(digits: &str) -> Bignum {
    let mut big = Bignum::new();
    big.assign_decimal_string(digits.as_bytes());
    big
}

fn from_hex(digits: &str) -> Bignum {
    let mut big = Bignum::new();
    big.assign_hex_string(digits.as_bytes());
    big
}

/// Builds `value * 2^shift` for a value and shift small enough to fit into a u128.
fn shifted(value: u32, shift: usize) -> (Bignum, u128) {
    let mut big = Bignum::from(value as u64);
    big.shift_left(shift);
    (big, (value as u128) << shift)
}

/// A random decimal Bignum of up to `max_digits` digits, shifted by a random number of bits so
/// that the exponents differ, along with the same value as a [`BigUint`].
fn random_big(rng: &mut impl Rng, max_digits: usize) -> (Bignum, BigUint) {
    let digits: String = (0..rng.gen_range(1..max_digits))
        .map(|_| char::from(rng.gen_range(b'0'..=b'9')))
        .collect();
    let shift = rng.gen_range(0..100);

    let mut big = from_decimal(&digits);
    big.shift_left(shift);
    let value = digits.parse::<BigUint>().expect("should be a valid integer") << shift;
    (big, value)
}

#[test]
fn test_assign() {
    let mut big = Bignum::new();
    assert_eq!(hex(&big), "0", "A new Bignum should be zero.");

    big.assign_u16(0xA);
    assert_eq!(hex(&big), "A");

    big.assign_u64(0xFFFF_FFFF_FFFF_FFFF);
    assert_eq!(
        hex(&big),
        "FFFFFFFFFFFFFFFF",
        "A full u64 should be split over three bigits without losing bits."
    );

    big.assign_u64(0);
    assert!(big.is_zero(), "Assigning zero should clear all bigits.");

    let mut other = Bignum::new();
    other.assign_hex_string(b"123456789ABCDEF0123456789");
    big.assign_bignum(&other);
    assert_eq!(hex(&big), "123456789ABCDEF0123456789");
    assert_eq!(big, other, "An assigned copy should compare equal.");
}

#[test]
fn test_assign_strings() {
    assert_eq!(hex(&from_decimal("0")), "0");
    assert_eq!(hex(&from_decimal("000000")), "0", "Leading zeros should be ignored.");
    assert_eq!(hex(&from_decimal("1000000000000000000000")), "3635C9ADC5DEA00000");
    assert_eq!(
        hex(&from_decimal("12345678901234567890123456789")),
        "27E41B3246BEC9B16E398115",
        "Values spanning multiple 19 digit chunks should be assembled in order."
    );

    assert_eq!(hex(&from_hex("0")), "0");
    assert_eq!(hex(&from_hex("00000001")), "1");
    assert_eq!(
        hex(&from_hex("abcdef0123456789")),
        "ABCDEF0123456789",
        "Lower case hex digits should be accepted."
    );
    assert_eq!(hex(&from_hex("1000000")), "1000000");
    assert_eq!(hex(&from_hex("10000000")), "10000000", "Bigit boundaries shouldn't drop bits.");

    assert_panics!({
        from_decimal("12a4");
    }, "A non-digit character should panic.");
    assert_panics!({
        from_hex("xyz");
    }, "A non-hex character should panic.");
}

#[test]
fn test_add_subtract() {
    let mut big = from_hex("FFFFFFF");
    big.add_u16(1);
    assert_eq!(hex(&big), "10000000", "A carry should create a new bigit.");

    let mut big = Bignum::from(1);
    big.shift_left(500);
    big.add_u64(1);
    let mut expected = "1".to_string() + &"0".repeat(124);
    expected.push('1');
    assert_eq!(
        hex(&big),
        expected,
        "Adding below the exponent should materialize the implicit zero bigits."
    );

    let mut big = Bignum::from(1);
    let mut other = Bignum::from(1);
    other.shift_left(280);
    big.add_bignum(&other);
    assert_eq!(hex(&big), "1".to_string() + &"0".repeat(69) + "1");

    let mut big = from_decimal("100000000000000000000");
    big.subtract_bignum(&Bignum::from(12345678901234567));
    assert_eq!(hex(&big), "56B9B81D905A4B479");

    let mut big = Bignum::from(1);
    big.shift_left(300);
    let copy = big.clone();
    big.subtract_bignum(&copy);
    assert!(big.is_zero(), "Subtracting a value from itself should give zero.");

    let mut big = Bignum::from(1);
    big.shift_left(300);
    big.subtract_bignum(&Bignum::from(1));
    assert_eq!(
        hex(&big),
        "F".repeat(75),
        "A borrow should ripple through every bigit."
    );
}

#[test]
fn test_multiply() {
    let mut big = from_hex("FFFFFFFFFFFFFFFF");
    big.multiply_by_u32(0x10);
    assert_eq!(hex(&big), "FFFFFFFFFFFFFFFF0");

    big.multiply_by_u64(0x1_0000_0000);
    assert_eq!(hex(&big), "FFFFFFFFFFFFFFFF000000000");

    big.multiply_by_u32(0);
    assert!(big.is_zero(), "Multiplying by zero should give zero.");

    let mut big = Bignum::from(1);
    big.multiply_by_power_of_ten(20);
    assert_eq!(big, from_decimal("100000000000000000000"));

    let mut big = Bignum::from(7);
    big.multiply_by_power_of_ten(100);
    assert_eq!(
        big,
        from_decimal(&("7".to_string() + &"0".repeat(100))),
        "Multiplying by a large power of ten should use every power of five step."
    );

    let mut big = Bignum::from(3);
    big.times_10();
    assert_eq!(big, Bignum::from(30));
}

#[test]
fn test_shift_and_square() {
    let mut big = Bignum::from(1);
    big.shift_left(1);
    assert_eq!(hex(&big), "2");
    big.shift_left(27);
    assert_eq!(hex(&big), "10000000");

    let mut big = Bignum::new();
    big.shift_left(100);
    assert!(big.is_zero(), "Shifting zero should keep it zero.");

    let mut big = from_hex("FFFFFFF");
    big.shift_left(56);
    big.square();
    assert_eq!(hex(&big), "FFFFFFE00000010000000000000000000000000000");
}

#[test]
fn test_assign_power() {
    let mut big = Bignum::new();
    big.assign_power_u16(2, 0);
    assert_eq!(hex(&big), "1", "Anything to the power of zero should be one.");

    big.assign_power_u16(2, 100);
    assert_eq!(hex(&big), "1".to_string() + &"0".repeat(25));

    big.assign_power_u16(10, 20);
    assert_eq!(big, from_decimal("100000000000000000000"));

    big.assign_power_u16(7, 50);
    assert_eq!(hex(&big), "14A536B7F4F2EE2C87C895C99147DD9DD0B1");

    big.assign_power_u16(3, 200);
    assert_eq!(
        hex(&big),
        "1FD5863C3EB0469EC21A937A76F3432FFD73D97E447606B683ECF6F6E4A7AE225BFAFF1EAAF8B0A1",
        "Powers that outgrow a u64 should continue by squaring the Bignum."
    );

    big.assign_power_u16(5, 100);
    assert_eq!(hex(&big), "1249AD2594C37CEB0B2784C4CE0BF38ACE408E211A7CAAB24308A82E8F1");

    assert_panics!({
        Bignum::new().assign_power_u16(2, 4000);
    }, "Exceeding the capacity should panic.");
}

#[test]
fn test_divide_modulo() {
    let mut big = from_decimal("10000000000000000000000000000000000000007");
    let other = from_decimal("1000000000000000000000000000000000000003");
    assert_eq!(big.divide_modulo_int_bignum(&other), 9);
    assert_eq!(
        hex(&big),
        "2F050FE938943ACC45F65567FFFFFFFEC",
        "The remainder should be left behind."
    );

    let mut big = Bignum::from(15);
    big.shift_left(300);
    big.add_u64(12345);
    let mut other = Bignum::from(1);
    other.shift_left(300);
    other.add_u64(1);
    assert_eq!(big.divide_modulo_int_bignum(&other), 15);
    assert_eq!(big, Bignum::from(12330));

    let mut big = Bignum::from(5);
    assert_eq!(
        big.divide_modulo_int_bignum(&Bignum::from(6)),
        0,
        "A smaller dividend should give a zero quotient."
    );
    assert_eq!(big, Bignum::from(5));

    let mut big = Bignum::from(1);
    big.shift_left(200);
    let copy = big.clone();
    assert_eq!(big.divide_modulo_int_bignum(&copy), 1);
    assert!(big.is_zero());

    assert_panics!({
        Bignum::from(1).divide_modulo_int_bignum(&Bignum::new());
    }, "Dividing by zero should panic.");
}

#[test]
fn test_compare() {
    let small = Bignum::from(1);
    let mut large = Bignum::from(1);
    large.shift_left(28);
    assert_eq!(Bignum::compare(&small, &large), Ordering::Less);
    assert_eq!(Bignum::compare(&large, &small), Ordering::Greater);
    assert!(Bignum::less(&small, &large));
    assert!(Bignum::less_equal(&small, &small));
    assert!(!Bignum::less(&small, &small));

    // Same value, different representation.
    let mut shifted = Bignum::from(1);
    shifted.shift_left(56);
    let assigned = from_hex("100000000000000");
    assert!(
        Bignum::equal(&shifted, &assigned),
        "Values should compare equal regardless of their exponent."
    );
    assert_eq!(shifted.cmp(&assigned), Ordering::Equal);
}

#[test]
fn test_compare_random() {
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let (a, a_value) = random_big(&mut rng, 60);
        let (b, b_value) = random_big(&mut rng, 60);
        assert_eq!(
            Bignum::compare(&a, &b),
            a_value.cmp(&b_value),
            "Comparison of {a_value} and {b_value} should match BigUint."
        );
        assert_eq!(Bignum::equal(&a, &b), a_value == b_value);
        assert_eq!(Bignum::less_equal(&a, &b), a_value <= b_value);
    }
}

#[test]
fn test_plus_compare() {
    let a = Bignum::from(5);
    let b = Bignum::from(7);
    assert_eq!(Bignum::plus_compare(&a, &b, &Bignum::from(11)), Ordering::Greater);
    assert_eq!(Bignum::plus_compare(&a, &b, &Bignum::from(12)), Ordering::Equal);
    assert_eq!(Bignum::plus_compare(&a, &b, &Bignum::from(13)), Ordering::Less);

    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let (a, a_value) = shifted(rng.r#gen(), rng.gen_range(0..64));
        let (b, b_value) = shifted(rng.r#gen(), rng.gen_range(0..64));
        // Bias c towards the sum so that the close cases get exercised.
        let (c, c_value) = if rng.gen_bool(0.5) {
            shifted(rng.r#gen(), rng.gen_range(0..64))
        } else {
            let sum = a_value + b_value;
            let adjusted = match rng.gen_range(0..3) {
                0 => sum.saturating_sub(1),
                1 => sum,
                _ => sum + 1,
            };
            let mut c = Bignum::new();
            c.assign_u64((adjusted >> 64) as u64);
            c.shift_left(64);
            c.add_u64(adjusted as u64);
            (c, adjusted)
        };

        assert_eq!(
            Bignum::plus_compare(&a, &b, &c),
            (a_value + b_value).cmp(&c_value),
            "plus_compare({a:?}, {b:?}, {c:?}) should match u128 arithmetic."
        );
    }
}

#[test]
fn test_plus_compare_random() {
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let (a, a_value) = random_big(&mut rng, 120);
        let (b, b_value) = random_big(&mut rng, 120);
        let sum = &a_value + &b_value;

        // Mostly values right around the sum, where the comparison gets interesting.
        let c_value = match rng.gen_range(0..4) {
            0 => random_big(&mut rng, 120).1,
            1 if sum.bits() > 0 => &sum - 1_u32,
            2 => &sum + 1_u32,
            _ => sum.clone(),
        };
        let mut c = Bignum::new();
        c.assign_decimal_string(c_value.to_string().as_bytes());

        assert_eq!(
            Bignum::plus_compare(&a, &b, &c),
            sum.cmp(&c_value),
            "{a_value} + {b_value} against {c_value} should match BigUint."
        );
    }
}

#[test]
fn test_capacity() {
    let mut big = from_hex(&"F".repeat(MAX_SIGNIFICANT_BITS / 4));
    assert_panics!({
        big.multiply_by_u32(16);
    }, "Overflowing the bigit storage should panic.");

    let digits = "9".repeat(2000);
    assert_panics!({
        from_decimal(&digits);
    }, "A decimal string above the capacity should panic.");
}
