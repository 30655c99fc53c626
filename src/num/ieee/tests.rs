#![cfg(test)]

use super::cached_powers::{self, DECIMAL_EXPONENT_DISTANCE, MAX_DECIMAL_EXPONENT, MIN_DECIMAL_EXPONENT};
use super::*;
use crate::util::panic::assert_panics;

#[test]
fn test_diy_fp_arithmetic() {
    let difference = DiyFp::new(10, 3) - DiyFp::new(3, 3);
    assert_eq!(difference, DiyFp::new(7, 3));

    let one = DiyFp::new(1 << 63, -63);
    assert_eq!(one * one, DiyFp::new(1 << 62, -62), "One times one should still be one.");

    assert_eq!(
        DiyFp::new(3, 0) * DiyFp::new(1 << 63, 0),
        DiyFp::new(2, 64),
        "Multiplication should round half up."
    );
    assert_eq!(
        DiyFp::new(u64::MAX, 0) * DiyFp::new(u64::MAX, 0),
        DiyFp::new(u64::MAX - 1, 64)
    );

    assert_eq!(DiyFp::new(1, 0).normalize(), DiyFp::new(1 << 63, -63));
    assert_eq!(DiyFp::new(0x1234, 10).normalize(), DiyFp::new(0x1234 << 51, -41));
    assert_panics!({
        DiyFp::new(0, 0).normalize();
    }, "Normalizing zero should panic.");
}

#[test]
fn test_double_accessors() {
    let one = Double::new(1.0);
    assert_eq!(one.to_bits(), 0x3FF0_0000_0000_0000);
    assert_eq!(one.sign(), 1);
    assert_eq!(one.significand(), 1 << 52);
    assert_eq!(one.exponent(), -52, "1.0 should be 2^52 * 2^-52.");
    assert!(!one.is_denormal());

    let min = Double::new(5e-324);
    assert!(min.is_denormal(), "The smallest positive double is subnormal.");
    assert_eq!(min.significand(), 1);
    assert_eq!(min.exponent(), Double::DENORMAL_EXPONENT);

    let negative = Double::new(-2.5);
    assert_eq!(negative.sign(), -1);
    assert_eq!(Double::new(-0.0).sign(), -1, "Negative zero still has its sign.");
    assert!(Double::new(-0.0).is_zero());
    assert!(!negative.is_zero());

    assert!(Double::new(f64::INFINITY).is_special());
    assert!(Double::new(f64::INFINITY).is_infinite());
    assert!(!Double::new(f64::INFINITY).is_nan());
    assert!(Double::new(f64::NAN).is_nan());
    assert!(!Double::new(f64::MAX).is_special());
    assert_eq!(Double::infinity(), f64::INFINITY);
    assert!(Double::nan().is_nan());
}

#[test]
fn test_double_diy_fp() {
    assert_eq!(Double::new(1.0).to_exact_diy_fp(), DiyFp::new(1 << 52, -52));
    assert_eq!(
        Double::new(1.0).as_normalized_diy_fp(),
        DiyFp::new(1 << 63, -63)
    );
    assert_eq!(
        Double::new(5e-324).as_normalized_diy_fp(),
        DiyFp::new(1 << 63, -1137),
        "Subnormals should be normalized past the hidden bit."
    );

    assert_eq!(Double::from_diy_fp(DiyFp::new(1, 0)).value(), 1.0);
    assert_eq!(Double::from_diy_fp(DiyFp::new(1, -1074)).value(), 5e-324);
    assert_eq!(
        Double::from_diy_fp(DiyFp::new(1, -1075)).value(),
        0.0,
        "Values below the smallest subnormal should become zero."
    );
    assert_eq!(Double::from_diy_fp(DiyFp::new(1 << 52, 971)).value(), 2.0_f64.powi(1023));
    assert_eq!(
        Double::from_diy_fp(DiyFp::new(1 << 53, 971)).value(),
        f64::INFINITY,
        "Values above the largest double should become infinity."
    );
    assert_eq!(
        Double::from_diy_fp(DiyFp::new(u64::MAX, 0)).value(),
        ((1_u64 << 53) - 1) as f64 * 2048.0,
        "Excess significand bits should be truncated."
    );
}

#[test]
fn test_double_neighbours() {
    assert_eq!(Double::new(1.0).next_double(), 1.0 + f64::EPSILON);
    assert_eq!(Double::new(1.0).previous_double(), 1.0 - f64::EPSILON / 2.0);
    assert_eq!(Double::new(0.0).next_double(), 5e-324);
    assert_eq!(Double::new(0.0).previous_double().to_bits(), (-0.0_f64).to_bits());
    assert_eq!(Double::new(-0.0).next_double().to_bits(), 0);
    assert_eq!(Double::new(-5e-324).next_double().to_bits(), (-0.0_f64).to_bits());
    assert_eq!(Double::new(f64::MAX).next_double(), f64::INFINITY);
    assert_eq!(Double::new(f64::INFINITY).next_double(), f64::INFINITY);
    assert_eq!(Double::new(f64::NEG_INFINITY).previous_double(), f64::NEG_INFINITY);
    assert_eq!(Double::new(-1.0).previous_double(), -1.0 - f64::EPSILON);
}

#[test]
fn test_double_boundaries() {
    assert!(Double::new(1.0).lower_boundary_is_closer());
    assert!(!Double::new(1.5).lower_boundary_is_closer());
    assert!(
        !Double::new(f64::MIN_POSITIVE).lower_boundary_is_closer(),
        "Below the smallest normal the gap doesn't shrink."
    );

    let (m_minus, m_plus) = Double::new(1.0).normalized_boundaries();
    assert_eq!(m_plus, DiyFp::new(0x8000_0000_0000_0400, -63));
    assert_eq!(
        m_minus,
        DiyFp::new(0x7FFF_FFFF_FFFF_FE00, -63),
        "The lower boundary of a power of two should be a quarter ulp away."
    );

    let (m_minus, m_plus) = Double::new(1.5).normalized_boundaries();
    assert_eq!(m_plus.f - (3 << 62), (3 << 62) - m_minus.f, "Boundaries should be symmetric.");

    assert_eq!(Double::new(1.0).upper_boundary(), DiyFp::new((1 << 53) + 1, -53));

    assert_eq!(Double::significand_size_for_order_of_magnitude(0), 53);
    assert_eq!(Double::significand_size_for_order_of_magnitude(-1074), 0);
    assert_eq!(Double::significand_size_for_order_of_magnitude(-1070), 4);
}

#[test]
fn test_single() {
    let one = Single::new(1.0);
    assert_eq!(one.significand(), 1 << 23);
    assert_eq!(one.exponent(), -23);
    assert!(one.lower_boundary_is_closer());
    assert_eq!(Single::new(1e-45).exponent(), Single::DENORMAL_EXPONENT);
    assert!(Single::new(1e-45).is_denormal());
    assert!(Single::new(f32::NAN).is_nan());
    assert!(Single::new(f32::NEG_INFINITY).is_infinite());
    assert_eq!(Single::new(-3.0).sign(), -1);
    assert_eq!(Single::new(1.0).upper_boundary(), DiyFp::new((1 << 24) + 1, -24));

    let (m_minus, m_plus) = Single::new(1.0).normalized_boundaries();
    assert_eq!(m_plus.e, m_minus.e);
    assert_eq!(m_plus.f, ((1 << 24) + 1) << 39);
    assert_eq!(m_minus.f, ((1 << 25) - 1) << 38);
}

#[test]
fn test_cached_powers_for_decimal_exponent() {
    let mut requested = MIN_DECIMAL_EXPONENT;
    while requested < MAX_DECIMAL_EXPONENT + DECIMAL_EXPONENT_DISTANCE {
        let (power, found) = cached_powers::for_decimal_exponent(requested);
        assert!(
            found <= requested && requested < found + DECIMAL_EXPONENT_DISTANCE,
            "Found exponent {found} should be at most {DECIMAL_EXPONENT_DISTANCE} below {requested}."
        );
        assert!(power.f >> 63 == 1, "Cached powers should be normalized.");

        let log10 = (power.f as f64).log10() + power.e as f64 * 2.0_f64.log10();
        assert!(
            (log10 - found as f64).abs() < 1e-9,
            "The cached power for 10^{found} has the wrong magnitude."
        );
        requested += 3;
    }

    assert_panics!({
        cached_powers::for_decimal_exponent(MIN_DECIMAL_EXPONENT - 1);
    });
}

#[test]
fn test_cached_powers_for_binary_exponent_range() {
    for e in -1137..=960 {
        let w = DiyFp::new(1 << 63, e);
        let min = -60 - (w.e + DiyFp::SIGNIFICAND_SIZE);
        let max = -32 - (w.e + DiyFp::SIGNIFICAND_SIZE);
        let (power, _) = cached_powers::for_binary_exponent_range(min, max);
        let scaled = w * power;
        assert!(
            (-60..=-32).contains(&scaled.e),
            "Scaling 2^{e} should land in the target exponent range, got {}.",
            scaled.e
        );
    }
}
