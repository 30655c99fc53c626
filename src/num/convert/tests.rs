#![cfg(all(test, feature = "dtoa", feature = "strtod"))]

use rand::Rng;

use super::*;
use crate::util::panic::assert_panics;

fn format(
    convert: impl FnOnce(&mut StringBuilder) -> Result<(), DtoaError>,
) -> Result<String, DtoaError> {
    let mut buffer = [0_u8; 256];
    let mut builder = StringBuilder::new(&mut buffer);
    convert(&mut builder)?;
    Ok(builder.finalize().to_string())
}

fn shortest(converter: &DoubleToStringConverter, v: f64) -> String {
    format(|builder| converter.to_shortest(v, builder)).expect("finite values always convert")
}

fn fixed(converter: &DoubleToStringConverter, v: f64, digits: usize) -> String {
    format(|builder| converter.to_fixed(v, digits, builder)).expect("value should be in range")
}

fn exponential(converter: &DoubleToStringConverter, v: f64, digits: Option<usize>) -> String {
    format(|builder| converter.to_exponential(v, digits, builder)).expect("value should be in range")
}

fn precision(converter: &DoubleToStringConverter, v: f64, digits: usize) -> String {
    format(|builder| converter.to_precision(v, digits, builder)).expect("value should be in range")
}

/// Parses `input`, returning the result and whatever is left of the input.
fn parse(converter: &StringToDoubleConverter, input: &str) -> (Result<f64, ParseError>, String) {
    let mut remaining = input.as_bytes();
    let result = converter.string_to_double(&mut remaining);
    (result, String::from_utf8_lossy(remaining).into_owned())
}

fn parse_float(converter: &StringToDoubleConverter, input: &str) -> Result<f32, ParseError> {
    let mut remaining = input.as_bytes();
    converter.string_to_float(&mut remaining)
}

fn random_double(rng: &mut impl Rng) -> f64 {
    loop {
        let v = f64::from_bits(rng.r#gen::<u64>());
        if v.is_finite() {
            return v;
        }
    }
}

#[test]
fn test_string_builder() {
    let mut buffer = [0_u8; 8];
    let mut builder = StringBuilder::new(&mut buffer);
    assert_eq!(builder.capacity(), 8);
    builder.add_character(b'-');
    builder.add_string("12");
    builder.add_substring(b".5");
    builder.add_padding(b'0', 2);
    assert_eq!(builder.position(), 7);
    assert_eq!(builder.as_str(), "-12.500");

    builder.reset();
    assert_eq!(builder.position(), 0);
    assert_eq!(builder.as_str(), "");
    builder.add_string("NaN");
    assert_eq!(builder.to_string(), "NaN");
    assert_eq!(builder.finalize(), "NaN");

    assert_panics!({
        let mut buffer = [0_u8; 2];
        let mut builder = StringBuilder::new(&mut buffer);
        builder.add_string("123");
    }, "Writing past the end should panic.");
    assert_panics!({
        let mut buffer = [0_u8; 4];
        let mut builder = StringBuilder::new(&mut buffer);
        builder.add_padding(b' ', 5);
    }, "Padding past the end should panic.");
    assert_panics!({
        let mut buffer = [0_u8; 4];
        let mut builder = StringBuilder::new(&mut buffer);
        builder.add_character(0xFF);
    }, "Non-ASCII bytes should panic.");
}

#[test]
fn test_to_shortest() {
    let converter = DoubleToStringConverter::new();
    let cases: [(f64, &str); 16] = [
        (0.1, "0.1"),
        (1.0, "1"),
        (-1.5, "-1.5"),
        (123.456, "123.456"),
        (0.000001, "0.000001"),
        (0.0000001, "1e-7"),
        (1.5e-7, "1.5e-7"),
        (111111.0, "111111"),
        (1e20, "100000000000000000000"),
        (1e21, "1e21"),
        (1.2345e25, "1.2345e25"),
        (f64::MAX, "1.7976931348623157e308"),
        (f64::MIN_POSITIVE, "2.2250738585072014e-308"),
        (5e-324, "5e-324"),
        (0.0, "0"),
        (-0.0, "-0"),
    ];
    for (v, expected) in cases {
        assert_eq!(shortest(&converter, v), expected, "Shortest of {v:?}.");
    }
}

#[test]
fn test_to_shortest_flags() {
    let ecma = DoubleToStringConverter::ecma_script();
    assert_eq!(shortest(&ecma, 1e21), "1e+21");
    assert_eq!(shortest(&ecma, 1.5e-7), "1.5e-7");
    assert_eq!(shortest(&ecma, -0.0), "0", "Unique zero should drop the sign.");
    assert_eq!(shortest(&ecma, -1.0), "-1");

    let mut converter = DoubleToStringConverter::new();
    converter.emit_trailing_decimal_point(true);
    assert_eq!(shortest(&converter, 2.0), "2.");
    assert_eq!(shortest(&converter, 2.5), "2.5");
    assert_eq!(shortest(&converter, 1e21), "1e21", "Exponential output should be unaffected.");
    converter.emit_trailing_zero_after_point(true);
    assert_eq!(shortest(&converter, 2.0), "2.0");
    assert_eq!(shortest(&converter, 1e20), "100000000000000000000.0");

    let mut converter = DoubleToStringConverter::new();
    converter
        .exponent_character(b'E')
        .decimal_in_shortest_low(-2)
        .decimal_in_shortest_high(3)
        .min_exponent_width(3);
    assert_eq!(shortest(&converter, 999.0), "999");
    assert_eq!(shortest(&converter, 1000.0), "1E003");
    assert_eq!(shortest(&converter, 0.01), "0.01");
    assert_eq!(shortest(&converter, 0.001), "1E-003");
    assert_eq!(shortest(&converter, 1.5e-300), "1.5E-300");
    converter.min_exponent_width(10);
    assert_eq!(shortest(&converter, 1e10), "1E00010", "Exponents should be padded to 5 at most.");
}

#[test]
fn test_special_values() {
    let converter = DoubleToStringConverter::new();
    assert_eq!(shortest(&converter, f64::INFINITY), "Infinity");
    assert_eq!(shortest(&converter, f64::NEG_INFINITY), "-Infinity");
    assert_eq!(shortest(&converter, f64::NAN), "NaN");
    assert_eq!(shortest(&converter, -f64::NAN), "NaN", "NaN should never be signed.");
    assert_eq!(fixed(&converter, f64::INFINITY, 2), "Infinity");
    assert_eq!(exponential(&converter, f64::NEG_INFINITY, Some(3)), "-Infinity");
    assert_eq!(precision(&converter, f64::NAN, 3), "NaN");

    let mut converter = DoubleToStringConverter::new();
    converter.infinity_symbol(Some("inf")).nan_symbol(None);
    assert_eq!(shortest(&converter, f64::NEG_INFINITY), "-inf");

    let mut buffer = [0_u8; 16];
    let mut builder = StringBuilder::new(&mut buffer);
    let result = converter.to_shortest(f64::NAN, &mut builder);
    assert!(
        result.is_err_and(|e| e.is_special_value_unsupported()),
        "NaN without a symbol should be refused."
    );
    assert_eq!(builder.position(), 0, "Nothing should be written on error.");
}

#[test]
fn test_to_shortest_single() {
    let converter = DoubleToStringConverter::new();
    let single = |v: f32| {
        format(|builder| converter.to_shortest_single(v, builder)).expect("finite values always convert")
    };
    assert_eq!(single(0.1), "0.1");
    assert_eq!(single(1.0 / 3.0), "0.33333334");
    assert_eq!(single(f32::MAX), "3.4028235e38");
    assert_eq!(single(f32::from_bits(1)), "1e-45");
    assert_eq!(single(-0.0), "-0");
    assert_eq!(single(f32::INFINITY), "Infinity");
}

#[test]
fn test_to_fixed() {
    let converter = DoubleToStringConverter::new();
    assert_eq!(fixed(&converter, 3.12, 1), "3.1");
    assert_eq!(fixed(&converter, 3.1415, 3), "3.142");
    assert_eq!(fixed(&converter, 1.25, 1), "1.3", "Ties should round up.");
    assert_eq!(fixed(&converter, 0.5, 0), "1", "Ties should round up.");
    assert_eq!(fixed(&converter, 2.5, 0), "3", "Ties should round up.");
    assert_eq!(fixed(&converter, 0.3, 0), "0");
    assert_eq!(fixed(&converter, 123.0, 2), "123.00");
    assert_eq!(fixed(&converter, 1.0 / 3.0, 4), "0.3333");
    assert_eq!(fixed(&converter, 0.005, 2), "0.01");
    assert_eq!(fixed(&converter, 1e-10, 5), "0.00000");
    assert_eq!(fixed(&converter, -0.001, 2), "-0.00");
    assert_eq!(fixed(&converter, 0.0, 0), "0");
    assert_eq!(fixed(&converter, -0.0, 2), "-0.00");
    assert_eq!(fixed(&converter, 99.999, 2), "100.00");
    assert_eq!(
        fixed(&converter, 1e59, 0),
        "99999999999999997168788049560464200849936328366177157906432"
    );
    assert_eq!(fixed(&converter, 1.0, 100), format!("1.{}", "0".repeat(100)));

    let ecma = DoubleToStringConverter::ecma_script();
    assert_eq!(fixed(&ecma, -0.0, 2), "0.00");

    let mut converter = DoubleToStringConverter::new();
    converter.emit_trailing_decimal_point(true);
    assert_eq!(fixed(&converter, 1.5, 0), "2.");
    assert_eq!(fixed(&converter, 1.5, 1), "1.5");
    converter.emit_trailing_zero_after_point(true);
    assert_eq!(fixed(&converter, 1.5, 0), "2.0");
}

#[test]
fn test_to_fixed_errors() {
    let converter = DoubleToStringConverter::new();
    assert_eq!(
        format(|builder| converter.to_fixed(1.0, 101, builder)),
        Err(DtoaError::DigitCountOutOfRange(DigitCountError {
            requested: 101,
            min: 0,
            max: MAX_FIXED_DIGITS_AFTER_POINT,
        }))
    );
    assert_eq!(
        format(|builder| converter.to_fixed(1e60, 0, builder)),
        Err(ValueOutOfRangeError.into())
    );
    assert_eq!(
        format(|builder| converter.to_fixed(-1e60, 0, builder)),
        Err(ValueOutOfRangeError.into())
    );
    assert!(format(|builder| converter.to_fixed(9.999999999999999e59, 0, builder)).is_ok());

    let error: DtoaError = ValueOutOfRangeError.into();
    assert_eq!(error.to_string(), "value is too large for fixed notation");
    assert!(ValueOutOfRangeError::try_from(error).is_ok());
}

#[test]
fn test_to_exponential() {
    let converter = DoubleToStringConverter::new();
    assert_eq!(exponential(&converter, 3.12, Some(1)), "3.1e0");
    assert_eq!(exponential(&converter, 5.0, Some(3)), "5.000e0");
    assert_eq!(exponential(&converter, 0.001, Some(2)), "1.00e-3");
    assert_eq!(exponential(&converter, 3.1415, Some(3)), "3.142e0");
    assert_eq!(exponential(&converter, 123456.0, None), "1.23456e5");
    assert_eq!(exponential(&converter, 1.0, Some(0)), "1e0");
    assert_eq!(exponential(&converter, 9.99, Some(1)), "1.0e1", "Carries should move the exponent.");
    assert_eq!(exponential(&converter, 0.0, Some(2)), "0.00e0");
    assert_eq!(exponential(&converter, -0.0, None), "-0e0");
    assert_eq!(exponential(&converter, 5e-324, Some(2)), "4.94e-324");

    let mut converter = DoubleToStringConverter::new();
    converter.emit_positive_exponent_sign(true);
    assert_eq!(exponential(&converter, 1234.5678, Some(2)), "1.23e+3");
    assert_eq!(exponential(&converter, 1234.5678, None), "1.2345678e+3");
    assert_eq!(exponential(&converter, 1.0, Some(0)), "1e+0");

    assert_eq!(
        format(|builder| converter.to_exponential(1.0, Some(121), builder)),
        Err(DigitCountError {
            requested: 121,
            min: 0,
            max: MAX_EXPONENTIAL_DIGITS,
        }
        .into())
    );
    assert!(format(|builder| converter.to_exponential(1.0, Some(120), builder)).is_ok());
}

#[test]
fn test_to_precision() {
    let converter = DoubleToStringConverter::new();
    assert_eq!(precision(&converter, 0.0000012345, 2), "0.0000012");
    assert_eq!(precision(&converter, 0.00000012345, 2), "1.2e-7");
    assert_eq!(precision(&converter, 230.0, 2), "2.3e2");
    assert_eq!(precision(&converter, 23.0, 2), "23");
    assert_eq!(precision(&converter, 2.3, 2), "2.3");
    assert_eq!(precision(&converter, 123.456, 4), "123.5");
    assert_eq!(precision(&converter, 1.0, 3), "1.00");
    assert_eq!(precision(&converter, 0.0, 1), "0");
    assert_eq!(precision(&converter, 0.0, 3), "0.00");
    assert_eq!(precision(&converter, -1.5, 2), "-1.5");
    assert_eq!(precision(&converter, 1e21, 3), "1.00e21");
    assert_eq!(precision(&converter, 0.5, 1), "0.5");

    for invalid in [0, MAX_PRECISION_DIGITS + 1] {
        assert_eq!(
            format(|builder| converter.to_precision(1.0, invalid, builder)),
            Err(DigitCountError {
                requested: invalid,
                min: MIN_PRECISION_DIGITS,
                max: MAX_PRECISION_DIGITS,
            }
            .into()),
            "Precision {invalid} should be refused."
        );
    }
}

#[test]
fn test_to_precision_padding() {
    let mut converter = DoubleToStringConverter::new();
    converter.max_trailing_padding_zeroes_in_precision_mode(2);
    assert_eq!(precision(&converter, 230.0, 2), "230");
    assert_eq!(precision(&converter, 2300.0, 2), "2300");
    assert_eq!(precision(&converter, 23000.0, 2), "2.3e4");

    let mut converter = DoubleToStringConverter::new();
    converter.max_leading_padding_zeroes_in_precision_mode(0);
    assert_eq!(precision(&converter, 0.5, 1), "5e-1");
    assert_eq!(precision(&converter, 1.5, 2), "1.5");

    let mut converter = DoubleToStringConverter::new();
    converter.emit_trailing_decimal_point(true);
    assert_eq!(precision(&converter, 23.0, 2), "23.");
    converter.emit_trailing_zero_after_point(true);
    assert_eq!(
        precision(&converter, 23.0, 2),
        "2.3e1",
        "The trailing zero should count as padding."
    );
}

#[test]
fn test_to_shortest_random() {
    let converter = DoubleToStringConverter::new();
    let parser = StringToDoubleConverter::new();
    let mut exponential_converter = DoubleToStringConverter::new();
    exponential_converter.decimal_in_shortest_low(0).decimal_in_shortest_high(0);

    let mut rng = rand::thread_rng();
    for _ in 0..2000 {
        let v = random_double(&mut rng);
        let text = shortest(&converter, v);
        let (parsed, rest) = parse(&parser, &text);
        assert_eq!(parsed, Ok(v), "{text} should read back as {v:e}.");
        assert!(rest.is_empty());
        assert_eq!(text.parse::<f64>(), Ok(v), "{text} should read back as {v:e}.");

        assert_eq!(shortest(&exponential_converter, v), format!("{v:e}"));
    }
}

#[test]
fn test_to_shortest_monotonic_random() {
    let converter = DoubleToStringConverter::new();
    let mut rng = rand::thread_rng();
    for _ in 0..2000 {
        let a = random_double(&mut rng).abs();
        let b = random_double(&mut rng).abs();
        if a == 0.0 || b == 0.0 || a == b {
            continue;
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let neighbour = f64::from_bits(low.to_bits() + 1);

        for (smaller, larger) in [(low, high), (low, neighbour), (-high, -low)] {
            let smaller_text = shortest(&converter, smaller);
            let larger_text = shortest(&converter, larger);
            let smaller_value: f64 = smaller_text.parse().expect("should be a valid float");
            let larger_value: f64 = larger_text.parse().expect("should be a valid float");
            assert!(
                smaller_value < larger_value,
                "{smaller_text} should stay below {larger_text}."
            );
        }
    }
}

#[test]
fn test_to_fixed_random() {
    let converter = DoubleToStringConverter::new();
    let mut rng = rand::thread_rng();
    for _ in 0..2000 {
        let v: f64 = rng.gen_range(-1e6..1e6);
        let digits = rng.gen_range(1..=15);
        assert_eq!(fixed(&converter, v, digits), format!("{v:.digits$}"), "{v:e} with {digits} digits.");
    }
}

#[test]
fn test_to_exponential_random() {
    let converter = DoubleToStringConverter::new();
    let mut rng = rand::thread_rng();
    for _ in 0..2000 {
        let v = random_double(&mut rng);
        let digits = rng.gen_range(0..=16);
        assert_eq!(
            exponential(&converter, v, Some(digits)),
            format!("{v:.digits$e}"),
            "{v:e} with {digits} digits."
        );
        assert_eq!(exponential(&converter, v, None), format!("{v:e}"));
    }
}

#[test]
fn test_string_to_double() {
    let converter = StringToDoubleConverter::new();
    let cases: [(&str, f64); 14] = [
        ("1.5", 1.5),
        ("-1.5", -1.5),
        ("+1.5", 1.5),
        (".5", 0.5),
        ("5.", 5.0),
        ("0", 0.0),
        ("000123", 123.0),
        ("0.1", 0.1),
        ("1e10", 1e10),
        ("1E+10", 1e10),
        ("1e-10", 1e-10),
        ("123.456e-2", 1.23456),
        ("0.000123", 0.000123),
        ("2.2250738585072011e-308", 2.225073858507201e-308),
    ];
    for (input, expected) in cases {
        assert_eq!(parse(&converter, input), (Ok(expected), String::new()), "Parsing {input}.");
    }

    let (negative_zero, _) = parse(&converter, "-0");
    assert!(negative_zero.is_ok_and(|v| v == 0.0 && v.is_sign_negative()), "-0 should keep its sign.");
}

#[test]
fn test_string_to_double_no_digits() {
    let converter = StringToDoubleConverter::new();
    for input in ["", "   ", "+", "-", ".", "+.", "-.e5", "e5", "abc", " 1"] {
        assert_eq!(
            parse(&converter, input),
            (Err(NoDigitsError.into()), input.to_string()),
            "Parsing {input:?} should fail without consuming anything."
        );
    }
}

#[test]
fn test_string_to_double_junk() {
    let converter = StringToDoubleConverter::new();
    assert_eq!(parse(&converter, "12abc"), (Ok(12.0), "abc".to_string()));
    assert_eq!(parse(&converter, "1.5.5"), (Ok(1.5), ".5".to_string()));
    assert_eq!(parse(&converter, "1e"), (Ok(1.0), "e".to_string()), "A lone e isn't an exponent.");
    assert_eq!(parse(&converter, "1e+"), (Ok(1.0), "e+".to_string()));
    assert_eq!(parse(&converter, "1e-x"), (Ok(1.0), "e-x".to_string()));
    assert_eq!(parse(&converter, "1.5E"), (Ok(1.5), "E".to_string()));
    assert_eq!(parse(&converter, "1e5e5"), (Ok(1e5), "e5".to_string()));

    let mut converter = StringToDoubleConverter::new();
    converter.allow_trailing_junk(false);
    assert_eq!(parse(&converter, "12"), (Ok(12.0), String::new()));
    for input in ["12abc", "1e", "1e+", "1.5 "] {
        assert_eq!(
            parse(&converter, input),
            (Err(TrailingJunkError.into()), input.to_string()),
            "Parsing {input:?} should fail without consuming anything."
        );
    }
}

#[test]
fn test_string_to_double_spaces() {
    let mut converter = StringToDoubleConverter::new();
    converter.allow_trailing_junk(false);
    assert_eq!(parse(&converter, " 1.5").0, Err(NoDigitsError.into()));
    assert_eq!(parse(&converter, "- 1").0, Err(NoDigitsError.into()));

    converter
        .allow_leading_spaces(true)
        .allow_trailing_spaces(true)
        .allow_spaces_after_sign(true);
    assert_eq!(parse(&converter, " \t1.5\n "), (Ok(1.5), String::new()));
    assert_eq!(parse(&converter, "- 1"), (Ok(-1.0), String::new()));
    assert_eq!(parse(&converter, "   ").0, Err(NoDigitsError.into()));
    assert_eq!(parse(&converter, "1.5 x").0, Err(TrailingJunkError.into()));

    converter.allow_trailing_junk(true);
    assert_eq!(parse(&converter, "1.5  x"), (Ok(1.5), "x".to_string()));
}

#[test]
fn test_string_to_double_limits() {
    let converter = StringToDoubleConverter::new();
    assert_eq!(parse(&converter, "1e400").0, Ok(f64::INFINITY));
    assert_eq!(parse(&converter, "-1e400").0, Ok(f64::NEG_INFINITY));
    assert_eq!(parse(&converter, "1e-400").0, Ok(0.0));
    assert_eq!(parse(&converter, "1e99999999999999999999").0, Ok(f64::INFINITY));
    assert_eq!(parse(&converter, "1e-99999999999999999999").0, Ok(0.0));
    assert_eq!(parse(&converter, "0e99999999999999999999").0, Ok(0.0));
    assert_eq!(parse(&converter, "1.7976931348623157e308").0, Ok(f64::MAX));
    assert_eq!(parse(&converter, "5e-324").0, Ok(f64::from_bits(1)));

    let above = format!("9007199254740993.{}1", "0".repeat(800));
    assert_eq!(parse(&converter, &above).0, Ok(9007199254740994.0), "Dropped digits should round up.");
    let huge = format!("9007199254740993{}", "0".repeat(800));
    assert_eq!(parse(&converter, &huge).0, Ok(f64::INFINITY));
    let tie = format!("9007199254740993.{}", "0".repeat(800));
    assert_eq!(parse(&converter, &tie).0, Ok(9007199254740992.0), "Ties should go to even.");
    let tiny = format!("0.{}1e1001", "0".repeat(1000));
    assert_eq!(parse(&converter, &tiny).0, Ok(1.0));
    let huge = format!("1{}", "0".repeat(300));
    assert_eq!(parse(&converter, &huge).0, Ok(1e300));
}

#[test]
fn test_string_to_double_hex() {
    let mut converter = StringToDoubleConverter::new();
    assert_eq!(parse(&converter, "0x1F"), (Ok(0.0), "x1F".to_string()), "Hex should be opt in.");

    converter.allow_hex(true);
    assert_eq!(parse(&converter, "0x1F").0, Ok(31.0));
    assert_eq!(parse(&converter, "0X1f").0, Ok(31.0));
    assert_eq!(parse(&converter, "-0x10").0, Ok(-16.0));
    assert_eq!(parse(&converter, "0x"), (Ok(0.0), "x".to_string()));
    assert_eq!(parse(&converter, "0x1G"), (Ok(1.0), "G".to_string()));
    assert_eq!(parse(&converter, "0xFFFFFFFFFFFFFFFF").0, Ok(18446744073709551616.0));
    assert_eq!(parse(&converter, "0x20000000000001").0, Ok(9007199254740992.0), "Ties should go to even.");
    assert_eq!(parse(&converter, "0x20000000000003").0, Ok(9007199254740996.0), "Ties should go to even.");

    let two_57 = 2_f64.powi(57);
    assert_eq!(parse(&converter, "0x200000000000010").0, Ok(two_57));
    assert_eq!(parse(&converter, "0x200000000000011").0, Ok(two_57 + 32.0));
    assert_eq!(parse(&converter, "0x200000000000030").0, Ok(two_57 + 64.0));
    assert_eq!(parse(&converter, &format!("0x1{}", "0".repeat(300))).0, Ok(f64::INFINITY));

    assert_eq!(parse_float(&converter, "0x1000001"), Ok(16777216.0));
    assert_eq!(parse_float(&converter, "0x1000003"), Ok(16777220.0));
}

#[test]
fn test_string_to_double_symbols() {
    let ecma = StringToDoubleConverter::ecma_script();
    assert_eq!(parse(&ecma, "Infinity").0, Ok(f64::INFINITY));
    assert_eq!(parse(&ecma, " -Infinity ").0, Ok(f64::NEG_INFINITY));
    assert_eq!(parse(&ecma, " 12 ").0, Ok(12.0));
    assert_eq!(parse(&ecma, "0x1F").0, Ok(31.0));
    assert_eq!(parse(&ecma, "12 x").0, Err(TrailingJunkError.into()));
    assert_eq!(parse(&ecma, "NaN").0, Err(NoDigitsError.into()));
    assert_eq!(parse(&ecma, "infinity").0, Err(NoDigitsError.into()));

    let mut converter = StringToDoubleConverter::new();
    converter.infinity_symbol(Some("inf")).nan_symbol(Some("nan"));
    assert!(parse(&converter, "nan").0.is_ok_and(f64::is_nan));
    assert!(parse(&converter, "-nan").0.is_ok_and(|v| v.is_nan() && v.is_sign_negative()));
    assert_eq!(parse(&converter, "infinity"), (Ok(f64::INFINITY), "inity".to_string()));
    assert_eq!(parse(&converter, "INF").0, Err(NoDigitsError.into()));

    converter.allow_case_insensitivity(true);
    assert_eq!(parse(&converter, "INF").0, Ok(f64::INFINITY));
    assert!(parse(&converter, "NaN").0.is_ok_and(f64::is_nan));
}

#[test]
fn test_string_to_double_empty_symbols() {
    let mut converter = StringToDoubleConverter::new();
    converter.infinity_symbol(Some("")).nan_symbol(Some(""));
    assert_eq!(parse(&converter, "123"), (Ok(123.0), String::new()), "Empty symbols shouldn't match.");
    assert_eq!(parse(&converter, "-1.5x"), (Ok(-1.5), "x".to_string()));
    assert_eq!(parse(&converter, "").0, Err(NoDigitsError.into()));
    assert_eq!(parse(&converter, "-").0, Err(NoDigitsError.into()));
    assert_eq!(parse(&converter, "x"), (Err(NoDigitsError.into()), "x".to_string()));
}

#[test]
fn test_string_to_float() {
    let converter = StringToDoubleConverter::new();
    assert_eq!(parse_float(&converter, "0.1"), Ok(0.1));
    assert_eq!(parse_float(&converter, "-0.1"), Ok(-0.1));
    assert_eq!(parse_float(&converter, "1e39"), Ok(f32::INFINITY));
    assert_eq!(parse_float(&converter, "3.4028235e38"), Ok(f32::MAX));
    assert_eq!(parse_float(&converter, "1e-46"), Ok(0.0));
    assert_eq!(parse_float(&converter, "1.000000059604644775390625000001"), Ok(1.0000001));
    assert_eq!(parse_float(&converter, "1.000000059604644775390625"), Ok(1.0));
    assert_eq!(parse_float(&converter, ""), Err(NoDigitsError.into()));
}

#[test]
fn test_string_to_double_random() {
    let converter = StringToDoubleConverter::new();
    let mut rng = rand::thread_rng();
    for _ in 0..2000 {
        let v = random_double(&mut rng);
        for text in [format!("{v}"), format!("{v:e}"), format!("{v:.30e}"), format!("{v:?}")] {
            assert_eq!(parse(&converter, &text), (Ok(v), String::new()), "Parsing {text}.");
        }

        let integrals = rng.gen_range(0..25);
        let fractionals = rng.gen_range(1..25);
        let exponent = rng.gen_range(-330..330);
        let text = format!(
            "{}.{}e{exponent}",
            (0..integrals).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect::<String>(),
            (0..fractionals).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect::<String>(),
        );
        let expected: f64 = text.parse().expect("should be a valid float");
        assert_eq!(parse(&converter, &text).0, Ok(expected), "Parsing {text}.");

        let expected: f32 = text.parse().expect("should be a valid float");
        assert_eq!(parse_float(&converter, &text), Ok(expected), "Parsing {text} as a single.");
    }
}
