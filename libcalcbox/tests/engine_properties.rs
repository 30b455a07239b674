//! Engine behavior over a spread of sample values
//!
//! Checks the arithmetic contract: rounding of every result, typed failures
//! for invalid operands, and display formatting limits.

use libcalcbox::engine::{
    calculate, format_display, parse_input, reciprocal, round_to_precision, square, square_root,
    MAX_DISPLAY_LENGTH,
};
use libcalcbox::{EngineError, Operator};

const SAMPLES: [f64; 10] = [
    0.0,
    1.0,
    -1.0,
    0.1,
    0.2,
    3.14159265,
    -2.5,
    1234.5678,
    1e-12,
    4.2e11,
];

#[test]
fn test_add_subtract_multiply_are_rounded() {
    for &a in &SAMPLES {
        for &b in &SAMPLES {
            assert_eq!(calculate(a, b, Operator::Add).unwrap(), round_to_precision(a + b));
            assert_eq!(calculate(a, b, Operator::Subtract).unwrap(), round_to_precision(a - b));
            assert_eq!(calculate(a, b, Operator::Multiply).unwrap(), round_to_precision(a * b));
        }
    }
}

#[test]
fn test_zero_divisor_always_fails() {
    for &a in &SAMPLES {
        assert_eq!(calculate(a, 0.0, Operator::Divide), Err(EngineError::DivisionByZero));
        assert_eq!(calculate(a, 0.0, Operator::Modulo), Err(EngineError::DivisionByZero));
    }
}

#[test]
fn test_square_root_rejects_negatives() {
    for v in [-0.0001, -1.0, -4.0, -1e12] {
        assert_eq!(square_root(v), Err(EngineError::InvalidInput));
    }
    assert_eq!(square_root(0.0).unwrap(), 0.0);
    assert_eq!(square_root(9.0).unwrap(), 3.0);
}

#[test]
fn test_reciprocal() {
    assert_eq!(reciprocal(0.0), Err(EngineError::DivisionByZero));
    assert_eq!(reciprocal(2.0).unwrap(), 0.5);
    assert_eq!(reciprocal(-2.0).unwrap(), -0.5);
    assert_eq!(reciprocal(3.0).unwrap(), 0.33333);
}

#[test]
fn test_square_is_rounded() {
    assert_eq!(square(0.1), 0.01);
    assert_eq!(square(1.000001), 1.0);
    assert_eq!(square(-12.0), 144.0);
}

#[test]
fn test_rounding_is_idempotent() {
    let values = [
        0.1 + 0.2,
        1.0 / 3.0,
        123456.789012,
        -98765.4321,
        1e12 + 0.123,
        3.3e-12,
        2.5e-7,
        7.0,
        -4.56789e15,
    ];
    for x in values {
        let once = round_to_precision(x);
        assert_eq!(round_to_precision(once), once, "rounding {} twice changed it", x);
    }
}

#[test]
fn test_format_display_special_values() {
    assert_eq!(format_display(f64::INFINITY), Err(EngineError::DivisionByZero));
    assert_eq!(format_display(f64::NAN), Err(EngineError::InvalidInput));
}

#[test]
fn test_formatted_results_fit_display() {
    for &a in &SAMPLES {
        for &b in &SAMPLES {
            let product = calculate(a, b, Operator::Multiply).unwrap();
            let text = format_display(product).unwrap();
            assert!(
                text.chars().count() <= MAX_DISPLAY_LENGTH,
                "'{}' is too long for the display",
                text
            );
        }
    }
}

#[test]
fn test_parse_input_failures() {
    assert_eq!(parse_input(""), Err(EngineError::InvalidInput));
    assert_eq!(parse_input("abc"), Err(EngineError::InvalidInput));
}

#[test]
fn test_parse_input_reads_display_text() {
    for text in ["0", "0.", "-8", "42.5", "1.00000e+16", "1e-7"] {
        assert!(parse_input(text).is_ok(), "failed to parse '{}'", text);
    }
}
