//! Arithmetic engine
//!
//! Pure functions for evaluating operators, rounding results and turning
//! numbers into display text. Every failure is returned as an
//! [`EngineError`] so callers never render `NaN` or `Infinity` literally.
//!
//! # Example
//!
//! ```
//! use libcalcbox::engine;
//! use libcalcbox::types::Operator;
//!
//! let sum = engine::calculate(0.1, 0.2, Operator::Add).unwrap();
//! assert_eq!(engine::format_display(sum).unwrap(), "0.3");
//! ```

use crate::error::EngineError;
use crate::types::{Operator, UnaryOp};

/// Decimal places kept by [`round_to_precision`], and fractional digits in
/// scientific notation.
pub const PRECISION: usize = 5;

/// Longest display text shown verbatim before switching to scientific notation.
pub const MAX_DISPLAY_LENGTH: usize = 16;

/// Magnitudes above this are rounded through scientific notation.
pub const SCIENTIFIC_UPPER: f64 = 1e10;

/// Non-zero magnitudes below this are rounded through scientific notation.
pub const SCIENTIFIC_LOWER: f64 = 1e-10;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Apply a binary operator and round the result
pub fn calculate(a: f64, b: f64, op: Operator) -> EngineResult<f64> {
    let result = match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => {
            if b == 0.0 {
                return Err(EngineError::DivisionByZero);
            }
            a / b
        }
        Operator::Modulo => {
            if b == 0.0 {
                return Err(EngineError::DivisionByZero);
            }
            // Truncating remainder: the sign follows the dividend
            a % b
        }
    };

    Ok(round_to_precision(result))
}

pub fn square_root(value: f64) -> EngineResult<f64> {
    if value < 0.0 {
        return Err(EngineError::InvalidInput);
    }
    Ok(round_to_precision(value.sqrt()))
}

pub fn square(value: f64) -> f64 {
    round_to_precision(value * value)
}

pub fn reciprocal(value: f64) -> EngineResult<f64> {
    if value == 0.0 {
        return Err(EngineError::DivisionByZero);
    }
    Ok(round_to_precision(1.0 / value))
}

/// Dispatch a [`UnaryOp`] to its engine function
pub fn apply_unary(op: UnaryOp, value: f64) -> EngineResult<f64> {
    match op {
        UnaryOp::SquareRoot => square_root(value),
        UnaryOp::Square => Ok(square(value)),
        UnaryOp::Reciprocal => reciprocal(value),
    }
}

/// Round to [`PRECISION`] decimal places.
///
/// Outside the `SCIENTIFIC_LOWER..=SCIENTIFIC_UPPER` magnitude band the value
/// is rounded to [`PRECISION`] fractional digits of its scientific form
/// instead. Zero and non-finite values are returned unchanged.
pub fn round_to_precision(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let magnitude = value.abs();
    if magnitude > SCIENTIFIC_UPPER || (magnitude < SCIENTIFIC_LOWER && value != 0.0) {
        return to_exponential(value, PRECISION).parse().unwrap_or(value);
    }

    let multiplier = 10f64.powi(PRECISION as i32);
    round_half_up(value * multiplier) / multiplier
}

/// Nearest integer, with ties going toward positive infinity
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Format a number for the display
pub fn format_display(value: f64) -> EngineResult<String> {
    format_display_text(&to_display_text(value))
}

/// Validate and shorten display text.
///
/// Text longer than [`MAX_DISPLAY_LENGTH`] characters is re-rendered in
/// scientific notation.
pub fn format_display_text(text: &str) -> EngineResult<String> {
    match text {
        "Infinity" | "-Infinity" => return Err(EngineError::DivisionByZero),
        "NaN" | "undefined" => return Err(EngineError::InvalidInput),
        _ => {}
    }

    if text.chars().count() > MAX_DISPLAY_LENGTH {
        let numeric = numeric_prefix(text).unwrap_or(f64::NAN);
        if !numeric.is_finite() {
            return Err(EngineError::ResultTooLarge);
        }
        return Ok(to_exponential(numeric, PRECISION));
    }

    Ok(text.to_string())
}

/// Parse user-entered decimal text.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"0."` parses as zero. Fails when no numeric prefix exists.
pub fn parse_input(text: &str) -> EngineResult<f64> {
    numeric_prefix(text)
        .filter(|value| !value.is_nan())
        .ok_or(EngineError::InvalidInput)
}

fn numeric_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if trimmed[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut cursor = frac_start;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        mantissa_digits += cursor - frac_start;
        if mantissa_digits > 0 {
            end = cursor;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut cursor = end + 1;
        if cursor < len && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }

    trimmed[..end].trim_end_matches('.').parse().ok()
}

/// Render a number as text the way the display expects.
///
/// Uses the shortest digits that round-trip, plain notation for magnitudes
/// in `1e-6..1e21`, and exponential notation (`1e+21`, `1.5e-7`) outside it.
/// Negative zero renders as `"0"`.
pub fn to_display_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let shortest = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = shortest.split_once('e') else {
        return format!("{}{}", sign, shortest);
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    // Position of the decimal point relative to the first digit
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let (lead, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() {
            lead.to_string()
        } else {
            format!("{}.{}", lead, rest)
        };
        format!("{}e{}", mantissa, signed_exponent(n - 1))
    };

    format!("{}{}", sign, body)
}

/// Render `value` in scientific notation with `fraction_digits` digits after
/// the point, e.g. `1.23457e+10`.
///
/// An exact tie rounds away from zero, so `12345650000000` renders as
/// `1.23457e+13`.
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return to_display_text(value);
    }

    // Every finite f64 has an exact decimal expansion of at most this many digits
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return exact;
    };
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let mut digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let keep = fraction_digits + 1;
    let round_up = digits.get(keep).is_some_and(|digit| *digit >= 5);
    digits.truncate(keep);
    if round_up && carry(&mut digits) {
        digits.insert(0, 1);
        digits.truncate(keep);
        exponent += 1;
    }

    let mut text = String::with_capacity(keep + 8);
    if value < 0.0 {
        text.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i == 1 {
            text.push('.');
        }
        text.push(char::from(b'0' + digit));
    }
    format!("{}e{}", text, signed_exponent(exponent))
}

const EXACT_DIGITS: usize = 767;

/// Add one in the last place; true when the carry runs off the front
fn carry(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}

fn signed_exponent(exponent: i32) -> String {
    if exponent >= 0 {
        format!("+{}", exponent)
    } else {
        exponent.to_string()
    }
}
