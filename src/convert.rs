//! Turning a raw value token into the declared [`ParamType`].

use unicode_segmentation::UnicodeSegmentation;

use crate::cfgtypes::{ParamType, ParamValue};
use crate::options::{ConversionMode, ParseOptions};

/// Converts `token` to `ty`.
/// Returns `None` only in strict mode, when `token` is not a literal of `ty`.
pub(crate) fn convert(token: &str, ty: ParamType, options: &ParseOptions) -> Option<ParamValue> {
    let strict = options.conversion == ConversionMode::Strict;
    let value = match ty {
        ParamType::Integer if strict => ParamValue::Integer(token.parse().ok()?),
        ParamType::Integer => ParamValue::Integer(atoi(token)),
        ParamType::Boolean if strict => ParamValue::Boolean(token.parse::<i32>().ok()? != 0),
        ParamType::Boolean => ParamValue::Boolean(atoi(token) != 0),
        ParamType::Float if strict => ParamValue::Float(token.parse().ok()?),
        ParamType::Float => ParamValue::Float(atof(token) as f32),
        ParamType::Double if strict => ParamValue::Double(token.parse().ok()?),
        ParamType::Double => ParamValue::Double(atof(token)),
        ParamType::Character => ParamValue::Character(token.chars().next().unwrap_or('\0')),
        ParamType::String => ParamValue::String(truncate(token, options.max_string_len)),
    };
    Some(value)
}

/// The C-locale `isspace` set: space, `\t`, `\n`, `\v`, `\f`, `\r`.
pub(crate) fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Keeps at most `max` grapheme clusters of `s`.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    // A string of at most `max` bytes can't hold more than `max` graphemes.
    if s.len() <= max {
        return s.to_string();
    }
    s.graphemes(true).take(max).collect()
}

/// C `atoi`: optional sign then leading digits; anything else stops the scan.
/// No digits gives 0, out-of-range saturates.
fn atoi(s: &str) -> i32 {
    let s = s.trim_start_matches(is_c_space);
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut acc: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        acc = (acc * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    let acc = if negative { -acc } else { acc };
    acc.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// C `atof`: the longest prefix that reads as a decimal float (or `inf`/`nan`).
/// No such prefix gives 0.0.
fn atof(s: &str) -> f64 {
    let s = s.trim_start_matches(is_c_space);
    let (sign, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if starts_with_ignore_case(unsigned, "inf") {
        return sign * f64::INFINITY;
    }
    if starts_with_ignore_case(unsigned, "nan") {
        return f64::NAN;
    }
    let len = float_prefix_len(unsigned);
    if len == 0 {
        return 0.0;
    }
    sign * unsigned[..len].parse::<f64>().unwrap_or(0.0)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Length of the unsigned decimal literal `s` starts with, 0 if none.
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    let digits_at = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = digits_at(i);
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = digits_at(i + 1);
        if int_digits + frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits_at(j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}
