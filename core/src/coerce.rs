//! Built-in value coercers.
//!
//! Every coercer is total: a token that does not fit the type falls back to
//! a caller-supplied default, which is the raw token itself unless stated
//! otherwise. `number` is the exception and yields `NaN`, leaving rejection
//! to a validator.

use std::sync::LazyLock;

use regex::Regex;

use crate::{ArgValue, ValueType};

// SAFETY: These regexes are compile-time constants and are validated by tests.
static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]|[1-9][0-9]+)$").expect("static regex must compile"));
static TRUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:true|1)$").expect("static regex must compile"));
static FALSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:false|0)$").expect("static regex must compile"));

/// Applies the built-in coercer for `value_type`.
///
/// Returns `None` for [`ValueType::Custom`], whose transform lives on the
/// parser.
///
/// # Examples
///
/// ```
/// use argi_core::{coerce, ArgValue, ValueType};
///
/// assert_eq!(coerce(&ValueType::Number, "15"), Some(ArgValue::Number(15.0)));
/// assert_eq!(coerce(&ValueType::Integer, "007"), Some(ArgValue::from("007")));
/// assert_eq!(coerce(&ValueType::Custom("email".into()), "x"), None);
/// ```
pub fn coerce(value_type: &ValueType, raw: &str) -> Option<ArgValue> {
    let value = match value_type {
        ValueType::String => parse_string(raw),
        ValueType::Number => parse_number(raw),
        ValueType::Integer => parse_integer(raw),
        ValueType::Boolean => parse_bool(raw),
        ValueType::Json => parse_json(raw),
        ValueType::Csv => parse_csv(raw),
        ValueType::Custom(_) => return None,
    };
    Some(value)
}

pub fn parse_string(raw: &str) -> ArgValue {
    ArgValue::from(raw)
}

/// Numeric coercion with JavaScript `Number()` semantics.
///
/// Whitespace is trimmed, empty input is `0`, `0x`/`0o`/`0b` prefixes and
/// `Infinity` are recognised. Anything else non-numeric is `NaN`.
///
/// # Examples
///
/// ```
/// use argi_core::parse_number;
///
/// assert_eq!(parse_number("3.14").as_f64(), Some(3.14));
/// assert_eq!(parse_number(" 0x10 ").as_f64(), Some(16.0));
/// assert!(parse_number("notanumber").as_f64().unwrap().is_nan());
/// ```
pub fn parse_number(raw: &str) -> ArgValue {
    ArgValue::Number(number_value(raw))
}

fn number_value(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust also accepts "inf" and "nan" spellings, Number() does not.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// Integer coercion, falling back to the raw token.
pub fn parse_integer(raw: &str) -> ArgValue {
    parse_integer_or(raw, ArgValue::from(raw))
}

/// Converts unsigned decimal digits without superfluous leading zeros.
///
/// # Examples
///
/// ```
/// use argi_core::{parse_integer_or, ArgValue};
///
/// assert_eq!(parse_integer_or("42", ArgValue::Integer(0)), ArgValue::Integer(42));
/// assert_eq!(parse_integer_or("-4", ArgValue::Integer(0)), ArgValue::Integer(0));
/// assert_eq!(parse_integer_or("04", ArgValue::Integer(0)), ArgValue::Integer(0));
/// ```
pub fn parse_integer_or(raw: &str, default: ArgValue) -> ArgValue {
    if !INTEGER_RE.is_match(raw) {
        return default;
    }
    match raw.parse::<i64>() {
        Ok(n) => ArgValue::Integer(n),
        // Past i64 range the digits are still a valid number.
        Err(_) => ArgValue::Number(number_value(raw)),
    }
}

/// Recognises an explicit boolean literal (`true`/`false`/`1`/`0`, any case).
///
/// # Examples
///
/// ```
/// use argi_core::bool_literal;
///
/// assert_eq!(bool_literal("TRUE"), Some(true));
/// assert_eq!(bool_literal("0"), Some(false));
/// assert_eq!(bool_literal("yes"), None);
/// ```
pub fn bool_literal(raw: &str) -> Option<bool> {
    if TRUE_RE.is_match(raw) {
        Some(true)
    } else if FALSE_RE.is_match(raw) {
        Some(false)
    } else {
        None
    }
}

/// Boolean coercion, falling back to the raw token.
pub fn parse_bool(raw: &str) -> ArgValue {
    parse_bool_or(raw, ArgValue::from(raw))
}

pub fn parse_bool_or(raw: &str, default: ArgValue) -> ArgValue {
    bool_literal(raw).map_or(default, ArgValue::Bool)
}

/// JSON coercion, falling back to the raw token.
pub fn parse_json(raw: &str) -> ArgValue {
    parse_json_or(raw, ArgValue::from(raw))
}

pub fn parse_json_or(raw: &str, default: ArgValue) -> ArgValue {
    serde_json::from_str(raw).map_or(default, ArgValue::Json)
}

/// Splits on `,` into a list of strings.
///
/// # Examples
///
/// ```
/// use argi_core::{parse_csv, ArgValue};
///
/// assert_eq!(parse_csv("a,b,c"), ArgValue::from(vec!["a", "b", "c"]));
/// assert_eq!(parse_csv(""), ArgValue::from(vec![""]));
/// ```
pub fn parse_csv(raw: &str) -> ArgValue {
    ArgValue::List(raw.split(',').map(ArgValue::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_regexes_compile() {
        assert!(INTEGER_RE.is_match("0"));
        assert!(TRUE_RE.is_match("True"));
        assert!(FALSE_RE.is_match("FALSE"));
    }

    #[test]
    fn test_number_follows_number_constructor() {
        assert_eq!(number_value("42"), 42.0);
        assert_eq!(number_value("  -1.5e3 "), -1500.0);
        assert_eq!(number_value(""), 0.0);
        assert_eq!(number_value("0b101"), 5.0);
        assert_eq!(number_value("0o17"), 15.0);
        assert_eq!(number_value("-Infinity"), f64::NEG_INFINITY);
        assert!(number_value("inf").is_nan());
        assert!(number_value("NaN").is_nan());
        assert!(number_value("0x").is_nan());
        assert!(number_value("0xZZ").is_nan());
        assert!(number_value("12abc").is_nan());
    }

    #[test]
    fn test_integer_rejects_leading_zero_and_sign() {
        assert_eq!(parse_integer("0"), ArgValue::Integer(0));
        assert_eq!(parse_integer("10"), ArgValue::Integer(10));
        assert_eq!(parse_integer("010"), ArgValue::from("010"));
        assert_eq!(parse_integer("+1"), ArgValue::from("+1"));
        assert_eq!(parse_integer("1.5"), ArgValue::from("1.5"));
    }

    #[test]
    fn test_integer_beyond_i64_becomes_number() {
        let huge = "99999999999999999999";
        assert_eq!(parse_integer(huge), ArgValue::Number(1e20));
    }

    #[test]
    fn test_bool_falls_back_to_input_or_default() {
        assert_eq!(parse_bool("1"), ArgValue::Bool(true));
        assert_eq!(parse_bool("False"), ArgValue::Bool(false));
        assert_eq!(parse_bool("maybe"), ArgValue::from("maybe"));
        assert_eq!(
            parse_bool_or("maybe", ArgValue::Bool(true)),
            ArgValue::Bool(true)
        );
    }

    #[test]
    fn test_json_falls_back_to_input() {
        assert_eq!(
            parse_json(r#"{"k":1}"#),
            ArgValue::Json(serde_json::json!({"k": 1}))
        );
        assert_eq!(parse_json("{k:1}"), ArgValue::from("{k:1}"));
        assert_eq!(
            parse_json_or("{k:1}", ArgValue::Json(serde_json::Value::Null)),
            ArgValue::Json(serde_json::Value::Null)
        );
    }

    #[test]
    fn test_coerce_dispatches_by_type() {
        assert_eq!(coerce(&ValueType::String, "x"), Some(ArgValue::from("x")));
        assert_eq!(coerce(&ValueType::Boolean, "0"), Some(ArgValue::Bool(false)));
        assert_eq!(
            coerce(&ValueType::Csv, "a,b"),
            Some(ArgValue::from(vec!["a", "b"]))
        );
    }
}
