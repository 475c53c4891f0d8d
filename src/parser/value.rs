use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::ast::Value;

/// Offset-carrying forms beyond strict RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Forms without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Turn the text after `=` into a typed value.
///
/// Never fails: a token that is no list, quoted string, null, boolean,
/// number or timestamp comes back as a plain string.
pub fn parse_value(raw: &str) -> Value {
    let token = raw.trim();

    if let Some(pieces) = split_list(token) {
        return Value::List(pieces.into_iter().map(parse_value).collect());
    }

    if let Some(inner) = unquote(token) {
        return Value::String(inner.to_string());
    }

    parse_scalar(token)
}

// Integers are plain signed digits only. Exponent or decimal-point forms
// such as `1e3` and `72.0` are floats, even when the value is integral.
fn parse_scalar(token: &str) -> Value {
    if token == "null" {
        return Value::Null;
    }
    if let Some(b) = parse_bool(token) {
        return Value::Bool(b);
    }
    if let Ok(n) = token.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(f) = token.parse::<f64>() {
        return Value::Float(f);
    }
    if let Some(t) = parse_timestamp(token) {
        return Value::Timestamp(t);
    }
    Value::String(token.to_string())
}

/// Split on commas that no matched pair of double quotes encloses. Quotes
/// pair up left to right; an odd trailing quote protects nothing. `None`
/// when nothing splits.
fn split_list(token: &str) -> Option<Vec<&str>> {
    let paired = token.matches('"').count() / 2 * 2;
    let mut seen = 0;
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, c) in token.char_indices() {
        match c {
            '"' => seen += 1,
            ',' if seen % 2 == 0 || seen > paired => {
                pieces.push(&token[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if pieces.is_empty() {
        return None;
    }
    pieces.push(&token[start..]);
    Some(pieces)
}

fn unquote(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_timestamp(token: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(token) {
        return Some(t.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(t) = DateTime::parse_from_str(token, format) {
            return Some(t.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(token, format) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}
