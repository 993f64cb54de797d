//! Trust-boundary coercion for loosely typed numeric and text fields.
//!
//! Everything arriving from the database layer or the automation webhook
//! passes through here before any arithmetic happens, so a single malformed
//! value can never turn a dashboard total into NaN.

use std::sync::LazyLock;
use regex::Regex;
use serde_json::Value;

/// Comma-grouped thousands, e.g. `1,200.50` or `-12,000`.
static THOUSANDS_GROUPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d{1,3}(,\d{3})+(\.\d+)?$").unwrap()
});

/// Returns `n` when it is finite, otherwise `0.0`.
pub fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Clamps overflowed sums to `±f64::MAX`; NaN becomes `0.0`.
pub fn saturate(n: f64) -> f64 {
    if n.is_nan() {
        0.0
    } else {
        n.clamp(f64::MIN, f64::MAX)
    }
}

/// Coerce a loosely typed JSON field into a finite number.
///
/// - Numbers pass through (non-finite collapse to 0).
/// - Strings are trimmed and parsed. Commas are only accepted as thousands
///   separators; any other comma makes the value non-numeric.
/// - `null`, missing fields, booleans, arrays and objects become 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_numeric_str(s),
        _ => 0.0,
    };
    finite_or_zero(n)
}

fn parse_numeric_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    if !s.contains(',') {
        return s.parse::<f64>().unwrap_or(0.0);
    }
    if THOUSANDS_GROUPED.is_match(s) {
        s.replace(',', "").parse::<f64>().unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Coerce a loosely typed JSON field into a string, empty when absent.
pub fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
