//! Text rendering of scalar values.
//!
//! Numbers render in shortest round-trip form: integers as bare digits, `-0`
//! as `0`, and exponent notation (`1e+21`, `1.5e-7`) outside `[1e-6, 1e21)`.
//! Coercion and diffing both compare against this form.

use serde_json::{Number, Value};

/// Render a value the way it appears in an edit field.
///
/// Strings render verbatim (no quotes), containers as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_text(n),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Serialize a value as pretty-printed JSON with 2-space indentation.
pub fn to_pretty_text(value: &Value) -> String {
    format!("{value:#}")
}

pub fn number_to_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => float_to_text(f),
        None => n.to_string(),
    }
}

pub fn float_to_text(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if !f.is_finite() {
        return f.to_string();
    }
    let abs = f.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{f}");
    }
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}
