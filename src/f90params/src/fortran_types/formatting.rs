// f90params/src/fortran_types/formatting.rs

//! Canonical textual form of default values in a parameter template.

use super::kind::TypeKind;
use super::value::Value;

/// Format a value as it should appear for a variable of the given kind.
///
/// Unset slots become the kind's zero value. Numeric values are converted to
/// the declared numeric kind (reals are truncated for integers); inside a
/// character variable they are written as quoted text. Character values are
/// always quoted.
pub fn format_value(value: &Value, kind: TypeKind) -> String {
    match (kind, value) {
        (TypeKind::Integer, Value::Unset) => "0".to_string(),
        (TypeKind::Real, Value::Unset) => "0.0".to_string(),
        (TypeKind::Character, Value::Unset) => "''".to_string(),

        (_, Value::Character(s)) => quote(s),

        (TypeKind::Integer, Value::Integer(i)) => i.to_string(),
        (TypeKind::Integer, Value::Real(r)) => (r.trunc() as i64).to_string(),

        (TypeKind::Real, Value::Integer(i)) => format_real(*i as f64),
        (TypeKind::Real, Value::Real(r)) => format_real(*r),

        (TypeKind::Character, Value::Integer(i)) => quote(&i.to_string()),
        (TypeKind::Character, Value::Real(r)) => quote(&format_real(*r)),
    }
}

/// Shortest round-trip representation, always with a decimal point or exponent.
pub fn format_real(value: f64) -> String {
    format!("{:?}", value)
}

/// Single-quote a string, doubling embedded quotes.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
