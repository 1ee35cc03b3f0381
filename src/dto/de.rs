//! Lenient field deserializers for request bodies.
//!
//! Storefront and back-office clients send numbers as strings and booleans as
//! `1`/`"true"`. These helpers accept both shapes so validation can happen in
//! the services with a proper error message instead of a body rejection.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Number or numeric string. Strings that do not parse come through as NaN so
/// the service can reject the field by name.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().parse::<f64>().unwrap_or(f64::NAN))),
        Some(Value::Bool(b)) => Ok(Some(if b { 1.0 } else { 0.0 })),
        Some(_) => Ok(Some(f64::NAN)),
    }
}

/// `true`, `1`, `"true"` (any case) and `"1"` are true; any other present value is false.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::Number(n)) => Ok(Some(n.as_f64() == Some(1.0))),
        Some(Value::String(s)) => Ok(Some(is_truthy(&s))),
        Some(other) => Err(D::Error::custom(format!("expected a boolean, got {other}"))),
    }
}

/// Price as sent by the client, number or string, kept raw for normalization.
pub fn opt_price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Ok(Some(other.to_string())),
    }
}

/// Strings are trimmed; non-string values are ignored.
pub fn opt_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        _ => Ok(None),
    }
}

pub fn is_truthy(raw: &str) -> bool {
    let raw = raw.trim();
    raw == "1" || raw.eq_ignore_ascii_case("true")
}

/// A positive whole number that fits a primary key.
pub fn as_id(value: f64) -> Option<i32> {
    if value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_number")]
        n: Option<f64>,
        #[serde(default, deserialize_with = "opt_bool")]
        b: Option<bool>,
        #[serde(default, deserialize_with = "opt_price")]
        p: Option<String>,
        #[serde(default, deserialize_with = "opt_trimmed")]
        s: Option<String>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_accept_strings() {
        assert_eq!(probe(r#"{"n": 3}"#).n, Some(3.0));
        assert_eq!(probe(r#"{"n": "4"}"#).n, Some(4.0));
        assert_eq!(probe(r#"{"n": " "}"#).n, None);
        assert_eq!(probe(r#"{"n": null}"#).n, None);
        assert_eq!(probe("{}").n, None);
        assert!(probe(r#"{"n": "abc"}"#).n.unwrap().is_nan());
    }

    #[test]
    fn booleans_are_lenient() {
        assert_eq!(probe(r#"{"b": true}"#).b, Some(true));
        assert_eq!(probe(r#"{"b": 1}"#).b, Some(true));
        assert_eq!(probe(r#"{"b": "TRUE"}"#).b, Some(true));
        assert_eq!(probe(r#"{"b": "1"}"#).b, Some(true));
        assert_eq!(probe(r#"{"b": 0}"#).b, Some(false));
        assert_eq!(probe(r#"{"b": "no"}"#).b, Some(false));
        assert_eq!(probe("{}").b, None);
    }

    #[test]
    fn prices_keep_their_text() {
        assert_eq!(probe(r#"{"p": 500}"#).p.as_deref(), Some("500"));
        assert_eq!(probe(r#"{"p": "12.50"}"#).p.as_deref(), Some("12.50"));
        assert_eq!(probe(r#"{"p": ""}"#).p, None);
    }

    #[test]
    fn strings_are_trimmed() {
        assert_eq!(probe(r#"{"s": "  Ana "}"#).s.as_deref(), Some("Ana"));
        assert_eq!(probe(r#"{"s": 5}"#).s, None);
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(as_id(7.0), Some(7));
        assert_eq!(as_id(0.0), None);
        assert_eq!(as_id(-2.0), None);
        assert_eq!(as_id(1.5), None);
        assert_eq!(as_id(f64::NAN), None);
    }
}
