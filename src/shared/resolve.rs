//! Field resolution over schema-less upstream records.
//!
//! Upstream feeds name the same logical field differently (`price`,
//! `last_price`, `close`, ...). Each logical field gets an ordered key list;
//! [`resolve`] returns the first key that carries a non-null value and
//! [`coerce`] turns the scalar into an `f64`.

use crate::error::NormalizeError;
use serde_json::{Map, Value};

/// An opaque upstream record: string keys to arbitrary JSON values.
pub type RawRecord = Map<String, Value>;

/// The only thousands separator recognized when coercing numeric strings.
pub const THOUSANDS_SEPARATOR: char = ',';

/// Return the value of the first key in `keys` present in `record` with a
/// non-null value.
///
/// `0`, `""` and `false` count as present.
pub fn resolve<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| record.get(*key).filter(|value| !value.is_null()))
}

/// Strict numeric coercion.
///
/// Numbers pass through; strings have thousands separators stripped and are
/// parsed as decimals. Non-finite results and every other JSON type fail.
pub fn try_coerce(value: &Value) -> Result<f64, NormalizeError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| *c != THOUSANDS_SEPARATOR).collect();
            cleaned.trim().parse::<f64>().ok()
        }
        _ => None,
    };

    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| NormalizeError::UnparsableNumeric(value.to_string()))
}

/// Lenient numeric coercion: `None` when the value is not a usable number.
pub fn coerce(value: &Value) -> Option<f64> {
    match try_coerce(value) {
        Ok(n) => Some(n),
        Err(err) => {
            tracing::trace!(%err, "numeric coercion failed");
            None
        }
    }
}

/// [`resolve`] followed by [`coerce`].
///
/// A present but unparsable value yields `None`; later keys are not consulted.
pub fn resolve_number(record: &RawRecord, keys: &[&str]) -> Option<f64> {
    resolve(record, keys).and_then(coerce)
}

/// [`resolve`] as display text. Numbers are stringified; other types are absent.
pub fn resolve_string(record: &RawRecord, keys: &[&str]) -> Option<String> {
    match resolve(record, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_resolve_respects_key_order() {
        let r = record(json!({"last": 2.0, "price": 1.0}));
        assert_eq!(resolve(&r, &["price", "last"]), Some(&json!(1.0)));
        assert_eq!(resolve(&r, &["last", "price"]), Some(&json!(2.0)));
    }

    #[test]
    fn test_resolve_skips_null() {
        let r = record(json!({"price": null, "close": 3}));
        assert_eq!(resolve(&r, &["price", "close"]), Some(&json!(3)));
    }

    #[test]
    fn test_resolve_falsy_values_are_present() {
        let r = record(json!({"a": 0, "b": "", "c": false, "d": 9}));
        assert_eq!(resolve(&r, &["a", "d"]), Some(&json!(0)));
        assert_eq!(resolve(&r, &["b", "d"]), Some(&json!("")));
        assert_eq!(resolve(&r, &["c", "d"]), Some(&json!(false)));
    }

    #[test]
    fn test_resolve_absent() {
        let r = record(json!({"x": 1}));
        assert_eq!(resolve(&r, &["price", "close"]), None);
        assert_eq!(resolve(&r, &[]), None);
    }

    #[test]
    fn test_coerce_numbers_and_strings() {
        assert_eq!(coerce(&json!(42)), Some(42.0));
        assert_eq!(coerce(&json!(-1.25)), Some(-1.25));
        assert_eq!(coerce(&json!("1,234.5")), Some(1234.5));
        assert_eq!(coerce(&json!(" 12 ")), Some(12.0));
    }

    #[test]
    fn test_coerce_rejects_garbage() {
        assert_eq!(coerce(&json!("abc")), None);
        assert_eq!(coerce(&json!("")), None);
        assert_eq!(coerce(&json!("NaN")), None);
        assert_eq!(coerce(&json!("inf")), None);
        assert_eq!(coerce(&json!(true)), None);
        assert_eq!(coerce(&json!([1])), None);
        assert_eq!(coerce(&json!({"v": 1})), None);
    }

    #[test]
    fn test_coerce_nan_is_absent() {
        // serde_json has no NaN; it maps to null.
        assert_eq!(coerce(&json!(f64::NAN)), None);
    }

    #[test]
    fn test_try_coerce_reports_value() {
        let err = try_coerce(&json!("abc")).unwrap_err();
        assert_eq!(err, NormalizeError::UnparsableNumeric("\"abc\"".to_string()));
    }

    #[test]
    fn test_resolve_number_does_not_fall_through_unparsable() {
        let r = record(json!({"price": "n/a", "close": 5}));
        assert_eq!(resolve_number(&r, &["price", "close"]), None);
    }

    #[test]
    fn test_resolve_string() {
        let r = record(json!({"symbol": "AAPL", "id": 7, "flag": true}));
        assert_eq!(resolve_string(&r, &["symbol"]).as_deref(), Some("AAPL"));
        assert_eq!(resolve_string(&r, &["id"]).as_deref(), Some("7"));
        assert_eq!(resolve_string(&r, &["flag"]), None);
    }
}
