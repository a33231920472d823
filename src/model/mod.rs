//! Snapshot data model.
//!
//! A [`Snapshot`] is one flat reading of every sensor key at a point in time.
//! Readings are either numbers or strings; anything else a data source sends
//! is folded into one of the two, while the snapshot keeps the object as it
//! arrived for export.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Fractional digits kept for non-integral numbers on display.
pub const DISPLAY_DECIMALS: i32 = 3;

/// Largest magnitude for which an integral `f64` is exactly an `i64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Converts a JSON value into a reading.
    ///
    /// Booleans become `"true"`/`"false"`, nested arrays and objects keep
    /// their compact JSON text, `null` has no reading.
    pub fn from_json(value: serde_json::Value) -> Option<Value> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(Value::Text(b.to_string())),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::String(s) => Some(Value::Text(s)),
            other => Some(Value::Text(other.to_string())),
        }
    }

    /// JSON form of the reading. Integral numbers within the exact `i64`
    /// range become JSON integers (5000, not 5000.0); non-finite numbers
    /// become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => {
                serde_json::Value::from(*v as i64)
            }
            Value::Number(v) => serde_json::Number::from_f64(*v)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// Numeric interpretation of the reading.
    ///
    /// Strings are trimmed and parsed; an empty string is not a number.
    /// The result may be non-finite (`"inf"`, `"NaN"`).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
        }
    }

    /// Value shown in the table: non-integral numbers are rounded to
    /// [`DISPLAY_DECIMALS`] fractional digits, everything else passes through.
    pub fn to_display(&self) -> Value {
        match self {
            Value::Number(v) if v.is_finite() && v.fract() != 0.0 => {
                let scale = 10f64.powi(DISPLAY_DECIMALS);
                Value::Number((v * scale).round() / scale)
            }
            other => other.clone(),
        }
    }

    /// Display equality: numbers compare numerically, strings lexically,
    /// a number never equals a string.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // -0 prints as 0
            Value::Number(v) if *v == 0.0 => write!(f, "0"),
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// One full flat reading of all sensor keys.
///
/// Keeps the JSON object as received (key order, booleans, nulls and nested
/// values included) next to the readings derived from it. Serializes back to
/// that object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    values: BTreeMap<String, Value>,
    raw: serde_json::Map<String, serde_json::Value>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from a JSON object.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    fn from_raw(raw: serde_json::Map<String, serde_json::Value>) -> Self {
        let values = raw
            .iter()
            .filter_map(|(k, v)| Value::from_json(v.clone()).map(|v| (k.clone(), v)))
            .collect();
        Self { values, raw }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        self.raw.insert(key.clone(), value.to_json());
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Keys with a reading, in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of keys with a reading.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (k, v) in iter {
            snapshot.insert(k, v);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_only_non_integral_numbers() {
        assert_eq!(Value::Number(13.56789).to_display(), Value::Number(13.568));
        assert_eq!(Value::Number(5000.0).to_display(), Value::Number(5000.0));
        assert_eq!(Value::Number(0.0625).to_display(), Value::Number(0.063));
        assert_eq!(Value::from("1.23456").to_display(), Value::from("1.23456"));
    }

    #[test]
    fn display_formatting_matches_table_text() {
        assert_eq!(Value::Number(5000.0).to_string(), "5000");
        assert_eq!(Value::Number(12.5).to_string(), "12.5");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::from("a\"b").to_string(), "a\"b");
    }

    #[test]
    fn numeric_interpretation_of_strings() {
        assert_eq!(Value::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(Value::from("").as_number(), None);
        assert_eq!(Value::from("abc").as_number(), None);
        assert!(Value::from("inf").as_number().is_some_and(|v| !v.is_finite()));
    }

    #[test]
    fn number_and_string_never_equal() {
        assert!(!Value::Number(1.0).same_as(&Value::from("1")));
        assert!(Value::Number(1.0).same_as(&Value::Number(1.0)));
        assert!(Value::Number(f64::NAN).same_as(&Value::Number(f64::NAN)));
    }

    #[test]
    fn parses_flat_json_object() {
        let snap =
            Snapshot::from_json_str(r#"{"RPM": 5000, "Note": "x", "ok": true, "gone": null}"#)
                .unwrap();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.get("RPM"), Some(&Value::Number(5000.0)));
        assert_eq!(snap.get("ok"), Some(&Value::from("true")));
        assert!(snap.get("gone").is_none());
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(Snapshot::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn integral_numbers_serialize_as_integers() {
        let snap: Snapshot = [("RPM", Value::Number(5000.0)), ("V", Value::Number(12.25))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(json, r#"{"RPM":5000,"V":12.25}"#);
    }

    #[test]
    fn serializes_the_object_as_received() {
        let input = r#"{"zeta":1,"gps_fix":true,"alt":null,"pos":[1,2],"RPM":5000}"#;
        let snap = Snapshot::from_json_str(input).unwrap();
        assert_eq!(snap.keys().collect::<Vec<_>>(), vec!["RPM", "gps_fix", "pos", "zeta"]);
        assert_eq!(snap.get("pos"), Some(&Value::from("[1,2]")));
        assert_eq!(serde_json::to_string(&snap).unwrap(), input);
    }
}
