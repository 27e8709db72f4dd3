//! JSON conversions

use crate::value::{Record, Value};
use serde_json::Number;

impl Value {
    /// Parse JSON text into a value tree
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] when the text is not valid JSON.
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Value::from(json))
    }

    /// Parse JSON text that must hold a record (or `null`)
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] for malformed text and
    /// [`crate::Error::TypeMismatch`] when the document is neither an object nor null.
    pub fn record_from_json_str(text: &str) -> crate::Result<Self> {
        let value = Self::from_json_str(text)?;
        match value {
            Value::Object(_) | Value::Null => Ok(value),
            other => Err(crate::Error::type_mismatch("object", &other)),
        }
    }

    /// Render the value as compact JSON text
    #[must_use]
    pub fn to_json_string(&self) -> String {
        serde_json::Value::from(self).to_string()
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Record>(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            // NaN and infinities have no JSON form
            Value::Float(f) => Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(record) => serde_json::Value::Object(
                record
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Integers that fit `i64` stay integers; everything else becomes a float
fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(18)), Value::Integer(18));
        assert_eq!(Value::from(json!(18.5)), Value::Float(18.5));
        assert_eq!(Value::from(json!(18.0)), Value::Float(18.0));
        assert!(Value::from(json!(u64::MAX)).is_float());
    }

    #[test]
    fn test_from_json_nested() {
        let value = Value::from(json!({
            "name": "Márcio",
            "hobbies": ["Programming", "Workout"],
            "address": { "uf": "RJ" },
            "nickname": null
        }));

        assert_eq!(value.get("name").and_then(Value::as_str), Some("Márcio"));
        assert_eq!(value.get("hobbies").and_then(Value::as_array).map(<[Value]>::len), Some(2));
        assert_eq!(
            value.get("address").and_then(|a| a.get("uf")),
            Some(&Value::from("RJ"))
        );
        assert_eq!(value.get("nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_from_json_str() {
        let value = Value::from_json_str(r#"{"a": [1, 2.5, "x", true]}"#).unwrap();
        assert_eq!(
            value.get("a"),
            Some(&Value::Array(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::from("x"),
                Value::Bool(true),
            ]))
        );

        assert!(Value::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_record_from_json_str() {
        assert!(Value::record_from_json_str(r#"{"a": 1}"#).unwrap().is_object());
        assert!(Value::record_from_json_str("null").unwrap().is_null());

        let err = Value::record_from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, crate::Error::TypeMismatch { .. }));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_to_json_string() {
        let value = Value::record([("b", Value::from(1)), ("a", Value::from("x"))]);
        assert_eq!(value.to_json_string(), r#"{"a":"x","b":1}"#);
        assert_eq!(Value::Float(f64::NAN).to_json_string(), "null");
    }
}
