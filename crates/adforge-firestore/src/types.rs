//! Firestore REST API types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{FirestoreError, FirestoreResult};

/// Firestore document value types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    IntegerValue(String), // Firestore sends integers as strings
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayValue {
    pub values: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapValue {
    pub fields: Option<HashMap<String, Value>>,
}

/// Firestore document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name
    pub name: Option<String>,
    /// Document fields
    pub fields: Option<HashMap<String, Value>>,
    /// Create time
    pub create_time: Option<String>,
    /// Update time
    pub update_time: Option<String>,
}

impl Document {
    /// Create a new document with the given fields.
    pub fn new(fields: HashMap<String, Value>) -> Self {
        Self {
            name: None,
            fields: Some(fields),
            create_time: None,
            update_time: None,
        }
    }
}

/// Convert a `serde_json::Value` into a Firestore `Value`.
///
/// The campaign document and image results serialize through serde, so this
/// bridge is the single place model JSON meets the Firestore wire format.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::NullValue(()),
        serde_json::Value::Bool(b) => Value::BooleanValue(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::IntegerValue(i.to_string())
            } else {
                Value::DoubleValue(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::StringValue(s.clone()),
        serde_json::Value::Array(items) => Value::ArrayValue(ArrayValue {
            values: Some(items.iter().map(json_to_value).collect()),
        }),
        serde_json::Value::Object(map) => Value::MapValue(MapValue {
            fields: Some(
                map.iter()
                    .map(|(k, v)| (k.clone(), json_to_value(v)))
                    .collect(),
            ),
        }),
    }
}

/// Convert a Firestore `Value` back into a `serde_json::Value`.
pub fn value_to_json(value: &Value) -> FirestoreResult<serde_json::Value> {
    Ok(match value {
        Value::NullValue(()) => serde_json::Value::Null,
        Value::BooleanValue(b) => serde_json::Value::Bool(*b),
        Value::IntegerValue(s) => {
            let i: i64 = s
                .parse()
                .map_err(|_| FirestoreError::invalid_response(format!("bad integer: {}", s)))?;
            serde_json::Value::Number(i.into())
        }
        Value::DoubleValue(d) => serde_json::Number::from_f64(*d)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::TimestampValue(s) | Value::StringValue(s) => serde_json::Value::String(s.clone()),
        Value::ArrayValue(arr) => serde_json::Value::Array(
            arr.values
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(value_to_json)
                .collect::<FirestoreResult<Vec<_>>>()?,
        ),
        Value::MapValue(map) => serde_json::Value::Object(
            map.fields
                .as_ref()
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(k, v)| Ok((k.clone(), value_to_json(v)?)))
                        .collect::<FirestoreResult<serde_json::Map<_, _>>>()
                })
                .transpose()?
                .unwrap_or_default(),
        ),
    })
}

/// Serialize any serde value into a Firestore `Value`.
pub fn to_value<T: Serialize>(v: &T) -> FirestoreResult<Value> {
    let json = serde_json::to_value(v)?;
    Ok(json_to_value(&json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_to_value_nested_object() {
        let json = serde_json::json!({
            "prompt": "a bottle",
            "cached": true,
            "url": null,
            "attempts": 3,
            "tags": ["eco", "water"]
        });
        let value = json_to_value(&json);
        let Value::MapValue(map) = &value else {
            panic!("expected map");
        };
        let fields = map.fields.as_ref().unwrap();
        assert!(matches!(fields["prompt"], Value::StringValue(_)));
        assert!(matches!(fields["cached"], Value::BooleanValue(true)));
        assert!(matches!(fields["url"], Value::NullValue(())));
        assert!(matches!(fields["attempts"], Value::IntegerValue(_)));
        assert!(matches!(fields["tags"], Value::ArrayValue(_)));
    }

    #[test]
    fn test_value_round_trip() {
        let json = serde_json::json!({
            "a": [1, 2.5, "three", false, null],
            "b": {"nested": "yes"}
        });
        let back = value_to_json(&json_to_value(&json)).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_integer_sent_as_string() {
        let value = json_to_value(&serde_json::json!(42));
        match value {
            Value::IntegerValue(s) => assert_eq!(s, "42"),
            other => panic!("expected integer value, got {:?}", other),
        }
    }
}
