use std::fmt;

use chrono::{DateTime, Utc};
use cql_types::{CqlType, Value};
use serde_json::json;

use crate::handlers;

/// Key of a host array entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(i) => write!(f, "{i}"),
            ArrayKey::Str(s) => f.write_str(s),
        }
    }
}

/// Dynamically typed value as seen by host scripts.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// Ordered array; keys are integers or strings.
    Array(Vec<(ArrayKey, HostValue)>),
    /// Instance of one of the binding's value classes.
    Object(Value),
    /// Instance of a `Cassandra\Type` class.
    Type(CqlType),
    DateTime(DateTime<Utc>),
}

impl HostValue {
    /// Positional array from a list of values.
    pub fn list(values: impl IntoIterator<Item = HostValue>) -> Self {
        HostValue::Array(
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ArrayKey::Int(i as i64), v))
                .collect(),
        )
    }

    /// Phrase used in "must be X, Y given" messages.
    pub fn describe(&self) -> String {
        match self {
            HostValue::Null => "null".into(),
            HostValue::Bool(_) => "a boolean".into(),
            HostValue::Int(_) => "an int".into(),
            HostValue::Float(_) => "a double".into(),
            HostValue::Str(_) => "a string".into(),
            HostValue::Bytes(_) => "a binary string".into(),
            HostValue::Array(_) => "an array".into(),
            HostValue::Object(v) => format!("an instance of {}", handlers::class_of(v)),
            HostValue::Type(_) => "an instance of Cassandra\\Type".into(),
            HostValue::DateTime(_) => "an instance of DateTime".into(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// JSON rendering for display. Objects render as their class name plus
    /// reflected properties.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            HostValue::Null => serde_json::Value::Null,
            HostValue::Bool(b) => json!(b),
            HostValue::Int(i) => json!(i),
            HostValue::Float(f) => json!(f),
            HostValue::Str(s) => json!(s),
            HostValue::Bytes(b) => json!(format!("0x{}", hex::encode(b))),
            HostValue::Array(entries) => {
                let positional = entries
                    .iter()
                    .enumerate()
                    .all(|(i, (k, _))| *k == ArrayKey::Int(i as i64));
                if positional {
                    serde_json::Value::Array(entries.iter().map(|(_, v)| v.to_json()).collect())
                } else {
                    serde_json::Value::Object(
                        entries.iter().map(|(k, v)| (k.to_string(), v.to_json())).collect(),
                    )
                }
            }
            HostValue::Object(v) => {
                let mut obj = serde_json::Map::new();
                obj.insert("class".into(), json!(handlers::class_of(v)));
                for (name, prop) in handlers::properties(v) {
                    obj.insert(name, prop.to_json());
                }
                serde_json::Value::Object(obj)
            }
            HostValue::Type(t) => json!(t.to_string()),
            HostValue::DateTime(dt) => json!(dt.to_rfc3339()),
        }
    }
}

impl From<Value> for HostValue {
    fn from(v: Value) -> Self {
        crate::marshal::from_value(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_types::Smallint;

    #[test]
    fn positional_arrays_render_as_lists() {
        let v = HostValue::list([HostValue::Int(1), HostValue::Str("a".into())]);
        assert_eq!(v.to_json(), json!([1, "a"]));
    }

    #[test]
    fn keyed_arrays_render_as_objects() {
        let v = HostValue::Array(vec![(ArrayKey::Str("x".into()), HostValue::Bool(true))]);
        assert_eq!(v.to_json(), json!({"x": true}));
    }

    #[test]
    fn objects_render_class_and_properties() {
        let v = HostValue::Object(Smallint::new(5).unwrap().into());
        assert_eq!(
            v.to_json(),
            json!({"class": "Cassandra\\Smallint", "type": "smallint", "value": "5"})
        );
        assert_eq!(v.describe(), "an instance of Cassandra\\Smallint");
    }
}
