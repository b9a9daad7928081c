//! Object handlers installed on every value class: comparison, hashing,
//! property reflection, scalar casts and the iteration surface.

use std::cmp::Ordering;
use std::fmt;

use cql_types::{HostCursor, Value};

use crate::error::{HostError, Result};
use crate::host_value::{ArrayKey, HostValue};
use crate::marshal::from_value;

/// Host class name of a value.
pub fn class_of(value: &Value) -> &'static str {
    match value {
        Value::Text(_) => "string",
        Value::Int(_) => "int",
        Value::Double(_) => "float",
        Value::Boolean(_) => "bool",
        Value::Bigint(_) => "Cassandra\\Bigint",
        Value::Smallint(_) => "Cassandra\\Smallint",
        Value::Tinyint(_) => "Cassandra\\Tinyint",
        Value::Varint(_) => "Cassandra\\Varint",
        Value::Decimal(_) => "Cassandra\\Decimal",
        Value::Float(_) => "Cassandra\\Float",
        Value::Inet(_) => "Cassandra\\Inet",
        Value::Timestamp(_) => "Cassandra\\Timestamp",
        Value::Date(_) => "Cassandra\\Date",
        Value::Time(_) => "Cassandra\\Time",
        Value::Uuid(_) => "Cassandra\\Uuid",
        Value::Timeuuid(_) => "Cassandra\\Timeuuid",
        Value::Duration(_) => "Cassandra\\Duration",
        Value::Blob(_) => "Cassandra\\Blob",
        Value::Custom(_) => "Cassandra\\Custom",
        Value::Set(_) => "Cassandra\\Set",
        Value::Map(_) => "Cassandra\\Map",
        Value::List(_) => "Cassandra\\Collection",
        Value::Tuple(_) => "Cassandra\\Tuple",
        Value::UserType(_) => "Cassandra\\UserTypeValue",
    }
}

/// Three-way comparison. Instances of different classes compare as 1.
pub fn compare(a: &Value, b: &Value) -> i32 {
    if class_of(a) != class_of(b) {
        return 1;
    }
    match a.cmp(b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

pub fn hash(value: &Value) -> u64 {
    value.hash_code()
}

fn prop(name: &str, value: HostValue) -> (String, HostValue) {
    (name.to_string(), value)
}

fn text(value: impl fmt::Display) -> HostValue {
    HostValue::Str(value.to_string())
}

fn slot(value: Option<&Value>) -> HostValue {
    value.cloned().map_or(HostValue::Null, from_value)
}

/// Reflected name -> value view: `type` plus value-specific fields.
/// Collection elements are listed in a deterministic order.
pub fn properties(value: &Value) -> Vec<(String, HostValue)> {
    let mut props = vec![prop("type", HostValue::Type(value.cql_type()))];
    match value {
        Value::Text(_) | Value::Int(_) | Value::Double(_) | Value::Boolean(_) => {
            props.push(prop("value", from_value(value.clone())));
        }
        Value::Bigint(v) => props.push(prop("value", text(v))),
        Value::Smallint(v) => props.push(prop("value", text(v))),
        Value::Tinyint(v) => props.push(prop("value", text(v))),
        Value::Varint(v) => props.push(prop("value", text(v))),
        Value::Float(v) => props.push(prop("value", text(v))),
        Value::Decimal(v) => {
            props.push(prop("value", HostValue::Str(v.value())));
            props.push(prop("scale", HostValue::Int(i64::from(v.scale()))));
        }
        Value::Inet(v) => props.push(prop("address", HostValue::Str(v.address()))),
        Value::Timestamp(v) => {
            props.push(prop("seconds", HostValue::Int(v.seconds())));
            props.push(prop("microseconds", HostValue::Int(v.microseconds())));
        }
        Value::Date(v) => props.push(prop("seconds", HostValue::Int(v.seconds()))),
        Value::Time(v) => props.push(prop("nanoseconds", text(v.value()))),
        Value::Uuid(v) => {
            props.push(prop("uuid", HostValue::Str(v.uuid())));
            props.push(prop("version", HostValue::Int(v.version() as i64)));
        }
        Value::Timeuuid(v) => {
            props.push(prop("uuid", HostValue::Str(v.uuid())));
            props.push(prop("version", HostValue::Int(v.version() as i64)));
        }
        Value::Duration(v) => {
            props.push(prop("months", HostValue::Int(i64::from(v.months()))));
            props.push(prop("days", HostValue::Int(i64::from(v.days()))));
            props.push(prop("nanos", HostValue::Int(v.nanos())));
        }
        Value::Blob(v) => props.push(prop("bytes", HostValue::Str(v.bytes()))),
        Value::Custom(v) => props.push(prop("bytes", HostValue::Bytes(v.bytes().to_vec()))),
        Value::Set(s) => {
            let values = s.sorted_values().into_iter().map(|v| slot(Some(v)));
            props.push(prop("values", HostValue::list(values)));
        }
        Value::Map(m) => {
            let entries = m.sorted_entries();
            let keys = entries.iter().map(|(k, _)| slot(Some(k)));
            props.push(prop("keys", HostValue::list(keys)));
            let values = entries.iter().map(|(_, v)| slot(Some(v)));
            props.push(prop("values", HostValue::list(values)));
        }
        Value::List(c) => {
            let values = c.values().iter().map(|v| slot(Some(v)));
            props.push(prop("values", HostValue::list(values)));
        }
        Value::Tuple(t) => {
            let values = t.values().iter().map(|v| slot(v.as_ref()));
            props.push(prop("values", HostValue::list(values)));
        }
        Value::UserType(u) => {
            let values = u
                .values()
                .map(|(name, v)| (ArrayKey::Str(name.to_string()), slot(v)))
                .collect();
            props.push(prop("values", HostValue::Array(values)));
        }
    }
    props
}

/// Target of a host scalar cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastTarget {
    Long,
    Double,
    String,
}

impl fmt::Display for CastTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastTarget::Long => f.write_str("int"),
            CastTarget::Double => f.write_str("float"),
            CastTarget::String => f.write_str("string"),
        }
    }
}

/// Numeric kinds cast to long, double and string; every other value with a
/// canonical text form casts to string only.
pub fn cast(value: &Value, target: CastTarget) -> Result<HostValue> {
    let cast = match (value, target) {
        (Value::Bigint(v), CastTarget::Long) => HostValue::Int(v.to_int()),
        (Value::Bigint(v), CastTarget::Double) => HostValue::Float(v.to_double()),
        (Value::Smallint(v), CastTarget::Long) => HostValue::Int(v.to_int()),
        (Value::Smallint(v), CastTarget::Double) => HostValue::Float(v.to_double()),
        (Value::Tinyint(v), CastTarget::Long) => HostValue::Int(v.to_int()),
        (Value::Tinyint(v), CastTarget::Double) => HostValue::Float(v.to_double()),
        (Value::Varint(v), CastTarget::Long) => HostValue::Int(v.to_int()?),
        (Value::Varint(v), CastTarget::Double) => HostValue::Float(v.to_double()),
        (Value::Decimal(v), CastTarget::Long) => HostValue::Int(v.to_int()?),
        (Value::Decimal(v), CastTarget::Double) => HostValue::Float(v.to_double()),
        (Value::Float(v), CastTarget::Long) => HostValue::Int(v.to_int()),
        (Value::Float(v), CastTarget::Double) => HostValue::Float(v.to_double()),
        (_, CastTarget::String) => match display_text(value) {
            Some(s) => HostValue::Str(s),
            None => return Err(not_convertible(value, target)),
        },
        _ => return Err(not_convertible(value, target)),
    };
    Ok(cast)
}

fn not_convertible(value: &Value, target: CastTarget) -> HostError {
    HostError::invalid_argument(format!(
        "Object of class {} could not be converted to {target}",
        class_of(value)
    ))
}

fn display_text(value: &Value) -> Option<String> {
    let s = match value {
        Value::Text(s) => s.clone(),
        Value::Int(n) => n.to_string(),
        Value::Double(d) => d.to_string(),
        Value::Boolean(b) => if *b { "1".into() } else { String::new() },
        Value::Bigint(v) => v.to_string(),
        Value::Smallint(v) => v.to_string(),
        Value::Tinyint(v) => v.to_string(),
        Value::Varint(v) => v.to_string(),
        Value::Decimal(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Inet(v) => v.to_string(),
        Value::Timestamp(v) => v.to_string(),
        Value::Date(v) => v.to_string(),
        Value::Time(v) => v.to_string(),
        Value::Uuid(v) => v.to_string(),
        Value::Timeuuid(v) => v.to_string(),
        Value::Duration(v) => v.to_string(),
        Value::Blob(v) => v.to_string(),
        Value::Custom(_)
        | Value::Set(_)
        | Value::Map(_)
        | Value::List(_)
        | Value::Tuple(_)
        | Value::UserType(_) => return None,
    };
    Some(s)
}

/// Iteration surface of collection values.
pub fn cursor(value: &Value) -> Option<&dyn HostCursor> {
    match value {
        Value::Set(v) => Some(v),
        Value::Map(v) => Some(v),
        Value::List(v) => Some(v),
        Value::Tuple(v) => Some(v),
        Value::UserType(v) => Some(v),
        _ => None,
    }
}

pub fn cursor_mut(value: &mut Value) -> Option<&mut dyn HostCursor> {
    match value {
        Value::Set(v) => Some(v),
        Value::Map(v) => Some(v),
        Value::List(v) => Some(v),
        Value::Tuple(v) => Some(v),
        Value::UserType(v) => Some(v),
        _ => None,
    }
}
