//! Conversion between host values and typed values.

use cql_types::{CqlType, ScalarKind, Value};

use crate::error::{HostError, Result};
use crate::host_value::HostValue;

fn mismatch(name: &str, expected: &CqlType, given: &HostValue) -> HostError {
    HostError::invalid_argument(format!(
        "{name} must be {}, {} given",
        expected.describe(),
        given.describe()
    ))
}

/// Convert a host value for storage under a declared type.
///
/// `Null` converts to `None`; callers decide whether an absent value is
/// allowed. Primitive host values convert only to the primitive CQL kinds
/// the host represents natively; everything else must already be an object
/// of the exact declared type.
pub fn to_value(host: &HostValue, ty: &CqlType) -> Result<Option<Value>> {
    to_named_value("argument", host, ty)
}

/// Like [`to_value`], naming the argument in error messages.
pub fn to_named_value(name: &str, host: &HostValue, ty: &CqlType) -> Result<Option<Value>> {
    let value = match (ty, host) {
        (_, HostValue::Null) => return Ok(None),
        (
            CqlType::Scalar(ScalarKind::Ascii | ScalarKind::Text | ScalarKind::Varchar),
            HostValue::Str(s),
        ) => Value::Text(s.clone()),
        (CqlType::Scalar(ScalarKind::Int), HostValue::Int(n)) => {
            let n = i32::try_from(*n).map_err(|_| {
                HostError::Range(format!(
                    "{name} must be between {} and {}, {n} given",
                    i32::MIN,
                    i32::MAX
                ))
            })?;
            Value::Int(n)
        }
        (CqlType::Scalar(ScalarKind::Double), HostValue::Float(f)) => Value::Double(*f),
        (CqlType::Scalar(ScalarKind::Boolean), HostValue::Bool(b)) => Value::Boolean(*b),
        (_, HostValue::Object(v)) => v.clone(),
        _ => return Err(mismatch(name, ty, host)),
    };
    ty.validate(&value)
        .map_err(|_| mismatch(name, ty, host))?;
    Ok(Some(value))
}

/// Unwrap primitive variants into host primitives; everything else is
/// returned as an object.
pub fn from_value(value: Value) -> HostValue {
    match value {
        Value::Text(s) => HostValue::Str(s),
        Value::Int(n) => HostValue::Int(i64::from(n)),
        Value::Double(d) => HostValue::Float(d),
        Value::Boolean(b) => HostValue::Bool(b),
        other => HostValue::Object(other),
    }
}

/// Infer the typed value for a statement parameter bound without a declared
/// type. `None` leaves the parameter unset.
pub fn bind_parameter(host: &HostValue) -> Result<Option<Value>> {
    let value = match host {
        HostValue::Null => return Ok(None),
        HostValue::Int(n) => Value::Bigint(cql_types::Bigint::new(*n)?),
        HostValue::Float(f) => Value::Double(*f),
        HostValue::Str(s) => Value::Text(s.clone()),
        HostValue::Bool(b) => Value::Boolean(*b),
        HostValue::Bytes(b) => Value::Blob(cql_types::Blob::new(b.clone())),
        HostValue::Object(v) => v.clone(),
        other => {
            return Err(HostError::invalid_argument(format!(
                "Invalid value type: {}",
                other.describe()
            )));
        }
    };
    Ok(Some(value))
}
