//! The typed value union.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::blob::Blob;
use crate::collection::Collection;
use crate::custom::Custom;
use crate::decimal::Decimal;
use crate::duration::Duration;
use crate::float::Float;
use crate::hash;
use crate::inet::Inet;
use crate::map::Map;
use crate::numeric::{Bigint, Smallint, Tinyint};
use crate::set::Set;
use crate::time::{Date, Time};
use crate::timestamp::Timestamp;
use crate::tuple::Tuple;
use crate::types::{CqlType, ScalarKind};
use crate::user_type::UserTypeValue;
use crate::uuids::{Timeuuid, Uuid};
use crate::varint::Varint;

/// A CQL value with its payload inside the domain of its kind.
///
/// `Text` carries ascii, text and varchar; `Bigint` carries bigint and
/// counter. `Double`, `Int` and `Boolean` stay plain primitives since the
/// host represents them natively.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Int(i32),
    Bigint(Bigint),
    Smallint(Smallint),
    Tinyint(Tinyint),
    Varint(Varint),
    Decimal(Decimal),
    Float(Float),
    Double(f64),
    Boolean(bool),
    Inet(Inet),
    Timestamp(Timestamp),
    Date(Date),
    Time(Time),
    Uuid(Uuid),
    Timeuuid(Timeuuid),
    Duration(Duration),
    Blob(Blob),
    Custom(Custom),
    Set(Set),
    Map(Map),
    List(Collection),
    Tuple(Tuple),
    UserType(UserTypeValue),
}

enum Shape<'a> {
    Scalar(ScalarKind),
    Custom(&'a Custom),
    Composite(&'a CqlType),
}

impl Value {
    fn shape(&self) -> Shape<'_> {
        let kind = match self {
            Value::Text(_) => ScalarKind::Varchar,
            Value::Int(_) => ScalarKind::Int,
            Value::Bigint(_) => ScalarKind::Bigint,
            Value::Smallint(_) => ScalarKind::Smallint,
            Value::Tinyint(_) => ScalarKind::Tinyint,
            Value::Varint(_) => ScalarKind::Varint,
            Value::Decimal(_) => ScalarKind::Decimal,
            Value::Float(_) => ScalarKind::Float,
            Value::Double(_) => ScalarKind::Double,
            Value::Boolean(_) => ScalarKind::Boolean,
            Value::Inet(_) => ScalarKind::Inet,
            Value::Timestamp(_) => ScalarKind::Timestamp,
            Value::Date(_) => ScalarKind::Date,
            Value::Time(_) => ScalarKind::Time,
            Value::Uuid(_) => ScalarKind::Uuid,
            Value::Timeuuid(_) => ScalarKind::Timeuuid,
            Value::Duration(_) => ScalarKind::Duration,
            Value::Blob(_) => ScalarKind::Blob,
            Value::Custom(c) => return Shape::Custom(c),
            Value::Set(s) => return Shape::Composite(s.cql_type()),
            Value::Map(m) => return Shape::Composite(m.cql_type()),
            Value::List(c) => return Shape::Composite(c.cql_type()),
            Value::Tuple(t) => return Shape::Composite(t.cql_type()),
            Value::UserType(u) => return Shape::Composite(u.cql_type()),
        };
        Shape::Scalar(kind)
    }

    /// Scalar kind of a wrapper value; `None` for composites and custom
    /// values.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.shape() {
            Shape::Scalar(kind) => Some(kind),
            _ => None,
        }
    }

    /// Declared type of a composite value.
    pub fn composite_type(&self) -> Option<&CqlType> {
        match self.shape() {
            Shape::Composite(t) => Some(t),
            _ => None,
        }
    }

    pub fn cql_type(&self) -> CqlType {
        match self.shape() {
            Shape::Scalar(kind) => CqlType::Scalar(kind),
            Shape::Custom(c) => CqlType::Custom(c.class_name().to_string()),
            Shape::Composite(t) => t.clone(),
        }
    }

    /// Short description used in conformance errors.
    pub fn describe(&self) -> String {
        match self {
            Value::Text(_) => "a string".into(),
            Value::Int(_) => "an int".into(),
            Value::Double(_) => "a double".into(),
            Value::Boolean(_) => "a boolean".into(),
            other => format!("an instance of {}", other.cql_type()),
        }
    }

    pub fn is_collection(&self) -> bool {
        self.composite_type().is_some()
    }

    /// Deterministic hash of the payload. Collection hashes are memoized.
    pub fn hash_code(&self) -> u64 {
        match self {
            Value::Text(s) => hash::bytes_hash(s.as_bytes()),
            Value::Int(n) => hash::bigint_hash(i64::from(*n)),
            Value::Bigint(v) => v.hash_code(),
            Value::Smallint(v) => v.hash_code(),
            Value::Tinyint(v) => v.hash_code(),
            Value::Varint(v) => v.hash_code(),
            Value::Decimal(v) => v.hash_code(),
            Value::Float(v) => v.hash_code(),
            Value::Double(d) => hash::double_hash(*d),
            Value::Boolean(b) => u64::from(*b),
            Value::Inet(v) => v.hash_code(),
            Value::Timestamp(v) => hash::bigint_hash(v.value()),
            Value::Date(v) => hash::bigint_hash(v.days()),
            Value::Time(v) => hash::bigint_hash(v.value()),
            Value::Uuid(v) => v.hash_code(),
            Value::Timeuuid(v) => v.hash_code(),
            Value::Duration(v) => v.hash_code(),
            Value::Blob(v) => hash::bytes_hash(v.as_bytes()),
            Value::Custom(v) => v.hash_code(),
            Value::Set(v) => v.hash_code(),
            Value::Map(v) => v.hash_code(),
            Value::List(v) => v.hash_code(),
            Value::Tuple(v) => v.hash_code(),
            Value::UserType(v) => v.hash_code(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Text(_) => 0,
            Value::Int(_) => 1,
            Value::Bigint(_) => 2,
            Value::Smallint(_) => 3,
            Value::Tinyint(_) => 4,
            Value::Varint(_) => 5,
            Value::Decimal(_) => 6,
            Value::Float(_) => 7,
            Value::Double(_) => 8,
            Value::Boolean(_) => 9,
            Value::Inet(_) => 10,
            Value::Timestamp(_) => 11,
            Value::Date(_) => 12,
            Value::Time(_) => 13,
            Value::Uuid(_) => 14,
            Value::Timeuuid(_) => 15,
            Value::Duration(_) => 16,
            Value::Blob(_) => 17,
            Value::Custom(_) => 18,
            Value::Set(_) => 19,
            Value::Map(_) => 20,
            Value::List(_) => 21,
            Value::Tuple(_) => 22,
            Value::UserType(_) => 23,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Bigint(a), Value::Bigint(b)) => a.cmp(b),
            (Value::Smallint(a), Value::Smallint(b)) => a.cmp(b),
            (Value::Tinyint(a), Value::Tinyint(b)) => a.cmp(b),
            (Value::Varint(a), Value::Varint(b)) => a.cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Inet(a), Value::Inet(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::Timeuuid(a), Value::Timeuuid(b)) => a.cmp(b),
            (Value::Duration(a), Value::Duration(b)) => a.cmp(b),
            (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
            (Value::Custom(a), Value::Custom(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.cmp(b),
            (Value::Tuple(a), Value::Tuple(b)) => a.cmp(b),
            (Value::UserType(a), Value::UserType(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$variant(v)
            }
        })*
    };
}

value_from!(
    String => Text,
    i32 => Int,
    Bigint => Bigint,
    Smallint => Smallint,
    Tinyint => Tinyint,
    Varint => Varint,
    Decimal => Decimal,
    Float => Float,
    f64 => Double,
    bool => Boolean,
    Inet => Inet,
    Timestamp => Timestamp,
    Date => Date,
    Time => Time,
    Uuid => Uuid,
    Timeuuid => Timeuuid,
    Duration => Duration,
    Blob => Blob,
    Custom => Custom,
    Set => Set,
    Map => Map,
    Collection => List,
    Tuple => Tuple,
    UserTypeValue => UserType,
);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_order_before_payloads() {
        let text = Value::from("zzz");
        let int = Value::from(-5);
        assert!(text < int);
        assert!(Value::from(1) < Value::from(2));
    }

    #[test]
    fn doubles_use_total_order() {
        let nan = Value::Double(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_ne!(Value::Double(0.0), Value::Double(-0.0));
        assert!(Value::Double(-1.0) < Value::Double(1.0));
    }

    #[test]
    fn equal_values_hash_alike() {
        let a = Value::from(Smallint::new(12).unwrap());
        let b = Value::from(Smallint::new("12").unwrap());
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn cql_type_reports_kind() {
        assert_eq!(Value::from("x").cql_type(), CqlType::Scalar(ScalarKind::Varchar));
        assert_eq!(
            Value::from(Tinyint::new(1).unwrap()).cql_type().to_string(),
            "tinyint"
        );
        assert_eq!(Value::from(true).describe(), "a boolean");
    }
}
