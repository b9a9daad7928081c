//! Logical CQL types.
//!
//! A `CqlType` describes a scalar kind or a parameterized shape. Collection
//! values hold their descriptor behind an `Arc` so several values produced
//! from the same declared type share one allocation; the descriptor never
//! changes after it is attached.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValueError};
use crate::value::Value;

/// Scalar CQL kinds, in the order the native driver enumerates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Int,
    Text,
    Timestamp,
    Uuid,
    Varchar,
    Varint,
    Timeuuid,
    Inet,
    Date,
    Time,
    Smallint,
    Tinyint,
    Duration,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 21] = [
        ScalarKind::Ascii,
        ScalarKind::Bigint,
        ScalarKind::Blob,
        ScalarKind::Boolean,
        ScalarKind::Counter,
        ScalarKind::Decimal,
        ScalarKind::Double,
        ScalarKind::Float,
        ScalarKind::Int,
        ScalarKind::Text,
        ScalarKind::Timestamp,
        ScalarKind::Uuid,
        ScalarKind::Varchar,
        ScalarKind::Varint,
        ScalarKind::Timeuuid,
        ScalarKind::Inet,
        ScalarKind::Date,
        ScalarKind::Time,
        ScalarKind::Smallint,
        ScalarKind::Tinyint,
        ScalarKind::Duration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Ascii => "ascii",
            ScalarKind::Bigint => "bigint",
            ScalarKind::Blob => "blob",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Counter => "counter",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Double => "double",
            ScalarKind::Float => "float",
            ScalarKind::Int => "int",
            ScalarKind::Text => "text",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::Uuid => "uuid",
            ScalarKind::Varchar => "varchar",
            ScalarKind::Varint => "varint",
            ScalarKind::Timeuuid => "timeuuid",
            ScalarKind::Inet => "inet",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::Smallint => "smallint",
            ScalarKind::Tinyint => "tinyint",
            ScalarKind::Duration => "duration",
        }
    }
}

impl FromStr for ScalarKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        ScalarKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| ValueError::invalid_argument(format!("Unsupported type '{s}'")))
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CqlType {
    Scalar(ScalarKind),
    Set(Box<CqlType>),
    List(Box<CqlType>),
    Map(Box<CqlType>, Box<CqlType>),
    Tuple(Vec<CqlType>),
    UserType {
        keyspace: Option<String>,
        name: Option<String>,
        fields: Vec<(String, CqlType)>,
    },
    Custom(String),
}

impl CqlType {
    pub fn scalar(kind: ScalarKind) -> Self {
        CqlType::Scalar(kind)
    }

    pub fn set(element: CqlType) -> Self {
        CqlType::Set(Box::new(element))
    }

    pub fn list(element: CqlType) -> Self {
        CqlType::List(Box::new(element))
    }

    pub fn map(key: CqlType, value: CqlType) -> Self {
        CqlType::Map(Box::new(key), Box::new(value))
    }

    pub fn tuple(types: Vec<CqlType>) -> Self {
        CqlType::Tuple(types)
    }

    pub fn user_type(fields: Vec<(String, CqlType)>) -> Self {
        CqlType::UserType { keyspace: None, name: None, fields }
    }

    /// Attach schema metadata to a user type. No-op for other shapes.
    pub fn with_name(self, keyspace: impl Into<String>, type_name: impl Into<String>) -> Self {
        match self {
            CqlType::UserType { fields, .. } => CqlType::UserType {
                keyspace: Some(keyspace.into()),
                name: Some(type_name.into()),
                fields,
            },
            other => other,
        }
    }

    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            CqlType::Scalar(k) => Some(*k),
            _ => None,
        }
    }

    pub fn tuple_types(&self) -> Option<&[CqlType]> {
        match self {
            CqlType::Tuple(types) => Some(types),
            _ => None,
        }
    }

    pub fn user_type_fields(&self) -> Option<&[(String, CqlType)]> {
        match self {
            CqlType::UserType { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Structural compatibility: user type metadata (keyspace, name) is
    /// ignored, everything else must match exactly.
    pub fn is_compatible(&self, other: &CqlType) -> bool {
        match (self, other) {
            (CqlType::Set(a), CqlType::Set(b)) | (CqlType::List(a), CqlType::List(b)) => {
                a.is_compatible(b)
            }
            (CqlType::Map(ka, va), CqlType::Map(kb, vb)) => {
                ka.is_compatible(kb) && va.is_compatible(vb)
            }
            (CqlType::Tuple(a), CqlType::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_compatible(y))
            }
            (CqlType::UserType { fields: a, .. }, CqlType::UserType { fields: b, .. }) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((na, ta), (nb, tb))| na == nb && ta.is_compatible(tb))
            }
            _ => self == other,
        }
    }

    /// Check that `value` conforms to this type.
    pub fn validate(&self, value: &Value) -> Result<()> {
        let ok = match (self, value) {
            (CqlType::Scalar(ScalarKind::Ascii), Value::Text(s)) => s.is_ascii(),
            (CqlType::Scalar(ScalarKind::Text | ScalarKind::Varchar), Value::Text(_)) => true,
            (CqlType::Scalar(ScalarKind::Int), Value::Int(_)) => true,
            (CqlType::Scalar(ScalarKind::Double), Value::Double(_)) => true,
            (CqlType::Scalar(ScalarKind::Boolean), Value::Boolean(_)) => true,
            (CqlType::Scalar(ScalarKind::Bigint | ScalarKind::Counter), Value::Bigint(_)) => true,
            (CqlType::Scalar(kind), v) => v.scalar_kind() == Some(*kind),
            (CqlType::Custom(class), Value::Custom(c)) => c.class_name() == class,
            (expected, v) => v
                .composite_type()
                .is_some_and(|actual| expected.is_compatible(actual)),
        };
        if ok {
            Ok(())
        } else {
            Err(ValueError::invalid_argument(format!(
                "argument must be {}, {} given",
                self.describe(),
                value.describe()
            )))
        }
    }

    /// Phrase naming what a conforming value looks like, for error messages.
    pub fn describe(&self) -> String {
        match self {
            CqlType::Scalar(ScalarKind::Ascii) => "an ascii string".into(),
            CqlType::Scalar(ScalarKind::Text | ScalarKind::Varchar) => "a string".into(),
            CqlType::Scalar(ScalarKind::Int) => "an int".into(),
            CqlType::Scalar(ScalarKind::Double) => "a double".into(),
            CqlType::Scalar(ScalarKind::Boolean) => "a boolean".into(),
            other => format!("an instance of {other}"),
        }
    }
}

impl From<ScalarKind> for CqlType {
    fn from(kind: ScalarKind) -> Self {
        CqlType::Scalar(kind)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[CqlType]) -> fmt::Result {
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{t}")?;
    }
    Ok(())
}

impl fmt::Display for CqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CqlType::Scalar(k) => write!(f, "{k}"),
            CqlType::Set(e) => write!(f, "set<{e}>"),
            CqlType::List(e) => write!(f, "list<{e}>"),
            CqlType::Map(k, v) => write!(f, "map<{k}, {v}>"),
            CqlType::Tuple(types) => {
                f.write_str("tuple<")?;
                write_list(f, types)?;
                f.write_str(">")
            }
            CqlType::UserType { keyspace: Some(ks), name: Some(n), .. } => {
                write!(f, "frozen<{ks}.{n}>")
            }
            CqlType::UserType { fields, .. } => {
                f.write_str("userType<")?;
                for (i, (name, t)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}:{t}")?;
                }
                f.write_str(">")
            }
            CqlType::Custom(class) => write!(f, "'{class}'"),
        }
    }
}

/// Constructor argument naming a type: either a scalar type name or a
/// full descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeArg {
    Name(String),
    Type(CqlType),
}

impl TypeArg {
    pub fn resolve(self) -> Result<CqlType> {
        match self {
            TypeArg::Name(name) => Ok(CqlType::Scalar(name.parse()?)),
            TypeArg::Type(t) => Ok(t),
        }
    }
}

impl From<&str> for TypeArg {
    fn from(s: &str) -> Self {
        TypeArg::Name(s.to_string())
    }
}

impl From<String> for TypeArg {
    fn from(s: String) -> Self {
        TypeArg::Name(s)
    }
}

impl From<CqlType> for TypeArg {
    fn from(t: CqlType) -> Self {
        TypeArg::Type(t)
    }
}

impl From<ScalarKind> for TypeArg {
    fn from(k: ScalarKind) -> Self {
        TypeArg::Type(CqlType::Scalar(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::numeric::Smallint;

    #[test]
    fn scalar_names_round_trip() {
        for kind in ScalarKind::ALL {
            assert_eq!(kind.name().parse::<ScalarKind>().unwrap(), kind);
        }
        let err = "varchar2".parse::<ScalarKind>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn display_uses_cql_syntax() {
        let t = CqlType::map(ScalarKind::Int.into(), CqlType::set(ScalarKind::Text.into()));
        assert_eq!(t.to_string(), "map<int, set<text>>");
        let udt = CqlType::user_type(vec![("a".into(), ScalarKind::Int.into())]);
        assert_eq!(udt.to_string(), "userType<a:int>");
        assert_eq!(udt.with_name("ks", "point").to_string(), "frozen<ks.point>");
    }

    #[test]
    fn text_conforms_to_string_kinds() {
        let v = Value::Text("héllo".into());
        assert!(CqlType::scalar(ScalarKind::Varchar).validate(&v).is_ok());
        assert!(CqlType::scalar(ScalarKind::Text).validate(&v).is_ok());
        assert!(CqlType::scalar(ScalarKind::Ascii).validate(&v).is_err());
    }

    #[test]
    fn wrapper_must_match_kind() {
        let v = Value::Smallint(Smallint::new(3).unwrap());
        assert!(CqlType::scalar(ScalarKind::Smallint).validate(&v).is_ok());
        let err = CqlType::scalar(ScalarKind::Int).validate(&v).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn user_type_metadata_is_ignored_for_compatibility() {
        let plain = CqlType::user_type(vec![("x".into(), ScalarKind::Int.into())]);
        let named = plain.clone().with_name("ks", "p");
        assert!(plain.is_compatible(&named));
        assert_ne!(plain, named);
    }

    #[test]
    fn type_arg_resolves_names() {
        assert_eq!(TypeArg::from("int").resolve().unwrap(), CqlType::Scalar(ScalarKind::Int));
        assert!(TypeArg::from("nope").resolve().is_err());
    }
}
