//! Class constructors.
//!
//! Host constructors accept several argument representations at one call
//! site. Each class matches its arguments here and validates them before
//! producing the internal value.

use cql_types::{
    Bigint, Blob, Collection, CqlType, Date, Decimal, Duration, Float, Inet, Map, NumberArg,
    ScalarKind, Set, Smallint, Time, Timestamp, TimestampGenerator, Timeuuid, Tinyint, Tuple,
    TypeArg, UserTypeValue, Uuid, Value, Varint,
};
use serde_json::json;

use crate::cluster::{ClusterBuilder, RetryPolicy};
use crate::error::{HostError, Result};
use crate::handlers;
use crate::host_value::{ArrayKey, HostValue};
use crate::marshal::to_named_value;
use crate::registry::ClassRegistry;
use crate::ssl::{SslOptions, SslOptionsBuilder};
use crate::statement::SimpleStatement;

/// Instance of a registered class.
#[derive(Debug)]
pub enum HostObject {
    Value(Value),
    Type(CqlType),
    SslBuilder(SslOptionsBuilder),
    SslOptions(SslOptions),
    ClusterBuilder(ClusterBuilder),
    Statement(SimpleStatement),
    TimestampGenerator(TimestampGenerator),
    RetryPolicy(RetryPolicy),
}

impl HostObject {
    pub fn class_name(&self) -> &'static str {
        match self {
            HostObject::Value(v) => handlers::class_of(v),
            HostObject::Type(t) => type_class(t),
            HostObject::SslBuilder(_) => "Cassandra\\SSLOptions\\Builder",
            HostObject::SslOptions(_) => "Cassandra\\SSLOptions",
            HostObject::ClusterBuilder(_) => "Cassandra\\Cluster\\Builder",
            HostObject::Statement(_) => "Cassandra\\SimpleStatement",
            HostObject::TimestampGenerator(TimestampGenerator::Monotonic(_)) => {
                "Cassandra\\TimestampGenerator\\Monotonic"
            }
            HostObject::TimestampGenerator(TimestampGenerator::ServerSide) => {
                "Cassandra\\TimestampGenerator\\ServerSide"
            }
            HostObject::RetryPolicy(p) => p.class_name(),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            HostObject::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Host view of the object: values and types cross as themselves.
    pub fn to_host_value(&self) -> Option<HostValue> {
        match self {
            HostObject::Value(v) => Some(HostValue::Object(v.clone())),
            HostObject::Type(t) => Some(HostValue::Type(t.clone())),
            _ => None,
        }
    }

    /// JSON rendering: class name plus reflected state.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            HostObject::Value(v) => HostValue::Object(v.clone()).to_json(),
            HostObject::Type(t) => json!({"class": self.class_name(), "type": t.to_string()}),
            HostObject::SslOptions(ssl) => json!({
                "class": self.class_name(),
                "verify_flags": ssl.verify_flags().bits(),
                "trusted_certs": ssl.trusted_cert_count(),
                "client_cert": ssl.has_client_cert(),
                "private_key": ssl.has_private_key(),
            }),
            HostObject::Statement(s) => json!({"class": self.class_name(), "cql": s.cql()}),
            HostObject::RetryPolicy(p) => json!({"class": self.class_name(), "policy": p.to_string()}),
            _ => json!({"class": self.class_name()}),
        }
    }
}

fn type_class(t: &CqlType) -> &'static str {
    match t {
        CqlType::Scalar(_) => "Cassandra\\Type\\Scalar",
        CqlType::Set(_) => "Cassandra\\Type\\Set",
        CqlType::List(_) => "Cassandra\\Type\\Collection",
        CqlType::Map(..) => "Cassandra\\Type\\Map",
        CqlType::Tuple(_) => "Cassandra\\Type\\Tuple",
        CqlType::UserType { .. } => "Cassandra\\Type\\UserType",
        CqlType::Custom(_) => "Cassandra\\Type\\Custom",
    }
}

fn must_be(name: &str, expected: &str, given: &HostValue) -> HostError {
    HostError::invalid_argument(format!("{name} must be {expected}, {} given", given.describe()))
}

fn arity(class: &str, args: &[HostValue], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            format!("exactly {min}")
        } else if args.len() < min {
            format!("at least {min}")
        } else {
            format!("at most {max}")
        };
        return Err(HostError::invalid_argument(format!(
            "{class}::__construct() expects {expected} arguments, {} given",
            args.len()
        )));
    }
    Ok(())
}

/// Numeric constructor argument: an int, a float, a numeric string or an
/// instance of the same class.
fn number_arg(host: &HostValue, expected: &str) -> Result<NumberArg> {
    match host {
        HostValue::Int(n) => Ok(NumberArg::Int(*n)),
        HostValue::Float(f) => Ok(NumberArg::Float(*f)),
        HostValue::Str(s) => Ok(NumberArg::Str(s.clone())),
        _ => Err(must_be("value", expected, host)),
    }
}

fn type_arg(name: &str, host: &HostValue) -> Result<TypeArg> {
    match host {
        HostValue::Str(s) => Ok(TypeArg::Name(s.clone())),
        HostValue::Type(t) => Ok(TypeArg::Type(t.clone())),
        _ => Err(must_be(name, "a string or an instance of Cassandra\\Type", host)),
    }
}

fn int_arg(name: &str, host: &HostValue) -> Result<i64> {
    match host {
        HostValue::Int(n) => Ok(*n),
        _ => Err(must_be(name, "an int", host)),
    }
}

fn string_arg<'a>(name: &str, host: &'a HostValue) -> Result<&'a str> {
    host.as_str().ok_or_else(|| must_be(name, "a string", host))
}

macro_rules! numeric_ctor {
    ($args:expr, $variant:ident, $ty:ty, $class:literal, $expected:literal) => {{
        arity($class, $args, 1, 1)?;
        match &$args[0] {
            HostValue::Object(Value::$variant(v)) => Value::$variant(v.clone()),
            other => Value::$variant(<$ty>::new(number_arg(other, $expected)?)?),
        }
    }};
}

/// Instantiate `class` with host constructor arguments.
pub fn construct(class: &str, args: &[HostValue]) -> Result<HostObject> {
    let class = class.strip_prefix('\\').unwrap_or(class);
    let entry = ClassRegistry::global()
        .get(class)
        .ok_or_else(|| HostError::invalid_argument(format!("Class '{class}' not found")))?;
    if entry.is_abstract {
        return Err(HostError::Logic(format!("Cannot instantiate abstract class {class}")));
    }

    let value = match class {
        "Cassandra\\Bigint" => numeric_ctor!(
            args, Bigint, Bigint, "Cassandra\\Bigint",
            "a long, a double, a numeric string or a Cassandra\\Bigint"
        ),
        "Cassandra\\Smallint" => numeric_ctor!(
            args, Smallint, Smallint, "Cassandra\\Smallint",
            "a long, a double, a numeric string or a Cassandra\\Smallint"
        ),
        "Cassandra\\Tinyint" => numeric_ctor!(
            args, Tinyint, Tinyint, "Cassandra\\Tinyint",
            "a long, a double, a numeric string or a Cassandra\\Tinyint"
        ),
        "Cassandra\\Varint" => numeric_ctor!(
            args, Varint, Varint, "Cassandra\\Varint",
            "a long, a double, a numeric string or a Cassandra\\Varint"
        ),
        "Cassandra\\Decimal" => numeric_ctor!(
            args, Decimal, Decimal, "Cassandra\\Decimal",
            "a long, a double, a numeric string or a Cassandra\\Decimal"
        ),
        "Cassandra\\Float" => numeric_ctor!(
            args, Float, Float, "Cassandra\\Float",
            "a long, a double, a numeric string or a Cassandra\\Float"
        ),
        "Cassandra\\Blob" => {
            arity(class, args, 1, 1)?;
            match &args[0] {
                HostValue::Str(s) => Value::Blob(Blob::new(s.as_bytes())),
                HostValue::Bytes(b) => Value::Blob(Blob::new(b.clone())),
                other => return Err(must_be("bytes", "a string", other)),
            }
        }
        "Cassandra\\Inet" => {
            arity(class, args, 1, 1)?;
            let address: Inet = string_arg("address", &args[0])?.parse()?;
            Value::Inet(address)
        }
        "Cassandra\\Timestamp" => {
            arity(class, args, 0, 2)?;
            match args {
                [] => Value::Timestamp(Timestamp::now()),
                [seconds] => Value::Timestamp(Timestamp::new(int_arg("seconds", seconds)?, 0)?),
                [seconds, micros, ..] => Value::Timestamp(Timestamp::new(
                    int_arg("seconds", seconds)?,
                    int_arg("microseconds", micros)?,
                )?),
            }
        }
        "Cassandra\\Date" => {
            arity(class, args, 0, 1)?;
            match args.first() {
                None => Value::Date(Date::today()),
                Some(seconds) => Value::Date(Date::new(int_arg("seconds", seconds)?)?),
            }
        }
        "Cassandra\\Time" => {
            arity(class, args, 0, 1)?;
            match args.first() {
                None => Value::Time(Time::now()),
                Some(HostValue::Int(n)) => Value::Time(Time::new(*n)?),
                Some(HostValue::Str(s)) => Value::Time(Time::new(s.as_str())?),
                Some(HostValue::DateTime(dt)) => Value::Time(Time::from_datetime(dt)),
                Some(other) => {
                    return Err(must_be(
                        "nanoseconds",
                        "a string or int representing a number of nanoseconds since midnight",
                        other,
                    ));
                }
            }
        }
        "Cassandra\\Duration" => {
            arity(class, args, 3, 3)?;
            let months = number_arg(&args[0], "a long, a double, a numeric string or a Cassandra\\Bigint")
                .map_err(|e| e.with_context("months"))?;
            let days = number_arg(&args[1], "a long, a double, a numeric string or a Cassandra\\Bigint")
                .map_err(|e| e.with_context("days"))?;
            let nanos = number_arg(&args[2], "a long, a double, a numeric string or a Cassandra\\Bigint")
                .map_err(|e| e.with_context("nanos"))?;
            Value::Duration(Duration::new(months, days, nanos)?)
        }
        "Cassandra\\Uuid" => {
            arity(class, args, 0, 1)?;
            match args.first() {
                None => Value::Uuid(Uuid::new()),
                Some(s) => Value::Uuid(string_arg("uuid", s)?.parse()?),
            }
        }
        "Cassandra\\Timeuuid" => {
            arity(class, args, 0, 1)?;
            match args.first() {
                None => Value::Timeuuid(Timeuuid::new()),
                Some(HostValue::Int(ms)) => Value::Timeuuid(Timeuuid::from_millis(*ms)?),
                Some(HostValue::Str(s)) => Value::Timeuuid(Timeuuid::parse(s)?),
                Some(_) => {
                    return Err(HostError::invalid_argument(
                        "Invalid argument - integer or string expected",
                    ));
                }
            }
        }
        "Cassandra\\Set" => {
            arity(class, args, 1, 1)?;
            Value::Set(Set::new(type_arg("type", &args[0])?)?)
        }
        "Cassandra\\Collection" => {
            arity(class, args, 1, 1)?;
            Value::List(Collection::new(type_arg("type", &args[0])?)?)
        }
        "Cassandra\\Map" => {
            arity(class, args, 2, 2)?;
            Value::Map(Map::new(type_arg("keyType", &args[0])?, type_arg("valueType", &args[1])?)?)
        }
        "Cassandra\\Tuple" => {
            arity(class, args, 1, 1)?;
            let HostValue::Array(entries) = &args[0] else {
                return Err(must_be("types", "an array", &args[0]));
            };
            let types = entries
                .iter()
                .map(|(_, t)| type_arg("sub_type", t))
                .collect::<Result<Vec<_>>>()?;
            Value::Tuple(Tuple::new(types)?)
        }
        "Cassandra\\UserTypeValue" => {
            arity(class, args, 1, 1)?;
            Value::UserType(UserTypeValue::new(user_type_fields(&args[0])?)?)
        }
        _ => return construct_other(class, args),
    };
    Ok(HostObject::Value(value))
}

fn user_type_fields(host: &HostValue) -> Result<Vec<(String, TypeArg)>> {
    let HostValue::Array(entries) = host else {
        return Err(must_be("types", "an array", host));
    };
    entries
        .iter()
        .enumerate()
        .map(|(i, (key, t))| match key {
            ArrayKey::Str(name) => Ok((name.clone(), type_arg("sub_type", t)?)),
            ArrayKey::Int(_) => Err(HostError::invalid_argument(format!(
                "Argument {} is not a string",
                i + 1
            ))),
        })
        .collect()
}

fn construct_other(class: &str, args: &[HostValue]) -> Result<HostObject> {
    let object = match class {
        "Cassandra\\Type\\Scalar" => {
            arity(class, args, 1, 1)?;
            let kind: ScalarKind = string_arg("name", &args[0])?.parse()?;
            HostObject::Type(CqlType::Scalar(kind))
        }
        "Cassandra\\Type\\Set" => {
            arity(class, args, 1, 1)?;
            HostObject::Type(CqlType::set(type_arg("type", &args[0])?.resolve()?))
        }
        "Cassandra\\Type\\Collection" => {
            arity(class, args, 1, 1)?;
            HostObject::Type(CqlType::list(type_arg("type", &args[0])?.resolve()?))
        }
        "Cassandra\\Type\\Map" => {
            arity(class, args, 2, 2)?;
            HostObject::Type(CqlType::map(
                type_arg("keyType", &args[0])?.resolve()?,
                type_arg("valueType", &args[1])?.resolve()?,
            ))
        }
        "Cassandra\\Type\\Tuple" => {
            let types = args
                .iter()
                .map(|t| type_arg("sub_type", t)?.resolve().map_err(HostError::from))
                .collect::<Result<Vec<_>>>()?;
            HostObject::Type(CqlType::tuple(types))
        }
        "Cassandra\\Type\\UserType" => {
            arity(class, args, 1, 1)?;
            let value = UserTypeValue::new(user_type_fields(&args[0])?)?;
            HostObject::Type(value.cql_type().clone())
        }
        "Cassandra\\Type\\Custom" => {
            arity(class, args, 1, 1)?;
            HostObject::Type(CqlType::Custom(string_arg("name", &args[0])?.to_string()))
        }
        "Cassandra\\SSLOptions\\Builder" => {
            arity(class, args, 0, 0)?;
            HostObject::SslBuilder(SslOptionsBuilder::new())
        }
        "Cassandra\\Cluster\\Builder" => {
            arity(class, args, 0, 0)?;
            HostObject::ClusterBuilder(ClusterBuilder::new())
        }
        "Cassandra\\SimpleStatement" => {
            arity(class, args, 1, 1)?;
            HostObject::Statement(SimpleStatement::new(&args[0])?)
        }
        "Cassandra\\TimestampGenerator\\Monotonic" => {
            arity(class, args, 0, 0)?;
            HostObject::TimestampGenerator(TimestampGenerator::monotonic())
        }
        "Cassandra\\TimestampGenerator\\ServerSide" => {
            arity(class, args, 0, 0)?;
            HostObject::TimestampGenerator(TimestampGenerator::server_side())
        }
        "Cassandra\\RetryPolicy\\DefaultPolicy" => HostObject::RetryPolicy(RetryPolicy::Default),
        "Cassandra\\RetryPolicy\\DowngradingConsistency" => {
            HostObject::RetryPolicy(RetryPolicy::DowngradingConsistency)
        }
        "Cassandra\\RetryPolicy\\Fallthrough" => HostObject::RetryPolicy(RetryPolicy::Fallthrough),
        "Cassandra\\RetryPolicy\\Logging" => {
            arity(class, args, 1, 1)?;
            let inner: RetryPolicy = string_arg("childPolicy", &args[0])?.parse()?;
            HostObject::RetryPolicy(RetryPolicy::logging(inner)?)
        }
        _ => {
            return Err(HostError::Logic(format!("Class {class} cannot be instantiated directly")));
        }
    };
    Ok(object)
}

/// Fill a freshly constructed collection from host values: set and list
/// elements, map key/value pairs, tuple slots in order, user type fields by
/// name. Null tuple and user type entries leave the slot unset.
///
/// Items are applied to a copy that replaces `value` only once every item
/// has been accepted; on error `value` is untouched.
pub fn populate(value: &mut Value, items: &[HostValue]) -> Result<()> {
    let mut staged = value.clone();
    fill(&mut staged, items)?;
    *value = staged;
    Ok(())
}

fn fill(value: &mut Value, items: &[HostValue]) -> Result<()> {
    match value {
        Value::Set(set) => {
            let ty = set.element_type().clone();
            for item in items {
                if item.is_null() {
                    return Err(HostError::invalid_argument(
                        "Invalid value: null is not supported inside sets",
                    ));
                }
                if let Some(v) = to_named_value("value", item, &ty)? {
                    set.add(v)?;
                }
            }
        }
        Value::List(list) => {
            let ty = list.element_type().clone();
            let values = items
                .iter()
                .map(|item| {
                    to_named_value("value", item, &ty)?.ok_or_else(|| {
                        HostError::invalid_argument("Invalid value: null is not supported inside collections")
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            list.add(values)?;
        }
        Value::Map(map) => {
            if items.len() % 2 != 0 {
                return Err(HostError::invalid_argument(
                    "Map values must be given as key/value pairs",
                ));
            }
            let (kt, vt) = (map.key_type().clone(), map.value_type().clone());
            for pair in items.chunks(2) {
                let null = || HostError::invalid_argument("Invalid value: null is not supported inside maps");
                let k = to_named_value("key", &pair[0], &kt)?.ok_or_else(null)?;
                let v = to_named_value("value", &pair[1], &vt)?.ok_or_else(null)?;
                map.set(k, v)?;
            }
        }
        Value::Tuple(tuple) => {
            if items.len() > tuple.count() {
                return Err(HostError::invalid_argument("Index out of bounds"));
            }
            let types = tuple.types().to_vec();
            for (i, (item, ty)) in items.iter().zip(&types).enumerate() {
                match to_named_value("value", item, ty)? {
                    Some(v) => tuple.set(i, v)?,
                    None => tuple.clear(i)?,
                }
            }
        }
        Value::UserType(udt) => {
            let fields = udt.fields().to_vec();
            for item in items {
                let HostValue::Array(entries) = item else {
                    return Err(must_be("values", "an array", item));
                };
                for (key, v) in entries {
                    let name = key.to_string();
                    let ty = fields
                        .iter()
                        .find(|(n, _)| *n == name)
                        .map(|(_, t)| t)
                        .ok_or_else(|| HostError::invalid_argument(format!("Invalid name '{name}'")))?;
                    match to_named_value("value", v, ty)? {
                        Some(v) => udt.set(&name, v)?,
                        None => udt.clear(&name)?,
                    }
                }
            }
        }
        other => {
            return Err(HostError::invalid_argument(format!(
                "{} is not a collection",
                handlers::class_of(other)
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExceptionKind;

    fn value(class: &str, args: &[HostValue]) -> Value {
        match construct(class, args).unwrap() {
            HostObject::Value(v) => v,
            other => panic!("expected a value, got {}", other.class_name()),
        }
    }

    #[test]
    fn numeric_constructors_accept_many_representations() {
        let a = value("Cassandra\\Smallint", &[HostValue::Int(12)]);
        let b = value("Cassandra\\Smallint", &[HostValue::Str("12".into())]);
        let c = value("Cassandra\\Smallint", &[HostValue::Float(12.9)]);
        let d = value("Cassandra\\Smallint", &[HostValue::Object(a.clone())]);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
    }

    #[test]
    fn numeric_constructor_rejects_other_types() {
        let err = construct("Cassandra\\Tinyint", &[HostValue::Bool(true)]).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::InvalidArgument);
        assert_eq!(
            err.message(),
            "value must be a long, a double, a numeric string or a Cassandra\\Tinyint, a boolean given"
        );
        let err = construct("Cassandra\\Tinyint", &[HostValue::Int(200)]).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Range);
    }

    #[test]
    fn unknown_and_abstract_classes() {
        assert!(construct("Cassandra\\Nope", &[]).is_err());
        let err = construct("Cassandra\\Custom", &[]).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Logic);
    }

    #[test]
    fn arity_is_checked() {
        let err = construct("Cassandra\\Blob", &[]).unwrap_err();
        assert_eq!(
            err.message(),
            "Cassandra\\Blob::__construct() expects exactly 1 arguments, 0 given"
        );
    }

    #[test]
    fn timeuuid_from_millis_and_string() {
        let v = value("Cassandra\\Timeuuid", &[HostValue::Int(1_500_000_000_123)]);
        let Value::Timeuuid(t) = &v else { panic!() };
        assert_eq!(t.time(), 1_500_000_000_123);
        let err = construct(
            "Cassandra\\Timeuuid",
            &[HostValue::Str("550e8400-e29b-41d4-a716-446655440000".into())],
        )
        .unwrap_err();
        assert_eq!(err.message(), "UUID must be of type 1, type 4 given");
    }

    #[test]
    fn user_type_keys_must_be_strings() {
        let fields = HostValue::Array(vec![
            (ArrayKey::Str("a".into()), HostValue::Str("int".into())),
            (ArrayKey::Int(0), HostValue::Str("text".into())),
        ]);
        let err = construct("Cassandra\\UserTypeValue", &[fields]).unwrap_err();
        assert_eq!(err.message(), "Argument 2 is not a string");
    }

    #[test]
    fn sub_types_must_be_names_or_types() {
        let types = HostValue::list([HostValue::Int(1)]);
        let err = construct("Cassandra\\Tuple", &[types]).unwrap_err();
        assert_eq!(
            err.message(),
            "sub_type must be a string or an instance of Cassandra\\Type, an int given"
        );
    }

    #[test]
    fn set_rejects_null_members() {
        let mut set = value("Cassandra\\Set", &[HostValue::Str("int".into())]);
        let err = populate(&mut set, &[HostValue::Int(1), HostValue::Null]).unwrap_err();
        assert_eq!(err.message(), "Invalid value: null is not supported inside sets");
        let Value::Set(s) = &set else { panic!() };
        assert_eq!(s.count(), 0);

        populate(&mut set, &[HostValue::Int(2), HostValue::Int(2)]).unwrap();
        let Value::Set(s) = &set else { panic!() };
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn failed_populate_leaves_collections_untouched() {
        let mut map = value("Cassandra\\Map", &[HostValue::Str("int".into()), HostValue::Str("text".into())]);
        populate(&mut map, &[HostValue::Int(1), HostValue::Str("a".into())]).unwrap();
        let items = [
            HostValue::Int(2),
            HostValue::Str("b".into()),
            HostValue::Int(3),
            HostValue::Bool(true),
        ];
        let err = populate(&mut map, &items).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::InvalidArgument);
        let Value::Map(m) = &map else { panic!() };
        assert_eq!(m.count(), 1);

        let mut tuple = value(
            "Cassandra\\Tuple",
            &[HostValue::list([HostValue::Str("int".into()), HostValue::Str("text".into())])],
        );
        assert!(populate(&mut tuple, &[HostValue::Int(7), HostValue::Int(8)]).is_err());
        let Value::Tuple(t) = &tuple else { panic!() };
        assert_eq!(t.get(0), None);

        let fields = HostValue::Array(vec![
            (ArrayKey::Str("a".into()), HostValue::Str("int".into())),
            (ArrayKey::Str("b".into()), HostValue::Str("int".into())),
        ]);
        let mut udt = value("Cassandra\\UserTypeValue", &[fields]);
        let row = HostValue::Array(vec![
            (ArrayKey::Str("a".into()), HostValue::Int(1)),
            (ArrayKey::Str("c".into()), HostValue::Int(2)),
        ]);
        let err = populate(&mut udt, &[row]).unwrap_err();
        assert_eq!(err.message(), "Invalid name 'c'");
        let Value::UserType(u) = &udt else { panic!() };
        assert_eq!(u.get("a").unwrap(), None);
    }

    #[test]
    fn timeuuid_beyond_timestamp_field_is_a_range_error() {
        let err = construct("Cassandra\\Timeuuid", &[HostValue::Int(i64::MAX)]).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Range);
    }

    #[test]
    fn tuple_nulls_clear_slots() {
        let mut tuple = value(
            "Cassandra\\Tuple",
            &[HostValue::list([HostValue::Str("int".into()), HostValue::Str("text".into())])],
        );
        populate(&mut tuple, &[HostValue::Null, HostValue::Str("x".into())]).unwrap();
        let Value::Tuple(t) = &tuple else { panic!() };
        assert_eq!(t.get(0), None);
        assert_eq!(t.get(1), Some(&Value::from("x")));
    }

    #[test]
    fn type_classes_build_descriptors() {
        let HostObject::Type(t) =
            construct("Cassandra\\Type\\Map", &[HostValue::Str("text".into()), HostValue::Str("int".into())])
                .unwrap()
        else {
            panic!()
        };
        assert_eq!(t.to_string(), "map<text, int>");
        let set = value("Cassandra\\Set", &[HostValue::Type(CqlType::list(CqlType::Scalar(ScalarKind::Int)))]);
        assert!(set.is_collection());
    }
}
