//! Instance method dispatch.
//!
//! Methods are looked up by their host name on the object the call was
//! made on. Arguments arrive as host values and are validated here.

use cql_types::{
    Bigint, Collection, CqlType, CursorKey, Decimal, Float, HostCursor, Map, ScalarKind, Set,
    Smallint, Time, Tinyint, Tuple, UserTypeValue, Value, Varint,
};

use crate::construct::{HostObject, construct, populate};
use crate::error::{HostError, Result};
use crate::handlers::{self, CastTarget};
use crate::host_value::{ArrayKey, HostValue};
use crate::marshal::{from_value, to_named_value, to_value};
use crate::ssl::VerifyFlags;

/// What a method call hands back to the host.
#[derive(Debug)]
pub enum Returned {
    Value(HostValue),
    /// The receiver itself, for chaining builder calls.
    This,
    Object(HostObject),
}

impl From<HostValue> for Returned {
    fn from(value: HostValue) -> Self {
        Returned::Value(value)
    }
}

fn undefined(class: &str, method: &str) -> HostError {
    HostError::Logic(format!("Call to undefined method {class}::{method}()"))
}

fn must_be(name: &str, expected: &str, given: &HostValue) -> HostError {
    HostError::invalid_argument(format!("{name} must be {expected}, {} given", given.describe()))
}

fn expect_args(class: &str, method: &str, args: &[HostValue], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        return Err(HostError::invalid_argument(format!(
            "{class}::{method}() expects between {min} and {max} arguments, {} given",
            args.len()
        )));
    }
    Ok(())
}

fn index_arg(host: &HostValue) -> Result<usize> {
    match host {
        HostValue::Int(n) => {
            usize::try_from(*n).map_err(|_| HostError::invalid_argument("Index out of bounds"))
        }
        other => Err(must_be("index", "an int", other)),
    }
}

fn string_arg<'a>(name: &str, host: &'a HostValue) -> Result<&'a str> {
    host.as_str().ok_or_else(|| must_be(name, "a string", host))
}

fn opt(value: Option<&Value>) -> HostValue {
    value.cloned().map_or(HostValue::Null, from_value)
}

fn values_list<'a>(values: impl IntoIterator<Item = &'a Value>) -> HostValue {
    HostValue::list(values.into_iter().cloned().map(from_value))
}

/// Call `method` on `object`.
pub fn invoke(object: &mut HostObject, method: &str, args: &[HostValue]) -> Result<Returned> {
    let class = object.class_name();
    match object {
        HostObject::Value(value) => value_method(value, method, args).map(Returned::from),
        HostObject::Type(ty) => type_method(ty, method, args),
        HostObject::SslBuilder(builder) => match method {
            "withTrustedCerts" => {
                let paths = args
                    .iter()
                    .map(|p| string_arg("path", p))
                    .collect::<Result<Vec<_>>>()?;
                builder.with_trusted_certs(paths)?;
                Ok(Returned::This)
            }
            "withVerifyFlags" => {
                expect_args(class, method, args, 1, 1)?;
                let flags = match &args[0] {
                    HostValue::Int(n) => u32::try_from(*n).map_err(|_| {
                        HostError::invalid_argument(format!("flags must be a valid bit mask, {n} given"))
                    })?,
                    other => return Err(must_be("flags", "an int", other)),
                };
                builder.with_verify_flags(VerifyFlags::from_bits(flags));
                Ok(Returned::This)
            }
            "withClientCert" => {
                expect_args(class, method, args, 1, 1)?;
                builder.with_client_cert(string_arg("path", &args[0])?)?;
                Ok(Returned::This)
            }
            "withPrivateKey" => {
                expect_args(class, method, args, 1, 2)?;
                let passphrase = match args.get(1) {
                    None | Some(HostValue::Null) => None,
                    Some(p) => Some(string_arg("passphrase", p)?),
                };
                builder.with_private_key(string_arg("path", &args[0])?, passphrase)?;
                Ok(Returned::This)
            }
            "build" => Ok(Returned::Object(HostObject::SslOptions(builder.build()?))),
            _ => Err(undefined(class, method)),
        },
        HostObject::ClusterBuilder(builder) => match method {
            "withContactPoints" => {
                for host in args {
                    builder.with_contact_points(string_arg("host", host)?)?;
                }
                Ok(Returned::This)
            }
            "withPort" => {
                expect_args(class, method, args, 1, 1)?;
                match &args[0] {
                    HostValue::Int(port) => builder.with_port(*port)?,
                    other => return Err(must_be("port", "an integer between 1 and 65535", other)),
                };
                Ok(Returned::This)
            }
            "withCredentials" => {
                expect_args(class, method, args, 2, 2)?;
                builder.with_credentials(
                    string_arg("username", &args[0])?,
                    string_arg("password", &args[1])?,
                );
                Ok(Returned::This)
            }
            "withPersistentSessions" => {
                expect_args(class, method, args, 1, 1)?;
                match &args[0] {
                    HostValue::Bool(enabled) => builder.with_persistent_sessions(*enabled),
                    other => return Err(must_be("enabled", "a boolean", other)),
                };
                Ok(Returned::This)
            }
            _ => Err(undefined(class, method)),
        },
        HostObject::TimestampGenerator(generator) => match method {
            "next" => Ok(generator.next().map_or(HostValue::Null, HostValue::Int).into()),
            _ => Err(undefined(class, method)),
        },
        HostObject::Statement(_) | HostObject::SslOptions(_) | HostObject::RetryPolicy(_) => {
            Err(undefined(class, method))
        }
    }
}

fn value_method(value: &mut Value, method: &str, args: &[HostValue]) -> Result<HostValue> {
    let class = handlers::class_of(value);
    match method {
        "type" => return Ok(HostValue::Type(value.cql_type())),
        "__toString" => return handlers::cast(value, CastTarget::String),
        _ => {}
    }
    if let Some(cursor) = handlers::cursor_mut(value) {
        if let Some(result) = cursor_method(cursor, method) {
            return Ok(result);
        }
    }

    match value {
        Value::Bigint(v) => numeric_method(&*v, class, method, args),
        Value::Smallint(v) => numeric_method(&*v, class, method, args),
        Value::Tinyint(v) => numeric_method(&*v, class, method, args),
        Value::Varint(v) => numeric_method(&*v, class, method, args),
        Value::Decimal(v) => match method {
            "scale" => Ok(HostValue::Int(i64::from(v.scale()))),
            _ => numeric_method(&*v, class, method, args),
        },
        Value::Float(v) => match method {
            "isInfinite" => Ok(HostValue::Bool(v.is_infinite())),
            "isFinite" => Ok(HostValue::Bool(v.is_finite())),
            "isNaN" => Ok(HostValue::Bool(v.is_nan())),
            _ => numeric_method(&*v, class, method, args),
        },
        Value::Blob(v) => match method {
            "bytes" => Ok(HostValue::Str(v.bytes())),
            "toBinaryString" => Ok(HostValue::Bytes(v.to_binary_string())),
            _ => Err(undefined(class, method)),
        },
        Value::Inet(v) => match method {
            "address" => Ok(HostValue::Str(v.address())),
            _ => Err(undefined(class, method)),
        },
        Value::Timestamp(v) => match method {
            "time" => Ok(HostValue::Int(v.time())),
            "microtime" => match args.first() {
                Some(HostValue::Bool(true)) => Ok(HostValue::Float(v.microtime_float())),
                _ => Ok(HostValue::Str(v.microtime())),
            },
            "toDateTime" => Ok(HostValue::DateTime(v.to_datetime()?)),
            _ => Err(undefined(class, method)),
        },
        Value::Date(v) => match method {
            "seconds" => Ok(HostValue::Int(v.seconds())),
            "toDateTime" => {
                let time = args.first().map(time_arg).transpose()?.flatten();
                Ok(HostValue::DateTime(v.to_datetime(time)?))
            }
            _ => Err(undefined(class, method)),
        },
        Value::Time(v) => match method {
            "seconds" => Ok(HostValue::Int(v.seconds())),
            _ => Err(undefined(class, method)),
        },
        Value::Uuid(v) => match method {
            "uuid" => Ok(HostValue::Str(v.uuid())),
            "version" => Ok(HostValue::Int(v.version() as i64)),
            _ => Err(undefined(class, method)),
        },
        Value::Timeuuid(v) => match method {
            "uuid" => Ok(HostValue::Str(v.uuid())),
            "version" => Ok(HostValue::Int(v.version() as i64)),
            "time" => Ok(HostValue::Int(v.time())),
            "toDateTime" => Ok(HostValue::DateTime(v.to_datetime()?)),
            _ => Err(undefined(class, method)),
        },
        Value::Duration(v) => match method {
            "months" => Ok(HostValue::Int(i64::from(v.months()))),
            "days" => Ok(HostValue::Int(i64::from(v.days()))),
            "nanos" => Ok(HostValue::Int(v.nanos())),
            _ => Err(undefined(class, method)),
        },
        Value::Set(set) => {
            let ty = set.element_type().clone();
            let member = |args: &[HostValue]| -> Result<Value> {
                expect_args(class, method, args, 1, 1)?;
                to_named_value("value", &args[0], &ty)?.ok_or_else(|| {
                    HostError::invalid_argument("Invalid value: null is not supported inside sets")
                })
            };
            match method {
                "values" => Ok(values_list(set.iter())),
                "add" => Ok(HostValue::Bool(set.add(member(args)?)?)),
                "remove" => Ok(HostValue::Bool(set.remove(&member(args)?)?)),
                "has" => Ok(HostValue::Bool(set.has(&member(args)?)?)),
                _ => Err(undefined(class, method)),
            }
        }
        Value::Map(map) => {
            let (key_type, value_type) = (map.key_type().clone(), map.value_type().clone());
            let entry = |name: &str, host: &HostValue, ty: &CqlType| -> Result<Value> {
                to_named_value(name, host, ty)?.ok_or_else(|| {
                    HostError::invalid_argument("Invalid value: null is not supported inside maps")
                })
            };
            let key = |host: &HostValue| entry("key", host, &key_type);
            match method {
                "keys" => Ok(values_list(map.keys())),
                "values" => Ok(values_list(map.values())),
                "set" => {
                    expect_args(class, method, args, 2, 2)?;
                    map.set(key(&args[0])?, entry("value", &args[1], &value_type)?)?;
                    Ok(HostValue::Null)
                }
                "get" => {
                    expect_args(class, method, args, 1, 1)?;
                    Ok(opt(map.get(&key(&args[0])?)?))
                }
                "remove" => {
                    expect_args(class, method, args, 1, 1)?;
                    Ok(HostValue::Bool(map.remove(&key(&args[0])?)?))
                }
                "has" => {
                    expect_args(class, method, args, 1, 1)?;
                    Ok(HostValue::Bool(map.has(&key(&args[0])?)?))
                }
                _ => Err(undefined(class, method)),
            }
        }
        Value::List(list) => match method {
            "values" => Ok(values_list(list.values())),
            "add" => {
                let ty = list.element_type().clone();
                let values = args
                    .iter()
                    .map(|arg| {
                        to_named_value("value", arg, &ty)?.ok_or_else(|| {
                            HostError::invalid_argument(
                                "Invalid value: null is not supported inside collections",
                            )
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                list.add(values)?;
                Ok(HostValue::Bool(true))
            }
            "get" => {
                expect_args(class, method, args, 1, 1)?;
                Ok(opt(list.get(index_arg(&args[0])?)))
            }
            "find" => {
                expect_args(class, method, args, 1, 1)?;
                let Some(needle) = to_value(&args[0], list.element_type())? else {
                    return Ok(HostValue::Null);
                };
                Ok(list.find(&needle).map_or(HostValue::Null, |i| HostValue::Int(i as i64)))
            }
            "remove" => {
                expect_args(class, method, args, 1, 1)?;
                Ok(HostValue::Bool(list.remove(index_arg(&args[0])?)))
            }
            _ => Err(undefined(class, method)),
        },
        Value::Tuple(tuple) => match method {
            "values" => Ok(HostValue::list(tuple.values().iter().map(|v| opt(v.as_ref())))),
            "set" => {
                expect_args(class, method, args, 2, 2)?;
                let index = index_arg(&args[0])?;
                let ty = tuple
                    .types()
                    .get(index)
                    .cloned()
                    .ok_or_else(|| HostError::invalid_argument("Index out of bounds"))?;
                match to_named_value("value", &args[1], &ty)? {
                    Some(v) => tuple.set(index, v)?,
                    None => tuple.clear(index)?,
                }
                Ok(HostValue::Null)
            }
            "get" => {
                expect_args(class, method, args, 1, 1)?;
                let index = index_arg(&args[0])?;
                if index >= tuple.count() {
                    return Err(HostError::invalid_argument("Index out of bounds"));
                }
                Ok(opt(tuple.get(index)))
            }
            _ => Err(undefined(class, method)),
        },
        Value::UserType(udt) => match method {
            "values" => Ok(HostValue::Array(
                udt.values()
                    .map(|(name, v)| (ArrayKey::Str(name.to_string()), opt(v)))
                    .collect(),
            )),
            "set" => {
                expect_args(class, method, args, 2, 2)?;
                let name = string_arg("name", &args[0])?;
                let ty = udt
                    .fields()
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, t)| t.clone())
                    .ok_or_else(|| HostError::invalid_argument(format!("Invalid name '{name}'")))?;
                match to_named_value("value", &args[1], &ty)? {
                    Some(v) => udt.set(name, v)?,
                    None => udt.clear(name)?,
                }
                Ok(HostValue::Null)
            }
            "get" => {
                expect_args(class, method, args, 1, 1)?;
                Ok(opt(udt.get(string_arg("name", &args[0])?)?))
            }
            _ => Err(undefined(class, method)),
        },
        _ => Err(undefined(class, method)),
    }
}

fn cursor_method(cursor: &mut dyn HostCursor, method: &str) -> Option<HostValue> {
    let result = match method {
        "count" => HostValue::Int(cursor.count() as i64),
        "rewind" => {
            cursor.rewind();
            HostValue::Null
        }
        "valid" => HostValue::Bool(cursor.valid()),
        "next" => {
            cursor.next();
            HostValue::Null
        }
        "current" => cursor.current().map_or(HostValue::Null, from_value),
        "key" => match cursor.key() {
            None => HostValue::Null,
            Some(CursorKey::Index(i)) => HostValue::Int(i as i64),
            Some(CursorKey::Name(name)) => HostValue::Str(name),
            Some(CursorKey::Value(v)) => from_value(v),
        },
        _ => return None,
    };
    Some(result)
}

#[derive(Debug, Clone, Copy)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    fn from_method(method: &str) -> Option<Self> {
        match method {
            "add" => Some(BinaryOp::Add),
            "sub" => Some(BinaryOp::Sub),
            "mul" => Some(BinaryOp::Mul),
            "div" => Some(BinaryOp::Div),
            "mod" => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    fn operand_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "addend",
            BinaryOp::Sub => "difference",
            BinaryOp::Mul => "multiplier",
            BinaryOp::Div | BinaryOp::Mod => "divisor",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum UnaryOp {
    Abs,
    Neg,
    Sqrt,
}

/// Arithmetic shared by the numeric value classes. Operands must be of the
/// receiver's own class.
trait Numeric: Sized + Into<Value> {
    fn downcast(value: &Value) -> Option<&Self>;
    fn binary(&self, op: BinaryOp, other: &Self) -> Result<Self>;
    fn unary(&self, op: UnaryOp) -> Result<Self>;
    fn host_value(&self) -> HostValue;
    fn to_long(&self) -> Result<i64>;
    fn to_float(&self) -> f64;
    fn bounds() -> Option<(Self, Self)> {
        None
    }
}

fn not_implemented() -> HostError {
    HostError::runtime("Not implemented")
}

macro_rules! fixed_numeric {
    ($($ty:ident),*) => {$(
        impl Numeric for $ty {
            fn downcast(value: &Value) -> Option<&Self> {
                match value {
                    Value::$ty(v) => Some(v),
                    _ => None,
                }
            }

            fn binary(&self, op: BinaryOp, other: &Self) -> Result<Self> {
                let out = match op {
                    BinaryOp::Add => $ty::add(self, other),
                    BinaryOp::Sub => $ty::sub(self, other),
                    BinaryOp::Mul => $ty::mul(self, other),
                    BinaryOp::Div => $ty::div(self, other),
                    BinaryOp::Mod => $ty::rem(self, other),
                };
                Ok(out?)
            }

            fn unary(&self, op: UnaryOp) -> Result<Self> {
                let out = match op {
                    UnaryOp::Abs => $ty::abs(self),
                    UnaryOp::Neg => $ty::neg(self),
                    UnaryOp::Sqrt => $ty::sqrt(self),
                };
                Ok(out?)
            }

            fn host_value(&self) -> HostValue {
                fixed_host_value(Value::$ty(*self))
            }

            fn to_long(&self) -> Result<i64> {
                Ok($ty::to_int(self))
            }

            fn to_float(&self) -> f64 {
                $ty::to_double(self)
            }

            fn bounds() -> Option<(Self, Self)> {
                Some(($ty::min(), $ty::max()))
            }
        }
    )*};
}

fixed_numeric!(Bigint, Smallint, Tinyint);

/// Smallint and tinyint values fit a host int; bigint crosses as a string.
fn fixed_host_value(value: Value) -> HostValue {
    match value {
        Value::Smallint(v) => HostValue::Int(v.to_int()),
        Value::Tinyint(v) => HostValue::Int(v.to_int()),
        Value::Bigint(v) => HostValue::Str(v.to_string()),
        other => from_value(other),
    }
}

impl Numeric for Varint {
    fn downcast(value: &Value) -> Option<&Self> {
        match value {
            Value::Varint(v) => Some(v),
            _ => None,
        }
    }

    fn binary(&self, op: BinaryOp, other: &Self) -> Result<Self> {
        Ok(match op {
            BinaryOp::Add => Varint::add(self, other),
            BinaryOp::Sub => Varint::sub(self, other),
            BinaryOp::Mul => Varint::mul(self, other),
            BinaryOp::Div => Varint::div(self, other)?,
            BinaryOp::Mod => Varint::rem(self, other)?,
        })
    }

    fn unary(&self, op: UnaryOp) -> Result<Self> {
        Ok(match op {
            UnaryOp::Abs => Varint::abs(self),
            UnaryOp::Neg => Varint::neg(self),
            UnaryOp::Sqrt => Varint::sqrt(self)?,
        })
    }

    fn host_value(&self) -> HostValue {
        HostValue::Str(self.value())
    }

    fn to_long(&self) -> Result<i64> {
        Ok(Varint::to_int(self)?)
    }

    fn to_float(&self) -> f64 {
        self.to_double()
    }
}

impl Numeric for Decimal {
    fn downcast(value: &Value) -> Option<&Self> {
        match value {
            Value::Decimal(v) => Some(v),
            _ => None,
        }
    }

    fn binary(&self, op: BinaryOp, other: &Self) -> Result<Self> {
        match op {
            BinaryOp::Add => Ok(Decimal::add(self, other)),
            BinaryOp::Sub => Ok(Decimal::sub(self, other)),
            BinaryOp::Mul => Ok(Decimal::mul(self, other)?),
            BinaryOp::Div | BinaryOp::Mod => Err(not_implemented()),
        }
    }

    fn unary(&self, op: UnaryOp) -> Result<Self> {
        match op {
            UnaryOp::Abs => Ok(Decimal::abs(self)),
            UnaryOp::Neg => Ok(Decimal::neg(self)),
            UnaryOp::Sqrt => Err(not_implemented()),
        }
    }

    fn host_value(&self) -> HostValue {
        HostValue::Str(self.value())
    }

    fn to_long(&self) -> Result<i64> {
        Ok(Decimal::to_int(self)?)
    }

    fn to_float(&self) -> f64 {
        self.to_double()
    }
}

impl Numeric for Float {
    fn downcast(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    fn binary(&self, op: BinaryOp, other: &Self) -> Result<Self> {
        Ok(match op {
            BinaryOp::Add => Float::add(self, other),
            BinaryOp::Sub => Float::sub(self, other),
            BinaryOp::Mul => Float::mul(self, other),
            BinaryOp::Div => Float::div(self, other)?,
            BinaryOp::Mod => Float::rem(self, other)?,
        })
    }

    fn unary(&self, op: UnaryOp) -> Result<Self> {
        Ok(match op {
            UnaryOp::Abs => Float::abs(self),
            UnaryOp::Neg => Float::neg(self),
            UnaryOp::Sqrt => Float::sqrt(self)?,
        })
    }

    fn host_value(&self) -> HostValue {
        HostValue::Float(f64::from(self.value()))
    }

    fn to_long(&self) -> Result<i64> {
        Ok(Float::to_int(self))
    }

    fn to_float(&self) -> f64 {
        self.to_double()
    }

    fn bounds() -> Option<(Self, Self)> {
        Some((Float::min(), Float::max()))
    }
}

fn numeric_method<T: Numeric>(
    receiver: &T,
    class: &str,
    method: &str,
    args: &[HostValue],
) -> Result<HostValue> {
    if let Some(op) = BinaryOp::from_method(method) {
        expect_args(class, method, args, 1, 1)?;
        let other = match &args[0] {
            HostValue::Object(v) => T::downcast(v),
            _ => None,
        }
        .ok_or_else(|| must_be(op.operand_name(), &format!("an instance of {class}"), &args[0]))?;
        return Ok(HostValue::Object(receiver.binary(op, other)?.into()));
    }
    let unary = match method {
        "abs" => Some(UnaryOp::Abs),
        "neg" => Some(UnaryOp::Neg),
        "sqrt" => Some(UnaryOp::Sqrt),
        _ => None,
    };
    if let Some(op) = unary {
        return Ok(HostValue::Object(receiver.unary(op)?.into()));
    }
    match method {
        "value" => Ok(receiver.host_value()),
        "toInt" => Ok(HostValue::Int(receiver.to_long()?)),
        "toDouble" => Ok(HostValue::Float(receiver.to_float())),
        "min" | "max" => {
            let (min, max) = T::bounds().ok_or_else(|| undefined(class, method))?;
            let bound = if method == "min" { min } else { max };
            Ok(HostValue::Object(bound.into()))
        }
        _ => Err(undefined(class, method)),
    }
}

fn type_method(ty: &CqlType, method: &str, args: &[HostValue]) -> Result<Returned> {
    match method {
        "name" => Ok(HostValue::Str(type_name(ty).to_string()).into()),
        "__toString" => Ok(HostValue::Str(ty.to_string()).into()),
        "create" => Ok(create(ty, args)?.into()),
        "valueType" => match ty {
            CqlType::Set(inner) | CqlType::List(inner) | CqlType::Map(_, inner) => {
                Ok(HostValue::Type((**inner).clone()).into())
            }
            _ => Err(undefined("Cassandra\\Type", method)),
        },
        "keyType" => match ty {
            CqlType::Map(key, _) => Ok(HostValue::Type((**key).clone()).into()),
            _ => Err(undefined("Cassandra\\Type", method)),
        },
        "types" => match ty {
            CqlType::Tuple(types) => Ok(HostValue::list(types.iter().cloned().map(HostValue::Type)).into()),
            CqlType::UserType { fields, .. } => Ok(HostValue::Array(
                fields
                    .iter()
                    .map(|(n, t)| (ArrayKey::Str(n.clone()), HostValue::Type(t.clone())))
                    .collect(),
            )
            .into()),
            _ => Err(undefined("Cassandra\\Type", method)),
        },
        _ => Err(undefined("Cassandra\\Type", method)),
    }
}

fn type_name(ty: &CqlType) -> &str {
    match ty {
        CqlType::Scalar(kind) => kind.name(),
        CqlType::Set(_) => "set",
        CqlType::List(_) => "list",
        CqlType::Map(..) => "map",
        CqlType::Tuple(_) => "tuple",
        CqlType::UserType { .. } => "udt",
        CqlType::Custom(name) => name,
    }
}

fn scalar_class(kind: ScalarKind) -> Option<&'static str> {
    let class = match kind {
        ScalarKind::Bigint | ScalarKind::Counter => "Cassandra\\Bigint",
        ScalarKind::Smallint => "Cassandra\\Smallint",
        ScalarKind::Tinyint => "Cassandra\\Tinyint",
        ScalarKind::Varint => "Cassandra\\Varint",
        ScalarKind::Decimal => "Cassandra\\Decimal",
        ScalarKind::Float => "Cassandra\\Float",
        ScalarKind::Blob => "Cassandra\\Blob",
        ScalarKind::Inet => "Cassandra\\Inet",
        ScalarKind::Timestamp => "Cassandra\\Timestamp",
        ScalarKind::Date => "Cassandra\\Date",
        ScalarKind::Time => "Cassandra\\Time",
        ScalarKind::Uuid => "Cassandra\\Uuid",
        ScalarKind::Timeuuid => "Cassandra\\Timeuuid",
        ScalarKind::Duration => "Cassandra\\Duration",
        ScalarKind::Ascii
        | ScalarKind::Text
        | ScalarKind::Varchar
        | ScalarKind::Int
        | ScalarKind::Double
        | ScalarKind::Boolean => return None,
    };
    Some(class)
}

/// Build a value of type `ty` from host values.
///
/// Scalars take their constructor arguments; collections, tuples and user
/// types take the same items `populate` accepts.
pub fn create(ty: &CqlType, args: &[HostValue]) -> Result<HostValue> {
    let mut value = match ty {
        CqlType::Scalar(kind) => {
            return match scalar_class(*kind) {
                Some(class) => match construct(class, args)? {
                    HostObject::Value(v) => Ok(HostValue::Object(v)),
                    other => Err(undefined(other.class_name(), "create")),
                },
                None => {
                    let [arg] = args else {
                        return Err(HostError::invalid_argument(format!(
                            "Cassandra\\Type\\Scalar::create() expects exactly 1 argument, {} given",
                            args.len()
                        )));
                    };
                    Ok(to_value(arg, ty)?.map_or(HostValue::Null, from_value))
                }
            };
        }
        CqlType::Set(_) => Value::Set(Set::with_type(ty.clone())?),
        CqlType::List(_) => Value::List(Collection::with_type(ty.clone())?),
        CqlType::Map(..) => Value::Map(Map::with_type(ty.clone())?),
        CqlType::Tuple(_) => Value::Tuple(Tuple::with_type(ty.clone())?),
        CqlType::UserType { .. } => Value::UserType(UserTypeValue::with_type(ty.clone())?),
        CqlType::Custom(name) => {
            return Err(HostError::invalid_argument(format!(
                "Cannot create values of custom type {name}"
            )));
        }
    };
    populate(&mut value, args)?;
    Ok(HostValue::Object(value))
}

fn time_arg(host: &HostValue) -> Result<Option<Time>> {
    match host {
        HostValue::Null => Ok(None),
        HostValue::Object(Value::Time(t)) => Ok(Some(*t)),
        other => Err(must_be("time", "an instance of Cassandra\\Time", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExceptionKind;

    fn object(class: &str, args: &[HostValue]) -> HostObject {
        construct(class, args).unwrap()
    }

    fn call(object: &mut HostObject, method: &str, args: &[HostValue]) -> HostValue {
        match invoke(object, method, args).unwrap() {
            Returned::Value(v) => v,
            other => panic!("expected a value, got {other:?}"),
        }
    }

    #[test]
    fn smallint_arithmetic() {
        let mut a = object("Cassandra\\Smallint", &[HostValue::Int(100)]);
        let b = object("Cassandra\\Smallint", &[HostValue::Int(23)]);
        let sum = call(&mut a, "add", &[b.to_host_value().unwrap()]);
        let HostValue::Object(sum) = sum else { panic!() };
        assert_eq!(handlers::cast(&sum, CastTarget::Long).unwrap(), HostValue::Int(123));

        let max = object("Cassandra\\Smallint", &[HostValue::Int(32767)]);
        let err = invoke(&mut a, "add", &[max.to_host_value().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Range);
    }

    #[test]
    fn operands_must_share_the_class() {
        let mut a = object("Cassandra\\Smallint", &[HostValue::Int(1)]);
        let b = object("Cassandra\\Tinyint", &[HostValue::Int(1)]);
        let err = invoke(&mut a, "mul", &[b.to_host_value().unwrap()]).unwrap_err();
        assert_eq!(
            err.message(),
            "multiplier must be an instance of Cassandra\\Smallint, an instance of Cassandra\\Tinyint given"
        );
    }

    #[test]
    fn value_accessors() {
        let mut big = object("Cassandra\\Bigint", &[HostValue::Str("9223372036854775807".into())]);
        assert_eq!(call(&mut big, "value", &[]), HostValue::Str("9223372036854775807".into()));
        let mut tiny = object("Cassandra\\Tinyint", &[HostValue::Int(-5)]);
        assert_eq!(call(&mut tiny, "value", &[]), HostValue::Int(-5));
        let mut decimal = object("Cassandra\\Decimal", &[HostValue::Str("1.25".into())]);
        assert_eq!(call(&mut decimal, "scale", &[]), HostValue::Int(2));
        assert!(invoke(&mut decimal, "div", &[decimal_arg()]).is_err());
    }

    fn decimal_arg() -> HostValue {
        object("Cassandra\\Decimal", &[HostValue::Int(2)]).to_host_value().unwrap()
    }

    #[test]
    fn set_methods_and_iteration() {
        let mut set = object("Cassandra\\Set", &[HostValue::Str("int".into())]);
        assert_eq!(call(&mut set, "add", &[HostValue::Int(3)]), HostValue::Bool(true));
        assert_eq!(call(&mut set, "add", &[HostValue::Int(1)]), HostValue::Bool(true));
        assert_eq!(call(&mut set, "add", &[HostValue::Int(3)]), HostValue::Bool(false));
        assert_eq!(call(&mut set, "count", &[]), HostValue::Int(2));
        assert!(invoke(&mut set, "add", &[HostValue::Null]).is_err());

        call(&mut set, "rewind", &[]);
        let mut seen = Vec::new();
        while call(&mut set, "valid", &[]) == HostValue::Bool(true) {
            seen.push(call(&mut set, "current", &[]));
            call(&mut set, "next", &[]);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn tuple_get_out_of_bounds() {
        let mut tuple = object("Cassandra\\Tuple", &[HostValue::list([HostValue::Str("int".into())])]);
        call(&mut tuple, "set", &[HostValue::Int(0), HostValue::Int(7)]);
        assert_eq!(call(&mut tuple, "get", &[HostValue::Int(0)]), HostValue::Int(7));
        let err = invoke(&mut tuple, "get", &[HostValue::Int(1)]).unwrap_err();
        assert_eq!(err.message(), "Index out of bounds");
    }

    #[test]
    fn type_create_builds_values() {
        let mut ty = object("Cassandra\\Type\\Map", &[HostValue::Str("text".into()), HostValue::Str("int".into())]);
        let map = call(&mut ty, "create", &[HostValue::Str("a".into()), HostValue::Int(1)]);
        let HostValue::Object(Value::Map(map)) = map else { panic!() };
        assert_eq!(map.get(&Value::from("a")).unwrap(), Some(&Value::Int(1)));

        let mut scalar = object("Cassandra\\Type\\Scalar", &[HostValue::Str("varint".into())]);
        let v = call(&mut scalar, "create", &[HostValue::Str("123".into())]);
        assert!(matches!(v, HostValue::Object(Value::Varint(_))));
        assert_eq!(call(&mut scalar, "name", &[]), HostValue::Str("varint".into()));
    }

    #[test]
    fn builders_chain() {
        let mut builder = object("Cassandra\\Cluster\\Builder", &[]);
        assert!(matches!(
            invoke(&mut builder, "withPort", &[HostValue::Int(9142)]).unwrap(),
            Returned::This
        ));
        let err = invoke(&mut builder, "withPort", &[HostValue::Int(0)]).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::InvalidArgument);
        assert!(invoke(&mut builder, "connect", &[]).is_err());
    }

    #[test]
    fn time_arguments() {
        let time = construct("Cassandra\\Time", &[HostValue::Int(5)]).unwrap();
        assert_eq!(time_arg(&time.to_host_value().unwrap()).unwrap().map(|t| t.value()), Some(5));
        assert_eq!(time_arg(&HostValue::Null).unwrap(), None);
        assert!(time_arg(&HostValue::Int(5)).is_err());
    }
}
