//! JSON command-line arguments as host values.
//!
//! Objects with a `$class` key construct an instance of that class from the
//! `args` array; every other object becomes a string-keyed array.

use cql_host::{ArrayKey, HostValue, construct};
use serde_json::Value as Json;

use crate::error::CliError;

pub fn parse(arg: &str) -> Result<HostValue, CliError> {
    let json: Json = serde_json::from_str(arg)
        .map_err(|e| CliError::Argument { arg: arg.to_string(), detail: e.to_string() })?;
    to_host(&json, arg)
}

fn to_host(json: &Json, arg: &str) -> Result<HostValue, CliError> {
    let value = match json {
        Json::Null => HostValue::Null,
        Json::Bool(b) => HostValue::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => HostValue::Int(i),
            None => HostValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => HostValue::Str(s.clone()),
        Json::Array(items) => HostValue::list(
            items.iter().map(|v| to_host(v, arg)).collect::<Result<Vec<_>, _>>()?,
        ),
        Json::Object(fields) => match fields.get("$class") {
            Some(Json::String(class)) => {
                let args = match fields.get("args") {
                    Some(Json::Array(items)) => {
                        items.iter().map(|v| to_host(v, arg)).collect::<Result<Vec<_>, _>>()?
                    }
                    None => Vec::new(),
                    Some(_) => {
                        return Err(CliError::Argument {
                            arg: arg.to_string(),
                            detail: "args must be an array".into(),
                        });
                    }
                };
                let object = construct(class, &args)?;
                object.to_host_value().ok_or_else(|| CliError::Argument {
                    arg: arg.to_string(),
                    detail: format!("{class} cannot be passed as a value"),
                })?
            }
            _ => HostValue::Array(
                fields
                    .iter()
                    .map(|(k, v)| Ok((ArrayKey::Str(k.clone()), to_host(v, arg)?)))
                    .collect::<Result<Vec<_>, CliError>>()?,
            ),
        },
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_types::Value;

    #[test]
    fn primitives_and_arrays() {
        assert_eq!(parse("null").unwrap(), HostValue::Null);
        assert_eq!(parse("1.5").unwrap(), HostValue::Float(1.5));
        assert_eq!(
            parse("[1, \"a\"]").unwrap(),
            HostValue::list([HostValue::Int(1), HostValue::Str("a".into())])
        );
        let HostValue::Array(entries) = parse("{\"a\": true}").unwrap() else { panic!() };
        assert_eq!(entries, vec![(ArrayKey::Str("a".into()), HostValue::Bool(true))]);
    }

    #[test]
    fn class_objects_are_constructed() {
        let v = parse(r#"{"$class": "Cassandra\\Tinyint", "args": [7]}"#).unwrap();
        assert!(matches!(v, HostValue::Object(Value::Tinyint(_))));
        assert!(parse(r#"{"$class": "Cassandra\\Tinyint", "args": [700]}"#).is_err());
        assert!(parse("{").is_err());
    }
}
