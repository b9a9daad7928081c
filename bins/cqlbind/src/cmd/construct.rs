use cql_host::{HostObject, HostValue, Returned, construct, invoke, populate};
use serde_json::json;

use crate::config::ConstructArgs;
use crate::error::CliError;
use crate::json;

pub fn run(args: ConstructArgs) -> Result<(), CliError> {
    let ctor_args = args.args.iter().map(|a| json::parse(a)).collect::<Result<Vec<_>, _>>()?;
    let mut object = construct(&args.class, &ctor_args)?;

    if !args.items.is_empty() {
        let items = args.items.iter().map(|a| json::parse(a)).collect::<Result<Vec<_>, _>>()?;
        let HostObject::Value(value) = &mut object else {
            return Err(CliError::Argument {
                arg: args.class.clone(),
                detail: "only collection values accept items".into(),
            });
        };
        populate(value, &items)?;
    }

    let mut results = Vec::new();
    for call in &args.calls {
        let (method, call_args) = match call.split_once('=') {
            Some((method, raw)) => match json::parse(raw)? {
                HostValue::Array(entries) => (method, entries.into_iter().map(|(_, v)| v).collect()),
                other => (method, vec![other]),
            },
            None => (call.as_str(), Vec::new()),
        };
        tracing::debug!(method, args = call_args.len(), "calling method");
        let returned = match invoke(&mut object, method, &call_args)? {
            Returned::Value(v) => v.to_json(),
            Returned::This => json!({"class": object.class_name()}),
            Returned::Object(o) => o.to_json(),
        };
        results.push(json!({"method": method, "returned": returned}));
    }

    let mut output = object.to_json();
    if !results.is_empty() {
        output["calls"] = serde_json::Value::Array(results);
    }
    super::print(&output)
}
