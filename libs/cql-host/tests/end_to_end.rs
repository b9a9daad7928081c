use cql_host::{
    ArrayKey, DriverConfig, ExceptionKind, HostObject, HostValue, LogConfig, LogLevel, LogMessage,
    Module, Returned, Settings, construct, invoke, populate,
};
use cql_types::Value;

fn text(s: &str) -> HostValue {
    HostValue::Str(s.into())
}

#[test]
fn user_type_round_trips_through_json() {
    let fields = HostValue::Array(vec![
        (ArrayKey::Str("name".into()), text("text")),
        (ArrayKey::Str("age".into()), text("int")),
    ]);
    let HostObject::Value(mut udt) = construct("Cassandra\\UserTypeValue", &[fields]).unwrap() else {
        panic!("expected a value");
    };
    let row = HostValue::Array(vec![(ArrayKey::Str("name".into()), text("ada"))]);
    populate(&mut udt, &[row]).unwrap();

    let json = HostValue::Object(udt).to_json();
    assert_eq!(json["class"], "Cassandra\\UserTypeValue");
    assert_eq!(json["values"]["name"], "ada");
    assert!(json["values"]["age"].is_null());
}

#[test]
fn map_iteration_follows_insertion_order() {
    let mut map = construct("Cassandra\\Map", &[text("int"), text("text")]).unwrap();
    for (k, v) in [(3, "c"), (1, "a"), (2, "b")] {
        invoke(&mut map, "set", &[HostValue::Int(k), text(v)]).unwrap();
    }
    let mut keys = Vec::new();
    invoke(&mut map, "rewind", &[]).unwrap();
    loop {
        let Returned::Value(HostValue::Bool(true)) = invoke(&mut map, "valid", &[]).unwrap() else {
            break;
        };
        if let Returned::Value(key) = invoke(&mut map, "key", &[]).unwrap() {
            keys.push(key);
        }
        invoke(&mut map, "next", &[]).unwrap();
    }
    assert_eq!(keys, vec![HostValue::Int(3), HostValue::Int(1), HostValue::Int(2)]);
}

#[test]
fn nested_collections_require_exact_types() {
    let set_of_int = construct("Cassandra\\Type\\Set", &[text("int")]).unwrap();
    let mut outer = construct("Cassandra\\Collection", &[set_of_int.to_host_value().unwrap()]).unwrap();
    let inner = construct("Cassandra\\Set", &[text("text")]).unwrap();
    let err = invoke(&mut outer, "add", &[inner.to_host_value().unwrap()]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::InvalidArgument);

    let mut ints = construct("Cassandra\\Set", &[text("int")]).unwrap();
    invoke(&mut ints, "add", &[HostValue::Int(1)]).unwrap();
    invoke(&mut outer, "add", &[ints.to_host_value().unwrap()]).unwrap();
    let HostObject::Value(Value::List(list)) = &outer else { panic!() };
    assert_eq!(list.count(), 1);
}

#[test]
fn config_drives_logging_and_tls() {
    let dir = tempfile::tempdir().unwrap();
    let ca = dir.path().join("ca.pem");
    std::fs::write(&ca, "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n").unwrap();
    let log_path = dir.path().join("driver.log");
    std::fs::write(&log_path, "").unwrap();

    let config = DriverConfig::parse(&format!(
        "[log]\nlocation = {:?}\nlevel = \"INFO\"\n\n[ssl]\ntrusted_certs = [{:?}]\nverify_flags = 1\n",
        log_path.display().to_string(),
        ca.display().to_string(),
    ))
    .unwrap();

    let log = LogConfig::new();
    let mut module = Module::new(Settings::new(&log), None).unwrap();
    config.apply_log(module.settings_mut()).unwrap();
    assert_eq!(log.level(), LogLevel::Info);

    log.log(&LogMessage { severity: LogLevel::Info, message: "connected", file: "session.c", line: 7 });
    log.log(&LogMessage { severity: LogLevel::Debug, message: "hidden", file: "session.c", line: 8 });
    let written = std::fs::read_to_string(&log_path).unwrap();
    assert!(written.contains("[INFO] connected (session.c:7)"));
    assert!(!written.contains("hidden"));

    let cluster = config.cluster_builder().unwrap().build();
    let ssl = cluster.ssl.as_ref().unwrap();
    assert_eq!(ssl.trusted_cert_count(), 1);
    assert_eq!(ssl.verify_flags().bits(), 1);
}

#[test]
fn statements_bind_inferred_parameters() {
    let HostObject::Statement(stmt) =
        construct("Cassandra\\SimpleStatement", &[text("SELECT * FROM t WHERE k = ?")]).unwrap()
    else {
        panic!("expected a statement");
    };
    let bigint = construct("Cassandra\\Bigint", &[HostValue::Int(5)]).unwrap();
    let bound = stmt.bind(&[bigint.to_host_value().unwrap(), HostValue::Bool(true)]).unwrap();
    assert_eq!(bound.len(), 2);
    assert_eq!(bound[1], Some(Value::Boolean(true)));
}
