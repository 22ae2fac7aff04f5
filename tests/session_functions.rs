use std::sync::Arc;

use skiffsql::{
    ErrorKind, Expr, FunctionConfig, FunctionId, FunctionRegistry, Row, SERVER_VERSION, Session,
    SkiffSQLEngine, Value,
};

fn engine() -> SkiffSQLEngine {
    SkiffSQLEngine::with_config(FunctionConfig::default())
}

#[test]
fn test_database_and_schema() {
    let engine = engine();
    assert_eq!(engine.call("DATABASE", vec![]).unwrap(), Value::Null);
    assert_eq!(engine.call("schema", vec![]).unwrap(), Value::Null);

    engine.session().use_database(Some("test".to_string()));
    assert_eq!(engine.call("DATABASE", vec![]).unwrap(), Value::string("test"));
    assert_eq!(engine.call("SCHEMA", vec![]).unwrap(), Value::string("test"));
}

#[test]
fn test_found_rows_after_statement() {
    let engine = engine();
    engine.session().finish_statement(3, 0);
    assert_eq!(engine.call("FOUND_ROWS", vec![]).unwrap(), Value::uint64(3));
}

#[test]
fn test_user_functions() {
    let engine = engine();
    for name in ["USER", "CURRENT_USER", "SESSION_USER", "SYSTEM_USER"] {
        assert_eq!(engine.call(name, vec![]).unwrap(), Value::string(""), "{}", name);
    }
    engine.session().set_user(Some("root@localhost".to_string()));
    assert_eq!(engine.call("USER", vec![]).unwrap(), Value::string("root@localhost"));
    assert_eq!(
        engine.call("CURRENT_USER", vec![]).unwrap(),
        Value::string("root@localhost")
    );
}

#[test]
fn test_connection_id_matches_session() {
    let registry = Arc::new(FunctionRegistry::builtin());
    let engine = SkiffSQLEngine::with_registry(registry, Arc::new(Session::with_connection_id(1)));
    assert_eq!(engine.call("CONNECTION_ID", vec![]).unwrap(), Value::uint64(1));
}

#[test]
fn test_connection_ids_differ_between_engines() {
    let a = engine();
    let b = engine();
    assert_ne!(
        a.call("CONNECTION_ID", vec![]).unwrap(),
        b.call("CONNECTION_ID", vec![]).unwrap()
    );
}

#[test]
fn test_version_strings() {
    let engine = engine();
    assert_eq!(engine.call("VERSION", vec![]).unwrap(), Value::string(SERVER_VERSION));

    let info = engine.call("SKIFFSQL_VERSION", vec![]).unwrap();
    let info = info.as_str().unwrap().to_string();
    assert!(info.starts_with("Release Version: "), "{}", info);
    assert!(info.contains("\nEdition: "));

    let custom = SkiffSQLEngine::with_config(
        FunctionConfig::default().with_server_version("5.7.25-custom"),
    );
    assert_eq!(
        custom.call("version", vec![]).unwrap(),
        Value::string("5.7.25-custom")
    );
}

#[test]
fn test_not_implemented_functions() {
    let engine = engine();
    let cases = [
        ("BENCHMARK", vec![Value::Null, Value::Null]),
        ("CHARSET", vec![Value::Null]),
        ("COERCIBILITY", vec![Value::Null]),
        ("COLLATION", vec![Value::Null]),
        ("ROW_COUNT", vec![]),
    ];
    for (name, args) in cases {
        let err = engine.call(name, args).unwrap_err();
        assert_eq!(err.to_string(), format!("FUNCTION {} does not exist", name));
        assert_eq!(err.kind(), ErrorKind::FunctionNotImplemented);
        assert_eq!(err.mysql_code(), 1305);
    }
}

#[test]
fn test_call_errors() {
    let engine = engine();
    let err = engine.call("NO_SUCH_FN", vec![]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownFunction);
    assert_eq!(err.to_string(), "Function not found: NO_SUCH_FN");

    let err = engine.call("FOUND_ROWS", vec![Value::int64(1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArityMismatch);
    assert_eq!(err.mysql_code(), 1582);
}

#[test]
fn test_evaluate_against_row() {
    let engine = engine();
    let expr = Expr::call(FunctionId::LastInsertId, vec![Expr::column("id", 1)]);
    let row = Row::new(vec![Value::string("x"), Value::int64(12)]);
    assert_eq!(engine.evaluate(&expr, &row).unwrap(), Value::uint64(12));

    engine.session().set_last_insert_id(40);
    assert_eq!(
        engine
            .evaluate(&Expr::call(FunctionId::LastInsertId, vec![]), &Row::empty())
            .unwrap(),
        Value::uint64(40)
    );
}

#[test]
fn test_registry_lists_every_builtin() {
    let engine = engine();
    assert_eq!(engine.registry().ids(), FunctionId::ALL.to_vec());
}
