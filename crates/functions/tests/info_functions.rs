use std::sync::Arc;

use skiffsql_common::error::ErrorKind;
use skiffsql_common::result::Row;
use skiffsql_common::types::Value;
use skiffsql_functions::{
    BindContext, Binder, BuildInfo, FunctionConfig, FunctionRegistry, SERVER_VERSION,
    ScalarExpr, SessionContext, StaticBuildInfo,
};
use skiffsql_ir::FunctionId;
use skiffsql_test_utils::{
    assert_error_contains, assert_error_kind, binder_for, builtin_registry, constants,
    eval_call, new_session, nulls, session_fixture,
};

#[test]
fn test_database() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder.bind(FunctionId::Database, vec![]).unwrap();

    assert_eq!(func.evaluate(&Row::empty()).unwrap(), Value::Null);

    session.use_database(Some("test".to_string()));
    let value = func.evaluate(&Row::empty()).unwrap();
    assert_eq!(value.get_str().unwrap(), "test");

    let schema = binder.bind_name("SCHEMA", vec![]).unwrap();
    assert_eq!(schema.id(), FunctionId::Database);
    assert_eq!(schema.evaluate(&Row::empty()).unwrap(), Value::string("test"));
}

#[test]
fn test_found_rows() {
    let session = session_fixture().found_rows(2).build();
    let binder = binder_for(&session);
    let value = eval_call(&binder, FunctionId::FoundRows, vec![]).unwrap();
    assert_eq!(value.get_u64().unwrap(), 2);
}

#[test]
fn test_user() {
    let session = session_fixture().user("root@localhost").build();
    let binder = binder_for(&session);
    let value = eval_call(&binder, FunctionId::User, vec![]).unwrap();
    assert_eq!(value.get_str().unwrap(), "root@localhost");
}

#[test]
fn test_current_user() {
    let session = session_fixture().user("root@localhost").build();
    let binder = binder_for(&session);
    let value = eval_call(&binder, FunctionId::CurrentUser, vec![]).unwrap();
    assert_eq!(value.get_str().unwrap(), "root@localhost");
}

#[test]
fn test_user_aliases() {
    let session = session_fixture().user("app@10.0.0.1").build();
    let binder = binder_for(&session);
    for name in ["user", "SESSION_USER", "system_user"] {
        let func = binder.bind_name(name, vec![]).unwrap();
        assert_eq!(func.id(), FunctionId::User);
        assert_eq!(
            func.evaluate(&Row::empty()).unwrap(),
            Value::string("app@10.0.0.1")
        );
    }
}

#[test]
fn test_unauthenticated_user_is_empty_string() {
    let session = new_session();
    let binder = binder_for(&session);
    for id in [FunctionId::User, FunctionId::CurrentUser] {
        assert_eq!(eval_call(&binder, id, vec![]).unwrap(), Value::string(""));
    }
}

#[test]
fn test_connection_id() {
    let session = session_fixture().connection_id(1).build();
    let binder = binder_for(&session);
    let value = eval_call(&binder, FunctionId::ConnectionId, vec![]).unwrap();
    assert_eq!(value.get_u64().unwrap(), 1);
}

#[test]
fn test_version() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder.bind(FunctionId::Version, vec![]).unwrap();
    assert_eq!(func.evaluate(&Row::empty()).unwrap(), Value::string(SERVER_VERSION));

    session.use_database(Some("other".to_string()));
    session.set_user(Some("root@localhost".to_string()));
    assert_eq!(func.evaluate(&Row::empty()).unwrap(), Value::string(SERVER_VERSION));
}

#[test]
fn test_version_from_config() {
    let session = new_session();
    let config = FunctionConfig::default().with_server_version("5.7.25-test");
    let binder = Binder::new(
        Arc::new(FunctionRegistry::with_config(&config)),
        BindContext::new(&session),
    );
    let value = eval_call(&binder, FunctionId::Version, vec![]).unwrap();
    assert_eq!(value, Value::string("5.7.25-test"));
}

#[test]
fn test_version_without_session() {
    let binder = Binder::new(builtin_registry(), BindContext::detached());
    let value = eval_call(&binder, FunctionId::Version, vec![]).unwrap();
    assert_eq!(value, Value::string(SERVER_VERSION));
}

#[test]
fn test_skiffsql_version() {
    let session = new_session();
    let binder = binder_for(&session);
    let value = eval_call(&binder, FunctionId::SkiffsqlVersion, vec![]).unwrap();
    assert_eq!(
        value.get_str().unwrap(),
        StaticBuildInfo::current().engine_info()
    );
}

#[test]
fn test_skiffsql_version_uses_injected_provider() {
    let session = new_session();
    let ctx = BindContext::new(&session)
        .with_build_info(Arc::new(|| "Release Version: v9.9.9-test".to_string()));
    let binder = Binder::new(builtin_registry(), ctx);
    let func = binder.bind_name("skiffsql_version", vec![]).unwrap();
    assert_eq!(
        func.evaluate(&Row::empty()).unwrap(),
        Value::string("Release Version: v9.9.9-test")
    );
}

#[test]
fn test_last_insert_id() {
    let session = session_fixture().last_insert_id(41).build();
    let binder = binder_for(&session);
    let func = binder.bind(FunctionId::LastInsertId, vec![]).unwrap();
    assert_eq!(func.evaluate(&Row::empty()).unwrap(), Value::uint64(41));

    session.set_last_insert_id(42);
    assert_eq!(func.evaluate(&Row::empty()).unwrap(), Value::uint64(42));
}

#[test]
fn test_last_insert_id_with_argument() {
    let session = session_fixture().last_insert_id(41).build();
    let binder = binder_for(&session);

    let value = eval_call(&binder, FunctionId::LastInsertId, vec![Value::int64(7)]).unwrap();
    assert_eq!(value, Value::uint64(7));

    let value = eval_call(&binder, FunctionId::LastInsertId, vec![Value::Null]).unwrap();
    assert_eq!(value, Value::Null);

    let value = eval_call(&binder, FunctionId::LastInsertId, vec![Value::int64(-1)]).unwrap();
    assert_eq!(value, Value::uint64(u64::MAX));

    let value =
        eval_call(&binder, FunctionId::LastInsertId, vec![Value::string("12")]).unwrap();
    assert_eq!(value, Value::uint64(12));

    let value =
        eval_call(&binder, FunctionId::LastInsertId, vec![Value::string("-1")]).unwrap();
    assert_eq!(value, Value::uint64(u64::MAX));

    let value = eval_call(
        &binder,
        FunctionId::LastInsertId,
        vec![Value::string(u64::MAX.to_string())],
    )
    .unwrap();
    assert_eq!(value, Value::uint64(u64::MAX));

    assert_error_kind(
        eval_call(&binder, FunctionId::LastInsertId, vec![Value::string("abc")]),
        ErrorKind::TypeCoercion,
    );
}

#[test]
fn test_last_insert_id_argument_from_row() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder
        .bind(
            FunctionId::LastInsertId,
            vec![Arc::new(ScalarExpr::column("id", 1))],
        )
        .unwrap();
    let row = Row::new(vec![Value::string("x"), Value::uint64(99)]);
    assert_eq!(func.evaluate(&row).unwrap(), Value::uint64(99));
}

#[test]
fn test_benchmark() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder.bind(FunctionId::Benchmark, nulls(2)).unwrap();
    let result = func.evaluate(&Row::empty());
    assert_error_contains(result, &["FUNCTION BENCHMARK does not exist"]);
}

#[test]
fn test_charset() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder.bind(FunctionId::Charset, nulls(1)).unwrap();
    let err = func.evaluate(&Row::empty()).unwrap_err();
    assert_eq!(err.to_string(), "FUNCTION CHARSET does not exist");
}

#[test]
fn test_coercibility() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder.bind(FunctionId::Coercibility, nulls(1)).unwrap();
    let err = func.evaluate(&Row::empty()).unwrap_err();
    assert_eq!(err.to_string(), "FUNCTION COERCIBILITY does not exist");
}

#[test]
fn test_collation() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder.bind(FunctionId::Collation, nulls(1)).unwrap();
    let err = func.evaluate(&Row::empty()).unwrap_err();
    assert_eq!(err.to_string(), "FUNCTION COLLATION does not exist");
}

#[test]
fn test_row_count() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder.bind(FunctionId::RowCount, vec![]).unwrap();
    let err = func.evaluate(&Row::empty()).unwrap_err();
    assert_eq!(err.to_string(), "FUNCTION ROW_COUNT does not exist");
    assert_eq!(err.kind(), ErrorKind::FunctionNotImplemented);
    assert!(!err.is_structural());
}

#[test]
fn test_stub_fails_with_non_null_arguments() {
    let session = new_session();
    let binder = binder_for(&session);
    let func = binder
        .bind(FunctionId::Charset, constants(vec![Value::string("abc")]))
        .unwrap();
    assert_error_kind(func.evaluate(&Row::empty()), ErrorKind::FunctionNotImplemented);
}

#[test]
fn test_session_functions_after_session_dropped() {
    let session = session_fixture().database("test").build();
    let binder = binder_for(&session);
    let funcs: Vec<_> = [
        FunctionId::Database,
        FunctionId::User,
        FunctionId::CurrentUser,
        FunctionId::ConnectionId,
        FunctionId::FoundRows,
        FunctionId::LastInsertId,
    ]
    .into_iter()
    .map(|id| binder.bind(id, vec![]).unwrap())
    .collect();
    drop(session);

    for func in funcs {
        let err = func.evaluate(&Row::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContextUnavailable);
        assert!(err.to_string().contains(func.id().name()));
    }
}

#[test]
fn test_session_functions_with_detached_context() {
    let binder = Binder::new(builtin_registry(), BindContext::detached());
    let func = binder.bind(FunctionId::Database, vec![]).unwrap();
    assert_error_kind(func.evaluate(&Row::empty()), ErrorKind::ContextUnavailable);
}

/// Session provider that reports whatever it was built with, unnormalised.
struct RawSession {
    database: Option<String>,
}

impl SessionContext for RawSession {
    fn current_database(&self) -> Option<String> {
        self.database.clone()
    }

    fn user(&self) -> Option<String> {
        None
    }

    fn connection_id(&self) -> u64 {
        3
    }

    fn last_found_rows(&self) -> u64 {
        0
    }

    fn rows_affected(&self) -> u64 {
        0
    }

    fn last_insert_id(&self) -> u64 {
        0
    }
}

#[test]
fn test_database_empty_name_from_foreign_session() {
    let empty = Arc::new(RawSession {
        database: Some(String::new()),
    });
    let binder = Binder::new(builtin_registry(), BindContext::new(&empty));
    let value = eval_call(&binder, FunctionId::Database, vec![]).unwrap();
    assert_eq!(value, Value::Null);

    let named = Arc::new(RawSession {
        database: Some("shop".to_string()),
    });
    let binder = Binder::new(builtin_registry(), BindContext::new(&named));
    let value = eval_call(&binder, FunctionId::Database, vec![]).unwrap();
    assert_eq!(value, Value::string("shop"));
    assert_eq!(
        eval_call(&binder, FunctionId::ConnectionId, vec![]).unwrap(),
        Value::uint64(3)
    );
}
