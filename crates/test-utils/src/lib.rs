//! Testing utilities for SkiffSQL.

#![allow(dead_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

use std::sync::Arc;

use skiffsql_common::error::{ErrorKind, Result};
use skiffsql_common::result::Row;
use skiffsql_common::types::Value;
use skiffsql_executor::Session;
use skiffsql_functions::{BindContext, Binder, FunctionRegistry, ScalarExpr};
use skiffsql_ir::FunctionId;

/// Builder for sessions in a known state.
#[derive(Debug, Default)]
pub struct SessionFixture {
    connection_id: u64,
    database: Option<String>,
    user: Option<String>,
    found_rows: u64,
    rows_affected: u64,
    last_insert_id: u64,
}

pub fn session_fixture() -> SessionFixture {
    SessionFixture {
        connection_id: 1,
        ..SessionFixture::default()
    }
}

impl SessionFixture {
    pub fn connection_id(mut self, id: u64) -> Self {
        self.connection_id = id;
        self
    }

    pub fn database(mut self, name: &str) -> Self {
        self.database = Some(name.to_string());
        self
    }

    pub fn user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn found_rows(mut self, rows: u64) -> Self {
        self.found_rows = rows;
        self
    }

    pub fn rows_affected(mut self, rows: u64) -> Self {
        self.rows_affected = rows;
        self
    }

    pub fn last_insert_id(mut self, id: u64) -> Self {
        self.last_insert_id = id;
        self
    }

    pub fn build(self) -> Arc<Session> {
        let session = Session::with_connection_id(self.connection_id);
        session.use_database(self.database);
        session.set_user(self.user);
        session.finish_statement(self.found_rows, self.rows_affected);
        session.set_last_insert_id(self.last_insert_id);
        Arc::new(session)
    }
}

pub fn new_session() -> Arc<Session> {
    session_fixture().build()
}

pub fn builtin_registry() -> Arc<FunctionRegistry> {
    Arc::new(FunctionRegistry::builtin())
}

pub fn binder_for(session: &Arc<Session>) -> Binder {
    Binder::new(builtin_registry(), BindContext::new(session))
}

/// Wraps literal values as constant argument expressions.
pub fn constants(values: Vec<Value>) -> Vec<Arc<ScalarExpr>> {
    values
        .into_iter()
        .map(|v| Arc::new(ScalarExpr::Constant(v)))
        .collect()
}

pub fn nulls(count: usize) -> Vec<Arc<ScalarExpr>> {
    constants(vec![Value::Null; count])
}

/// Binds `id(args)` and evaluates it against an empty row.
pub fn eval_call(binder: &Binder, id: FunctionId, args: Vec<Value>) -> Result<Value> {
    let func = binder.bind(id, constants(args))?;
    func.evaluate(&Row::empty())
}

pub fn assert_error_contains<T>(result: Result<T>, keywords: &[&str]) {
    match result {
        Ok(_) => panic!("Expected error but got Ok result"),
        Err(e) => {
            let error_msg = e.to_string().to_lowercase();
            let found = keywords
                .iter()
                .any(|keyword| error_msg.contains(&keyword.to_lowercase()));
            assert!(
                found,
                "Error message '{}' does not contain any of the expected keywords: {:?}",
                e, keywords
            );
        }
    }
}

pub fn assert_error_kind<T>(result: Result<T>, kind: ErrorKind) {
    match result {
        Ok(_) => panic!("Expected {:?} error but got Ok result", kind),
        Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {}", e),
    }
}
