//! SkiffSQL - the scalar-function evaluation core of a SQL engine.
//!
//! The pipeline for a function call is:
//! ```text
//! Expr (from the planner) → Binder → ScalarExpr tree → evaluate(row) → Value
//! ```
//!
//! `SkiffSQLEngine` owns a frozen `FunctionRegistry` and one `Session`, and
//! binds/evaluates expressions against them.
//!
//! # Example
//!
//! ```rust
//! use skiffsql::{Expr, FunctionId, Row, SkiffSQLEngine, Value};
//!
//! let engine = SkiffSQLEngine::new();
//! engine.session().use_database(Some("test".to_string()));
//!
//! let db = engine
//!     .evaluate(&Expr::call(FunctionId::Database, vec![]), &Row::empty())
//!     .unwrap();
//! assert_eq!(db, Value::string("test"));
//! ```

use std::sync::Arc;

use debug_print::debug_eprintln;
pub use skiffsql_common::error::{Error, ErrorKind, Result};
pub use skiffsql_common::result::Row;
pub use skiffsql_common::types::{DataType, DurationValue, Value};
pub use skiffsql_executor::{CompiledExpr, ExpressionEvaluator, Session};
pub use skiffsql_functions::{
    BindContext, Binder, BoundFunction, BuildInfo, FunctionConfig, FunctionRegistry,
    SERVER_VERSION, ScalarExpr, SessionContext,
};
pub use skiffsql_ir::{Expr, FunctionId};

pub struct SkiffSQLEngine {
    evaluator: ExpressionEvaluator,
    session: Arc<Session>,
}

impl SkiffSQLEngine {
    pub fn new() -> Self {
        Self::with_config(FunctionConfig::from_env())
    }

    pub fn with_config(config: FunctionConfig) -> Self {
        let registry = Arc::new(FunctionRegistry::with_config(&config));
        Self::with_registry(registry, Arc::new(Session::new()))
    }

    /// Engine sharing an existing registry, e.g. one per connection over a
    /// process-wide registry.
    pub fn with_registry(registry: Arc<FunctionRegistry>, session: Arc<Session>) -> Self {
        debug_eprintln!(
            "[skiffsql] engine for connection {} over {} functions",
            session.connection_id(),
            registry.len()
        );
        Self {
            evaluator: ExpressionEvaluator::new(registry, &session),
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn registry(&self) -> &FunctionRegistry {
        self.evaluator.binder().registry()
    }

    pub fn compile(&self, expr: &Expr) -> Result<CompiledExpr> {
        self.evaluator.compile(expr)
    }

    pub fn evaluate(&self, expr: &Expr, row: &Row) -> Result<Value> {
        self.compile(expr)?.evaluate(row)
    }

    /// Evaluates `name(args...)` with literal arguments, resolving `name` the
    /// way SQL text spells it.
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        let id = self.registry().resolve(name)?;
        let expr = Expr::call(id, args.into_iter().map(Expr::Literal).collect());
        self.evaluate(&expr, &Row::empty())
    }
}

impl Default for SkiffSQLEngine {
    fn default() -> Self {
        Self::new()
    }
}
