use std::sync::Arc;

use skiffsql_common::error::Result;
use skiffsql_common::result::Row;
use skiffsql_common::types::{DataType, Value};
use skiffsql_functions::{BindContext, Binder, BuildInfo, FunctionRegistry, ScalarExpr};
use skiffsql_ir::Expr;

use crate::session::Session;

/// Binds planner expressions for one session and hands back compiled trees
/// that are evaluated once per row.
#[derive(Debug, Clone)]
pub struct ExpressionEvaluator {
    binder: Binder,
}

impl ExpressionEvaluator {
    pub fn new(registry: Arc<FunctionRegistry>, session: &Arc<Session>) -> Self {
        Self {
            binder: Binder::new(registry, BindContext::new(session)),
        }
    }

    pub fn with_build_info(
        registry: Arc<FunctionRegistry>,
        session: &Arc<Session>,
        build_info: Arc<dyn BuildInfo>,
    ) -> Self {
        Self {
            binder: Binder::new(
                registry,
                BindContext::new(session).with_build_info(build_info),
            ),
        }
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    pub fn compile(&self, expr: &Expr) -> Result<CompiledExpr> {
        let root = self.binder.bind_expr(expr)?;
        Ok(CompiledExpr {
            root: Arc::new(root),
        })
    }
}

/// A fully bound expression, ready for per-row evaluation. Cloning shares
/// the bound tree.
#[derive(Debug, Clone)]
pub struct CompiledExpr {
    root: Arc<ScalarExpr>,
}

impl CompiledExpr {
    pub fn evaluate(&self, row: &Row) -> Result<Value> {
        self.root.evaluate(row)
    }

    /// Evaluates rows in order, stopping at the first failing row.
    pub fn evaluate_rows(&self, rows: &[Row]) -> Result<Vec<Value>> {
        rows.iter().map(|row| self.evaluate(row)).collect()
    }

    pub fn data_type(&self) -> DataType {
        self.root.data_type()
    }

    pub fn root(&self) -> &Arc<ScalarExpr> {
        &self.root
    }
}
