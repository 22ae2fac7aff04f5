use std::sync::Arc;

use skiffsql_common::error::Result;
use skiffsql_common::result::Row;
use skiffsql_common::types::{DataType, Value};

use crate::scalar::BoundFunction;

/// Bound expression tree: constants and columns at the leaves, bound
/// function instances at the inner nodes.
#[derive(Debug)]
pub enum ScalarExpr {
    Constant(Value),

    Column { name: String, index: usize },

    Function(Box<dyn BoundFunction>),
}

impl ScalarExpr {
    pub fn constant(value: impl Into<Value>) -> Self {
        ScalarExpr::Constant(value.into())
    }

    pub fn column(name: impl Into<String>, index: usize) -> Self {
        ScalarExpr::Column {
            name: name.into(),
            index,
        }
    }

    pub fn evaluate(&self, row: &Row) -> Result<Value> {
        match self {
            ScalarExpr::Constant(value) => Ok(value.clone()),
            ScalarExpr::Column { index, .. } => row.column(*index).cloned(),
            ScalarExpr::Function(func) => func.evaluate(row),
        }
    }

    /// Static result type. Columns are typed by the planner, not here.
    pub fn data_type(&self) -> DataType {
        match self {
            ScalarExpr::Constant(value) => value.data_type(),
            ScalarExpr::Column { .. } => DataType::Unknown,
            ScalarExpr::Function(func) => func.return_type(),
        }
    }
}

/// Evaluates arguments left to right, stopping at the first failure.
pub fn evaluate_args(args: &[Arc<ScalarExpr>], row: &Row) -> Result<Vec<Value>> {
    args.iter().map(|arg| arg.evaluate(row)).collect()
}
