use serde::{Deserialize, Serialize};
use skiffsql_common::types::Value;

use crate::function::FunctionId;

/// Unbound expression produced by the planner. Function calls name an
/// identity but carry no evaluator until they are bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Value),

    Column {
        name: String,
        index: usize,
    },

    ScalarFunction {
        name: FunctionId,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn null() -> Self {
        Expr::Literal(Value::Null)
    }

    pub fn column(name: impl Into<String>, index: usize) -> Self {
        Expr::Column {
            name: name.into(),
            index,
        }
    }

    pub fn call(name: FunctionId, args: Vec<Expr>) -> Self {
        Expr::ScalarFunction { name, args }
    }

    /// Number of function call sites in this expression, nested ones included.
    pub fn call_count(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Column { .. } => 0,
            Expr::ScalarFunction { args, .. } => {
                1 + args.iter().map(Expr::call_count).sum::<usize>()
            }
        }
    }
}
