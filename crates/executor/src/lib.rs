//! Session state and row-level expression evaluation for SkiffSQL.

mod evaluator;
mod session;

pub use evaluator::{CompiledExpr, ExpressionEvaluator};
pub use session::Session;
