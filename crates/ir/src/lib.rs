//! Planner-facing expression representation for SkiffSQL.

pub mod expr;
pub mod function;

pub use expr::Expr;
pub use function::FunctionId;
