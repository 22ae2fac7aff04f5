use std::fmt::Debug;
use std::sync::Arc;

use skiffsql_common::error::Result;
use skiffsql_common::result::Row;
use skiffsql_common::types::{DataType, Value};
use skiffsql_ir::FunctionId;

use crate::expr::ScalarExpr;

/// A function call site bound to its argument expressions.
///
/// Instances are created once per call site at plan-build time and evaluated
/// once per row. Implementations must not carry state from one `evaluate`
/// call to the next; anything that varies between rows comes from the row or
/// is read from the session at call time.
pub trait BoundFunction: Debug + Send + Sync {
    fn id(&self) -> FunctionId;

    fn args(&self) -> &[Arc<ScalarExpr>];

    fn return_type(&self) -> DataType;

    fn evaluate(&self, row: &Row) -> Result<Value>;
}
