use std::sync::Arc;

use skiffsql_common::error::{Error, Result};
use skiffsql_common::result::Row;
use skiffsql_common::types::{DataType, Value};
use skiffsql_ir::FunctionId;

use super::{Arity, FunctionBuilder};
use crate::context::BindContext;
use crate::expr::ScalarExpr;
use crate::scalar::BoundFunction;

/// Recognized so planning succeeds, but never evaluated. Arguments are
/// left untouched, so a NULL argument fails the same way as any other.
#[derive(Debug)]
struct NotImplementedFunction {
    id: FunctionId,
    args: Vec<Arc<ScalarExpr>>,
    return_type: DataType,
}

impl BoundFunction for NotImplementedFunction {
    fn id(&self) -> FunctionId {
        self.id
    }

    fn args(&self) -> &[Arc<ScalarExpr>] {
        &self.args
    }

    fn return_type(&self) -> DataType {
        self.return_type
    }

    fn evaluate(&self, _row: &Row) -> Result<Value> {
        Err(Error::not_implemented(self.id.name()))
    }
}

#[derive(Debug)]
struct StubBuilder {
    id: FunctionId,
    arity: Arity,
    return_type: DataType,
}

impl FunctionBuilder for StubBuilder {
    fn arity(&self) -> Arity {
        self.arity
    }

    fn build(
        &self,
        args: Vec<Arc<ScalarExpr>>,
        _ctx: &BindContext,
    ) -> Result<Box<dyn BoundFunction>> {
        self.arity.check(self.id, args.len())?;
        Ok(Box::new(NotImplementedFunction {
            id: self.id,
            args,
            return_type: self.return_type,
        }))
    }
}

pub(super) fn stub(id: FunctionId, arity: Arity, return_type: DataType) -> Arc<dyn FunctionBuilder> {
    Arc::new(StubBuilder {
        id,
        arity,
        return_type,
    })
}
