use std::sync::Arc;

use debug_print::debug_eprintln;
use skiffsql_common::error::{Error, Result};
use skiffsql_ir::{Expr, FunctionId};

use crate::context::BindContext;
use crate::expr::ScalarExpr;
use crate::registry::FunctionRegistry;
use crate::scalar::BoundFunction;

/// Binds `identity(args)` against `registry`.
///
/// Fails with `UnknownFunction` when the identity is not registered and with
/// `ArityMismatch` when the builder rejects the argument count. Arguments are
/// not evaluated.
pub fn bind(
    registry: &FunctionRegistry,
    id: FunctionId,
    args: Vec<Arc<ScalarExpr>>,
    ctx: &BindContext,
) -> Result<Box<dyn BoundFunction>> {
    let builder = registry
        .lookup(id)
        .ok_or_else(|| Error::unknown_function(id))?;
    debug_eprintln!("[functions::binder] binding {} with {} args", id, args.len());
    builder.build(args, ctx)
}

/// Plan-time binder: turns planner expressions into bound expression trees
/// against one registry and one bind context.
#[derive(Debug, Clone)]
pub struct Binder {
    registry: Arc<FunctionRegistry>,
    context: BindContext,
}

impl Binder {
    pub fn new(registry: Arc<FunctionRegistry>, context: BindContext) -> Self {
        Self { registry, context }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn context(&self) -> &BindContext {
        &self.context
    }

    pub fn bind(
        &self,
        id: FunctionId,
        args: Vec<Arc<ScalarExpr>>,
    ) -> Result<Box<dyn BoundFunction>> {
        bind(&self.registry, id, args, &self.context)
    }

    pub fn bind_name(
        &self,
        name: &str,
        args: Vec<Arc<ScalarExpr>>,
    ) -> Result<Box<dyn BoundFunction>> {
        let id = self.registry.resolve(name)?;
        self.bind(id, args)
    }

    /// Binds every call site in `expr`, innermost first, so structural errors
    /// surface here rather than during row evaluation.
    pub fn bind_expr(&self, expr: &Expr) -> Result<ScalarExpr> {
        match expr {
            Expr::Literal(value) => Ok(ScalarExpr::Constant(value.clone())),
            Expr::Column { name, index } => Ok(ScalarExpr::column(name.clone(), *index)),
            Expr::ScalarFunction { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.bind_expr(arg).map(Arc::new))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ScalarExpr::Function(self.bind(*name, args)?))
            }
        }
    }
}
