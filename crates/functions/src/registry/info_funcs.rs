use std::fmt;
use std::sync::Arc;

use skiffsql_common::error::Result;
use skiffsql_common::result::Row;
use skiffsql_common::types::{DataType, Value};
use skiffsql_ir::FunctionId;

use super::{Arity, FunctionBuilder, ScalarFunctionImpl};
use crate::context::{BindContext, BuildInfo, SessionContext, SessionRef};
use crate::expr::ScalarExpr;
use crate::scalar::BoundFunction;

type SessionReader = fn(&dyn SessionContext) -> Value;

/// Zero-argument function answering from the session at evaluation time.
#[derive(Debug)]
struct SessionInfoFunction {
    id: FunctionId,
    args: Vec<Arc<ScalarExpr>>,
    session: SessionRef,
    return_type: DataType,
    read: SessionReader,
}

impl SessionInfoFunction {
    fn boxed(
        id: FunctionId,
        args: Vec<Arc<ScalarExpr>>,
        ctx: &BindContext,
        return_type: DataType,
        read: SessionReader,
    ) -> Box<dyn BoundFunction> {
        Box::new(Self {
            id,
            args,
            session: ctx.session().clone(),
            return_type,
            read,
        })
    }
}

impl BoundFunction for SessionInfoFunction {
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
        let session = self.session.get(self.id)?;
        Ok((self.read)(session.as_ref()))
    }
}

pub(super) fn database() -> Arc<dyn FunctionBuilder> {
    Arc::new(ScalarFunctionImpl {
        id: FunctionId::Database,
        arity: Arity::Exact(0),
        factory: |id, args, ctx| {
            SessionInfoFunction::boxed(id, args, ctx, DataType::String, |session| {
                Value::from(session.current_database().filter(|db| !db.is_empty()))
            })
        },
    })
}

/// `USER()` and `CURRENT_USER()`. An unauthenticated session yields the
/// empty string, never NULL.
pub(super) fn user(id: FunctionId) -> Arc<dyn FunctionBuilder> {
    Arc::new(ScalarFunctionImpl {
        id,
        arity: Arity::Exact(0),
        factory: |id, args, ctx| {
            SessionInfoFunction::boxed(id, args, ctx, DataType::String, |session| {
                Value::string(session.user().unwrap_or_default())
            })
        },
    })
}

pub(super) fn connection_id() -> Arc<dyn FunctionBuilder> {
    Arc::new(ScalarFunctionImpl {
        id: FunctionId::ConnectionId,
        arity: Arity::Exact(0),
        factory: |id, args, ctx| {
            SessionInfoFunction::boxed(id, args, ctx, DataType::Uint64, |session| {
                Value::uint64(session.connection_id())
            })
        },
    })
}

pub(super) fn found_rows() -> Arc<dyn FunctionBuilder> {
    Arc::new(ScalarFunctionImpl {
        id: FunctionId::FoundRows,
        arity: Arity::Exact(0),
        factory: |id, args, ctx| {
            SessionInfoFunction::boxed(id, args, ctx, DataType::Uint64, |session| {
                Value::uint64(session.last_found_rows())
            })
        },
    })
}

#[derive(Debug)]
struct LastInsertIdFunction {
    args: Vec<Arc<ScalarExpr>>,
    session: SessionRef,
}

impl BoundFunction for LastInsertIdFunction {
    fn id(&self) -> FunctionId {
        FunctionId::LastInsertId
    }

    fn args(&self) -> &[Arc<ScalarExpr>] {
        &self.args
    }

    fn return_type(&self) -> DataType {
        DataType::Uint64
    }

    // With an argument the value is returned as given (NULL stays NULL,
    // negatives wrap like MySQL); remembering it is the statement executor's job.
    fn evaluate(&self, row: &Row) -> Result<Value> {
        let Some(arg) = self.args.first() else {
            let session = self.session.get(self.id())?;
            return Ok(Value::uint64(session.last_insert_id()));
        };
        match arg.evaluate(row)? {
            Value::Null => Ok(Value::Null),
            Value::Int64(v) => Ok(Value::uint64(v as u64)),
            text @ Value::String(_) => text.coerce_to(&DataType::Uint64).or_else(|_| {
                match text.coerce_to(&DataType::Int64)? {
                    Value::Int64(v) => Ok(Value::uint64(v as u64)),
                    other => other.coerce_to(&DataType::Uint64),
                }
            }),
            other => other.coerce_to(&DataType::Uint64),
        }
    }
}

pub(super) fn last_insert_id() -> Arc<dyn FunctionBuilder> {
    Arc::new(ScalarFunctionImpl {
        id: FunctionId::LastInsertId,
        arity: Arity::Range { min: 0, max: 1 },
        factory: |_, args, ctx| {
            Box::new(LastInsertIdFunction {
                args,
                session: ctx.session().clone(),
            })
        },
    })
}

#[derive(Debug)]
struct ConstantFunction {
    id: FunctionId,
    args: Vec<Arc<ScalarExpr>>,
    value: Value,
}

impl BoundFunction for ConstantFunction {
    fn id(&self) -> FunctionId {
        self.id
    }

    fn args(&self) -> &[Arc<ScalarExpr>] {
        &self.args
    }

    fn return_type(&self) -> DataType {
        self.value.data_type()
    }

    fn evaluate(&self, _row: &Row) -> Result<Value> {
        Ok(self.value.clone())
    }
}

/// `VERSION()` reports the server version fixed when the registry was built.
#[derive(Debug)]
struct VersionBuilder {
    server_version: Arc<str>,
}

impl FunctionBuilder for VersionBuilder {
    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }

    fn build(
        &self,
        args: Vec<Arc<ScalarExpr>>,
        _ctx: &BindContext,
    ) -> Result<Box<dyn BoundFunction>> {
        self.arity().check(FunctionId::Version, args.len())?;
        Ok(Box::new(ConstantFunction {
            id: FunctionId::Version,
            args,
            value: Value::string(self.server_version.as_ref()),
        }))
    }
}

pub(super) fn version(server_version: &str) -> Arc<dyn FunctionBuilder> {
    Arc::new(VersionBuilder {
        server_version: Arc::from(server_version),
    })
}

struct EngineVersionFunction {
    args: Vec<Arc<ScalarExpr>>,
    build_info: Arc<dyn BuildInfo>,
}

impl fmt::Debug for EngineVersionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineVersionFunction")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl BoundFunction for EngineVersionFunction {
    fn id(&self) -> FunctionId {
        FunctionId::SkiffsqlVersion
    }

    fn args(&self) -> &[Arc<ScalarExpr>] {
        &self.args
    }

    fn return_type(&self) -> DataType {
        DataType::String
    }

    fn evaluate(&self, _row: &Row) -> Result<Value> {
        Ok(Value::string(self.build_info.engine_info()))
    }
}

pub(super) fn engine_version() -> Arc<dyn FunctionBuilder> {
    Arc::new(ScalarFunctionImpl {
        id: FunctionId::SkiffsqlVersion,
        arity: Arity::Exact(0),
        factory: |_, args, ctx| {
            Box::new(EngineVersionFunction {
                args,
                build_info: ctx.build_info().clone(),
            })
        },
    })
}
