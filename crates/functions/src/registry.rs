use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use debug_print::debug_eprintln;
use skiffsql_common::error::{Error, Result};
use skiffsql_ir::FunctionId;

use crate::config::FunctionConfig;
use crate::context::BindContext;
use crate::expr::ScalarExpr;
use crate::scalar::BoundFunction;

mod info_funcs;
mod unsupported_funcs;

/// Argument count a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range { min: usize, max: usize },
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::Range { min, max } => (*min..=*max).contains(&count),
        }
    }

    pub fn check(&self, id: FunctionId, count: usize) -> Result<()> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(Error::arity_mismatch(id, self, count))
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Range { min, max } => write!(f, "{} to {}", min, max),
        }
    }
}

/// Factory that turns argument expressions into a bound function. Builders
/// validate shape only; they never evaluate anything.
pub trait FunctionBuilder: fmt::Debug + Send + Sync {
    fn arity(&self) -> Arity;

    fn build(
        &self,
        args: Vec<Arc<ScalarExpr>>,
        ctx: &BindContext,
    ) -> Result<Box<dyn BoundFunction>>;
}

pub type BoundFactory =
    fn(FunctionId, Vec<Arc<ScalarExpr>>, &BindContext) -> Box<dyn BoundFunction>;

/// Builder backed by a plain factory function, for built-ins whose binding
/// needs nothing beyond the arguments and the bind context.
#[derive(Debug)]
pub struct ScalarFunctionImpl {
    pub id: FunctionId,
    pub arity: Arity,
    pub factory: BoundFactory,
}

impl FunctionBuilder for ScalarFunctionImpl {
    fn arity(&self) -> Arity {
        self.arity
    }

    fn build(
        &self,
        args: Vec<Arc<ScalarExpr>>,
        ctx: &BindContext,
    ) -> Result<Box<dyn BoundFunction>> {
        self.arity.check(self.id, args.len())?;
        Ok((self.factory)(self.id, args, ctx))
    }
}

/// Registry under construction. Freezing it with [`build`](Self::build)
/// yields a [`FunctionRegistry`], which has no way to add entries.
#[derive(Debug, Default)]
pub struct FunctionRegistryBuilder {
    builders: HashMap<FunctionId, Arc<dyn FunctionBuilder>>,
}

impl FunctionRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_register(&mut self, id: FunctionId, builder: Arc<dyn FunctionBuilder>) -> Result<()> {
        if self.builders.contains_key(&id) {
            return Err(Error::DuplicateFunction(id.to_string()));
        }
        self.builders.insert(id, builder);
        Ok(())
    }

    /// Registers a builder during start-up.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered; a duplicate is a wiring bug.
    pub fn register(&mut self, id: FunctionId, builder: Arc<dyn FunctionBuilder>) {
        if let Err(err) = self.try_register(id, builder) {
            panic!("{}", err);
        }
    }

    pub fn register_builtins(&mut self, config: &FunctionConfig) {
        for id in FunctionId::ALL {
            self.register(id, builtin(id, config));
        }
    }

    pub fn build(self) -> FunctionRegistry {
        debug_eprintln!(
            "[functions::registry] frozen with {} functions",
            self.builders.len()
        );
        FunctionRegistry {
            builders: self.builders,
        }
    }
}

fn builtin(id: FunctionId, config: &FunctionConfig) -> Arc<dyn FunctionBuilder> {
    use skiffsql_common::types::DataType;

    match id {
        FunctionId::Database => info_funcs::database(),
        FunctionId::User | FunctionId::CurrentUser => info_funcs::user(id),
        FunctionId::ConnectionId => info_funcs::connection_id(),
        FunctionId::FoundRows => info_funcs::found_rows(),
        FunctionId::LastInsertId => info_funcs::last_insert_id(),
        FunctionId::Version => info_funcs::version(&config.server_version),
        FunctionId::SkiffsqlVersion => info_funcs::engine_version(),
        FunctionId::Benchmark => unsupported_funcs::stub(id, Arity::Exact(2), DataType::Int64),
        FunctionId::Charset => unsupported_funcs::stub(id, Arity::Exact(1), DataType::String),
        FunctionId::Coercibility => unsupported_funcs::stub(id, Arity::Exact(1), DataType::Int64),
        FunctionId::Collation => unsupported_funcs::stub(id, Arity::Exact(1), DataType::String),
        FunctionId::RowCount => unsupported_funcs::stub(id, Arity::Exact(0), DataType::Int64),
    }
}

/// Immutable mapping from function identity to builder. Shared read-only
/// across sessions, typically behind an `Arc`.
#[derive(Debug)]
pub struct FunctionRegistry {
    builders: HashMap<FunctionId, Arc<dyn FunctionBuilder>>,
}

impl FunctionRegistry {
    pub fn builder() -> FunctionRegistryBuilder {
        FunctionRegistryBuilder::new()
    }

    /// Registry holding every built-in with default configuration.
    pub fn builtin() -> Self {
        Self::with_config(&FunctionConfig::default())
    }

    pub fn with_config(config: &FunctionConfig) -> Self {
        let mut builder = FunctionRegistryBuilder::new();
        builder.register_builtins(config);
        builder.build()
    }

    pub fn lookup(&self, id: FunctionId) -> Option<&dyn FunctionBuilder> {
        self.builders.get(&id).map(|b| b.as_ref())
    }

    pub fn contains(&self, id: FunctionId) -> bool {
        self.builders.contains_key(&id)
    }

    /// Resolves a SQL spelling to a registered identity.
    pub fn resolve(&self, name: &str) -> Result<FunctionId> {
        FunctionId::from_name(name)
            .filter(|id| self.contains(*id))
            .ok_or_else(|| Error::unknown_function(name.trim().to_ascii_uppercase()))
    }

    pub fn ids(&self) -> Vec<FunctionId> {
        let mut ids: Vec<FunctionId> = self.builders.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
