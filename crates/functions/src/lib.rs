//! Scalar function registry, binder and built-in implementations for SkiffSQL.
//!
//! Binding happens once per call site while the plan is built:
//! ```text
//! FunctionId + argument exprs → FunctionRegistry → FunctionBuilder → BoundFunction
//! ```
//! Evaluation happens once per row through [`BoundFunction::evaluate`].
//! Functions that need session facts read them through [`SessionContext`]
//! at evaluation time.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

pub mod binder;
pub mod config;
pub mod context;
pub mod expr;
pub mod misc;
pub mod scalar;

mod registry;

pub use binder::{Binder, bind};
pub use config::FunctionConfig;
pub use context::{BindContext, BuildInfo, SessionContext, SessionRef};
pub use expr::{ScalarExpr, evaluate_args};
pub use misc::{SERVER_VERSION, StaticBuildInfo};
pub use registry::{
    Arity, BoundFactory, FunctionBuilder, FunctionRegistry, FunctionRegistryBuilder,
    ScalarFunctionImpl,
};
pub use scalar::BoundFunction;
