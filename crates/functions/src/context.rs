use std::fmt;
use std::sync::{Arc, Weak};

use skiffsql_common::error::{Error, Result};
use skiffsql_ir::FunctionId;

use crate::misc::StaticBuildInfo;

/// Read-only view of session state for context-dependent functions.
///
/// The session owner keeps the read-write handle; this core only ever calls
/// these accessors, at evaluation time, so results reflect the session as it
/// is when the row is evaluated.
pub trait SessionContext: Send + Sync {
    /// Currently selected database, `None` when no database is selected.
    fn current_database(&self) -> Option<String>;

    /// Authenticated user as `user@host`, `None` before authentication.
    fn user(&self) -> Option<String>;

    fn connection_id(&self) -> u64;

    /// Row count recorded for `FOUND_ROWS()` by the previous statement.
    fn last_found_rows(&self) -> u64;

    fn rows_affected(&self) -> u64;

    fn last_insert_id(&self) -> u64;
}

/// Supplier of the embedding engine's build description.
pub trait BuildInfo: Send + Sync {
    fn engine_info(&self) -> String;
}

impl<F> BuildInfo for F
where
    F: Fn() -> String + Send + Sync,
{
    fn engine_info(&self) -> String {
        self()
    }
}

/// Non-owning handle to a session. Bound functions hold this rather than the
/// session itself, so a plan that outlives its session fails with
/// `ContextUnavailable` instead of reading stale state.
#[derive(Clone, Default)]
pub struct SessionRef {
    inner: Option<Weak<dyn SessionContext>>,
}

impl SessionRef {
    pub fn attach<S: SessionContext + 'static>(session: &Arc<S>) -> Self {
        let weak = Arc::downgrade(session);
        let weak: Weak<dyn SessionContext> = weak;
        Self { inner: Some(weak) }
    }

    pub fn attach_dyn(session: &Arc<dyn SessionContext>) -> Self {
        Self {
            inner: Some(Arc::downgrade(session)),
        }
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    pub fn get(&self, function: FunctionId) -> Result<Arc<dyn SessionContext>> {
        self.inner
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or_else(|| Error::context_unavailable(function))
    }
}

impl fmt::Debug for SessionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Everything a builder may capture while binding a call site.
#[derive(Clone)]
pub struct BindContext {
    session: SessionRef,
    build_info: Arc<dyn BuildInfo>,
}

impl BindContext {
    pub fn new<S: SessionContext + 'static>(session: &Arc<S>) -> Self {
        Self {
            session: SessionRef::attach(session),
            build_info: Arc::new(StaticBuildInfo::current()),
        }
    }

    pub fn from_dyn(session: &Arc<dyn SessionContext>) -> Self {
        Self {
            session: SessionRef::attach_dyn(session),
            build_info: Arc::new(StaticBuildInfo::current()),
        }
    }

    /// A context with no session attached. Binding succeeds; session-reading
    /// functions fail when evaluated.
    pub fn detached() -> Self {
        Self {
            session: SessionRef::detached(),
            build_info: Arc::new(StaticBuildInfo::current()),
        }
    }

    pub fn with_build_info(mut self, build_info: Arc<dyn BuildInfo>) -> Self {
        self.build_info = build_info;
        self
    }

    pub fn session(&self) -> &SessionRef {
        &self.session
    }

    pub fn build_info(&self) -> &Arc<dyn BuildInfo> {
        &self.build_info
    }
}

impl fmt::Debug for BindContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindContext")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
