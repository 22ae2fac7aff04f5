use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use debug_print::debug_eprintln;
use skiffsql_functions::SessionContext;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Session state owned by the connection handler.
///
/// The owner updates it through `&self` between statements; bound functions
/// only see it through [`SessionContext`].
#[derive(Debug)]
pub struct Session {
    connection_id: u64,
    current_database: RwLock<Option<String>>,
    user: RwLock<Option<String>>,
    last_found_rows: AtomicU64,
    rows_affected: AtomicU64,
    last_insert_id: AtomicU64,
}

impl Session {
    /// New session with a process-unique connection id.
    pub fn new() -> Self {
        Self::with_connection_id(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn with_connection_id(connection_id: u64) -> Self {
        Self {
            connection_id,
            current_database: RwLock::new(None),
            user: RwLock::new(None),
            last_found_rows: AtomicU64::new(0),
            rows_affected: AtomicU64::new(0),
            last_insert_id: AtomicU64::new(0),
        }
    }

    /// Switches the current database; `None` or an empty name deselects it.
    pub fn use_database(&self, database: Option<String>) {
        let database = database.filter(|db| !db.is_empty());
        debug_eprintln!(
            "[executor::session] connection {} using database {:?}",
            self.connection_id,
            database
        );
        *self
            .current_database
            .write()
            .unwrap_or_else(PoisonError::into_inner) = database;
    }

    pub fn set_user(&self, user: Option<String>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    pub fn set_last_found_rows(&self, rows: u64) {
        self.last_found_rows.store(rows, Ordering::Release);
    }

    pub fn set_rows_affected(&self, rows: u64) {
        self.rows_affected.store(rows, Ordering::Release);
    }

    pub fn set_last_insert_id(&self, id: u64) {
        self.last_insert_id.store(id, Ordering::Release);
    }

    /// Records the row counts of a finished statement.
    pub fn finish_statement(&self, found_rows: u64, rows_affected: u64) {
        self.set_last_found_rows(found_rows);
        self.set_rows_affected(rows_affected);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext for Session {
    fn current_database(&self) -> Option<String> {
        self.current_database
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn user(&self) -> Option<String> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn connection_id(&self) -> u64 {
        self.connection_id
    }

    fn last_found_rows(&self) -> u64 {
        self.last_found_rows.load(Ordering::Acquire)
    }

    fn rows_affected(&self) -> u64 {
        self.rows_affected.load(Ordering::Acquire)
    }

    fn last_insert_id(&self) -> u64 {
        self.last_insert_id.load(Ordering::Acquire)
    }
}
