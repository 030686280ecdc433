use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;

use crate::errors::ServerError;

// Thread-local connection slot. Each astra worker opens its own handle
// on first use and keeps it for the life of the thread. The path is
// cached alongside so a Database pointing elsewhere reopens.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = const { RefCell::new(None) };
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        let inner_result = DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = match slot.as_ref() {
                    Some((path, _)) => path != &self.path,
                    None => true,
                };
                if stale {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
                    conn.execute_batch("PRAGMA foreign_keys = ON;")
                        .map_err(|e| ServerError::DbError(format!("Enable FKs failed: {e}")))?;
                    *slot = Some((self.path.clone(), conn));
                }
                let (_, conn) = slot.as_mut().expect("slot initialized above");
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?;
        inner_result
    }
}

/// Initialize the database from SQL schema files on disk.
pub fn init_db(db: &Database, schema_path: &str, seed_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;
    apply_schema(db, &schema_sql)?;

    let seed_sql = fs::read_to_string(seed_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read seed file: {e}")))?;
    apply_schema(db, &seed_sql)?;

    tracing::info!(schema = schema_path, seed = seed_path, "database initialized");
    Ok(())
}

/// Apply a SQL batch. Tests use this with `include_str!` so an in-memory
/// database gets the production schema.
pub fn apply_schema(db: &Database, sql: &str) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
    })
}
