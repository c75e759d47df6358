pub mod repository;
pub mod sqlite;

pub use sqlite::*;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Cloneable handle over the service's single SQLite connection.
///
/// Every component receives a `Store` at construction; nothing reaches
/// for ambient global state. Repository functions stay plain
/// `fn(&Connection, ..)` so a locked guard can span several calls.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) the database file and bring the schema up to date.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = sqlite::open_database(path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Migrated in-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = sqlite::open_memory_database()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Lock the connection for a sequence of repository calls.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_clones_share_one_database() {
        let store = Store::open_in_memory().unwrap();
        let clone = store.clone();

        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO doctors (id, name, specialty, crm, email)
                 VALUES ('d-1', 'Ana', 'Cardiologia', '1234', 'ana@clinica.com')",
                [],
            )
            .unwrap();

        let count: i64 = clone
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn store_opens_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("clinic.db")).unwrap();
        let tables = count_tables(&store.conn().unwrap()).unwrap();
        assert_eq!(tables, 4);
    }
}
