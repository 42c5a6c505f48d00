//! SQLite persistence layer.
//!
//! RULE: Only store/ talks to the database.
//! The reconciler, resolver and projector call store methods; they never
//! execute SQL directly.

mod bank;
mod country;

use crate::error::{DirectoryError, DirectoryResult};
use rusqlite::{Connection, ErrorCode, OpenFlags};

pub use bank::BankRef;

pub struct DirectoryStore {
    conn: Connection,
    /// Database file this store was opened on; `None` for a private
    /// in-memory directory.
    path: Option<String>,
}

impl DirectoryStore {
    /// Open (creating if needed) the directory database at `path`.
    /// `file:` URIs are accepted. File databases run in WAL mode.
    pub fn open(path: &str) -> DirectoryResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(path, flags)?;
        // Databases that cannot use WAL keep their default journal.
        if let Err(e) = conn.execute_batch("PRAGMA journal_mode=WAL;") {
            log::debug!("{path}: WAL unavailable ({e})");
        }
        Self::with_connection(conn, Some(path.to_string()))
    }

    /// A private in-memory directory, gone when the store is dropped.
    pub fn in_memory() -> DirectoryResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, None)
    }

    /// A second connection to the same database file. An in-memory store
    /// cannot be shared, so it yields a fresh, empty one.
    pub fn reopen(&self) -> DirectoryResult<Self> {
        self.path
            .as_deref()
            .map_or_else(Self::in_memory, Self::open)
    }

    fn with_connection(conn: Connection, path: Option<String>) -> DirectoryResult<Self> {
        // parent_id and country_id references are enforced per connection.
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path })
    }

    /// Apply the schema. Idempotent.
    pub fn migrate(&self) -> DirectoryResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_directory.sql"))?;
        Ok(())
    }

    /// Run `f` inside one transaction: committed on `Ok`, rolled back when
    /// `f` fails or the transaction is dropped early.
    pub fn in_transaction<T>(
        &self,
        f: impl FnOnce(&Self) -> DirectoryResult<T>,
    ) -> DirectoryResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }
}

/// True when a statement was rejected by a UNIQUE constraint.
pub(crate) fn is_unique_violation(err: &DirectoryError) -> bool {
    match err {
        DirectoryError::Database(rusqlite::Error::SqliteFailure(e, _)) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}
