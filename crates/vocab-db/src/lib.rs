//! # vocab-db
//!
//! libSQL database operations for the vocab backend.
//!
//! Handles all relational state: words with their owned definitions, and
//! quiz questions. One `VocabDb` owns the database handle and connection;
//! repositories are implemented as `impl VocabDb` blocks under [`repos`].
//!
//! Uses the `libsql` crate (C `SQLite` fork) — stable API, per-connection
//! pragmas, and in-process `:memory:` databases for tests.

pub mod drafts;
pub mod error;
pub mod filter;
pub mod helpers;
mod migrations;
pub mod repos;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all vocab state operations.
///
/// Wraps a libSQL database and connection. Failure to open is fatal to every
/// dependent repository: there is no retry, callers construct once at startup.
pub struct VocabDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl VocabDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let vocab_db = Self { db, conn };
        vocab_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(vocab_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"wrd-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound)?;
        Ok(row.get::<String>(0)?)
    }
}
