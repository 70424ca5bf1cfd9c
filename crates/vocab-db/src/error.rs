//! Database error types for vocab-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A point lookup, update, or delete matched no row.
    ///
    /// Covers both "no result row" on reads and "zero rows affected" on
    /// targeted writes; the latter rolls back its transaction first.
    #[error("No matching row")]
    NotFound,

    /// A filter referenced a column outside the entity's allowlist.
    #[error("Filter column not allowed: {0}")]
    InvalidFilter(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
