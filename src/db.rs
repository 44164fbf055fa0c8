// Billionaires Database - Connection Layer
// Per-request scoped connections over a single SQLite file

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Default database file name, matching the seeded artifact.
pub const DEFAULT_DB_PATH: &str = "billionaires.db";

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

/// Error classification for the read path.
///
/// The HTTP layer maps these onto status codes (400 / 404 / 500); the CLI
/// just prints them. `Database` wraps the underlying driver error so callers
/// can log it without leaking statement details to clients.
#[derive(Debug)]
pub enum QueryError {
    /// Missing or malformed request parameter.
    BadRequest(String),
    /// A direct lookup (by rank, by name) matched zero rows.
    NotFound(String),
    /// Connectivity or statement failure.
    Database(rusqlite::Error),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            QueryError::NotFound(msg) => write!(f, "not found: {}", msg),
            QueryError::Database(err) => write!(f, "database error: {}", err),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for QueryError {
    fn from(err: rusqlite::Error) -> Self {
        QueryError::Database(err)
    }
}

// ============================================================================
// DATABASE HANDLE
// ============================================================================

/// Handle to the database file. Holds only the path; every caller opens its
/// own short-lived `Connection` and drops it when done, so concurrent readers
/// never share state.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Database { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Open a fresh connection with the standard pragmas applied.
    pub fn connect(&self) -> Result<Connection, QueryError> {
        let conn = Connection::open(&self.path)?;
        configure_connection(&conn)?;
        Ok(conn)
    }

    /// Open a connection for the offline tools (seed, import, verify), with
    /// anyhow context instead of the request-path error type.
    pub fn connect_for_tooling(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)
            .with_context(|| format!("failed to open database at {}", self.path.display()))?;
        configure_connection(&conn).context("failed to configure connection")?;
        Ok(conn)
    }
}

/// Apply the per-connection pragmas.
///
/// Foreign keys stay informational for the seeded data (the seed tooling
/// resolves references itself and tolerates NULLs); trusted_schema and
/// cell_size_check harden reads of a file we did not necessarily create.
pub fn configure_connection(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "trusted_schema", "OFF")?;
    conn.pragma_update(None, "cell_size_check", "ON")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_in_memory() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();

        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_query_error_display() {
        let err = QueryError::BadRequest("limit must be a positive integer".to_string());
        assert_eq!(
            err.to_string(),
            "bad request: limit must be a positive integer"
        );

        let err = QueryError::NotFound("Billionaire not found".to_string());
        assert!(err.to_string().contains("Billionaire not found"));
    }

    #[test]
    fn test_database_handle_is_path_only() {
        let db = Database::new("nonexistent-dir/billionaires.db");
        assert!(!db.exists());
        assert_eq!(
            db.path().file_name().unwrap().to_str().unwrap(),
            "billionaires.db"
        );
    }
}
