//! SQLite bootstrap for the notes database.
//!
//! # Responsibility
//! - Open connections with pragmas set and migrations applied.
//! - Verify a connection carries the tables the note store relies on.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - No note or color rows are touched before migrations succeed.

use rusqlite::{Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Tables every migrated notes database must carry.
pub const REQUIRED_TABLES: [&str; 2] = ["notes", "colors"];

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Database was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection was never migrated.
    MissingTable(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "notes database schema v{db_version} is newer than supported v{latest_supported}"
            ),
            Self::MissingTable(table) => {
                write!(f, "missing required table `{table}`; run migrations first")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::MissingTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Reads the applied schema version.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Fails with `MissingTable` for the first required table not present.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    for table in REQUIRED_TABLES {
        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
                [table],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(DbError::MissingTable(table));
        }
    }
    Ok(())
}
