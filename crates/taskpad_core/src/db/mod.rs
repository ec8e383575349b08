//! SQLite bootstrap for the `kv_store` table.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No key is read or written before migrations succeed.
//! - Every error names the step that failed: opening, or the migration
//!   version being applied.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Connecting or configuring the connection failed.
    Open {
        mode: &'static str,
        source: rusqlite::Error,
    },
    /// Applying migration `version` (or reading the current one, `0`) failed.
    Migrate {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer Taskpad.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    pub(crate) fn open(mode: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Open { mode, source }
    }

    pub(crate) fn migrate(version: u32) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Migrate { version, source }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { mode, source } => write!(f, "failed to open {mode} database: {source}"),
            Self::Migrate { version, source } => {
                write!(f, "failed to apply schema version {version}: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migrate { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
