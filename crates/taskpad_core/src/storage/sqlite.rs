//! SQLite-backed key-value store over the `kv_store` table.

use super::{KeyValueStore, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Borrowing view over a migrated connection.
#[derive(Clone, Copy)]
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(StoreError::read(key))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )
            .map(|_| ())
            .map_err(StoreError::write(key))
    }
}
