//! Persisted string-keyed, string-valued storage.
//!
//! # Responsibility
//! - Define the contract the task and preference stores persist through.
//! - Keep SQL details behind the `SqliteKeyValueStore` boundary.
//!
//! # Invariants
//! - `set` overwrites; nothing is ever removed.
//! - `get` of an unknown key is `Ok(None)`, never an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Read {
        key: String,
        source: rusqlite::Error,
    },
    Write {
        key: String,
        source: rusqlite::Error,
    },
    Encode(serde_json::Error),
}

impl StoreError {
    pub(crate) fn read(key: &str) -> impl FnOnce(rusqlite::Error) -> Self + '_ {
        move |source| Self::Read {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn write(key: &str) -> impl FnOnce(rusqlite::Error) -> Self + '_ {
        move |source| Self::Write {
            key: key.to_string(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { key, source } => write!(f, "failed to read `{key}`: {source}"),
            Self::Write { key, source } => write!(f, "failed to write `{key}`: {source}"),
            Self::Encode(err) => write!(f, "failed to encode stored value: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Key-value persistence used by the stores.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
