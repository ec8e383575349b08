//! In-process key-value store for tests and ephemeral sessions.

use super::{KeyValueStore, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        store
    }

    /// Number of `set` calls observed since construction.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("tasks").unwrap(), None);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn set_overwrites_and_counts_writes() {
        let store = MemoryKeyValueStore::with_entries([("darkMode", "false")]);
        store.set("darkMode", "true").unwrap();
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));
        assert_eq!(store.write_count(), 1);
    }
}
