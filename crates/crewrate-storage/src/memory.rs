//! In-memory [`KvStore`], used when no database is configured and in tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{Result, StorageError};
use crate::traits::KvStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("mutex poisoned: {e}")))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        Ok(self
            .lock()?
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scan_is_ordered_and_bounded() {
        let store = MemoryStore::new();
        store.put("rate-state:septic", "a").unwrap();
        store.put("rate-config:septic", "b").unwrap();
        store.put("rate-state:plumbing", "c").unwrap();
        store.put("rate-state;", "d").unwrap();

        assert_eq!(
            store.scan("rate-state:").unwrap(),
            vec![
                ("rate-state:plumbing".to_string(), "c".to_string()),
                ("rate-state:septic".to_string(), "a".to_string()),
            ]
        );
    }

    #[test]
    fn remove_missing_key() {
        let store = MemoryStore::new();
        assert!(!store.remove("nope").unwrap());
    }
}
