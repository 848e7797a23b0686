use dashmap::DashMap;

use super::{KeyValueStore, StorageKey};
use crate::error::AppResult;

/// Process-local store; contents vanish with the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        Ok(self
            .entries
            .get(&key.to_string())
            .map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> AppResult<()> {
        self.entries.remove(&key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        let key = StorageKey::MovieRating("1".to_string());

        assert_eq!(store.get(&key).unwrap(), None);
        store.set(&key, "4".to_string()).unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("4"));

        store.set(&key, "5".to_string()).unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("5"));
        assert_eq!(store.len(), 1);

        store.remove(&key).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove(&StorageKey::CurrentUser).is_ok());
    }
}
