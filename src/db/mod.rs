use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, AppResult};

mod key;
mod memory;
pub mod redis;

pub use key::StorageKey;
pub use memory::MemoryStore;
pub use self::redis::{create_redis_client, RedisStore};

/// Minimal key-value contract; every call reads or writes a whole value
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &StorageKey) -> AppResult<Option<String>>;

    fn set(&self, key: &StorageKey, value: String) -> AppResult<()>;

    fn remove(&self, key: &StorageKey) -> AppResult<()>;
}

/// Reads and deserializes a value
///
/// A value that is present but not valid JSON for `T` is an error.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &StorageKey,
) -> AppResult<Option<T>> {
    match store.get(key)? {
        Some(json) => {
            let value = serde_json::from_str(&json).map_err(|e| {
                AppError::Internal(format!("Corrupt value at '{}': {}", key, e))
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Like [`load_json`], but absorbs failures as `None` with a warning
pub fn load_json_or_discard<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &StorageKey,
) -> Option<T> {
    match load_json(store, key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding unreadable stored value");
            None
        }
    }
}

/// Serializes and writes a value, replacing what was there
pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &StorageKey,
    value: &T,
) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserPreferences;

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let key = StorageKey::UserPreferences("u1".to_string());
        save_json(&store, &key, &UserPreferences::new(true, true)).unwrap();

        let loaded: Option<UserPreferences> = load_json(&store, &key).unwrap();
        assert_eq!(loaded, Some(UserPreferences::new(true, true)));
    }

    #[test]
    fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        let key = StorageKey::StreakData("nobody".to_string());
        let loaded: Option<UserPreferences> = load_json(&store, &key).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_value_is_error_or_discarded() {
        let store = MemoryStore::new();
        let key = StorageKey::UserPreferences("u1".to_string());
        store.set(&key, "{not json".to_string()).unwrap();

        assert!(load_json::<UserPreferences>(&store, &key).is_err());
        assert!(load_json_or_discard::<UserPreferences>(&store, &key).is_none());
    }

    #[test]
    fn test_storage_failure_is_discarded() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(AppError::Internal("backend down".to_string())));

        let key = StorageKey::CurrentUser;
        assert!(load_json::<UserPreferences>(&store, &key).is_err());
        assert!(load_json_or_discard::<UserPreferences>(&store, &key).is_none());
    }
}
