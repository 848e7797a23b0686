use redis::{Client, Commands};

use crate::db::{KeyValueStore, StorageKey};
use crate::error::AppResult;

/// Creates a Redis client for persistent state
///
/// Opening the client only validates the URL; connections are made per call.
pub fn create_redis_client(redis_url: &str) -> AppResult<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed store
///
/// Keys are namespaced with `prefix` so several trackers can share a database.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    prefix: String,
}

impl RedisStore {
    pub fn new(client: Client) -> Self {
        Self::with_prefix(client, "cinetrack")
    }

    pub fn with_prefix(client: Client, prefix: &str) -> Self {
        Self {
            client,
            prefix: prefix.to_string(),
        }
    }

    /// Opens a client and checks the server answers
    pub fn connect(redis_url: &str) -> AppResult<Self> {
        let client = create_redis_client(redis_url)?;
        let mut conn = client.get_connection()?;
        let _: String = redis::cmd("PING").query(&mut conn)?;
        Ok(Self::new(client))
    }

    fn full_key(&self, key: &StorageKey) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let mut conn = self.client.get_connection()?;
        let value: Option<String> = conn.get(self.full_key(key))?;
        Ok(value)
    }

    fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        let mut conn = self.client.get_connection()?;
        let _: () = conn.set(self.full_key(key), value)?;
        tracing::debug!(key = %key, "Stored value in Redis");
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> AppResult<()> {
        let mut conn = self.client.get_connection()?;
        let _: () = conn.del(self.full_key(key))?;
        Ok(())
    }
}
