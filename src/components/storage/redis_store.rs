use super::KeyValueStore;
use crate::error::{storage_error, SiteResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

/// Storage slots kept as plain string keys on a Redis server
#[derive(Debug, Clone)]
pub struct RedisStore {
    client: RedisClient,
}

impl RedisStore {
    /// Create a client for `redis_url`; no connection is made until first use
    pub fn open(redis_url: &str) -> SiteResult<Self> {
        let client = RedisClient::open(redis_url)
            .map_err(|e| storage_error(&format!("Failed to create Redis client: {}", e)))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> SiteResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| storage_error(&format!("Failed to connect to Redis: {}", e)))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> SiteResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| storage_error(&format!("Failed to read {} from Redis: {}", key, e)))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> SiteResult<()> {
        let mut conn = self.connection().await?;
        () = conn
            .set(key, value)
            .await
            .map_err(|e| storage_error(&format!("Failed to save {} to Redis: {}", key, e)))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_bad_url() {
        assert!(RedisStore::open("not a url").is_err());
    }

    #[test]
    fn test_open_does_not_connect() {
        // Nothing listens here; creating the client must still succeed
        assert!(RedisStore::open("redis://127.0.0.1:1").is_ok());
    }
}
