//! Redis client wrapper with automatic reconnection.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use su_shared::config::cache::CacheConfig;

use crate::InfrastructureError;

/// Thin wrapper over a Redis [`ConnectionManager`].
///
/// The manager is cheap to clone and reconnects on its own after a
/// dropped connection. All keys pass through the configured prefix so
/// several deployments can share one Redis instance.
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Connects to Redis and verifies the connection with a ping.
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %config.url, "Connecting to Redis");
        let client = redis::Client::open(config.url.as_str())?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        redis::cmd("PING").query_async::<_, ()>(&mut conn).await?;
        info!("Redis connection established");

        Ok(Self { manager, config })
    }

    fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: usize,
    ) -> Result<(), InfrastructureError> {
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(self.key(key), value, ttl_seconds as u64).await?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<(), InfrastructureError> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(self.key(key)).await?;
        Ok(())
    }

    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.manager.clone();
        let exists: bool = conn.exists(self.key(key)).await?;
        Ok(exists)
    }

    /// Increments a counter, setting its expiry when first created.
    /// Returns the counter value after the increment.
    pub async fn increment(
        &self,
        key: &str,
        ttl_seconds: Option<usize>,
    ) -> Result<i64, InfrastructureError> {
        let mut conn = self.manager.clone();
        let full_key = self.key(key);
        let value: i64 = conn.incr(&full_key, 1).await?;
        if value == 1 {
            if let Some(ttl) = ttl_seconds {
                let _: () = conn.expire(&full_key, ttl as i64).await?;
            }
        }
        Ok(value)
    }

    /// Remaining TTL in seconds; negative values follow Redis semantics
    /// (-1 no expiry, -2 no such key).
    pub async fn ttl(&self, key: &str) -> Result<i64, InfrastructureError> {
        let mut conn = self.manager.clone();
        let ttl: i64 = conn.ttl(self.key(key)).await?;
        Ok(ttl)
    }
}
