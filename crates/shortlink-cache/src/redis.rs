use async_trait::async_trait;
use redis::AsyncCommands;
use shortlink_core::cache::Result;
use shortlink_core::{CacheError, Link, LinkCache, LinkId};
use std::time::Duration;
use tracing::{debug, trace, warn};

pub const DEFAULT_KEY_PREFIX: &str = "sl:link:";

/// A Redis-based implementation of [`LinkCache`].
///
/// Links are stored as JSON strings under `<prefix><id>`. Entries never
/// expire unless a TTL is configured.
#[derive(Debug, Clone)]
pub struct RedisLinkCache {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
    ttl: Option<Duration>,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if message.to_ascii_lowercase().contains("timed out") {
        CacheError::Timeout(message)
    } else if err.is_io_error() {
        CacheError::Unavailable(message)
    } else {
        CacheError::Operation(message)
    }
}

impl RedisLinkCache {
    /// Creates a new Redis link cache using the default key prefix.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a new Redis link cache with a custom key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    /// * `key_prefix` - Custom prefix for cache keys (e.g., "myapp:link:")
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            ttl: None,
        }
    }

    /// Opens a connection to `redis_url` and wraps it in a cache.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| {
            CacheError::Initialization(format!("invalid redis url '{redis_url}': {e}"))
        })?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        Ok(Self::new(conn))
    }

    /// Expire entries `ttl` after they are written. Sub-second TTLs are
    /// rounded up to one second.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Generates the cache key for a link id.
    fn cache_key(&self, id: &LinkId) -> String {
        format!("{}{}", self.key_prefix, id.as_str())
    }
}

#[async_trait]
impl LinkCache for RedisLinkCache {
    async fn get_link(&self, id: &LinkId) -> Result<Option<Link>> {
        let key = self.cache_key(id);
        trace!(id = %id, "Fetching link from Redis cache");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(cached)) => {
                debug!(id = %id, "Cache hit in Redis");
                serde_json::from_str::<Link>(&cached).map(Some).map_err(|e| {
                    warn!(id = %id, error = %e, "Failed to deserialize cached link");
                    CacheError::InvalidData(format!("invalid cached value for key '{key}': {e}"))
                })
            }
            Ok(None) => {
                trace!(id = %id, "Cache miss in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }

    async fn set_link(&self, id: &LinkId, link: &Link) -> Result<()> {
        let key = self.cache_key(id);
        trace!(id = %id, "Storing link in Redis cache");

        let json = serde_json::to_string(link).map_err(|e| {
            warn!(id = %id, error = %e, "Failed to serialize link for caching");
            CacheError::Serialization(format!("failed to serialize cache value: {e}"))
        })?;

        let mut conn = self.conn.clone();
        let result = match self.ttl {
            Some(ttl) => {
                let seconds = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(&key, json, seconds).await
            }
            None => conn.set::<_, _, ()>(&key, json).await,
        };

        match result {
            Ok(()) => {
                debug!(id = %id, "Cached link in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to cache link in Redis");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }

    async fn del(&self, id: &LinkId) -> Result<()> {
        let key = self.cache_key(id);
        trace!(id = %id, "Removing link from Redis cache");

        let mut conn = self.conn.clone();
        match conn.del::<_, ()>(&key).await {
            Ok(()) => {
                debug!(id = %id, "Removed link from Redis cache");
                Ok(())
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to remove link from Redis cache");
                Err(map_redis_error("failed to delete value from Redis", e))
            }
        }
    }
}
