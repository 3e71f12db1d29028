use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;
use tinylink_core::cache::Result;
use tinylink_core::{CacheError, ShortCode, UrlCache, CACHE_KEY_PREFIX};
use tracing::{debug, trace, warn};

/// A Redis-based implementation of [`UrlCache`].
///
/// Stores the original URL as a plain string value under
/// `shortUrl:<code>`, with the TTL applied by Redis itself (`SET EX`).
#[derive(Debug, Clone)]
pub struct RedisUrlCache {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if message.to_ascii_lowercase().contains("timed out") {
        CacheError::Timeout(message)
    } else {
        CacheError::Operation(message)
    }
}

/// Redis wants whole seconds and rejects a zero expiry.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

impl RedisUrlCache {
    /// Creates a new Redis URL cache using the `shortUrl:` key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, CACHE_KEY_PREFIX)
    }

    /// Creates a new Redis URL cache with a custom key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    /// * `key_prefix` - Custom prefix for cache keys (e.g., "staging:shortUrl:")
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a client for `redis_url` and connects.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| {
            CacheError::Initialization(format!("invalid redis url '{redis_url}': {e}"))
        })?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Unavailable(format!("failed to connect to Redis: {e}")))?;
        Ok(Self::new(conn))
    }

    /// Generates the cache key for a short code.
    fn cache_key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }
}

#[async_trait]
impl UrlCache for RedisUrlCache {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = self.cache_key(code);
        trace!(code = %code, "Fetching URL from Redis cache");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(cached)) => {
                debug!(code = %code, "Cache hit in Redis");
                Ok(Some(cached))
            }
            Ok(None) => {
                trace!(code = %code, "Cache miss in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }

    async fn set_url(&self, code: &ShortCode, original_url: &str, ttl: Duration) -> Result<()> {
        let key = self.cache_key(code);
        trace!(code = %code, ttl_secs = ttl.as_secs(), "Storing URL in Redis cache");

        let mut conn = self.conn.clone();
        match conn
            .set_ex::<_, _, ()>(&key, original_url, ttl_seconds(ttl))
            .await
        {
            Ok(()) => {
                debug!(code = %code, "Cached URL in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Failed to cache URL in Redis");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }

    async fn contains(&self, code: &ShortCode) -> Result<bool> {
        let key = self.cache_key(code);

        let mut conn = self.conn.clone();
        conn.exists::<_, bool>(&key).await.map_err(|e| {
            warn!(code = %code, error = %e, "Redis error on exists");
            map_redis_error("failed to check key in Redis", e)
        })
    }

    async fn expire(&self, code: &ShortCode, ttl: Duration) -> Result<bool> {
        let key = self.cache_key(code);
        let seconds = i64::try_from(ttl_seconds(ttl)).unwrap_or(i64::MAX);

        let mut conn = self.conn.clone();
        match conn.expire::<_, bool>(&key, seconds).await {
            Ok(refreshed) => {
                trace!(code = %code, refreshed, "Refreshed TTL in Redis");
                Ok(refreshed)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Failed to refresh TTL in Redis");
                Err(map_redis_error("failed to refresh TTL in Redis", e))
            }
        }
    }
}


// Tests against a live Redis live in tests/redis_cache_integration.rs.
