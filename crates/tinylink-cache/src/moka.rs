use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};
use tinylink_core::cache::Result;
use tinylink_core::{cache_key, ShortCode, UrlCache};
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
struct Entry {
    original_url: String,
    ttl: Duration,
}

/// Expires every entry after the TTL it was last written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// An in-memory cache implementation using Moka.
///
/// Entries carry their own TTL, so `set_url` and `expire` behave like Redis
/// `SET EX` and `EXPIRE`. Suitable for single-node deployments and tests.
#[derive(Debug, Clone)]
pub struct MokaUrlCache {
    cache: Cache<String, Entry>,
}

impl MokaUrlCache {
    /// Creates a new Moka URL cache holding at most 10,000 entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Creates a new Moka URL cache with a custom maximum capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> MokaCacheConfigBuilder {
        MokaCacheConfig::builder()
    }
}

impl Default for MokaUrlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for MokaUrlCache {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        trace!(code = %code, "Fetching URL from Moka cache");

        match self.cache.get(&cache_key(code)).await {
            Some(entry) => {
                debug!(code = %code, "Cache hit in Moka");
                Ok(Some(entry.original_url))
            }
            None => {
                trace!(code = %code, "Cache miss in Moka");
                Ok(None)
            }
        }
    }

    async fn set_url(&self, code: &ShortCode, original_url: &str, ttl: Duration) -> Result<()> {
        trace!(code = %code, ttl_secs = ttl.as_secs(), "Storing URL in Moka cache");

        let entry = Entry {
            original_url: original_url.to_string(),
            ttl,
        };
        self.cache.insert(cache_key(code), entry).await;
        debug!(code = %code, "Cached URL in Moka");
        Ok(())
    }

    async fn contains(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.cache.contains_key(&cache_key(code)))
    }

    async fn expire(&self, code: &ShortCode, ttl: Duration) -> Result<bool> {
        let key = cache_key(code);
        let Some(entry) = self.cache.get(&key).await else {
            trace!(code = %code, "Nothing to refresh in Moka");
            return Ok(false);
        };

        // Re-inserting runs `expire_after_update`, which restarts the clock.
        self.cache
            .insert(
                key,
                Entry {
                    original_url: entry.original_url,
                    ttl,
                },
            )
            .await;
        trace!(code = %code, ttl_secs = ttl.as_secs(), "Refreshed TTL in Moka");
        Ok(true)
    }
}

/// Configuration for creating a MokaUrlCache with custom settings.
#[derive(Debug, TypedBuilder)]
pub struct MokaCacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default = DEFAULT_MAX_CAPACITY)]
    max_capacity: u64,
}

impl From<MokaCacheConfig> for MokaUrlCache {
    fn from(config: MokaCacheConfig) -> Self {
        MokaUrlCache::with_capacity(config.max_capacity)
    }
}
