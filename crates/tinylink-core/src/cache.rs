use crate::error::CacheError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::time::Duration;

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Prefix of every cache key; the full key is the prefix followed by the code.
pub const CACHE_KEY_PREFIX: &str = "shortUrl:";

/// Returns the cache key for a short code, e.g. `shortUrl:aB3dE`.
pub fn cache_key(code: &ShortCode) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, code.as_str())
}

/// A time-bounded cache of short code to original URL.
///
/// The cache is never authoritative: an entry only mirrors a mapping that was
/// committed to the durable store, and expires after its TTL. Expiry itself
/// is left to the backend.
#[async_trait]
pub trait UrlCache: Send + Sync + 'static {
    /// Get the cached original URL.
    ///
    /// Returns `Ok(None)` if the key is not in the cache.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Store the original URL for `code`, expiring after `ttl`.
    async fn set_url(&self, code: &ShortCode, original_url: &str, ttl: Duration) -> Result<()>;

    /// Whether an unexpired entry exists for `code`.
    async fn contains(&self, code: &ShortCode) -> Result<bool>;

    /// Resets the TTL of an existing entry.
    ///
    /// Returns `false` if there was no entry to refresh.
    async fn expire(&self, code: &ShortCode, ttl: Duration) -> Result<bool>;
}
