use crate::allocator::DEFAULT_MAX_ATTEMPTS;
use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Tuning knobs for [`ShortenerService`](crate::ShortenerService).
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// Generator draws per allocation, and the bound on reallocations after
    /// a persist conflict.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    /// TTL applied when a mapping is written to the cache.
    #[builder(default = DEFAULT_CACHE_TTL)]
    pub cache_ttl: Duration,
    /// Reset an entry's TTL whenever it is served from the cache.
    #[builder(default = true)]
    pub refresh_ttl_on_hit: bool,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
