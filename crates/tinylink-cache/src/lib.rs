//! Cache backends for short code lookups.
//!
//! Both backends implement [`UrlCache`] with per-entry TTLs and store
//! entries under [`tinylink_core::cache_key`].

pub mod moka;
pub mod redis;

pub use self::moka::{MokaCacheConfig, MokaUrlCache};
pub use self::redis::RedisUrlCache;
pub use tinylink_core::{CacheError, UrlCache};
