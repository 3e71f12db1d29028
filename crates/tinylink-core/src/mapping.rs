use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One short-to-long URL binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlMapping {
    /// Surrogate id assigned by the store.
    ///
    /// `None` when the mapping was rebuilt from a cache entry, which only
    /// holds the target URL.
    pub id: Option<u64>,
    /// The short code, unique across all mappings.
    pub short_code: ShortCode,
    /// The target URL without its scheme.
    pub original_url: String,
    /// When the mapping was created. Cache hits carry the lookup time.
    pub created_at: Timestamp,
}

impl UrlMapping {
    /// Rebuilds a mapping from a cached target URL.
    pub fn from_cached(short_code: ShortCode, original_url: String) -> Self {
        Self {
            id: None,
            short_code,
            original_url,
            created_at: Timestamp::now(),
        }
    }

    /// The location a redirect should point to.
    pub fn redirect_url(&self) -> String {
        format!("http://{}", self.original_url)
    }

    /// The public short link under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        self.short_code.to_url(base_url)
    }
}

/// A mapping that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlMapping {
    pub short_code: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
}

impl NewUrlMapping {
    pub fn new(short_code: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            short_code,
            original_url: original_url.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Attaches the store-assigned id.
    pub fn into_mapping(self, id: u64) -> UrlMapping {
        UrlMapping {
            id: Some(id),
            short_code: self.short_code,
            original_url: self.original_url,
            created_at: self.created_at,
        }
    }
}
