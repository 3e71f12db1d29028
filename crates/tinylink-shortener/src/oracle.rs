use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::error::Result;
use tinylink_core::{ReadRepository, ShortCode, UrlCache};
use tracing::{trace, warn};

/// Answers whether a short code is already taken.
///
/// The answer is advisory: a code reported free can still be claimed by a
/// concurrent writer before it is persisted. The store's unique key has the
/// final word.
#[async_trait]
pub trait UniquenessOracle: Send + Sync + 'static {
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

/// Checks the cache first and falls back to the store.
///
/// A cache hit is authoritative. A cache miss or cache failure falls through
/// to the store, whose errors are propagated.
#[derive(Debug)]
pub struct CacheFirstOracle<R, C> {
    repository: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> CacheFirstOracle<R, C> {
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self { repository, cache }
    }
}

impl<R, C> Clone for CacheFirstOracle<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
        }
    }
}

#[async_trait]
impl<R, C> UniquenessOracle for CacheFirstOracle<R, C>
where
    R: ReadRepository,
    C: UrlCache,
{
    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        match self.cache.contains(code).await {
            Ok(true) => {
                trace!(code = %code, "Code found in cache");
                return Ok(true);
            }
            Ok(false) => {}
            Err(e) => {
                warn!(code = %code, error = %e, "Cache check failed, asking the store");
            }
        }

        Ok(self.repository.find_by_code(code).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingCache, UnavailableRepository};
    use std::time::Duration;
    use tinylink_cache::MokaUrlCache;
    use tinylink_core::{NewUrlMapping, Repository, ShortenerError};
    use tinylink_storage::InMemoryRepository;

    fn code(value: &str) -> ShortCode {
        ShortCode::new_unchecked(value)
    }

    #[tokio::test]
    async fn unknown_code_is_free() {
        let oracle = CacheFirstOracle::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(MokaUrlCache::new()),
        );

        assert!(!oracle.exists(&code("abcde")).await.unwrap());
    }

    #[tokio::test]
    async fn cache_hit_skips_the_store() {
        let cache = Arc::new(MokaUrlCache::new());
        cache
            .set_url(&code("abcde"), "a.com", Duration::from_secs(60))
            .await
            .unwrap();
        let oracle = CacheFirstOracle::new(Arc::new(UnavailableRepository), cache);

        assert!(oracle.exists(&code("abcde")).await.unwrap());
    }

    #[tokio::test]
    async fn cache_miss_consults_the_store() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.save(NewUrlMapping::new(code("abcde"), "a.com"))
            .await
            .unwrap();
        let oracle = CacheFirstOracle::new(repo, Arc::new(MokaUrlCache::new()));

        assert!(oracle.exists(&code("abcde")).await.unwrap());
        assert!(!oracle.exists(&code("ABCDE")).await.unwrap());
    }

    #[tokio::test]
    async fn cache_failure_falls_back_to_the_store() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.save(NewUrlMapping::new(code("abcde"), "a.com"))
            .await
            .unwrap();
        let oracle = CacheFirstOracle::new(repo, Arc::new(FailingCache));

        assert!(oracle.exists(&code("abcde")).await.unwrap());
        assert!(!oracle.exists(&code("zzzzz")).await.unwrap());
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let oracle = CacheFirstOracle::new(
            Arc::new(UnavailableRepository),
            Arc::new(MokaUrlCache::new()),
        );

        let err = oracle.exists(&code("abcde")).await.unwrap_err();
        assert!(matches!(err, ShortenerError::StoreUnavailable(_)));
    }
}
