use crate::allocator::Allocator;
use crate::generator::Generator;
use crate::oracle::CacheFirstOracle;
use crate::settings::ShortenerSettings;
use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tinylink_core::error::Result;
use tinylink_core::{
    url, NewUrlMapping, Repository, ShortCode, ShortenParams, Shortener, ShortenerError,
    StorageError, UrlCache, UrlMapping,
};
use tracing::{debug, error, info, trace, warn};

/// Progress of a create request, carried as the `stage` field of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveStage {
    Validating,
    Allocating,
    Persisting,
    CachePopulating,
    Done,
    Rejected,
    Failed,
}

impl Display for SaveStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SaveStage::Validating => "validating",
            SaveStage::Allocating => "allocating",
            SaveStage::Persisting => "persisting",
            SaveStage::CachePopulating => "cache_populating",
            SaveStage::Done => "done",
            SaveStage::Rejected => "rejected",
            SaveStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Cache-aside shortener over a durable store.
///
/// Writes go to the store first and are mirrored into the cache afterwards;
/// a cache failure never fails a request whose store write committed. Reads
/// try the cache, fall back to the store on a miss or cache failure, and
/// backfill the cache from the store.
pub struct ShortenerService<R, C, G> {
    repository: Arc<R>,
    cache: Arc<C>,
    allocator: Allocator<G, CacheFirstOracle<R, C>>,
    settings: ShortenerSettings,
}

impl<R, C, G> ShortenerService<R, C, G>
where
    R: Repository,
    C: UrlCache,
    G: Generator,
{
    pub fn new(repository: R, cache: C, generator: G, settings: ShortenerSettings) -> Self {
        Self::from_shared(Arc::new(repository), Arc::new(cache), generator, settings)
    }

    /// Builds a service over collaborators that are also used elsewhere.
    pub fn from_shared(
        repository: Arc<R>,
        cache: Arc<C>,
        generator: G,
        settings: ShortenerSettings,
    ) -> Self {
        let oracle = CacheFirstOracle::new(Arc::clone(&repository), Arc::clone(&cache));
        let allocator = Allocator::new(generator, oracle, settings.max_attempts);

        Self {
            repository,
            cache,
            allocator,
            settings,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn settings(&self) -> &ShortenerSettings {
        &self.settings
    }

    async fn create(&self, params: ShortenParams) -> Result<UrlMapping> {
        trace!(stage = %SaveStage::Validating, url = %params.original_url, "Creating short URL");
        url::validate(&params.original_url)?;
        let original_url = url::normalize(&params.original_url);

        // A blank custom code means "generate one".
        let custom_code = params
            .custom_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .map(ShortCode::new)
            .transpose()?;

        let mapping = match custom_code {
            Some(code) => self.persist_custom(code, original_url).await?,
            None => self.persist_generated(original_url).await?,
        };

        trace!(
            stage = %SaveStage::CachePopulating,
            code = %mapping.short_code,
            "Caching new mapping"
        );
        self.populate_cache(&mapping).await;

        Ok(mapping)
    }

    async fn persist_custom(&self, code: ShortCode, original_url: &str) -> Result<UrlMapping> {
        self.allocator.claim_custom(&code).await?;

        trace!(stage = %SaveStage::Persisting, code = %code, "Persisting custom code");
        self.repository
            .save(NewUrlMapping::new(code, original_url))
            .await
            .map_err(|e| match e {
                // Lost the race to a concurrent writer after the oracle said free.
                StorageError::Conflict(code) => ShortenerError::DuplicateShortCode(code),
                e => e.into(),
            })
    }

    async fn persist_generated(&self, original_url: &str) -> Result<UrlMapping> {
        trace!(stage = %SaveStage::Allocating, "Allocating short code");
        let repository = &self.repository;

        self.allocator
            .allocate_and_persist(move |code| {
                trace!(stage = %SaveStage::Persisting, code = %code, "Persisting generated code");
                repository.save(NewUrlMapping::new(code, original_url))
            })
            .await
    }

    async fn populate_cache(&self, mapping: &UrlMapping) {
        let ttl = self.settings.cache_ttl;

        match self
            .cache
            .set_url(&mapping.short_code, &mapping.original_url, ttl)
            .await
        {
            Ok(()) => debug!(
                code = %mapping.short_code,
                ttl_secs = ttl.as_secs(),
                "Cached mapping"
            ),
            Err(e) => warn!(code = %mapping.short_code, error = %e, "Failed to cache mapping"),
        }
    }

    async fn refresh_ttl(&self, code: &ShortCode) {
        match self.cache.expire(code, self.settings.cache_ttl).await {
            Ok(true) => trace!(code = %code, "Refreshed cache TTL"),
            Ok(false) => debug!(code = %code, "Cache entry expired before its TTL was refreshed"),
            Err(e) => warn!(code = %code, error = %e, "Failed to refresh cache TTL"),
        }
    }
}

#[async_trait]
impl<R, C, G> Shortener for ShortenerService<R, C, G>
where
    R: Repository,
    C: UrlCache,
    G: Generator,
{
    async fn create_short_url(&self, params: ShortenParams) -> Result<UrlMapping> {
        match self.create(params).await {
            Ok(mapping) => {
                info!(
                    stage = %SaveStage::Done,
                    code = %mapping.short_code,
                    url = %mapping.original_url,
                    "Created short URL"
                );
                Ok(mapping)
            }
            Err(e) if e.is_rejection() => {
                debug!(stage = %SaveStage::Rejected, error = %e, "Rejected short URL request");
                Err(e)
            }
            Err(e) => {
                error!(stage = %SaveStage::Failed, error = %e, "Failed to create short URL");
                Err(e)
            }
        }
    }

    async fn resolve(&self, code: &ShortCode) -> Result<UrlMapping> {
        trace!(code = %code, "Resolving short code");

        match self.cache.get_url(code).await {
            Ok(Some(original_url)) => {
                debug!(code = %code, "Cache hit");
                if self.settings.refresh_ttl_on_hit {
                    self.refresh_ttl(code).await;
                }
                return Ok(UrlMapping::from_cached(code.clone(), original_url));
            }
            Ok(None) => debug!(code = %code, "Cache miss"),
            Err(e) => warn!(code = %code, error = %e, "Cache lookup failed, reading from store"),
        }

        match self.repository.find_by_code(code).await? {
            Some(mapping) => {
                self.populate_cache(&mapping).await;
                Ok(mapping)
            }
            None => {
                debug!(code = %code, "Short code not found");
                Err(ShortenerError::NotFound(code.to_string()))
            }
        }
    }
}
