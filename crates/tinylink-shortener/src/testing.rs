//! Fakes shared by the unit tests.

use crate::generator::Generator;
use crate::oracle::UniquenessOracle;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tinylink_core::{
    CacheError, NewUrlMapping, ReadRepository, Repository, ShortCode, StorageError, UrlCache,
    UrlMapping,
};

/// Yields the scripted codes in order, then repeats the last one forever.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script: VecDeque<String> = codes.into_iter().map(Into::into).collect();
        assert!(!script.is_empty(), "script needs at least one code");
        Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Generator for ScriptedGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().unwrap();
        let code = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script[0].clone()
        };
        ShortCode::new_unchecked(code)
    }
}

#[derive(Debug, Default)]
pub struct AlwaysTaken {
    calls: AtomicUsize,
}

impl AlwaysTaken {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UniquenessOracle for AlwaysTaken {
    async fn exists(&self, _code: &ShortCode) -> tinylink_core::error::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

#[derive(Debug, Default)]
pub struct NeverTaken;

#[async_trait]
impl UniquenessOracle for NeverTaken {
    async fn exists(&self, _code: &ShortCode) -> tinylink_core::error::Result<bool> {
        Ok(false)
    }
}

/// A cache whose backend is always down.
#[derive(Debug, Default)]
pub struct FailingCache;

fn down() -> CacheError {
    CacheError::Unavailable("connection refused".into())
}

#[async_trait]
impl UrlCache for FailingCache {
    async fn get_url(&self, _code: &ShortCode) -> tinylink_core::cache::Result<Option<String>> {
        Err(down())
    }

    async fn set_url(
        &self,
        _code: &ShortCode,
        _original_url: &str,
        _ttl: Duration,
    ) -> tinylink_core::cache::Result<()> {
        Err(down())
    }

    async fn contains(&self, _code: &ShortCode) -> tinylink_core::cache::Result<bool> {
        Err(down())
    }

    async fn expire(
        &self,
        _code: &ShortCode,
        _ttl: Duration,
    ) -> tinylink_core::cache::Result<bool> {
        Err(down())
    }
}

/// A store whose backend is always down.
#[derive(Debug, Default)]
pub struct UnavailableRepository;

#[async_trait]
impl ReadRepository for UnavailableRepository {
    async fn find_by_code(
        &self,
        _code: &ShortCode,
    ) -> tinylink_core::repository::Result<Option<UrlMapping>> {
        Err(StorageError::Unavailable("connection refused".into()))
    }
}

#[async_trait]
impl Repository for UnavailableRepository {
    async fn save(&self, _mapping: NewUrlMapping) -> tinylink_core::repository::Result<UrlMapping> {
        Err(StorageError::Unavailable("connection refused".into()))
    }
}

/// Wraps a cache and records the TTLs it was asked to apply.
#[derive(Debug, Default)]
pub struct RecordingCache<C> {
    inner: C,
    set_ttls: Mutex<Vec<Duration>>,
    expire_ttls: Mutex<Vec<Duration>>,
}

impl<C> RecordingCache<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            set_ttls: Mutex::default(),
            expire_ttls: Mutex::default(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn set_ttls(&self) -> Vec<Duration> {
        self.set_ttls.lock().unwrap().clone()
    }

    pub fn expire_ttls(&self) -> Vec<Duration> {
        self.expire_ttls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<C: UrlCache> UrlCache for RecordingCache<C> {
    async fn get_url(&self, code: &ShortCode) -> tinylink_core::cache::Result<Option<String>> {
        self.inner.get_url(code).await
    }

    async fn set_url(
        &self,
        code: &ShortCode,
        original_url: &str,
        ttl: Duration,
    ) -> tinylink_core::cache::Result<()> {
        self.set_ttls.lock().unwrap().push(ttl);
        self.inner.set_url(code, original_url, ttl).await
    }

    async fn contains(&self, code: &ShortCode) -> tinylink_core::cache::Result<bool> {
        self.inner.contains(code).await
    }

    async fn expire(&self, code: &ShortCode, ttl: Duration) -> tinylink_core::cache::Result<bool> {
        self.expire_ttls.lock().unwrap().push(ttl);
        self.inner.expire(code, ttl).await
    }
}

/// Wraps a repository and counts lookups.
#[derive(Debug, Default)]
pub struct CountingRepository<R> {
    inner: R,
    lookups: AtomicUsize,
}

impl<R> CountingRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: Repository> ReadRepository for CountingRepository<R> {
    async fn find_by_code(
        &self,
        code: &ShortCode,
    ) -> tinylink_core::repository::Result<Option<UrlMapping>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_code(code).await
    }
}

#[async_trait]
impl<R: Repository> Repository for CountingRepository<R> {
    async fn save(&self, mapping: NewUrlMapping) -> tinylink_core::repository::Result<UrlMapping> {
        self.inner.save(mapping).await
    }
}

/// A repository whose reads never see stored rows while `save` still
/// enforces uniqueness, so every duplicate surfaces as a store `Conflict`
/// after the oracle cleared it. Counts the conflicts returned.
#[derive(Debug, Default)]
pub struct BlindReadRepository<R> {
    inner: R,
    conflicts: AtomicUsize,
}

impl<R> BlindReadRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            conflicts: AtomicUsize::new(0),
        }
    }

    pub fn conflicts(&self) -> usize {
        self.conflicts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: Repository> ReadRepository for BlindReadRepository<R> {
    async fn find_by_code(
        &self,
        _code: &ShortCode,
    ) -> tinylink_core::repository::Result<Option<UrlMapping>> {
        Ok(None)
    }
}

#[async_trait]
impl<R: Repository> Repository for BlindReadRepository<R> {
    async fn save(&self, mapping: NewUrlMapping) -> tinylink_core::repository::Result<UrlMapping> {
        let result = self.inner.save(mapping).await;
        if matches!(result, Err(StorageError::Conflict(_))) {
            self.conflicts.fetch_add(1, Ordering::SeqCst);
        }
        result
    }
}
