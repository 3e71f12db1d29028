use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tinylink_core::repository::Result;
use tinylink_core::{NewUrlMapping, ReadRepository, Repository, ShortCode, StorageError, UrlMapping};

/// In-memory implementation of the Repository trait using DashMap.
///
/// The check-and-insert in `save` happens under the shard lock of the code's
/// entry, so concurrent saves of the same code see exactly one winner, the
/// same guarantee a unique index gives. Ids are handed out sequentially
/// from 1. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    storage: Arc<DashMap<String, UrlMapping>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Arc::new(DashMap::with_capacity(capacity)),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlMapping>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save(&self, mapping: NewUrlMapping) -> Result<UrlMapping> {
        match self.storage.entry(mapping.short_code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(mapping.short_code.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let saved = mapping.into_mapping(id);
                slot.insert(saved.clone());
                Ok(saved)
            }
        }
    }
}
