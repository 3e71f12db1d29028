use crate::error::StorageError;
use crate::mapping::{NewUrlMapping, UrlMapping};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Type alias for repository results.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the durable mapping store.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the mapping for a given short code.
    /// Returns `None` if the code does not exist.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlMapping>>;
}

/// The durable mapping store.
///
/// The store is the single authority on short code uniqueness: `save` must
/// reject a second mapping for the same code, even when both inserts race.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Persists a new mapping and returns it with its assigned id.
    /// Returns `Err(Conflict)` if the code already exists.
    async fn save(&self, mapping: NewUrlMapping) -> Result<UrlMapping>;
}
