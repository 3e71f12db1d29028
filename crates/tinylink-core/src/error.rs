use thiserror::Error;

/// Result type for the shortener facade.
pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation timed out: {0}")]
    Timeout(String),
    #[error("cache value is invalid: {0}")]
    InvalidData(String),
    #[error("cache initialization failed: {0}")]
    Initialization(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The short code is already taken. Raised by the store's uniqueness
    /// constraint at insert time.
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced to callers of the shortener.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    /// Empty or malformed original URL, or a malformed custom code.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A caller-supplied code is already in use.
    #[error("short code already in use: {0}")]
    DuplicateShortCode(String),
    /// No unique code could be minted within the attempt bound.
    #[error("failed to allocate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },
    #[error("no url found for short code: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),
    #[error("cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),
}

impl ShortenerError {
    /// Whether the error was caused by the request rather than by the service.
    ///
    /// Rejections map to client errors at the transport layer; everything
    /// else is a server-side failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::DuplicateShortCode(_) | Self::NotFound(_)
        )
    }
}
