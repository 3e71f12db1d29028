use crate::error::Result;
use crate::mapping::UrlMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Default)]
pub struct ShortenParams {
    /// The URL to be shortened, including its `http`/`https` scheme.
    pub original_url: String,
    /// Optional caller-chosen code. Validated by the shortener.
    pub custom_code: Option<String>,
}

impl ShortenParams {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            custom_code: None,
        }
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a mapping for the URL and returns it as persisted.
    async fn create_short_url(&self, params: ShortenParams) -> Result<UrlMapping>;

    /// Resolves a short code to its mapping.
    /// Fails with `NotFound` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<UrlMapping>;
}
