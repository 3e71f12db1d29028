//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the domain types, the collaborator contracts
//! (durable mapping store and cache) and the [`Shortener`] facade that the
//! service crate implements.

pub mod cache;
pub mod error;
pub mod mapping;
pub mod repository;
pub mod shortcode;
pub mod shortener;
pub mod url;

pub use cache::{cache_key, UrlCache, CACHE_KEY_PREFIX};
pub use error::{CacheError, ShortenerError, StorageError};
pub use mapping::{NewUrlMapping, UrlMapping};
pub use repository::{ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::{ShortenParams, Shortener};
