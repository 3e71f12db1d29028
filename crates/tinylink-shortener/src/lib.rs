//! URL shortener service implementation.
//!
//! The pieces, leaves first:
//!
//! - [`generator`]: random fixed-length short codes.
//! - [`oracle`]: "is this code taken?", asking the cache before the store.
//! - [`allocator`]: bounded generate-and-check loop, plus the retry when the
//!   store reports a late conflict.
//! - [`service`]: the cache-aside read and write paths behind
//!   [`tinylink_core::Shortener`].
//!
//! Core types are re-exported from `tinylink_core`.

pub mod allocator;
pub mod alphabet;
pub mod error;
pub mod generator;
pub mod oracle;
pub mod service;
pub mod settings;

#[cfg(test)]
mod testing;

pub use allocator::Allocator;
pub use alphabet::Alphabet;
pub use error::GeneratorError;
pub use generator::random::{GeneratorSettings, RandomGenerator};
pub use generator::Generator;
pub use oracle::{CacheFirstOracle, UniquenessOracle};
pub use service::ShortenerService;
pub use settings::ShortenerSettings;
pub use tinylink_core::{ShortCode, ShortenParams, Shortener, ShortenerError, UrlMapping};
