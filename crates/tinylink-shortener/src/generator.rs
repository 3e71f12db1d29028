pub mod random;

use tinylink_core::ShortCode;

/// Trait for generating short code candidates.
///
/// Implementations are pure generators that don't interact with storage.
/// A candidate may already be taken; deciding that is the job of a
/// [`UniquenessOracle`](crate::oracle::UniquenessOracle) and, ultimately,
/// the store.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Produces the next candidate.
    fn generate(&self) -> Self::Output;
}

impl<G: Generator> Generator for std::sync::Arc<G> {
    type Output = G::Output;

    fn generate(&self) -> Self::Output {
        (**self).generate()
    }
}
