use crate::generator::Generator;
use crate::oracle::UniquenessOracle;
use std::future::Future;
use tinylink_core::error::Result;
use tinylink_core::repository::Result as StorageResult;
use tinylink_core::{ShortCode, ShortenerError, StorageError};
use tracing::{debug, error, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Mints short codes that the oracle believes are free.
///
/// Each call to [`Allocator::allocate`] draws at most `max_attempts`
/// candidates. The oracle's answer can go stale before the code is written,
/// so [`Allocator::allocate_and_persist`] also retries when the store itself
/// reports a conflict.
#[derive(Debug)]
pub struct Allocator<G, O> {
    generator: G,
    oracle: O,
    max_attempts: u32,
}

impl<G, O> Allocator<G, O>
where
    G: Generator,
    O: UniquenessOracle,
{
    /// `max_attempts` is clamped to at least 1.
    pub fn new(generator: G, oracle: O, max_attempts: u32) -> Self {
        Self {
            generator,
            oracle,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Returns the first candidate the oracle reports as free.
    pub async fn allocate(&self) -> Result<ShortCode> {
        for attempt in 1..=self.max_attempts {
            let candidate: ShortCode = self.generator.generate().into();

            if !self.oracle.exists(&candidate).await? {
                debug!(code = %candidate, attempt, "Allocated short code");
                return Ok(candidate);
            }

            debug!(code = %candidate, attempt, "Candidate already taken");
        }

        error!(
            attempts = self.max_attempts,
            "Failed to allocate a unique short code"
        );
        Err(ShortenerError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Fails with [`ShortenerError::DuplicateShortCode`] if `code` is taken.
    pub async fn claim_custom(&self, code: &ShortCode) -> Result<()> {
        if self.oracle.exists(code).await? {
            debug!(code = %code, "Custom code already taken");
            return Err(ShortenerError::DuplicateShortCode(code.to_string()));
        }
        Ok(())
    }

    /// Allocates a code and hands it to `persist`.
    ///
    /// When `persist` fails with [`StorageError::Conflict`] a fresh code is
    /// allocated, up to `max_attempts` extra times. Any other storage error
    /// ends the operation.
    pub async fn allocate_and_persist<T, F, Fut>(&self, mut persist: F) -> Result<T>
    where
        F: FnMut(ShortCode) -> Fut + Send,
        Fut: Future<Output = StorageResult<T>> + Send,
        T: Send,
    {
        let rounds = self.max_attempts.saturating_add(1);

        for round in 1..=rounds {
            let code = self.allocate().await?;

            match persist(code.clone()).await {
                Ok(saved) => return Ok(saved),
                Err(StorageError::Conflict(_)) => {
                    warn!(code = %code, round, "Short code claimed concurrently, reallocating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        error!(attempts = rounds, "Every allocated short code lost a race");
        Err(ShortenerError::AllocationExhausted { attempts: rounds })
    }
}
