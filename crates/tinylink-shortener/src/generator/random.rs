use crate::alphabet::Alphabet;
use crate::error::GeneratorError;
use crate::generator::Generator;
use rand::Rng;
use tinylink_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use tinylink_core::ShortCode;
use typed_builder::TypedBuilder;

pub const DEFAULT_CODE_LENGTH: usize = 5;

#[derive(Debug, Clone, TypedBuilder)]
pub struct GeneratorSettings {
    /// Number of symbols per code.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub length: usize,
    #[builder(default)]
    pub alphabet: Alphabet,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Draws each symbol independently and uniformly from the alphabet.
///
/// Randomness comes from the thread-local CSPRNG, so codes are not
/// predictable from earlier ones.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    alphabet: Alphabet,
    length: usize,
}

impl RandomGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, GeneratorError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&settings.length) {
            return Err(GeneratorError::InvalidLength {
                min: MIN_LENGTH,
                max: MAX_LENGTH,
                got: settings.length,
            });
        }

        Ok(Self {
            alphabet: settings.alphabet,
            length: settings.length,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::base62(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| self.alphabet.symbol(rng.random_range(0..self.alphabet.len())))
            .collect();
        ShortCode::new_unchecked(code)
    }
}
