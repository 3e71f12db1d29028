use crate::error::GeneratorError;

/// Symbols of the default alphabet, lowercase first.
pub const BASE62: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The symbol set short codes are drawn from.
///
/// Symbols are restricted to `[A-Za-z0-9_-]` so every generated code is also
/// a valid [`ShortCode`](tinylink_core::ShortCode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new(symbols: &str) -> Result<Self, GeneratorError> {
        let symbols: Vec<char> = symbols.chars().collect();

        if symbols.len() < 2 {
            return Err(GeneratorError::InvalidAlphabet(format!(
                "at least 2 symbols are required, got {}",
                symbols.len()
            )));
        }

        if let Some(bad) = symbols
            .iter()
            .find(|c| !(c.is_ascii_alphanumeric() || **c == '-' || **c == '_'))
        {
            return Err(GeneratorError::InvalidAlphabet(format!(
                "symbol '{bad}' is not url-safe"
            )));
        }

        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(GeneratorError::InvalidAlphabet(format!(
                    "symbol '{c}' appears more than once"
                )));
            }
        }

        Ok(Self { symbols })
    }

    /// The 62 ASCII letters and digits.
    pub fn base62() -> Self {
        Self {
            symbols: BASE62.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub(crate) fn symbol(&self, index: usize) -> char {
        self.symbols[index]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::base62()
    }
}
