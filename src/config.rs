//! Text and encoding configuration
//!
//! Controls how input text is validated and how symbols are serialized.
//! Can be loaded from a JSON file; missing fields fall back to defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default terminal symbol appended to every text
pub const DEFAULT_SENTINEL: u8 = b'$';

/// Default width of the code-point field in the BWT alphabet table
pub const DEFAULT_SYMBOL_WIDTH: u8 = 7;

/// Configuration for text validation and encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Unique terminal symbol (default: `$`)
    pub sentinel: u8,
    /// Bits used for each symbol code point (default: 7)
    pub symbol_width: u8,
    /// Lowest symbol allowed in the text body when `strict_alphabet` is set
    pub min_symbol: u8,
    /// Highest symbol allowed in the text body when `strict_alphabet` is set
    pub max_symbol: u8,
    /// Reject body symbols outside `[min_symbol, max_symbol]` (default: false)
    pub strict_alphabet: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
            symbol_width: DEFAULT_SYMBOL_WIDTH,
            min_symbol: 37,
            max_symbol: 126,
            strict_alphabet: false,
        }
    }
}

impl EncodeConfig {
    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let config: Self = serde_json::from_slice(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is self-consistent
    pub fn validate(&self) -> Result<()> {
        if self.symbol_width == 0 || self.symbol_width > 8 {
            return Err(Error::invalid_input(format!(
                "symbol_width must be between 1 and 8, got {}",
                self.symbol_width
            )));
        }
        if self.min_symbol > self.max_symbol {
            return Err(Error::invalid_input(format!(
                "min_symbol {} is greater than max_symbol {}",
                self.min_symbol, self.max_symbol
            )));
        }
        if !self.fits_width(self.sentinel) {
            return Err(Error::EncodingRange {
                symbol: self.sentinel,
                width: self.symbol_width,
            });
        }
        Ok(())
    }

    /// Whether `symbol` can be written in the fixed-width code field
    #[inline]
    pub fn fits_width(&self, symbol: u8) -> bool {
        self.symbol_width >= 8 || (symbol as u16) < (1u16 << self.symbol_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = EncodeConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.fits_width(126));
        assert!(!config.fits_width(128));
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sfx.json");
        std::fs::write(&path, r##"{"sentinel": 35, "strict_alphabet": true}"##).unwrap();

        let config = EncodeConfig::load(&path).unwrap();
        assert_eq!(config.sentinel, b'#');
        assert!(config.strict_alphabet);
        assert_eq!(config.symbol_width, DEFAULT_SYMBOL_WIDTH);
    }

    #[test]
    fn test_rejects_bad_width() {
        let config = EncodeConfig {
            symbol_width: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_wide_sentinel() {
        let config = EncodeConfig {
            sentinel: 200,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::EncodingRange { symbol: 200, width: 7 })
        ));
    }
}
