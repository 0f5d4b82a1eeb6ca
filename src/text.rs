//! Input text preparation
//!
//! Turns raw file content into a validated [`Text`]: line breaks removed,
//! surrounding whitespace trimmed, sentinel appended when missing.

use crate::config::EncodeConfig;
use crate::error::{Error, Result};

/// Validated text ending in a unique sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    symbols: Vec<u8>,
    sentinel: u8,
}

impl Text {
    /// Validate `body` and append the sentinel if it is not already last
    pub fn new(body: &[u8], config: &EncodeConfig) -> Result<Self> {
        if body.is_empty() {
            return Err(Error::invalid_input("input text is empty"));
        }
        // A lone sentinel is still a valid one-symbol text
        let body = match body.split_last() {
            Some((&last, rest)) if last == config.sentinel => rest,
            _ => body,
        };

        for (pos, &symbol) in body.iter().enumerate() {
            if symbol == config.sentinel {
                return Err(Error::invalid_input(format!(
                    "sentinel {:?} occurs inside the text at position {}",
                    config.sentinel as char,
                    pos + 1
                )));
            }
            if config.strict_alphabet && !(config.min_symbol..=config.max_symbol).contains(&symbol) {
                return Err(Error::invalid_input(format!(
                    "symbol {symbol:#04x} at position {} is outside [{}, {}]",
                    pos + 1,
                    config.min_symbol,
                    config.max_symbol
                )));
            }
        }

        let mut symbols = Vec::with_capacity(body.len() + 1);
        symbols.extend_from_slice(body);
        symbols.push(config.sentinel);
        Ok(Self {
            symbols,
            sentinel: config.sentinel,
        })
    }

    /// Prepare raw file content
    pub fn from_input(raw: &[u8], config: &EncodeConfig) -> Result<Self> {
        let cleaned = strip_line_breaks(raw);
        if cleaned.is_empty() {
            return Err(Error::invalid_input("input text is empty"));
        }
        Self::new(&cleaned, config)
    }

    /// Symbols including the trailing sentinel
    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }

    /// Symbols without the sentinel
    pub fn body(&self) -> &[u8] {
        &self.symbols[..self.symbols.len() - 1]
    }

    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    /// Length including the sentinel (never zero)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Remove every CR and LF, then trim surrounding ASCII whitespace
pub fn strip_line_breaks(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut last = 0;
    for pos in memchr::memchr2_iter(b'\r', b'\n', raw) {
        out.extend_from_slice(&raw[last..pos]);
        last = pos + 1;
    }
    out.extend_from_slice(&raw[last..]);
    out.trim_ascii().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(body: &[u8]) -> Result<Text> {
        Text::new(body, &EncodeConfig::default())
    }

    #[test]
    fn test_appends_sentinel() {
        assert_eq!(text(b"banana").unwrap().as_bytes(), b"banana$");
    }

    #[test]
    fn test_keeps_existing_sentinel() {
        let t = text(b"banana$").unwrap();
        assert_eq!(t.as_bytes(), b"banana$");
        assert_eq!(t.body(), b"banana");
    }

    #[test]
    fn test_sentinel_only() {
        assert_eq!(text(b"$").unwrap().as_bytes(), b"$");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            Text::from_input(b"\r\n  \n", &EncodeConfig::default()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_inner_sentinel() {
        assert!(text(b"ba$nana").is_err());
    }

    #[test]
    fn test_strict_alphabet() {
        let config = EncodeConfig {
            strict_alphabet: true,
            ..Default::default()
        };
        assert!(Text::new(b"hello", &config).is_ok());
        assert!(Text::new(b"hello world", &config).is_err());
        assert!(Text::new(b"hello world", &EncodeConfig::default()).is_ok());
    }

    #[test]
    fn test_strip_line_breaks() {
        assert_eq!(strip_line_breaks(b"ban\r\nana\n"), b"banana");
        assert_eq!(strip_line_breaks(b"  mississippi  \n"), b"mississippi");
        assert_eq!(strip_line_breaks(b"abc"), b"abc");
    }
}
