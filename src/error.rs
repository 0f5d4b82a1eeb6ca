//! Error types for sfx

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Library error type
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any work started
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A built tree failed verification (builder defect)
    #[error("Structural invariant violated: {0}")]
    StructuralInvariant(String),

    /// Symbol code point does not fit the fixed-width field
    #[error("Symbol {symbol:#04x} does not fit in a {width}-bit code field")]
    EncodingRange { symbol: u8, width: u8 },

    /// Truncated or malformed bit stream
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a structural invariant error
    pub fn structural(msg: impl Into<String>) -> Self {
        Error::StructuralInvariant(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    /// Whether this error was caused by bad caller input rather than a defect
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::EncodingRange { .. } | Error::Decode(_)
        )
    }
}
