//! Bit-level coding primitives.
//!
//! ## Modules
//!
//! - [`bits`] - Append-only bit buffer with byte packing
//! - [`fibonacci`] - Self-delimiting Fibonacci codes for positive integers
//! - [`huffman`] - Deterministic Huffman codes and prefix decoding
//!
//! ## Key Functions
//!
//! ```
//! use sfx::coding::{fibonacci_encode, HuffmanCode};
//!
//! assert_eq!(fibonacci_encode(4).unwrap().to_string(), "1011");
//!
//! let codes = HuffmanCode::from_symbols(b"annb$aa").unwrap();
//! assert_eq!(codes.code(b'a').unwrap().to_string(), "0");
//! ```

pub mod bits;
pub mod fibonacci;
pub mod huffman;

pub use bits::*;
pub use fibonacci::*;
pub use huffman::*;
