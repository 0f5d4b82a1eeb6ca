//! # SFX - Suffix Trees and Compact Text Encodings
//!
//! SFX builds a suffix tree for a sentinel-terminated text with Ukkonen's
//! linear-time online algorithm, derives the suffix array and the
//! Burrows-Wheeler transform from it, and serializes the text and tree
//! into a compact bit stream built from Fibonacci and Huffman codes.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`tree`] - Ukkonen construction, traversal, invariant checks, statistics
//! - [`coding`] - Bit strings, Fibonacci (Zeckendorf) codes, Huffman codes
//! - [`encode`] - BWT, run-length + tree-topology encoding, decoding
//! - [`prime`] - Miller-Rabin probable-prime generation
//! - [`text`] - Input normalization and sentinel handling
//! - [`config`] - Encoding configuration (JSON loadable)
//! - [`output`] - Artifact writers and colored status output
//! - [`utils`] - Progress spinner
//!
//! ## Quick Start
//!
//! ```
//! use sfx::{encode, EncodeConfig, SuffixTree, Text};
//!
//! let config = EncodeConfig::default();
//! let text = Text::new(b"banana", &config).unwrap();
//! let tree = SuffixTree::build(text.as_bytes()).unwrap();
//!
//! assert_eq!(tree.suffix_array(), vec![7, 6, 4, 2, 1, 5, 3]);
//!
//! let encoding = encode(&tree, &config).unwrap();
//! let decoded = sfx::decode_bytes(&encoding.to_bytes(), &config).unwrap();
//! assert_eq!(decoded.text, b"banana$");
//! ```

pub mod coding;
pub mod config;
pub mod encode;
pub mod error;
pub mod output;
pub mod prime;
pub mod text;
pub mod tree;
pub mod utils;

// Re-exports for convenience
pub use config::EncodeConfig;
pub use encode::{decode, decode_bytes, encode, Decoded, Encoding};
pub use error::{Error, Result};
pub use text::Text;
pub use tree::{SuffixTree, SuffixTreeBuilder, TreeStats};
