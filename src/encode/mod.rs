//! BWT and tree-topology encoding
//!
//! Turns a built [`SuffixTree`](crate::tree::SuffixTree) into one compact
//! bit stream and back.
//!
//! ## Architecture
//!
//! - `bwt`: Transform from a suffix array, inverse transform, run splitting
//! - `pipeline`: The two-section encoder
//! - `decode`: Stream decoder used to verify encoded artifacts

pub mod bwt;
pub mod decode;
pub mod pipeline;

// Re-exports for convenience
pub use bwt::{bwt_from_suffix_array, inverse_bwt, run_lengths, Run};
pub use decode::{decode, decode_bytes, Decoded, DecodedEdge, DecodedTree};
pub use pipeline::{encode, encode_bwt_section, encode_tree_section, Encoding, EncodingSummary};
