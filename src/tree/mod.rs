//! Suffix tree module
//!
//! Linear-time online construction (Ukkonen) over a single text that ends
//! in a unique sentinel, plus ordered traversal for suffix arrays.
//!
//! ## Architecture
//!
//! - `types`: Node arena types, edge ranges and the open leaf end
//! - `builder`: Phase-by-phase construction and the finished [`SuffixTree`]
//! - `traverse`: Depth-first walks and suffix array extraction
//! - `verify`: Structural invariant checks
//! - `stats`: Shape summaries

pub mod builder;
pub mod stats;
pub mod traverse;
pub mod types;
pub mod verify;

// Re-exports for convenience
pub use builder::{SuffixTree, SuffixTreeBuilder};
pub use stats::TreeStats;
pub use traverse::{Dfs, DfsEvent};
pub use types::{Edge, EdgeEnd, Node, NodeId, Rule, Symbol};
