//! Encoder for the BWT and tree-topology bit streams
//!
//! Stream layout (all integers Fibonacci-coded):
//!
//! ```text
//! BWT section:
//!   len(bwt) | #distinct
//!   per distinct symbol, ascending: code point (fixed width) | len(code) | code
//!   per run, in order: run length | code(symbol)
//! Tree section:
//!   per child, ascending first symbol:
//!     0 | start | end | (leaf: 1 | suffix start) or (internal: children... | 1)
//!   1                                   closes the root
//! ```
//!
//! Positions are 1-based. The two sections are independent; the tree
//! section is produced from the same built tree the suffix array came from.

use super::bwt::{bwt_from_suffix_array, run_lengths};
use crate::coding::{write_fibonacci_usize, BitString, HuffmanCode};
use crate::config::EncodeConfig;
use crate::error::{Error, Result};
use crate::tree::{DfsEvent, SuffixTree};
use serde::Serialize;
use tracing::debug;

/// Marker bit for entering a child
pub const DESCEND: bool = false;
/// Marker bit for leaving a node
pub const ASCEND: bool = true;

/// Both encoded sections of one text
#[derive(Debug, Clone)]
pub struct Encoding {
    pub bwt_bits: BitString,
    pub tree_bits: BitString,
}

impl Encoding {
    /// BWT section followed by the tree section
    pub fn bits(&self) -> BitString {
        let mut bits = BitString::with_capacity(self.total_bits());
        bits.extend(&self.bwt_bits);
        bits.extend(&self.tree_bits);
        bits
    }

    pub fn total_bits(&self) -> usize {
        self.bwt_bits.len() + self.tree_bits.len()
    }

    /// Concatenated bits packed into zero-padded bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits().into_bytes()
    }

    pub fn summary(&self) -> EncodingSummary {
        EncodingSummary {
            bwt_bits: self.bwt_bits.len(),
            tree_bits: self.tree_bits.len(),
            total_bits: self.total_bits(),
            packed_bytes: self.total_bits().div_ceil(8),
        }
    }
}

/// Sizes of an [`Encoding`], reported by `sfx stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodingSummary {
    pub bwt_bits: usize,
    pub tree_bits: usize,
    pub total_bits: usize,
    pub packed_bytes: usize,
}

/// Encode a built tree: suffix array, BWT section and tree section
///
/// The tree is only read here, so both sections are produced in parallel.
pub fn encode(tree: &SuffixTree, config: &EncodeConfig) -> Result<Encoding> {
    let (bwt_bits, tree_bits) = rayon::join(
        || {
            let sa = tree.suffix_array();
            let bwt = bwt_from_suffix_array(tree.text(), &sa);
            encode_bwt_section(&bwt, config)
        },
        || encode_tree_section(tree),
    );
    let encoding = Encoding {
        bwt_bits: bwt_bits?,
        tree_bits: tree_bits?,
    };
    debug!(
        text_len = tree.len(),
        bwt_bits = encoding.bwt_bits.len(),
        tree_bits = encoding.tree_bits.len(),
        "encoded"
    );
    Ok(encoding)
}

/// Encode a BWT: alphabet table with Huffman codes, then run-length pairs
pub fn encode_bwt_section(bwt: &[u8], config: &EncodeConfig) -> Result<BitString> {
    let codes = HuffmanCode::from_symbols(bwt)?;
    let mut out = BitString::with_capacity(bwt.len() * 4);

    write_fibonacci_usize(bwt.len(), &mut out)?;
    write_fibonacci_usize(codes.len(), &mut out)?;

    for (symbol, code) in codes.iter() {
        if !config.fits_width(symbol) {
            return Err(Error::EncodingRange {
                symbol,
                width: config.symbol_width,
            });
        }
        out.push_bits(symbol as u64, config.symbol_width);
        write_fibonacci_usize(code.len(), &mut out)?;
        out.extend(code);
    }

    for run in run_lengths(bwt) {
        write_fibonacci_usize(run.len, &mut out)?;
        codes.write_symbol(run.symbol, &mut out)?;
    }

    Ok(out)
}

/// Encode the tree topology with edge ranges and leaf suffix starts
pub fn encode_tree_section(tree: &SuffixTree) -> Result<BitString> {
    let mut out = BitString::with_capacity(tree.node_count() * 16);

    for event in tree.dfs() {
        match event {
            DfsEvent::Descend { node, .. } => {
                let (start, end) = tree.edge_range(node).ok_or_else(|| {
                    Error::structural(format!("node {} has no incoming edge", node.number()))
                })?;
                out.push(DESCEND);
                write_fibonacci_usize(start + 1, &mut out)?;
                write_fibonacci_usize(end + 1, &mut out)?;
            }
            DfsEvent::Ascend { node, depth } => {
                out.push(ASCEND);
                if tree.node(node).is_leaf() {
                    write_fibonacci_usize(tree.suffix_start(depth), &mut out)?;
                }
            }
        }
    }
    out.push(ASCEND);

    Ok(out)
}
