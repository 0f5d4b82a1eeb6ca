//! Decoder for streams produced by [`super::encode`]
//!
//! Recovers the BWT (and through it the text) from the first section and
//! the tree topology from the second, cross-checking the two.

use super::bwt::inverse_bwt;
use super::pipeline::{ASCEND, DESCEND};
use crate::coding::{read_fibonacci_usize, BitReader, BitString, HuffmanCode};
use crate::config::EncodeConfig;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// One edge recovered from the tree section (1-based inclusive range)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedEdge {
    pub start: usize,
    pub end: usize,
    /// Path-label length at the lower end of the edge
    pub depth: usize,
    /// Suffix start for leaf edges
    pub suffix: Option<usize>,
}

/// Tree topology recovered from the tree section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTree {
    /// Edges in depth-first order
    pub edges: Vec<DecodedEdge>,
}

impl DecodedTree {
    /// Leaf suffix starts in traversal order (the suffix array)
    pub fn suffix_array(&self) -> Vec<usize> {
        self.edges.iter().filter_map(|e| e.suffix).collect()
    }

    pub fn internal_count(&self) -> usize {
        self.edges.iter().filter(|e| e.suffix.is_none()).count()
    }
}

/// Everything recovered from one encoded stream
#[derive(Debug, Clone)]
pub struct Decoded {
    pub text: Vec<u8>,
    pub bwt: Vec<u8>,
    pub codes: HuffmanCode,
    pub tree: DecodedTree,
}

/// Decode packed bytes (trailing zero padding is ignored)
pub fn decode_bytes(bytes: &[u8], config: &EncodeConfig) -> Result<Decoded> {
    decode(&BitString::from_bytes(bytes.to_vec()), config)
}

/// Decode a concatenated BWT + tree bit stream
pub fn decode(bits: &BitString, config: &EncodeConfig) -> Result<Decoded> {
    let mut reader = bits.reader();
    let (bwt, codes) = read_bwt_section(&mut reader, config)?;
    let text = inverse_bwt(&bwt, config.sentinel)?;
    let tree = read_tree_section(&mut reader, text.len())?;

    if !reader.only_padding_left() || reader.remaining() >= 8 {
        return Err(Error::decode(format!(
            "{} unexpected bits after the tree section",
            reader.remaining()
        )));
    }

    debug!(
        text_len = text.len(),
        edges = tree.edges.len(),
        bits = reader.position(),
        "decoded"
    );
    Ok(Decoded {
        text,
        bwt,
        codes,
        tree,
    })
}

/// Read the alphabet table and runs; returns the BWT and its code table
pub fn read_bwt_section(
    reader: &mut BitReader<'_>,
    config: &EncodeConfig,
) -> Result<(Vec<u8>, HuffmanCode)> {
    let len = read_fibonacci_usize(reader)?;
    // Every text position costs at least one leaf in the tree section
    if len > reader.remaining() {
        return Err(Error::decode(format!(
            "BWT length {len} exceeds the {} bits left in the stream",
            reader.remaining()
        )));
    }
    let distinct = read_fibonacci_usize(reader)?;
    if distinct > 1 << config.symbol_width.min(8) {
        return Err(Error::decode(format!(
            "{distinct} symbols cannot fit a {}-bit alphabet",
            config.symbol_width
        )));
    }

    let mut table = BTreeMap::new();
    for _ in 0..distinct {
        let symbol = reader.read_bits(config.symbol_width)? as u8;
        let code_len = read_fibonacci_usize(reader)?;
        if code_len > reader.remaining() {
            return Err(Error::decode(format!(
                "code length {code_len} for {symbol:#04x} exceeds the stream"
            )));
        }
        let code: BitString = (0..code_len)
            .map(|_| reader.read_bit())
            .collect::<Result<_>>()?;
        if table.insert(symbol, code).is_some() {
            return Err(Error::decode(format!("symbol {symbol:#04x} listed twice")));
        }
    }
    let codes = HuffmanCode::from_codes(table)?;
    let decoder = codes.decoder()?;

    let mut bwt = Vec::with_capacity(len);
    while bwt.len() < len {
        let run = read_fibonacci_usize(reader)?;
        let symbol = decoder.read_symbol(reader)?;
        if run > len - bwt.len() {
            return Err(Error::decode(format!(
                "run of {run} overflows BWT length {len}"
            )));
        }
        bwt.extend(std::iter::repeat_n(symbol, run));
    }

    Ok((bwt, codes))
}

/// Read the tree topology for a text of length `n`
pub fn read_tree_section(reader: &mut BitReader<'_>, n: usize) -> Result<DecodedTree> {
    let mut tree = DecodedTree::default();
    // Depths of the open internal nodes; the root (depth 0) is implicit
    let mut open: Vec<usize> = Vec::new();
    let mut next_marker = None;

    loop {
        let marker = match next_marker.take() {
            Some(marker) => marker,
            None => reader.read_bit()?,
        };

        if marker == ASCEND {
            if open.pop().is_none() {
                break;
            }
            continue;
        }
        debug_assert_eq!(marker, DESCEND);

        let start = read_fibonacci_usize(reader)?;
        let end = read_fibonacci_usize(reader)?;
        if end < start || end > n {
            return Err(Error::decode(format!(
                "edge [{start}, {end}] is invalid for a text of length {n}"
            )));
        }
        let depth = open.last().copied().unwrap_or(0) + (end - start + 1);

        // A leaf is closed right away; an internal node continues with a child
        if reader.read_bit()? == ASCEND {
            let suffix = read_fibonacci_usize(reader)?;
            if depth > n || suffix != n - depth + 1 {
                return Err(Error::decode(format!(
                    "leaf at depth {depth} claims suffix {suffix} in a text of length {n}"
                )));
            }
            tree.edges.push(DecodedEdge {
                start,
                end,
                depth,
                suffix: Some(suffix),
            });
        } else {
            tree.edges.push(DecodedEdge {
                start,
                end,
                depth,
                suffix: None,
            });
            open.push(depth);
            next_marker = Some(DESCEND);
        }
    }

    let leaves = tree.edges.iter().filter(|e| e.suffix.is_some()).count();
    if leaves != n {
        return Err(Error::decode(format!(
            "{leaves} leaves decoded for a text of length {n}"
        )));
    }
    Ok(tree)
}
