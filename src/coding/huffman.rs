//! Deterministic Huffman codes
//!
//! Codes are built by repeatedly merging the two lowest-priority entries
//! of a min-heap. Priority: lower frequency first; at equal frequency a
//! leaf beats an internal node, two leaves compare by symbol, and two
//! internal nodes by creation order. The first entry popped becomes the
//! `0` branch, the second the `1` branch. An alphabet of one symbol gets
//! the one-bit code `1`.

use super::bits::{BitReader, BitString};
use crate::error::{Error, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

#[derive(Debug, Clone, Copy)]
enum HuffNode {
    Leaf(u8),
    Internal { zero: usize, one: usize },
}

/// Heap entry; `Ord` puts the entry that should be merged first lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Weighted {
    freq: u64,
    /// `Some(symbol)` for leaves
    symbol: Option<u8>,
    /// Arena index, increasing with creation order
    node: usize,
}

impl Ord for Weighted {
    fn cmp(&self, other: &Self) -> Ordering {
        self.freq
            .cmp(&other.freq)
            .then_with(|| match (self.symbol, other.symbol) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => self.node.cmp(&other.node),
            })
    }
}

impl PartialOrd for Weighted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Symbol → codeword table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanCode {
    codes: BTreeMap<u8, BitString>,
}

impl HuffmanCode {
    /// Build codes from the symbol frequencies of `symbols`
    pub fn from_symbols(symbols: &[u8]) -> Result<Self> {
        let mut freqs = BTreeMap::new();
        for &s in symbols {
            *freqs.entry(s).or_insert(0u64) += 1;
        }
        Self::from_frequencies(&freqs)
    }

    /// Build codes from explicit frequencies
    pub fn from_frequencies(freqs: &BTreeMap<u8, u64>) -> Result<Self> {
        if freqs.is_empty() {
            return Err(Error::invalid_input(
                "cannot build a Huffman code over an empty alphabet",
            ));
        }

        if freqs.len() == 1 {
            let (&only, _) = freqs.iter().next().ok_or_else(|| {
                Error::invalid_input("cannot build a Huffman code over an empty alphabet")
            })?;
            let mut code = BitString::new();
            code.push(true);
            return Ok(Self {
                codes: BTreeMap::from([(only, code)]),
            });
        }

        let mut arena = Vec::with_capacity(2 * freqs.len());
        let mut heap = BinaryHeap::with_capacity(freqs.len());
        for (&symbol, &freq) in freqs {
            heap.push(Reverse(Weighted {
                freq,
                symbol: Some(symbol),
                node: arena.len(),
            }));
            arena.push(HuffNode::Leaf(symbol));
        }

        while heap.len() > 1 {
            let (Some(Reverse(zero)), Some(Reverse(one))) = (heap.pop(), heap.pop()) else {
                break;
            };
            heap.push(Reverse(Weighted {
                freq: zero.freq + one.freq,
                symbol: None,
                node: arena.len(),
            }));
            arena.push(HuffNode::Internal {
                zero: zero.node,
                one: one.node,
            });
        }

        let root = arena.len() - 1;
        let mut codes = BTreeMap::new();
        let mut stack = vec![(root, BitString::new())];
        while let Some((node, prefix)) = stack.pop() {
            match arena[node] {
                HuffNode::Leaf(symbol) => {
                    codes.insert(symbol, prefix);
                }
                HuffNode::Internal { zero, one } => {
                    let mut zero_prefix = prefix.clone();
                    zero_prefix.push(false);
                    let mut one_prefix = prefix;
                    one_prefix.push(true);
                    stack.push((one, one_prefix));
                    stack.push((zero, zero_prefix));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Rebuild a code table from stored codewords, checking it is prefix-free
    pub fn from_codes(codes: BTreeMap<u8, BitString>) -> Result<Self> {
        let table = Self { codes };
        table.decoder()?;
        Ok(table)
    }

    /// Codeword for `symbol`
    pub fn code(&self, symbol: u8) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    /// `(symbol, codeword)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// Number of symbols in the alphabet
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Append the codeword for `symbol`
    pub fn write_symbol(&self, symbol: u8, out: &mut BitString) -> Result<()> {
        let code = self.code(symbol).ok_or_else(|| {
            Error::invalid_input(format!("symbol {symbol:#04x} is not in the code table"))
        })?;
        out.extend(code);
        Ok(())
    }

    /// Encode a whole symbol sequence
    pub fn encode(&self, symbols: &[u8]) -> Result<BitString> {
        let mut out = BitString::new();
        for &s in symbols {
            self.write_symbol(s, &mut out)?;
        }
        Ok(out)
    }

    /// Binary trie for reading codewords back
    pub fn decoder(&self) -> Result<HuffmanDecoder> {
        HuffmanDecoder::new(self)
    }
}

/// Prefix decoder built from a [`HuffmanCode`]
#[derive(Debug, Clone)]
pub struct HuffmanDecoder {
    /// `[zero, one]` child slots per trie node; node 0 is the root
    trie: Vec<[Option<usize>; 2]>,
    symbols: Vec<Option<u8>>,
}

impl HuffmanDecoder {
    fn new(code: &HuffmanCode) -> Result<Self> {
        let mut decoder = Self {
            trie: vec![[None, None]],
            symbols: vec![None],
        };

        for (symbol, codeword) in code.iter() {
            if codeword.is_empty() {
                return Err(Error::decode(format!("empty codeword for {symbol:#04x}")));
            }
            let mut node = 0;
            for bit in codeword.iter() {
                if decoder.symbols[node].is_some() {
                    return Err(Error::decode("code table is not prefix-free"));
                }
                let slot = bit as usize;
                node = match decoder.trie[node][slot] {
                    Some(next) => next,
                    None => {
                        let next = decoder.trie.len();
                        decoder.trie.push([None, None]);
                        decoder.symbols.push(None);
                        decoder.trie[node][slot] = Some(next);
                        next
                    }
                };
            }
            if decoder.symbols[node].is_some() || decoder.trie[node] != [None, None] {
                return Err(Error::decode("code table is not prefix-free"));
            }
            decoder.symbols[node] = Some(symbol);
        }

        Ok(decoder)
    }

    /// Read one symbol
    pub fn read_symbol(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let mut node = 0;
        loop {
            let bit = reader.read_bit()?;
            node = self.trie[node][bit as usize]
                .ok_or_else(|| Error::decode(format!("no codeword at bit {}", reader.position())))?;
            if let Some(symbol) = self.symbols[node] {
                return Ok(symbol);
            }
        }
    }
}
