//! Burrows-Wheeler Transform helpers

use crate::error::{Error, Result};

/// Maximal run of equal consecutive symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub len: usize,
    pub symbol: u8,
}

/// BWT from a text and its 1-based suffix array
///
/// Entry `k` is the symbol before suffix `sa[k]`, or the last text symbol
/// when that suffix is the whole text.
pub fn bwt_from_suffix_array(text: &[u8], sa: &[usize]) -> Vec<u8> {
    let Some(&last) = text.last() else {
        return Vec::new();
    };
    sa.iter()
        .map(|&start| if start == 1 { last } else { text[start - 2] })
        .collect()
}

/// Invert a BWT whose text ended in the unique `sentinel`
pub fn inverse_bwt(bwt: &[u8], sentinel: u8) -> Result<Vec<u8>> {
    let n = bwt.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let sentinel_count = bwt.iter().filter(|&&s| s == sentinel).count();
    if sentinel_count != 1 {
        return Err(Error::decode(format!(
            "BWT must contain the sentinel exactly once, found {sentinel_count}"
        )));
    }

    // counts[c]: occurrences of c; first[c]: first row whose rotation starts with c
    let mut counts = [0usize; 256];
    for &s in bwt {
        counts[s as usize] += 1;
    }
    let mut first = [0usize; 256];
    let mut total = 0;
    for c in 0..256 {
        first[c] = total;
        total += counts[c];
    }

    // LF mapping: row of the rotation starting one position earlier
    let mut seen = [0usize; 256];
    let mut lf = Vec::with_capacity(n);
    for &s in bwt {
        lf.push(first[s as usize] + seen[s as usize]);
        seen[s as usize] += 1;
    }

    // The row starting with the sentinel is the rotation beginning at n-1
    let mut text = vec![0u8; n];
    text[n - 1] = sentinel;
    let mut row = first[sentinel as usize];
    for k in (0..n - 1).rev() {
        text[k] = bwt[row];
        row = lf[row];
    }
    Ok(text)
}

/// Split a sequence into maximal runs
pub fn run_lengths(data: &[u8]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &symbol in data {
        match runs.last_mut() {
            Some(run) if run.symbol == symbol => run.len += 1,
            _ => runs.push(Run { len: 1, symbol }),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SuffixTree;
    use proptest::prelude::*;

    #[test]
    fn test_banana_bwt() {
        let sa = [7, 6, 4, 2, 1, 5, 3];
        assert_eq!(bwt_from_suffix_array(b"banana$", &sa), b"annb$aa");
    }

    #[test]
    fn test_inverse_banana() {
        assert_eq!(inverse_bwt(b"annb$aa", b'$').unwrap(), b"banana$");
    }

    #[test]
    fn test_inverse_needs_single_sentinel() {
        assert!(inverse_bwt(b"annbaa", b'$').is_err());
        assert!(inverse_bwt(b"an$b$a", b'$').is_err());
    }

    #[test]
    fn test_run_lengths() {
        let runs = run_lengths(b"annb$aa");
        let expected = [(1, b'a'), (2, b'n'), (1, b'b'), (1, b'$'), (2, b'a')];
        assert_eq!(runs.len(), expected.len());
        for (run, (len, symbol)) in runs.iter().zip(expected) {
            assert_eq!((run.len, run.symbol), (len, symbol));
        }
        assert!(run_lengths(b"").is_empty());
    }

    proptest! {
        #[test]
        fn prop_inverse_reproduces_text(body in "[%-~]{0,200}") {
            let mut text = body.into_bytes();
            text.push(b'$');
            let tree = SuffixTree::build(&text).unwrap();
            let bwt = bwt_from_suffix_array(&text, &tree.suffix_array());
            prop_assert_eq!(inverse_bwt(&bwt, b'$').unwrap(), text);
        }
    }
}
