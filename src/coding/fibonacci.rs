//! Fibonacci integer coding
//!
//! A positive integer is written as its Zeckendorf representation over
//! `1, 2, 3, 5, 8, ...`, smallest term first, followed by an extra `1`.
//! Zeckendorf representations never contain two adjacent ones, so the
//! first `11` in the stream marks the end of a codeword. This is what lets
//! lengths, counts and positions sit back to back with no separators.

use super::bits::{BitReader, BitString};
use crate::error::{Error, Result};

/// Number of terms of `1, 2, 3, 5, ...` that fit in a u64
const FIB_TERMS: usize = 92;

/// `FIBS[k]` is the k-th term of `1, 2, 3, 5, ...`
const FIBS: [u64; FIB_TERMS] = fib_table();

const fn fib_table() -> [u64; FIB_TERMS] {
    let mut table = [0u64; FIB_TERMS];
    table[0] = 1;
    table[1] = 2;
    let mut k = 2;
    while k < FIB_TERMS {
        table[k] = table[k - 1] + table[k - 2];
        k += 1;
    }
    table
}

/// Append the Fibonacci codeword for `n` to `out`
pub fn write_fibonacci(n: u64, out: &mut BitString) -> Result<()> {
    if n == 0 {
        return Err(Error::invalid_input(
            "Fibonacci code is only defined for positive integers",
        ));
    }

    // Highest term that fits; it is always part of the representation
    let top = FIBS.partition_point(|&f| f <= n) - 1;

    let mut bits = [false; FIB_TERMS];
    let mut remaining = n;
    for k in (0..=top).rev() {
        if FIBS[k] <= remaining {
            bits[k] = true;
            remaining -= FIBS[k];
        }
    }

    for &bit in &bits[..=top] {
        out.push(bit);
    }
    out.push(true);
    Ok(())
}

/// Fibonacci codeword for `n`
pub fn fibonacci_encode(n: u64) -> Result<BitString> {
    let mut out = BitString::with_capacity(16);
    write_fibonacci(n, &mut out)?;
    Ok(out)
}

/// Fibonacci codeword for a length or position, which must be non-zero
#[inline]
pub fn write_fibonacci_usize(n: usize, out: &mut BitString) -> Result<()> {
    write_fibonacci(n as u64, out)
}

/// Read one codeword, consuming its terminating `1`
pub fn read_fibonacci(reader: &mut BitReader<'_>) -> Result<u64> {
    let start = reader.position();
    let mut value = 0u64;
    let mut prev = false;
    let mut k = 0;

    loop {
        let bit = reader.read_bit()?;
        if bit && prev {
            return Ok(value);
        }
        if bit {
            let term = FIBS
                .get(k)
                .ok_or_else(|| Error::decode(format!("Fibonacci codeword at {start} overflows")))?;
            value = value
                .checked_add(*term)
                .ok_or_else(|| Error::decode(format!("Fibonacci codeword at {start} overflows")))?;
        }
        prev = bit;
        k += 1;
    }
}

/// Read one codeword as a length or position
pub fn read_fibonacci_usize(reader: &mut BitReader<'_>) -> Result<usize> {
    let value = read_fibonacci(reader)?;
    usize::try_from(value).map_err(|_| Error::decode(format!("value {value} exceeds usize")))
}
