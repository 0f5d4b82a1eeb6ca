//! Probable-prime generation
//!
//! Miller-Rabin over arbitrary-precision integers, using repeated squaring
//! for modular exponentiation. Randomness comes from a caller-supplied RNG
//! and is not suitable for cryptographic keys.

use crate::error::{Error, Result};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;
use tracing::debug;

/// Smallest supported digit count
pub const MIN_DIGITS: u32 = 100;
/// Largest supported digit count
pub const MAX_DIGITS: u32 = 1000;
/// Miller-Rabin rounds used by default
pub const DEFAULT_ROUNDS: u32 = 20;

/// `base^exponent mod modulus` by repeated squaring
pub fn mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }
    let mut result = BigUint::one();
    let mut base = base % modulus;

    // Little-endian bytes: lowest exponent bits first
    for byte in exponent.to_bytes_le() {
        for bit in 0..8 {
            if (byte >> bit) & 1 == 1 {
                result = (&result * &base) % modulus;
            }
            base = (&base * &base) % modulus;
        }
    }
    result
}

/// Miller-Rabin test with `rounds` random bases
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    if *n < two {
        return false;
    }
    if *n == two || *n == three {
        return true;
    }
    if (n % &two).is_zero() {
        return false;
    }

    // n - 1 = 2^r * d with d odd
    let n_minus_one = n - 1u32;
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while (&d % &two).is_zero() {
        d >>= 1;
        r += 1;
    }

    let upper = n - &two;
    'witness: for _ in 0..rounds {
        let a = if upper > two {
            rng.gen_biguint_range(&two, &upper)
        } else {
            two.clone()
        };
        let mut x = mod_exp(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Random probable prime with exactly `digits` decimal digits
pub fn generate_d_digit_prime<R: Rng + ?Sized>(
    digits: u32,
    rounds: u32,
    rng: &mut R,
) -> Result<BigUint> {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return Err(Error::invalid_input(format!(
            "digit count must be between {MIN_DIGITS} and {MAX_DIGITS}, got {digits}"
        )));
    }
    generate_prime_in_digits(digits, rounds, rng)
}

/// Same as [`generate_d_digit_prime`] without the size policy
pub(crate) fn generate_prime_in_digits<R: Rng + ?Sized>(
    digits: u32,
    rounds: u32,
    rng: &mut R,
) -> Result<BigUint> {
    if digits == 0 {
        return Err(Error::invalid_input("digit count must be positive"));
    }
    let ten = BigUint::from(10u32);
    let lower = num_traits::pow(ten.clone(), (digits - 1) as usize);
    let upper = num_traits::pow(ten, digits as usize);

    let mut attempts = 0u64;
    loop {
        attempts += 1;
        let candidate = rng.gen_biguint_range(&lower, &upper) | BigUint::one();
        if candidate < upper && is_probable_prime(&candidate, rounds, rng) {
            debug!(digits, attempts, "probable prime found");
            return Ok(candidate);
        }
    }
}
