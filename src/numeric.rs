//! Shared numeric helpers: falling factorials, factorial tables, decimal
//! rank parsing, and the uniform big-integer draw behind random sampling.

use anyhow::{Context, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;

/// Falling factorial n·(n-1)·…·(n-k+1) as `f64`; the number of
/// k-permutations of n elements. Returns 0 when k > n.
///
/// Best effort: results above 2^53 lose precision. Use
/// [`fallfact_bigz`] for the exact value.
pub fn fallfact(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let mut p = 1.0;
    for i in 0..k {
        p *= (n - i) as f64;
    }
    p
}

/// Falling factorial over `u64`. Callers guarantee the product fits;
/// path dispatch happens before this is reached (see
/// [`crate::unrank::get_k_permutations`]).
pub(crate) fn fallfact_u64(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let mut p = 1u64;
    for i in 0..k {
        p *= n - i;
    }
    p
}

/// Exact falling factorial. Zero when k > n.
pub fn fallfact_bigz(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let mut p = BigUint::one();
    for i in 0..k {
        p *= n - i;
    }
    p
}

/// Table of 0!, 1!, …, (len-1)! as `f64`.
pub(crate) fn factorial_table(len: usize) -> Vec<f64> {
    let mut fact = vec![1.0; len.max(1)];
    for j in 1..fact.len() {
        fact[j] = fact[j - 1] * j as f64;
    }
    fact
}

/// Table of 0!, 1!, …, (len-1)! as exact big integers.
pub(crate) fn factorial_table_bigz(len: usize) -> Vec<BigUint> {
    let mut fact = vec![BigUint::one(); len.max(1)];
    for j in 1..fact.len() {
        fact[j] = &fact[j - 1] * j;
    }
    fact
}

/// Parse a base-10 unsigned rank string. Malformed input is fatal to the
/// calling operation.
pub(crate) fn parse_decimal_rank(s: &str) -> Result<BigUint> {
    s.trim()
        .parse::<BigUint>()
        .with_context(|| format!("malformed decimal rank '{s}'"))
}

/// Uniform draw from `[0, bound)` using rejection sampling over the
/// minimal bit width of `bound`. Expected iterations < 2. `bound` must be
/// nonzero.
pub(crate) fn random_biguint_below<R: RngCore + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    debug_assert!(!bound.is_zero());
    let bits = bound.bits();
    let nbytes = ((bits + 7) / 8) as usize;
    let rem = (bits % 8) as u32;
    let mask: u8 = if rem == 0 { 0xff } else { (1u8 << rem) - 1 };
    let mut buf = vec![0u8; nbytes];
    loop {
        rng.fill_bytes(&mut buf);
        // Mask the most significant byte so candidates stay within the
        // bit width of the bound.
        buf[nbytes - 1] &= mask;
        let candidate = BigUint::from_bytes_le(&buf);
        if &candidate < bound {
            return candidate;
        }
    }
}
