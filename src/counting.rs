//! Exact counting: k-permutation, multiset permutation, combination, and
//! composition cardinalities. Every count has a fast `f64` form (best
//! effort above 2^53, documented approximate) and an exact `BigUint`
//! form that is the source of truth.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::numeric::{factorial_table, factorial_table_bigz, fallfact, fallfact_bigz};

/// Number of k-permutations of n distinct elements (falling factorial).
/// 0 when k > n. Best effort above 2^53.
pub fn num_k_permutations(n: u64, k: u64) -> f64 {
    fallfact(n, k)
}

/// Exact number of k-permutations of n distinct elements. Format with
/// `Display` for the canonical decimal string.
pub fn num_k_permutations_bigz(n: u64, k: u64) -> BigUint {
    fallfact_bigz(n, k)
}

/// Distinct arrangements of length `r` drawn from a multiset with the
/// given label frequencies, as `f64`.
///
/// Rolling-array DP: `p[j]` accumulates weighted arrangement counts of
/// length j over the labels folded in so far, with factorials
/// precomputed up to `min(r, max frequency)`. `r` larger than the
/// multiset total is 0. See [`nperm_f_bigz`] for the exact form.
pub fn nperm_f(freq: &[u32], r: usize) -> f64 {
    let n: usize = freq.iter().map(|&f| f as usize).sum();
    if r > n {
        return 0.0;
    }
    if freq.is_empty() {
        return 1.0; // r == 0 here
    }
    let maxf = freq.iter().copied().max().unwrap_or(0) as usize;

    let mut rfact = 1.0;
    for j in 2..=r {
        rfact *= j as f64;
    }
    let fact = factorial_table(r.min(maxf) + 1);

    let flen = freq.len();
    let mut p = vec![0.0; r + 1];
    let mut ptemp = 0.0;
    for (i, &fi) in freq.iter().enumerate() {
        let fi = fi as usize;
        if i == 0 {
            for j in 0..=r.min(fi) {
                p[j] = rfact / fact[j];
            }
            ptemp = p[r];
        } else if i < flen - 1 {
            // Descending so p[j-c] still holds the previous label's row.
            for j in (1..=r).rev() {
                let mut acc = 0.0;
                for c in 0..=fi.min(j) {
                    acc += p[j - c] / fact[c];
                }
                p[j] = acc;
            }
        } else {
            // Last label: only the length-r entry is needed.
            let mut acc = 0.0;
            for c in 0..=fi.min(r) {
                acc += p[r - c] / fact[c];
            }
            ptemp = acc;
        }
    }
    ptemp
}

/// Exact twin of [`nperm_f`]: same recurrence over big integers. The
/// intermediate divisions are exact (every addend of `p[j-c]` is a
/// multiple of `c!`). Returns 0 when `r` exceeds the multiset total.
pub fn nperm_f_bigz(freq: &[u32], r: usize) -> BigUint {
    let n: usize = freq.iter().map(|&f| f as usize).sum();
    if r > n {
        return BigUint::zero();
    }
    if freq.is_empty() {
        return BigUint::one();
    }
    let maxf = freq.iter().copied().max().unwrap_or(0) as usize;

    let mut rfact = BigUint::one();
    for j in 2..=r {
        rfact *= j;
    }
    let fact = factorial_table_bigz(r.min(maxf) + 1);

    let flen = freq.len();
    let mut p = vec![BigUint::zero(); r + 1];
    let mut ptemp = BigUint::zero();
    for (i, &fi) in freq.iter().enumerate() {
        let fi = fi as usize;
        if i == 0 {
            for j in 0..=r.min(fi) {
                p[j] = &rfact / &fact[j];
            }
            ptemp = p[r].clone();
        } else if i < flen - 1 {
            for j in (1..=r).rev() {
                let mut acc = BigUint::zero();
                for c in 0..=fi.min(j) {
                    acc += &p[j - c] / &fact[c];
                }
                p[j] = acc;
            }
        } else {
            let mut acc = BigUint::zero();
            for c in 0..=fi.min(r) {
                acc += &p[r - c] / &fact[c];
            }
            ptemp = acc;
        }
    }
    ptemp
}

/// C(n, k): k-combinations of n elements. 0 when k > n.
pub fn ncombinations(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut p = 1.0;
    for i in 0..k {
        p = p * (n - i) as f64 / (i + 1) as f64;
    }
    p
}

/// Exact C(n, k). Every intermediate quotient is itself a binomial
/// coefficient, so the running division is exact.
pub fn ncombinations_bigz(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let k = k.min(n - k);
    let mut p = BigUint::one();
    for i in 0..k {
        p *= n - i;
        p /= i + 1;
    }
    p
}

/// Compositions of n into exactly k positive parts: C(n-1, k-1).
pub fn ncompositions(n: u64, k: u64) -> f64 {
    if n == 0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if k == 0 {
        return 0.0;
    }
    ncombinations(n - 1, k - 1)
}

/// Exact twin of [`ncompositions`].
pub fn ncompositions_bigz(n: u64, k: u64) -> BigUint {
    if n == 0 {
        return if k == 0 {
            BigUint::one()
        } else {
            BigUint::zero()
        };
    }
    if k == 0 {
        return BigUint::zero();
    }
    ncombinations_bigz(n - 1, k - 1)
}
