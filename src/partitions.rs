//! Integer partition counting. Classical Euler-type DP recurrences, each
//! in a fast `f64` form and an exact `BigUint` twin with identical
//! recurrence structure. Impossible constraints count 0; they are
//! answers, not errors.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// p(n): partitions of n into positive parts, any number of parts.
pub fn n_partitions(n: u32) -> f64 {
    let n = n as usize;
    let mut dp = vec![0.0; n + 1];
    dp[0] = 1.0;
    for part in 1..=n {
        for j in part..=n {
            dp[j] += dp[j - part];
        }
    }
    dp[n]
}

/// Exact p(n).
pub fn n_partitions_bigz(n: u32) -> BigUint {
    let n = n as usize;
    let mut dp = vec![BigUint::zero(); n + 1];
    dp[0] = BigUint::one();
    for part in 1..=n {
        for j in part..=n {
            let add = dp[j - part].clone();
            dp[j] += add;
        }
    }
    dp.pop().unwrap_or_default()
}

/// Partitions of n into exactly k parts.
/// Recurrence: p(n,k) = p(n-1,k-1) + p(n-k,k) — either the smallest part
/// is 1, or every part shrinks by 1.
pub fn n_k_partitions(n: u32, k: u32) -> f64 {
    let (n, k) = (n as usize, k as usize);
    if k > n {
        return 0.0;
    }
    if k == 0 {
        return if n == 0 { 1.0 } else { 0.0 };
    }
    let mut dp = vec![vec![0.0; n + 1]; k + 1];
    dp[0][0] = 1.0;
    for kk in 1..=k {
        for nn in kk..=n {
            dp[kk][nn] = dp[kk - 1][nn - 1] + dp[kk][nn - kk];
        }
    }
    dp[k][n]
}

/// Exact twin of [`n_k_partitions`].
pub fn n_k_partitions_bigz(n: u32, k: u32) -> BigUint {
    let (n, k) = (n as usize, k as usize);
    if k > n {
        return BigUint::zero();
    }
    if k == 0 {
        return if n == 0 {
            BigUint::one()
        } else {
            BigUint::zero()
        };
    }
    let mut dp = vec![vec![BigUint::zero(); n + 1]; k + 1];
    dp[0][0] = BigUint::one();
    for kk in 1..=k {
        for nn in kk..=n {
            let v = &dp[kk - 1][nn - 1] + &dp[kk][nn - kk];
            dp[kk][nn] = v;
        }
    }
    dp[k][n].clone()
}

/// Partitions of n into at most k parts, each at most m.
/// Bounded DP: folding in part value v, `dp[c][j] += dp[c-1][j-v]`
/// (one more part of value v) on top of the v-1 table.
pub fn nkm(n: u32, k: u32, m: u32) -> f64 {
    let (n, k, m) = (n as usize, k as usize, m as usize);
    let mut dp = vec![vec![0.0; n + 1]; k + 1];
    for row in dp.iter_mut() {
        row[0] = 1.0;
    }
    for v in 1..=m {
        for c in 1..=k {
            for j in v..=n {
                dp[c][j] += dp[c - 1][j - v];
            }
        }
    }
    dp[k][n]
}

/// Exact twin of [`nkm`].
pub fn nkm_bigz(n: u32, k: u32, m: u32) -> BigUint {
    let (n, k, m) = (n as usize, k as usize, m as usize);
    let mut dp = vec![vec![BigUint::zero(); n + 1]; k + 1];
    for row in dp.iter_mut() {
        row[0] = BigUint::one();
    }
    for v in 1..=m {
        for c in 1..=k {
            for j in v..=n {
                let add = dp[c - 1][j - v].clone();
                dp[c][j] += add;
            }
        }
    }
    dp[k][n].clone()
}

/// Partitions of n into exactly k parts, each at most m.
/// Subtracting one from every part maps these onto partitions of n-k
/// into at most k parts, each at most m-1.
pub fn n_k_max_partitions(n: u32, k: u32, m: u32) -> f64 {
    if k == 0 {
        return if n == 0 { 1.0 } else { 0.0 };
    }
    if m == 0 || n < k {
        return 0.0;
    }
    nkm(n - k, k, m - 1)
}

/// Exact twin of [`n_k_max_partitions`].
pub fn n_k_max_partitions_bigz(n: u32, k: u32, m: u32) -> BigUint {
    if k == 0 {
        return if n == 0 {
            BigUint::one()
        } else {
            BigUint::zero()
        };
    }
    if m == 0 || n < k {
        return BigUint::zero();
    }
    nkm_bigz(n - k, k, m - 1)
}

/// Partitions of n into exactly k parts, each at least m.
/// Subtracting m-1 from every part maps these onto partitions of
/// n - k(m-1) into exactly k positive parts.
pub fn n_k_min_partitions(n: u32, k: u32, m: u32) -> f64 {
    let m = m.max(1) as u64;
    let shift = k as u64 * (m - 1);
    if (n as u64) < shift {
        return 0.0;
    }
    n_k_partitions(n - shift as u32, k)
}

/// Exact twin of [`n_k_min_partitions`].
pub fn n_k_min_partitions_bigz(n: u32, k: u32, m: u32) -> BigUint {
    let m = m.max(1) as u64;
    let shift = k as u64 * (m - 1);
    if (n as u64) < shift {
        return BigUint::zero();
    }
    n_k_partitions_bigz(n - shift as u32, k)
}

/// Partitions of n with every part at least m, any number of parts.
pub fn n_min_partitions(n: u32, m: u32) -> f64 {
    let n = n as usize;
    let lo = m.max(1) as usize;
    let mut dp = vec![0.0; n + 1];
    dp[0] = 1.0;
    for part in lo..=n {
        for j in part..=n {
            dp[j] += dp[j - part];
        }
    }
    dp[n]
}

/// Exact twin of [`n_min_partitions`].
pub fn n_min_partitions_bigz(n: u32, m: u32) -> BigUint {
    let n = n as usize;
    let lo = m.max(1) as usize;
    let mut dp = vec![BigUint::zero(); n + 1];
    dp[0] = BigUint::one();
    for part in lo..=n {
        for j in part..=n {
            let add = dp[j - part].clone();
            dp[j] += add;
        }
    }
    dp.pop().unwrap_or_default()
}

/// Partitions of n with every part at most m, any number of parts. By
/// conjugation this is also the number of partitions of n into at most m
/// parts.
pub fn n_max_partitions(n: u32, m: u32) -> f64 {
    let n = n as usize;
    let hi = (m as usize).min(n);
    let mut dp = vec![0.0; n + 1];
    dp[0] = 1.0;
    for part in 1..=hi {
        for j in part..=n {
            dp[j] += dp[j - part];
        }
    }
    dp[n]
}

/// Exact twin of [`n_max_partitions`].
pub fn n_max_partitions_bigz(n: u32, m: u32) -> BigUint {
    let n = n as usize;
    let hi = (m as usize).min(n);
    let mut dp = vec![BigUint::zero(); n + 1];
    dp[0] = BigUint::one();
    for part in 1..=hi {
        for j in part..=n {
            let add = dp[j - part].clone();
            dp[j] += add;
        }
    }
    dp.pop().unwrap_or_default()
}

/// Constraint flavor for the partition-count wrappers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exactly,
    AtMost,
    AtLeast,
}

/// Partitions of n whose number of parts satisfies `bound` relative to
/// k. At-most-k uses the conjugation identity (at most k parts = largest
/// part at most k); at-least-k is the complement.
pub fn npartitions_k(n: u32, k: u32, bound: Bound) -> f64 {
    match bound {
        Bound::Exactly => n_k_partitions(n, k),
        Bound::AtMost => n_max_partitions(n, k),
        Bound::AtLeast => {
            if k == 0 {
                n_partitions(n)
            } else {
                n_partitions(n) - n_max_partitions(n, k - 1)
            }
        }
    }
}

/// Exact twin of [`npartitions_k`].
pub fn npartitions_k_bigz(n: u32, k: u32, bound: Bound) -> BigUint {
    match bound {
        Bound::Exactly => n_k_partitions_bigz(n, k),
        Bound::AtMost => n_max_partitions_bigz(n, k),
        Bound::AtLeast => {
            if k == 0 {
                n_partitions_bigz(n)
            } else {
                n_partitions_bigz(n) - n_max_partitions_bigz(n, k - 1)
            }
        }
    }
}

/// Partitions of n whose largest part satisfies `bound` relative to m.
pub fn npartitions_max_part(n: u32, m: u32, bound: Bound) -> f64 {
    match bound {
        Bound::Exactly => {
            if m == 0 {
                return if n == 0 { 1.0 } else { 0.0 };
            }
            n_max_partitions(n, m) - n_max_partitions(n, m - 1)
        }
        Bound::AtMost => n_max_partitions(n, m),
        Bound::AtLeast => {
            if m == 0 {
                n_partitions(n)
            } else {
                n_partitions(n) - n_max_partitions(n, m - 1)
            }
        }
    }
}

/// Exact twin of [`npartitions_max_part`].
pub fn npartitions_max_part_bigz(n: u32, m: u32, bound: Bound) -> BigUint {
    match bound {
        Bound::Exactly => {
            if m == 0 {
                return if n == 0 {
                    BigUint::one()
                } else {
                    BigUint::zero()
                };
            }
            n_max_partitions_bigz(n, m) - n_max_partitions_bigz(n, m - 1)
        }
        Bound::AtMost => n_max_partitions_bigz(n, m),
        Bound::AtLeast => {
            if m == 0 {
                n_partitions_bigz(n)
            } else {
                n_partitions_bigz(n) - n_max_partitions_bigz(n, m - 1)
            }
        }
    }
}
