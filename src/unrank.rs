//! Unranking engine: compute the i-th k-permutation directly from its
//! rank, on a native `u64` fast path or a `BigUint` slow path, plus
//! batch access by explicit ranks or uniform random sampling.

use anyhow::{ensure, Context, Result};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rand::{Rng, RngCore};
use tracing::debug;

use crate::batch::{fill_batch, BatchValues, LabelTable, Layout, RowSource};
use crate::counting::num_k_permutations_bigz;
use crate::numeric::{fallfact_bigz, fallfact_u64, parse_decimal_rank, random_biguint_below};

/// Turn the position-wise selection indices of the falling-factorial
/// decomposition into distinct labels. Positions are fixed from the end
/// backward; each one is bumped once for every earlier value not above
/// it. The descending order is load-bearing: earlier positions still
/// hold raw selection indices when a later position is corrected.
fn adjust_selection(a: &mut [u32]) {
    for i in (1..a.len()).rev() {
        for j in (0..i).rev() {
            if a[j] <= a[i] {
                a[i] += 1;
            }
        }
    }
}

/// The k-permutation of `0..n` at 0-based rank `index`, in the same
/// lexicographic order the successor engine produces.
///
/// `k <= n` and `index < num_k_permutations(n, k)` are preconditions;
/// [`get_k_permutations`] validates them before dispatching here.
pub fn ith_k_permutation(n: u64, k: u64, mut index: u64) -> Vec<u32> {
    let mut a = vec![0u32; k as usize];
    for i in 0..k {
        let f = fallfact_u64(n - 1 - i, k - 1 - i);
        a[i as usize] = (index / f) as u32;
        index %= f;
    }
    adjust_selection(&mut a);
    a
}

/// Arbitrary-precision twin of [`ith_k_permutation`]: the same
/// decomposition using truncating division-with-remainder, for ranks
/// beyond native range. Errors when `index` is out of range.
pub fn ith_k_permutation_bigz(n: u64, k: u64, index: &BigUint) -> Result<Vec<u32>> {
    let mut rem = index.clone();
    let mut a = vec![0u32; k as usize];
    for i in 0..k {
        let f = fallfact_bigz(n - 1 - i, k - 1 - i);
        let q = &rem / &f;
        rem %= &f;
        a[i as usize] = q
            .to_u32()
            .context("rank exceeds the number of k-permutations")?;
    }
    adjust_selection(&mut a);
    Ok(a)
}

/// Rank of a k-permutation of `0..n` (inverse of [`ith_k_permutation`]).
pub fn rank_k_permutation(a: &[u32], n: u64) -> u64 {
    let k = a.len() as u64;
    let mut rank = 0u64;
    for (i, &v) in a.iter().enumerate() {
        let smaller = a[..i].iter().filter(|&&u| u < v).count() as u64;
        rank += (v as u64 - smaller) * fallfact_u64(n - 1 - i as u64, k - 1 - i as u64);
    }
    rank
}

/// Arbitrary-precision twin of [`rank_k_permutation`].
pub fn rank_k_permutation_bigz(a: &[u32], n: u64) -> BigUint {
    let k = a.len() as u64;
    let mut rank = BigUint::zero();
    for (i, &v) in a.iter().enumerate() {
        let smaller = a[..i].iter().filter(|&&u| u < v).count() as u64;
        rank += (v as u64 - smaller) * fallfact_bigz(n - 1 - i as u64, k - 1 - i as u64);
    }
    rank
}

/// How to select the k-permutations returned by [`get_k_permutations`]:
/// explicit 1-based ranks (native or decimal-string) or a number of
/// uniform random draws over the whole family.
#[derive(Clone, Debug)]
pub enum RankQuery {
    Ranks(Vec<u64>),
    DecimalRanks(Vec<String>),
    Sample(usize),
}

struct RowList {
    rows: Vec<Vec<u32>>,
    pos: usize,
}

impl RowSource for RowList {
    fn advance(&mut self) -> Option<&[u32]> {
        let row = self.rows.get(self.pos)?;
        self.pos += 1;
        Some(row)
    }
}

fn to_zero_based(rank: BigUint, total: &BigUint) -> Result<BigUint> {
    ensure!(
        !rank.is_zero() && &rank <= total,
        "rank {rank} is out of range (1..={total})"
    );
    Ok(rank - 1u32)
}

/// Fetch specific k-permutations of `0..n` by rank or by uniform random
/// sampling, without enumerating predecessors.
///
/// Ranks are 1-based externally. The native `u64` path is used while the
/// total count fits; decimal-string ranks or a count beyond native range
/// switch the whole call to the arbitrary-precision path. Sampling draws
/// uniformly from `[0, total)` using the supplied random source.
pub fn get_k_permutations<R: RngCore>(
    n: u64,
    k: u64,
    labels: &LabelTable,
    layout: Layout,
    query: &RankQuery,
    rng: &mut R,
) -> Result<BatchValues> {
    ensure!(k <= n, "cannot arrange {k} of {n} elements without repetition");
    ensure!(n <= u32::MAX as u64, "alphabet size {n} exceeds the element range");
    let total = num_k_permutations_bigz(n, k);
    let native_total = total.to_u64();
    let use_bigz = matches!(query, RankQuery::DecimalRanks(_)) || native_total.is_none();

    let d = match query {
        RankQuery::Ranks(ranks) => ranks.len(),
        RankQuery::DecimalRanks(ranks) => ranks.len(),
        RankQuery::Sample(count) => *count,
    };

    // Resolve every requested rank to a 0-based index up front; any bad
    // rank fails the whole call before a batch is assembled.
    let indices: Vec<BigUint> = match query {
        RankQuery::Ranks(ranks) => ranks
            .iter()
            .map(|&r| to_zero_based(BigUint::from(r), &total))
            .collect::<Result<_>>()?,
        RankQuery::DecimalRanks(ranks) => ranks
            .iter()
            .map(|s| to_zero_based(parse_decimal_rank(s)?, &total))
            .collect::<Result<_>>()?,
        RankQuery::Sample(count) => {
            // k <= n was ensured above, so the family is never empty.
            if use_bigz {
                (0..*count)
                    .map(|_| random_biguint_below(rng, &total))
                    .collect()
            } else {
                let bound = native_total.unwrap_or(u64::MAX);
                (0..*count)
                    .map(|_| BigUint::from(rng.gen_range(0..bound)))
                    .collect()
            }
        }
    };

    let rows: Vec<Vec<u32>> = if use_bigz {
        debug!(%total, d, "unranking on the arbitrary-precision path");
        indices
            .iter()
            .map(|idx| ith_k_permutation_bigz(n, k, idx))
            .collect::<Result<_>>()?
    } else {
        indices
            .iter()
            .map(|idx| ith_k_permutation(n, k, idx.to_u64().unwrap_or_default()))
            .collect()
    };

    let mut source = RowList { rows, pos: 0 };
    let result = fill_batch(&mut source, n as usize, k as usize, d, layout, labels)?;
    Ok(result.values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::fallfact_u64;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn unrank_n3_k2_full_order() {
        let expected = [
            vec![0, 1],
            vec![0, 2],
            vec![1, 0],
            vec![1, 2],
            vec![2, 0],
            vec![2, 1],
        ];
        for (rank, want) in expected.iter().enumerate() {
            assert_eq!(&ith_k_permutation(3, 2, rank as u64), want);
        }
    }

    #[test]
    fn rank_roundtrip_small() {
        for n in 1..=7u64 {
            for k in 0..=n {
                let total = fallfact_u64(n, k);
                for rank in 0..total {
                    let perm = ith_k_permutation(n, k, rank);
                    assert_eq!(rank_k_permutation(&perm, n), rank, "n={n} k={k}");
                }
            }
        }
    }

    #[test]
    fn bigz_path_matches_native() {
        for n in 1..=6u64 {
            for k in 0..=n {
                let total = fallfact_u64(n, k);
                for rank in 0..total {
                    let native = ith_k_permutation(n, k, rank);
                    let big = ith_k_permutation_bigz(n, k, &BigUint::from(rank)).unwrap();
                    assert_eq!(native, big);
                    assert_eq!(
                        rank_k_permutation_bigz(&native, n),
                        BigUint::from(rank)
                    );
                }
            }
        }
    }

    #[test]
    fn explicit_ranks_are_one_based() {
        let mut rng = StdRng::seed_from_u64(0);
        let values = get_k_permutations(
            5,
            3,
            &LabelTable::None,
            Layout::Row,
            &RankQuery::Ranks(vec![1, 60]),
            &mut rng,
        )
        .unwrap();
        let BatchValues::Index(batch) = values else {
            panic!("expected index batch");
        };
        assert_eq!(batch.record(0), vec![1, 2, 3]);
        assert_eq!(batch.record(1), vec![5, 4, 3]);
    }

    #[test]
    fn out_of_range_ranks_are_fatal() {
        let mut rng = StdRng::seed_from_u64(0);
        for bad in [0u64, 61] {
            assert!(get_k_permutations(
                5,
                3,
                &LabelTable::None,
                Layout::Row,
                &RankQuery::Ranks(vec![bad]),
                &mut rng,
            )
            .is_err());
        }
    }

    #[test]
    fn decimal_ranks_force_big_path() {
        let mut rng = StdRng::seed_from_u64(0);
        let values = get_k_permutations(
            5,
            3,
            &LabelTable::None,
            Layout::Row,
            &RankQuery::DecimalRanks(vec!["1".into(), "60".into()]),
            &mut rng,
        )
        .unwrap();
        let BatchValues::Index(batch) = values else {
            panic!("expected index batch");
        };
        assert_eq!(batch.record(0), vec![1, 2, 3]);
        assert_eq!(batch.record(1), vec![5, 4, 3]);

        assert!(get_k_permutations(
            5,
            3,
            &LabelTable::None,
            Layout::Row,
            &RankQuery::DecimalRanks(vec!["not-a-rank".into()]),
            &mut rng,
        )
        .is_err());
    }

    #[test]
    fn sampling_yields_valid_permutations() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = get_k_permutations(
            5,
            3,
            &LabelTable::None,
            Layout::List,
            &RankQuery::Sample(50),
            &mut rng,
        )
        .unwrap();
        let BatchValues::Index(batch) = values else {
            panic!("expected index batch");
        };
        assert_eq!(batch.len(), 50);
        for record in batch.records().unwrap() {
            assert_eq!(record.len(), 3);
            for &v in record {
                assert!((1..=5).contains(&v));
            }
            let mut sorted = record.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 3, "repeated element in {record:?}");
        }
    }

    #[test]
    fn sampling_the_trivial_family() {
        // n=0, k=0 has exactly one (empty) arrangement.
        let mut rng = StdRng::seed_from_u64(1);
        let values = get_k_permutations(
            0,
            0,
            &LabelTable::None,
            Layout::List,
            &RankQuery::Sample(3),
            &mut rng,
        )
        .unwrap();
        assert_eq!(values.len(), 3);
    }
}
