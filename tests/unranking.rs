//! Integration tests for rank-based access: native and arbitrary-precision
//! unranking parity, automatic path dispatch, 1-based rank validation, and
//! uniform sampling.

use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;

use arrangements::{
    get_k_permutations, ith_k_permutation, ith_k_permutation_bigz, next_k_permutations,
    num_k_permutations_bigz, rank_k_permutation, rank_k_permutation_bigz, BatchValues, LabelTable,
    Layout, RankQuery,
};

fn index_records(values: &BatchValues) -> Vec<Vec<u32>> {
    match values {
        BatchValues::Index(b) => (0..b.len()).map(|j| b.record(j)).collect(),
        other => panic!("expected an index batch, got {other:?}"),
    }
}

// =============================================================================
// Parity with sequential enumeration
// =============================================================================

#[test]
fn ranked_access_matches_enumeration_order() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 0..=6u64 {
        for k in 0..=n {
            let total = num_k_permutations_bigz(n, k)
                .to_string()
                .parse::<u64>()
                .unwrap();
            let enumerated = index_records(
                &next_k_permutations(
                    n as usize,
                    k as usize,
                    total as usize,
                    None,
                    &LabelTable::None,
                    Layout::Row,
                )
                .unwrap()
                .values,
            );
            let ranked = index_records(
                &get_k_permutations(
                    n,
                    k,
                    &LabelTable::None,
                    Layout::Row,
                    &RankQuery::Ranks((1..=total).collect()),
                    &mut rng,
                )
                .unwrap(),
            );
            assert_eq!(ranked, enumerated, "n={n} k={k}");
        }
    }
}

#[test]
fn first_and_last_ranks() {
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
    assert_eq!(index_records(&values), vec![vec![1, 2, 3], vec![5, 4, 3]]);
}

#[test]
fn native_and_bigz_unranking_agree() {
    for n in 1..=6u64 {
        for k in 0..=n {
            let total = num_k_permutations_bigz(n, k)
                .to_string()
                .parse::<u64>()
                .unwrap();
            for index in 0..total {
                let native = ith_k_permutation(n, k, index);
                let big = ith_k_permutation_bigz(n, k, &BigUint::from(index)).unwrap();
                assert_eq!(native, big, "n={n} k={k} index={index}");
                assert_eq!(rank_k_permutation(&native, n), index);
                assert_eq!(rank_k_permutation_bigz(&native, n), BigUint::from(index));
            }
        }
    }
}

// =============================================================================
// Arbitrary-precision dispatch
// =============================================================================

#[test]
fn huge_families_dispatch_to_arbitrary_precision() {
    // 30!/10! does not fit in u64, so even native ranks take the big path.
    let mut rng = StdRng::seed_from_u64(0);
    let values = get_k_permutations(
        30,
        20,
        &LabelTable::None,
        Layout::Row,
        &RankQuery::Ranks(vec![1]),
        &mut rng,
    )
    .unwrap();
    assert_eq!(index_records(&values), vec![(1..=20).collect::<Vec<u32>>()]);

    // The last rank, addressable only as a decimal string.
    let last = num_k_permutations_bigz(30, 20).to_string();
    let values = get_k_permutations(
        30,
        20,
        &LabelTable::None,
        Layout::Row,
        &RankQuery::DecimalRanks(vec![last]),
        &mut rng,
    )
    .unwrap();
    assert_eq!(
        index_records(&values),
        vec![(11..=30).rev().collect::<Vec<u32>>()]
    );
}

#[test]
fn decimal_ranks_match_native_ranks() {
    let mut rng = StdRng::seed_from_u64(0);
    let by_number = get_k_permutations(
        6,
        4,
        &LabelTable::None,
        Layout::Row,
        &RankQuery::Ranks(vec![1, 17, 360]),
        &mut rng,
    )
    .unwrap();
    let by_string = get_k_permutations(
        6,
        4,
        &LabelTable::None,
        Layout::Row,
        &RankQuery::DecimalRanks(vec!["1".into(), "17".into(), "360".into()]),
        &mut rng,
    )
    .unwrap();
    assert_eq!(index_records(&by_number), index_records(&by_string));
}

// =============================================================================
// Validation and sampling
// =============================================================================

#[test]
fn out_of_range_ranks_are_fatal() {
    let mut rng = StdRng::seed_from_u64(0);
    for bad in [0u64, 61] {
        let err = get_k_permutations(
            5,
            3,
            &LabelTable::None,
            Layout::Row,
            &RankQuery::Ranks(vec![1, bad]),
            &mut rng,
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }
}

#[test]
fn malformed_decimal_rank_is_fatal() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(get_k_permutations(
        5,
        3,
        &LabelTable::None,
        Layout::Row,
        &RankQuery::DecimalRanks(vec!["12x".into()]),
        &mut rng,
    )
    .is_err());
}

#[test]
fn sampling_yields_valid_records_and_is_seed_deterministic() {
    let draw = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        index_records(
            &get_k_permutations(
                8,
                4,
                &LabelTable::None,
                Layout::Row,
                &RankQuery::Sample(40),
                &mut rng,
            )
            .unwrap(),
        )
    };
    let rows = draw(99);
    assert_eq!(rows.len(), 40);
    for row in &rows {
        assert_eq!(row.len(), 4);
        assert!(row.iter().all(|&v| (1..=8).contains(&v)));
        let mut sorted = row.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4, "repeated element in {row:?}");
    }
    assert_eq!(rows, draw(99));
}

#[test]
fn sampling_a_huge_family_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(3);
    let values = get_k_permutations(
        40,
        25,
        &LabelTable::None,
        Layout::Row,
        &RankQuery::Sample(10),
        &mut rng,
    )
    .unwrap();
    for row in index_records(&values) {
        assert_eq!(row.len(), 25);
        assert!(row.iter().all(|&v| (1..=40).contains(&v)));
    }
}
