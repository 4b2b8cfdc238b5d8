//! Generation, unranking, and exact counting of combinatorial objects.
//!
//! Three engines, usable independently:
//!
//! - **Successor engine** ([`permutations`]): lexicographic
//!   next-k-permutation under plain and multiset (frequency-weighted)
//!   regimes, driven batch-by-batch with resumable, caller-owned session
//!   state. Batches come in row-major, column-major, or list layouts with
//!   optional label substitution.
//! - **Unranking engine** ([`unrank`]): compute the i-th k-permutation
//!   directly from its rank without enumerating predecessors, on a native
//!   `u64` fast path or an arbitrary-precision slow path, including batch
//!   access by explicit ranks or uniform random sampling.
//! - **Counting engine** ([`counting`], [`partitions`]): exact
//!   cardinalities for k-permutations, multiset permutations,
//!   combinations, compositions, and the integer-partition family. Every
//!   count has a fast `f64` form (best effort above 2^53) and an exact
//!   `BigUint` twin that is the source of truth.

pub mod batch;
pub mod counting;
pub mod numeric;
pub mod partitions;
pub mod permutations;
pub mod unrank;

pub use batch::{Batch, BatchResult, BatchValues, LabelTable, Layout};
pub use counting::{
    ncombinations, ncombinations_bigz, ncompositions, ncompositions_bigz, nperm_f, nperm_f_bigz,
    num_k_permutations, num_k_permutations_bigz,
};
pub use partitions::{
    n_k_max_partitions, n_k_max_partitions_bigz, n_k_min_partitions, n_k_min_partitions_bigz,
    n_k_partitions, n_k_partitions_bigz, n_max_partitions, n_max_partitions_bigz,
    n_min_partitions, n_min_partitions_bigz, n_partitions, n_partitions_bigz, nkm, nkm_bigz,
    npartitions_k, npartitions_k_bigz, npartitions_max_part, npartitions_max_part_bigz, Bound,
};
pub use permutations::{
    next_k_permutations, next_multiset_permutations, MultisetPermutationSession,
    PermutationSession,
};
pub use unrank::{
    get_k_permutations, ith_k_permutation, ith_k_permutation_bigz, rank_k_permutation,
    rank_k_permutation_bigz, RankQuery,
};
