//! Successor engine: lexicographic next-k-permutation under plain and
//! multiset regimes, with resumable, caller-owned session state.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::batch::{fill_batch, BatchResult, LabelTable, Layout, RowSource};

/// Advance `a` (a permutation of `0..n`) so its first k elements form the
/// next k-permutation. `cycle[i]` counts the positions still unvisited at
/// cursor level i; fresh state is `cycle[i] = n - i`.
///
/// Decrements the deepest active counter and swaps in the next candidate;
/// a spent counter rotates the suffix back into order, resets, and
/// cascades one level up. Returns false once every level is spent; the
/// buffer contents are then unspecified and the state must be treated as
/// exhausted.
pub fn next_k_permutation(a: &mut [u32], cycle: &mut [u32], k: usize) -> bool {
    let n = a.len();
    if k == 0 {
        return false;
    }
    let mut i = k - 1;
    loop {
        cycle[i] -= 1;
        if cycle[i] > 0 {
            a.swap(i, n - cycle[i] as usize);
            return true;
        }
        a[i..].rotate_left(1);
        cycle[i] = (n - i) as u32;
        if i == 0 {
            return false;
        }
        i -= 1;
    }
}

/// One step of the duplicate-aware lexicographic next-permutation.
fn next_permutation(a: &mut [u32]) -> bool {
    let n = a.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && a[i - 1] >= a[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let pivot = i - 1;
    let mut j = n - 1;
    while a[j] <= a[pivot] {
        j -= 1;
    }
    a.swap(pivot, j);
    a[i..].reverse();
    true
}

/// Advance a multiset arrangement so its first k elements form the next
/// distinct k-prefix.
///
/// The tail `a[k..]` stays sorted ascending between calls. Reversing it
/// makes the current full arrangement the last one sharing this prefix,
/// so a single next-permutation step lands exactly on the next distinct
/// prefix — equal labels can neither repeat nor skip an arrangement.
pub fn next_multiset_k_permutation(a: &mut [u32], k: usize) -> bool {
    a[k..].reverse();
    next_permutation(a)
}

/// Resumable state for plain k-permutation enumeration.
///
/// Owned by the caller across calls; serialize it to persist the resume
/// position between runs. The first record drawn from a fresh session is
/// the initial arrangement itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PermutationSession {
    a: Vec<u32>,
    cycle: Vec<u32>,
    k: usize,
    started: bool,
    exhausted: bool,
}

impl PermutationSession {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            a: (0..n as u32).collect(),
            cycle: (0..k).map(|i| (n - i) as u32).collect(),
            k,
            started: false,
            exhausted: false,
        }
    }

    pub fn n(&self) -> usize {
        self.a.len()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl RowSource for PermutationSession {
    fn advance(&mut self) -> Option<&[u32]> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !next_k_permutation(&mut self.a, &mut self.cycle, self.k) {
            self.exhausted = true;
            return None;
        }
        Some(&self.a[..self.k])
    }
}

/// Resumable state for multiset k-permutation enumeration. The buffer
/// holds one label index per element, expanded from the frequency table
/// and kept in the invariant order of [`next_multiset_k_permutation`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisetPermutationSession {
    a: Vec<u32>,
    k: usize,
    flen: usize,
    started: bool,
    exhausted: bool,
}

impl MultisetPermutationSession {
    pub fn new(freq: &[u32], k: usize) -> Self {
        let a = freq
            .iter()
            .enumerate()
            .flat_map(|(i, &f)| std::iter::repeat(i as u32).take(f as usize))
            .collect();
        Self {
            a,
            k,
            flen: freq.len(),
            started: false,
            exhausted: false,
        }
    }

    /// Total element count (sum of frequencies).
    pub fn total(&self) -> usize {
        self.a.len()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl RowSource for MultisetPermutationSession {
    fn advance(&mut self) -> Option<&[u32]> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !next_multiset_k_permutation(&mut self.a, self.k) {
            self.exhausted = true;
            return None;
        }
        Some(&self.a[..self.k])
    }
}

/// Produce the next `d` k-permutations of `0..n`, resuming from `session`
/// when supplied (absent ⇒ one-shot from the start). On exhaustion the
/// batch is truncated to the records actually produced and
/// [`BatchResult::exhausted`] is set; subsequent calls on the same
/// session return an empty, exhausted batch.
pub fn next_k_permutations(
    n: usize,
    k: usize,
    d: usize,
    session: Option<&mut PermutationSession>,
    labels: &LabelTable,
    layout: Layout,
) -> Result<BatchResult> {
    ensure!(k <= n, "cannot arrange {k} of {n} elements without repetition");
    match session {
        Some(s) => {
            ensure!(
                s.n() == n && s.k() == k,
                "session was created for n={}, k={} (got n={n}, k={k})",
                s.n(),
                s.k()
            );
            fill_batch(s, n, k, d, layout, labels)
        }
        None => fill_batch(&mut PermutationSession::new(n, k), n, k, d, layout, labels),
    }
}

/// Produce the next `d` k-permutations of the multiset described by
/// `freq` (one frequency per distinct label). Labels index the alphabet,
/// so the label table must cover `freq.len()` entries.
pub fn next_multiset_permutations(
    freq: &[u32],
    k: usize,
    d: usize,
    session: Option<&mut MultisetPermutationSession>,
    labels: &LabelTable,
    layout: Layout,
) -> Result<BatchResult> {
    let total: usize = freq.iter().map(|&f| f as usize).sum();
    ensure!(k <= total, "cannot arrange {k} of {total} elements");
    match session {
        Some(s) => {
            ensure!(
                s.flen == freq.len() && s.total() == total && s.k() == k,
                "session does not match the requested multiset"
            );
            fill_batch(s, freq.len(), k, d, layout, labels)
        }
        None => fill_batch(
            &mut MultisetPermutationSession::new(freq, k),
            freq.len(),
            k,
            d,
            layout,
            labels,
        ),
    }
}
