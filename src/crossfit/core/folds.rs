//! Fold planning — seeded k-fold partitions for cross-fitting.
//!
//! Purpose
//! -------
//! Produce and hold the index partition a cross-fitted estimator works with:
//! `k` disjoint, exhaustive folds over `0..n` whose sizes differ by at most
//! one, shuffled independently of the covariates by a seeded RNG.
//!
//! Key behaviors
//! -------------
//! - [`FoldPlan::new`] validates `2 <= k <= n`, shuffles the indices with a
//!   `StdRng` seeded from an explicit `u64`, and slices them into balanced
//!   folds (the first `n mod k` folds carry one extra observation).
//! - [`FoldPlan::fold`] exposes a fold's held-out indices;
//!   [`FoldPlan::complement`] gathers the matching training indices.
//!
//! Invariants & assumptions
//! ------------------------
//! - Folds are pairwise disjoint and their sizes sum to `n`.
//! - Every fold is non-empty (guaranteed by `k <= n`).
//! - The same `(n, k, seed)` triple always yields the same plan; shuffling is
//!   the only source of randomness and is fully determined by the seed.
//!
//! Conventions
//! -----------
//! - Fold `i` is the *held-out* set when estimating with nuisances trained on
//!   its complement; "training fold(s)" in the estimator docs means
//!   `complement(i)`.
//! - This module performs no I/O and holds no global state; the seed comes in
//!   from [`CrossfitOptions`](crate::crossfit::core::options::CrossfitOptions)
//!   at the call site.
use crate::crossfit::{core::validation::validate_fold_count, errors::CrossfitResult};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// `FoldPlan` — a fixed, seeded partition of `0..n` into `k` folds.
///
/// Purpose
/// -------
/// Hold the index partition for one cross-fitted estimation pass so that fold
/// membership is decided once, up front, and every downstream step (nuisance
/// fitting, plug-in evaluation, influence-function averaging) reads from the
/// same split.
///
/// Invariants
/// ----------
/// - `folds.len() == k`, with `2 <= k <= n`.
/// - Fold sizes are `n / k` or `n / k + 1` and sum to `n`.
/// - Indices across folds are pairwise disjoint and cover `0..n`.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldPlan {
    folds: Vec<Vec<usize>>,
    n: usize,
}

impl FoldPlan {
    /// Build a balanced, seeded k-fold partition of `0..n`.
    ///
    /// Parameters
    /// ----------
    /// - `n`: number of observations; must satisfy `n >= k`.
    /// - `k`: number of folds; must satisfy `k >= 2`.
    /// - `seed`: RNG seed for the index shuffle. Equal seeds give equal plans.
    ///
    /// Errors
    /// ------
    /// - `CrossfitError::InvalidFoldCount { k, n }` when `k < 2` or `k > n`.
    pub fn new(n: usize, k: usize, seed: u64) -> CrossfitResult<Self> {
        validate_fold_count(k, n)?;

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let base = n / k;
        let extra = n % k;
        let mut folds = Vec::with_capacity(k);
        let mut start = 0;
        for i in 0..k {
            let size = base + usize::from(i < extra);
            folds.push(indices[start..start + size].to_vec());
            start += size;
        }

        Ok(FoldPlan { folds, n })
    }

    /// Number of folds `k`.
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }

    /// Number of observations `n` covered by the plan.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false: plans cover at least two observations.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Held-out indices of fold `i`.
    ///
    /// Panics
    /// ------
    /// - If `i >= k`; fold indices are a programming error, not user input.
    pub fn fold(&self, i: usize) -> &[usize] {
        &self.folds[i]
    }

    /// Training indices for fold `i`: every index not held out in fold `i`.
    ///
    /// Panics
    /// ------
    /// - If `i >= k`.
    pub fn complement(&self, i: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.n - self.folds[i].len());
        for (j, fold) in self.folds.iter().enumerate() {
            if j != i {
                out.extend_from_slice(fold);
            }
        }
        out
    }
}
