//! Cross-fitting options — configuration for one-step estimation runs.
//!
//! Purpose
//! -------
//! Collect the configuration knobs for a cross-fitted estimation pass in one
//! place, making the workflow explicit and reproducible: the fold count and
//! the RNG seed driving the index shuffle. Call sites pass explicit options
//! instead of relying on any process-wide state.
//!
//! Invariants & assumptions
//! ------------------------
//! - The fold count is validated against the sample size at estimation time
//!   (the options object cannot know `n`); `CrossfitOptions` only records
//!   intent.
//! - `seed = None` means "draw a fresh seed from OS entropy"; estimates are
//!   reproducible exactly when the caller pins a seed.
use rand::Rng;

/// Default fold count: the 2-fold "data-split" variant of the estimator.
pub const DEFAULT_N_FOLDS: usize = 2;

/// `CrossfitOptions` — fold count and shuffle seed for one estimation pass.
///
/// Purpose
/// -------
/// Bundle the two knobs every one-step estimator needs: how many folds to
/// split the sample into and which seed drives the fold shuffle. A pinned
/// seed makes the whole procedure deterministic (modulo nothing: the nuisance
/// estimators in this crate are themselves deterministic given their inputs).
///
/// Fields
/// ------
/// - `n_folds`: `usize` — number of folds `k`; must satisfy `2 <= k <= n` at
///   estimation time.
/// - `seed`: `Option<u64>` — shuffle seed; `None` draws from OS entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossfitOptions {
    pub n_folds: usize,
    pub seed: Option<u64>,
}

impl CrossfitOptions {
    /// Construct options with an explicit fold count and seed policy.
    pub fn new(n_folds: usize, seed: Option<u64>) -> Self {
        CrossfitOptions { n_folds, seed }
    }

    /// Resolve the effective shuffle seed: the pinned seed when present,
    /// otherwise a fresh draw from the thread RNG.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::thread_rng().gen())
    }
}

impl Default for CrossfitOptions {
    /// Two folds, fresh entropy seed.
    fn default() -> Self {
        CrossfitOptions { n_folds: DEFAULT_N_FOLDS, seed: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Field preservation in `new` and the documented defaults.
    // - Seed resolution for pinned seeds.
    //
    // They intentionally DO NOT cover:
    // - Fold-count validation against n; that happens in `FoldPlan::new` and
    //   is tested there.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure `new` preserves its inputs and `default` matches the docs.
    //
    // Given
    // -----
    // - Explicit options (5 folds, seed 11) and `CrossfitOptions::default()`.
    //
    // Expect
    // ------
    // - Fields stored verbatim; default is 2 folds with no pinned seed.
    fn new_preserves_fields_and_default_is_documented() {
        let opts = CrossfitOptions::new(5, Some(11));
        assert_eq!(opts.n_folds, 5);
        assert_eq!(opts.seed, Some(11));

        let default = CrossfitOptions::default();
        assert_eq!(default.n_folds, DEFAULT_N_FOLDS);
        assert!(default.seed.is_none());
    }

    #[test]
    // Purpose
    // -------
    // A pinned seed resolves to itself.
    //
    // Given
    // -----
    // - Options with `seed = Some(42)`.
    //
    // Expect
    // ------
    // - `resolve_seed()` returns 42 every time.
    fn pinned_seed_resolves_to_itself() {
        let opts = CrossfitOptions::new(2, Some(42));
        assert_eq!(opts.resolve_seed(), 42);
        assert_eq!(opts.resolve_seed(), 42);
    }
}
