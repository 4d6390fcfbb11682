//! Sample containers for cross-fitted estimation.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the data a one-step estimator
//! consumes: a covariate matrix paired with scalar outcomes for regression
//! functionals, and a plain univariate series for density-based functionals.
//! This module centralizes input validation so downstream code can assume
//! clean, finite data.
//!
//! Key behaviors
//! -------------
//! - [`RegressionSample`] enforces basic data invariants (non-empty, finite
//!   covariates and outcomes, matching row counts).
//! - [`UnivariateSample`] enforces non-emptiness and finiteness for 1-D data.
//! - Both types are immutable after construction; cross-fitting operates on
//!   index subsets, never on mutated samples.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x.nrows() == y.len() > 0` and every stored value is finite.
//! - Rows are observations, columns are covariates; indexing is 0-based.
//! - Covariates intended for exact-match query lookups must come from a
//!   discrete (or pre-discretized) distribution; the containers themselves do
//!   not enforce discreteness.
//!
//! Downstream usage
//! ----------------
//! - Construct a [`RegressionSample`] wherever raw `(X, y)` data enters the
//!   cross-fitting stack; estimators may then rely on its invariants and
//!   subset it by fold indices without re-validating.
//! - Construct a [`UnivariateSample`] for density-functional targets such as
//!   Shannon entropy.
use crate::crossfit::{
    core::validation::{validate_covariates, validate_outcomes, validate_series},
    errors::CrossfitResult,
};
use ndarray::{Array1, Array2};

/// `RegressionSample` — validated covariates paired with scalar outcomes.
///
/// Purpose
/// -------
/// Represent one replicate's `(X, y)` data for conditional-functional
/// estimation. Validation happens once, at construction, via
/// [`RegressionSample::new`]; after that the sample is an immutable value.
///
/// Fields
/// ------
/// - `x`: `Array2<f64>` — covariate matrix, `n x d`, all entries finite.
/// - `y`: `Array1<f64>` — outcomes, length `n`, all entries finite.
///
/// Invariants
/// ----------
/// - `x.nrows() == y.len() > 0`.
/// - All stored values are finite.
///
/// Notes
/// -----
/// - Validation is O(n·d); afterwards the type is a plain container with no
///   hidden allocations.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionSample {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl RegressionSample {
    /// Construct a validated sample from raw covariates and outcomes.
    ///
    /// Errors
    /// ------
    /// - `CrossfitError::EmptySample` when `x` has no rows.
    /// - `CrossfitError::NonFiniteCovariate` / `NonFiniteOutcome` pointing at
    ///   the first offending entry.
    /// - `CrossfitError::DimensionMismatch` when `x.nrows() != y.len()`.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> CrossfitResult<Self> {
        validate_covariates(x.view())?;
        validate_outcomes(y.view(), x.nrows())?;
        Ok(RegressionSample { x, y })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Always false: construction rejects empty samples. Kept for idiomatic
    /// pairing with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    /// Covariate dimension `d`.
    pub fn dim(&self) -> usize {
        self.x.ncols()
    }

    /// Covariate matrix, `n x d`.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Outcome vector, length `n`.
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Copy the covariate rows and outcomes at `indices` into a new pair.
    ///
    /// Used by the estimators to materialize training/held-out subsets; the
    /// indices are assumed to come from a valid fold plan over this sample.
    pub fn subset(&self, indices: &[usize]) -> (Array2<f64>, Array1<f64>) {
        let x = self.x.select(ndarray::Axis(0), indices);
        let y = self.y.select(ndarray::Axis(0), indices);
        (x, y)
    }
}

/// `UnivariateSample` — validated 1-D series for density-based functionals.
///
/// Invariants
/// ----------
/// - Non-empty; all entries finite.
#[derive(Debug, Clone, PartialEq)]
pub struct UnivariateSample {
    data: Array1<f64>,
}

impl UnivariateSample {
    /// Construct a validated univariate sample.
    ///
    /// Errors
    /// ------
    /// - `CrossfitError::EmptySample` when `data` is empty.
    /// - `CrossfitError::NonFiniteOutcome` pointing at the first offending
    ///   entry.
    pub fn new(data: Array1<f64>) -> CrossfitResult<Self> {
        validate_series(data.view())?;
        Ok(UnivariateSample { data })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: construction rejects empty samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying series.
    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    /// Copy the values at `indices` into a new array.
    pub fn subset(&self, indices: &[usize]) -> Array1<f64> {
        self.data.select(ndarray::Axis(0), indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossfit::errors::CrossfitError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Happy-path construction and accessor behavior for both containers.
    // - Rejection of empty, mismatched, and non-finite inputs.
    // - Subset extraction by index list.
    //
    // They intentionally DO NOT cover:
    // - Fold-plan interaction; that lives in `crossfit::core::folds` and the
    //   estimator tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Construct a small valid sample and read back its shape and data.
    //
    // Given
    // -----
    // - A 3x2 covariate matrix and length-3 outcome vector.
    //
    // Expect
    // ------
    // - Construction succeeds; `len`, `dim`, `x`, `y` report the inputs.
    fn regression_sample_happy_path() {
        let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let y = array![0.5, 1.5, 2.5];
        let sample = RegressionSample::new(x.clone(), y.clone()).unwrap();

        assert_eq!(sample.len(), 3);
        assert_eq!(sample.dim(), 2);
        assert!(!sample.is_empty());
        assert_eq!(sample.x(), &x);
        assert_eq!(sample.y(), &y);
    }

    #[test]
    // Purpose
    // -------
    // Reject mismatched covariate/outcome lengths at construction.
    //
    // Given
    // -----
    // - A 2-row matrix with a length-3 outcome vector.
    //
    // Expect
    // ------
    // - `CrossfitError::DimensionMismatch { x_rows: 2, y_len: 3 }`.
    fn regression_sample_rejects_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(
            RegressionSample::new(x, y),
            Err(CrossfitError::DimensionMismatch { x_rows: 2, y_len: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Reject non-finite covariates and outcomes with first-offender indices.
    //
    // Given
    // -----
    // - A NaN covariate, then an infinite outcome.
    //
    // Expect
    // ------
    // - `NonFiniteCovariate` at (0, 1), then `NonFiniteOutcome` at index 1.
    fn regression_sample_rejects_nonfinite() {
        let x = array![[1.0, f64::NAN], [0.0, 1.0]];
        let y = array![1.0, 2.0];
        match RegressionSample::new(x, y) {
            Err(CrossfitError::NonFiniteCovariate { row, col, .. }) => {
                assert_eq!((row, col), (0, 1));
            }
            other => panic!("expected NonFiniteCovariate, got {other:?}"),
        }

        let x = array![[1.0], [0.0]];
        let y = array![1.0, f64::NEG_INFINITY];
        match RegressionSample::new(x, y) {
            Err(CrossfitError::NonFiniteOutcome { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected NonFiniteOutcome, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Extract a subset by indices and verify row/outcome pairing survives.
    //
    // Given
    // -----
    // - A 4-observation sample and indices [3, 1].
    //
    // Expect
    // ------
    // - The subset keeps rows and outcomes aligned, in the requested order.
    fn regression_sample_subset_preserves_pairing() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![10.0, 11.0, 12.0, 13.0];
        let sample = RegressionSample::new(x, y).unwrap();

        let (xs, ys) = sample.subset(&[3, 1]);
        assert_eq!(xs, array![[3.0], [1.0]]);
        assert_eq!(ys, array![13.0, 11.0]);
    }

    #[test]
    // Purpose
    // -------
    // Validate the univariate container's construction rules and subsetting.
    //
    // Given
    // -----
    // - An empty series, a NaN-bearing series, and a valid one.
    //
    // Expect
    // ------
    // - Errors for the first two; the valid series round-trips and subsets.
    fn univariate_sample_validation_and_subset() {
        assert_eq!(
            UnivariateSample::new(array![]),
            Err(CrossfitError::EmptySample)
        );
        assert!(UnivariateSample::new(array![0.1, f64::NAN]).is_err());

        let sample = UnivariateSample::new(array![0.1, 0.2, 0.3]).unwrap();
        assert_eq!(sample.len(), 3);
        assert_eq!(sample.subset(&[2, 0]), array![0.3, 0.1]);
    }
}
