//! Cross-fitting validation helpers — reusable checks for samples, folds, and queries.
//!
//! Purpose
//! -------
//! Centralize small, reusable validation routines used across the cross-fitting
//! stack. These helpers enforce basic sanity checks for covariate matrices,
//! outcome vectors, fold configuration, and query points, so higher-level
//! constructors and estimators can fail fast with structured errors.
//!
//! Key behaviors
//! -------------
//! - Validate covariate matrices and outcome vectors for finiteness and
//!   matching dimensions.
//! - Validate fold counts against the sample size (`2 <= k <= n`).
//! - Validate query vectors against a sample's covariate dimension.
//!
//! Conventions
//! -----------
//! - Indices are 0-based and follow the usual Rust/ndarray conventions.
//! - Validation functions return [`CrossfitResult`] and never panic on invalid
//!   inputs; panics are reserved for programming errors elsewhere.
//! - This module contains no I/O and no logging; it only inspects numeric
//!   values and array lengths.
use crate::crossfit::errors::{CrossfitError, CrossfitResult};
use ndarray::{ArrayView1, ArrayView2};

/// Validate a covariate matrix: non-empty with all entries finite.
///
/// Returns
/// -------
/// `CrossfitResult<()>`
///   - `Ok(())` when `x` has at least one row and every entry is finite.
///   - `Err(CrossfitError::EmptySample)` when `x` has no rows.
///   - `Err(CrossfitError::NonFiniteCovariate)` pointing at the first
///     offending entry otherwise.
pub fn validate_covariates(x: ArrayView2<f64>) -> CrossfitResult<()> {
    if x.nrows() == 0 {
        return Err(CrossfitError::EmptySample);
    }
    for ((row, col), &value) in x.indexed_iter() {
        if !value.is_finite() {
            return Err(CrossfitError::NonFiniteCovariate { row, col, value });
        }
    }
    Ok(())
}

/// Validate an outcome vector against its covariate matrix.
///
/// Returns
/// -------
/// `CrossfitResult<()>`
///   - `Ok(())` when `y.len() == x_rows` and every outcome is finite.
///   - `Err(CrossfitError::DimensionMismatch)` on a length disagreement.
///   - `Err(CrossfitError::NonFiniteOutcome)` pointing at the first
///     offending entry otherwise.
pub fn validate_outcomes(y: ArrayView1<f64>, x_rows: usize) -> CrossfitResult<()> {
    if y.len() != x_rows {
        return Err(CrossfitError::DimensionMismatch { x_rows, y_len: y.len() });
    }
    for (index, &value) in y.indexed_iter() {
        if !value.is_finite() {
            return Err(CrossfitError::NonFiniteOutcome { index, value });
        }
    }
    Ok(())
}

/// Validate a univariate series: non-empty with all entries finite.
pub fn validate_series(x: ArrayView1<f64>) -> CrossfitResult<()> {
    if x.is_empty() {
        return Err(CrossfitError::EmptySample);
    }
    for (index, &value) in x.indexed_iter() {
        if !value.is_finite() {
            return Err(CrossfitError::NonFiniteOutcome { index, value });
        }
    }
    Ok(())
}

/// Validate a fold count against the sample size.
///
/// The cross-fitting scheme needs at least two folds (one to train on, one to
/// hold out) and cannot spread `n` observations over more than `n` folds.
pub fn validate_fold_count(k: usize, n: usize) -> CrossfitResult<()> {
    if k < 2 || k > n {
        return Err(CrossfitError::InvalidFoldCount { k, n });
    }
    Ok(())
}

/// Validate a query vector against the sample's covariate dimension.
///
/// Returns
/// -------
/// `CrossfitResult<()>`
///   - `Ok(())` when `query.len() == dim` and every coordinate is finite.
///   - `Err(CrossfitError::QueryDimensionMismatch)` on a length disagreement.
///   - `Err(CrossfitError::NonFiniteQuery)` pointing at the first offending
///     coordinate otherwise.
pub fn validate_query(query: ArrayView1<f64>, dim: usize) -> CrossfitResult<()> {
    if query.len() != dim {
        return Err(CrossfitError::QueryDimensionMismatch { expected: dim, actual: query.len() });
    }
    for (index, &value) in query.indexed_iter() {
        if !value.is_finite() {
            return Err(CrossfitError::NonFiniteQuery { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Happy paths and first-offender reporting for covariate, outcome,
    //   series, and query validation.
    // - Boundary behavior of `validate_fold_count` (k = 1, k = 2, k = n,
    //   k = n + 1).
    //
    // They intentionally DO NOT cover:
    // - Higher-level constructors (`RegressionSample`, `FoldPlan`) that call
    //   these helpers; they have their own tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Accept a small finite covariate matrix.
    //
    // Given
    // -----
    // - A 2x2 matrix of finite values.
    //
    // Expect
    // ------
    // - `validate_covariates` returns `Ok(())`.
    fn covariates_accept_finite_matrix() {
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        assert!(validate_covariates(x.view()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Reject an empty covariate matrix and report the first non-finite entry.
    //
    // Given
    // -----
    // - A 0-row matrix, then a matrix with a NaN at (1, 0).
    //
    // Expect
    // ------
    // - `EmptySample`, then `NonFiniteCovariate { row: 1, col: 0, .. }`.
    fn covariates_reject_empty_and_nonfinite() {
        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(validate_covariates(empty.view()), Err(CrossfitError::EmptySample));

        let x = array![[1.0, 2.0], [f64::NAN, 3.0]];
        match validate_covariates(x.view()) {
            Err(CrossfitError::NonFiniteCovariate { row, col, .. }) => {
                assert_eq!((row, col), (1, 0));
            }
            other => panic!("expected NonFiniteCovariate, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Reject outcome vectors that disagree with the covariate row count or
    // contain non-finite entries.
    //
    // Given
    // -----
    // - A length-2 outcome checked against 3 rows, then an infinite outcome.
    //
    // Expect
    // ------
    // - `DimensionMismatch { x_rows: 3, y_len: 2 }`, then
    //   `NonFiniteOutcome { index: 1, .. }`.
    fn outcomes_reject_mismatch_and_nonfinite() {
        let y = array![1.0, 2.0];
        assert_eq!(
            validate_outcomes(y.view(), 3),
            Err(CrossfitError::DimensionMismatch { x_rows: 3, y_len: 2 })
        );

        let y = array![1.0, f64::INFINITY];
        match validate_outcomes(y.view(), 2) {
            Err(CrossfitError::NonFiniteOutcome { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected NonFiniteOutcome, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Enforce the fold-count bounds 2 <= k <= n at both edges.
    //
    // Given
    // -----
    // - n = 5 with k in {1, 2, 5, 6}.
    //
    // Expect
    // ------
    // - k = 1 and k = 6 error; k = 2 and k = 5 pass.
    fn fold_count_bounds_are_inclusive() {
        assert!(validate_fold_count(1, 5).is_err());
        assert!(validate_fold_count(2, 5).is_ok());
        assert!(validate_fold_count(5, 5).is_ok());
        assert!(validate_fold_count(6, 5).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Check query validation against a fixed covariate dimension.
    //
    // Given
    // -----
    // - A length-2 query against dim = 3, then a NaN coordinate against
    //   dim = 2.
    //
    // Expect
    // ------
    // - `QueryDimensionMismatch`, then `NonFiniteQuery { index: 0, .. }`.
    fn query_rejects_mismatch_and_nonfinite() {
        let q = array![1.0, 0.0];
        assert_eq!(
            validate_query(q.view(), 3),
            Err(CrossfitError::QueryDimensionMismatch { expected: 3, actual: 2 })
        );

        let q = array![f64::NAN, 0.0];
        match validate_query(q.view(), 2) {
            Err(CrossfitError::NonFiniteQuery { index, .. }) => assert_eq!(index, 0),
            other => panic!("expected NonFiniteQuery, got {other:?}"),
        }
    }
}
