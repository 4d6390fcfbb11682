//! Empirical probability mass function over discrete covariate vectors.
//!
//! Purpose
//! -------
//! Tabulate the empirical frequency of each distinct covariate vector in a
//! training set. The conditional-mean influence function weights held-out
//! residuals by `1 / P(x*)`, where `P(x*)` is exactly this table's frequency
//! at the query point.
//!
//! Key behaviors
//! -------------
//! - [`EmpiricalPmf::from_rows`] counts distinct rows of a covariate matrix
//!   and normalizes by the row count.
//! - [`EmpiricalPmf::frequency`] looks a vector up and returns `None` when it
//!   was never observed, so callers can surface the unobserved-support
//!   condition as a descriptive error instead of dividing by zero or hitting
//!   an index fault.
//!
//! Invariants & assumptions
//! ------------------------
//! - Frequencies over all distinct vectors sum to 1 (within floating-point
//!   tolerance of the division).
//! - Rows are matched **exactly**, by the bit patterns of their `f64`
//!   coordinates. This is only meaningful for covariates drawn from a
//!   discrete (or pre-discretized) distribution — e.g. the Bernoulli designs
//!   this crate simulates — where equal values are bit-identical by
//!   construction. Continuous covariates must be binned before building a
//!   table.
//!
//! Conventions
//! -----------
//! - The table owns nothing from the source matrix; keys are copied out.
//! - No I/O and no logging; failures surface through `Option` at lookup and
//!   are promoted to structured errors by the estimators.
use ndarray::{ArrayView1, ArrayView2};
use std::collections::HashMap;

/// Bit-pattern key for one covariate vector. `to_bits` keeps the map total
/// over NaN-free inputs; samples are validated finite upstream.
fn row_key(row: ArrayView1<f64>) -> Vec<u64> {
    row.iter().map(|v| v.to_bits()).collect()
}

/// `EmpiricalPmf` — frequency table of distinct covariate vectors.
///
/// Invariants
/// ----------
/// - Built from at least one row; `n_rows >= 1`.
/// - Stored frequencies are `count / n_rows` and sum to 1 over the support.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalPmf {
    table: HashMap<Vec<u64>, f64>,
    n_rows: usize,
}

impl EmpiricalPmf {
    /// Tabulate the empirical PMF of the rows of `x`.
    ///
    /// The caller guarantees `x` is non-empty and finite (both enforced by
    /// the sample containers); an empty matrix yields an empty table whose
    /// lookups all return `None`.
    pub fn from_rows(x: ArrayView2<f64>) -> Self {
        let n_rows = x.nrows();
        let mut counts: HashMap<Vec<u64>, usize> = HashMap::new();
        for row in x.rows() {
            *counts.entry(row_key(row)).or_insert(0) += 1;
        }

        let denom = n_rows.max(1) as f64;
        let table = counts.into_iter().map(|(key, c)| (key, c as f64 / denom)).collect();
        EmpiricalPmf { table, n_rows }
    }

    /// Empirical frequency of `x`, or `None` when `x` never occurs in the
    /// tabulated rows (the "unobserved support point" condition).
    pub fn frequency(&self, x: ArrayView1<f64>) -> Option<f64> {
        self.table.get(&row_key(x)).copied()
    }

    /// Number of distinct covariate vectors in the support.
    pub fn support_size(&self) -> usize {
        self.table.len()
    }

    /// Number of rows the table was built from.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Sum of all stored frequencies. Equals 1 up to floating-point error;
    /// exposed for invariant checks.
    pub fn total_mass(&self) -> f64 {
        self.table.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Frequency counting over repeated discrete rows.
    // - The sum-to-one invariant.
    // - `None` for unobserved vectors.
    //
    // They intentionally DO NOT cover:
    // - Promotion of the `None` case to `UnobservedQueryPoint`; that is the
    //   conditional-mean estimator's job.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Count repeated binary rows and normalize by the row count.
    //
    // Given
    // -----
    // - Four rows: (1,0) twice, (0,1) once, (1,1) once.
    //
    // Expect
    // ------
    // - Frequencies 0.5, 0.25, 0.25 respectively; support size 3.
    fn counts_and_normalizes_distinct_rows() {
        let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
        let pmf = EmpiricalPmf::from_rows(x.view());

        assert_eq!(pmf.support_size(), 3);
        assert_eq!(pmf.n_rows(), 4);
        assert_relative_eq!(pmf.frequency(array![1.0, 0.0].view()).unwrap(), 0.5);
        assert_relative_eq!(pmf.frequency(array![0.0, 1.0].view()).unwrap(), 0.25);
        assert_relative_eq!(pmf.frequency(array![1.0, 1.0].view()).unwrap(), 0.25);
    }

    #[test]
    // Purpose
    // -------
    // Check the frequencies-sum-to-one invariant on a larger table.
    //
    // Given
    // -----
    // - 9 rows over 4 distinct binary vectors.
    //
    // Expect
    // ------
    // - `total_mass()` equals 1 within 1e-9.
    fn frequencies_sum_to_one() {
        let x = array![
            [0.0, 0.0],
            [0.0, 1.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
            [0.0, 1.0],
            [1.0, 0.0],
            [0.0, 0.0],
            [1.0, 1.0]
        ];
        let pmf = EmpiricalPmf::from_rows(x.view());
        assert_relative_eq!(pmf.total_mass(), 1.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Return `None` for a vector outside the observed support.
    //
    // Given
    // -----
    // - A table over rows (0,0) and (1,1), queried at (1,0).
    //
    // Expect
    // ------
    // - `frequency` is `None`; no panic, no zero division.
    fn unobserved_vector_returns_none() {
        let x = array![[0.0, 0.0], [1.0, 1.0]];
        let pmf = EmpiricalPmf::from_rows(x.view());
        assert_eq!(pmf.frequency(array![1.0, 0.0].view()), None);
    }
}
