//! Unified error handling for the cross-fitting stack.
//!
//! This module defines `CrossfitError`, the central error type used by fold
//! planning, empirical-frequency tables, and the one-step estimators. It
//! groups together input/data validation failures, split-configuration
//! failures, estimation-time failures (unobserved query support, non-finite
//! fold aggregates), wrapped nuisance errors, and catch-all variants. An
//! alias `CrossfitResult<T>` standardizes the return type across the stack.
use crate::nuisance::errors::NuisanceError;

/// Unified error type for cross-fitted one-step estimation.
///
/// Covers sample validation, fold-plan configuration, empirical-support
/// lookups, and per-fold estimation failures. Nuisance-fit failures are
/// carried inside [`CrossfitError::Nuisance`] so callers see one uniform
/// error surface. Integrates with `anyhow::Error` via `From` and provides
/// readable diagnostics through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossfitError {
    // ---- Input/data validation ----
    /// Sample contains no observations.
    EmptySample,

    /// A covariate entry is NaN or infinite.
    NonFiniteCovariate { row: usize, col: usize, value: f64 },

    /// An outcome entry is NaN or infinite.
    NonFiniteOutcome { index: usize, value: f64 },

    /// Covariate rows and outcome length disagree.
    DimensionMismatch { x_rows: usize, y_len: usize },

    /// Query vector length does not match the sample's covariate dimension.
    QueryDimensionMismatch { expected: usize, actual: usize },

    /// A query coordinate is NaN or infinite.
    NonFiniteQuery { index: usize, value: f64 },

    // ---- Split configuration ----
    /// Fold count must satisfy 2 <= k <= n.
    InvalidFoldCount { k: usize, n: usize },

    /// A fold ended up with no held-out observations.
    EmptyFold { fold: usize },

    // ---- Estimation ----
    /// The query vector never appears in a training fold's empirical support,
    /// so the influence-function weight 1/P(x*) is undefined.
    UnobservedQueryPoint { fold: usize },

    /// A per-fold plug-in or correction value came out NaN or infinite.
    NonFiniteFoldValue { fold: usize, value: f64 },

    // ---- Nuisance passthrough ----
    /// Nuisance estimator failed to fit or predict.
    Nuisance(NuisanceError),

    // ---- Anyhow catchall ----
    Anyhow(String),

    // ---- Fallback ----
    UnknownError,
}

pub type CrossfitResult<T> = Result<T, CrossfitError>;

impl From<NuisanceError> for CrossfitError {
    fn from(err: NuisanceError) -> Self {
        CrossfitError::Nuisance(err)
    }
}

impl From<anyhow::Error> for CrossfitError {
    fn from(err: anyhow::Error) -> Self {
        CrossfitError::Anyhow(err.to_string())
    }
}

impl std::error::Error for CrossfitError {}

/// Convert a [`CrossfitError`] into a Python `ValueError` with the error
/// message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<CrossfitError> for pyo3::PyErr {
    fn from(err: CrossfitError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

impl std::fmt::Display for CrossfitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            CrossfitError::EmptySample => {
                write!(f, "Crossfit Error: Sample is empty")
            }
            CrossfitError::NonFiniteCovariate { row, col, value } => {
                write!(
                    f,
                    "Crossfit Error: Covariate at row {row}, column {col} is non-finite: {value}"
                )
            }
            CrossfitError::NonFiniteOutcome { index, value } => {
                write!(f, "Crossfit Error: Outcome at index {index} is non-finite: {value}")
            }
            CrossfitError::DimensionMismatch { x_rows, y_len } => {
                write!(
                    f,
                    "Crossfit Error: Covariate rows ({x_rows}) and outcome length ({y_len}) disagree"
                )
            }
            CrossfitError::QueryDimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Crossfit Error: Query has {actual} coordinates but the sample has {expected}"
                )
            }
            CrossfitError::NonFiniteQuery { index, value } => {
                write!(f, "Crossfit Error: Query coordinate {index} is non-finite: {value}")
            }

            // ---- Split configuration ----
            CrossfitError::InvalidFoldCount { k, n } => {
                write!(f, "Crossfit Error: Fold count must satisfy 2 <= k <= n; got k = {k}, n = {n}")
            }
            CrossfitError::EmptyFold { fold } => {
                write!(f, "Crossfit Error: Fold {fold} holds no observations")
            }

            // ---- Estimation ----
            CrossfitError::UnobservedQueryPoint { fold } => {
                write!(
                    f,
                    "Crossfit Error: Query point is unobserved in the training support of fold {fold}; \
                     the empirical frequency P(x*) is undefined"
                )
            }
            CrossfitError::NonFiniteFoldValue { fold, value } => {
                write!(f, "Crossfit Error: Fold {fold} produced a non-finite value: {value}")
            }

            // ---- Nuisance passthrough ----
            CrossfitError::Nuisance(err) => write!(f, "Crossfit Error: {err}"),

            // ---- Anyhow catchall ----
            CrossfitError::Anyhow(msg) => write!(f, "Crossfit Error: {msg}"),

            // ---- Fallback ----
            CrossfitError::UnknownError => write!(f, "Crossfit Error: Unknown error occurred"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display formatting of the estimation-specific variants.
    // - `From<NuisanceError>` and `From<anyhow::Error>` conversions.
    //
    // They intentionally DO NOT cover:
    // - The code paths that raise these errors; those are exercised where the
    //   fold plan, PMF, and estimators are tested.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the unobserved-query error names the offending fold.
    //
    // Given
    // -----
    // - `UnobservedQueryPoint { fold: 3 }`.
    //
    // Expect
    // ------
    // - The message mentions fold 3 and the undefined frequency.
    fn unobserved_query_display_names_fold() {
        let err = CrossfitError::UnobservedQueryPoint { fold: 3 };
        let msg = err.to_string();
        assert!(msg.contains("fold 3"));
        assert!(msg.contains("P(x*)"));
    }

    #[test]
    // Purpose
    // -------
    // Ensure nuisance errors wrap losslessly via `From`.
    //
    // Given
    // -----
    // - A `NuisanceError::EmptyTrainingSet`.
    //
    // Expect
    // ------
    // - Conversion yields `CrossfitError::Nuisance` holding the same variant,
    //   and its Display output nests the nuisance message.
    fn nuisance_error_wraps_via_from() {
        let err: CrossfitError = NuisanceError::EmptyTrainingSet.into();
        assert_eq!(err, CrossfitError::Nuisance(NuisanceError::EmptyTrainingSet));
        assert!(err.to_string().contains("Training set is empty"));
    }

    #[test]
    // Purpose
    // -------
    // Ensure anyhow errors convert into the `Anyhow` catchall variant.
    //
    // Given
    // -----
    // - An `anyhow::Error` with a custom message.
    //
    // Expect
    // ------
    // - Conversion produces `CrossfitError::Anyhow` carrying that message.
    fn anyhow_converts_to_catchall() {
        let err: CrossfitError = anyhow::anyhow!("split failed").into();
        assert_eq!(err, CrossfitError::Anyhow("split failed".to_string()));
    }
}
