//! Unified error handling for the simulation layer.
//!
//! This module defines `SimError`, the central error type used by the
//! synthetic data generator and the replicate driver. It groups together
//! design-configuration failures, study-level failures, and wrapped
//! cross-fitting errors. An alias `SimResult<T>` standardizes the return
//! type across simulation code.
use crate::crossfit::errors::CrossfitError;

/// Unified error type for simulation designs and bias studies.
///
/// Covers malformed design configuration (sample size, coefficient layout,
/// noise scale), study-level degeneracies (no replicates, no successes), and
/// passthrough of cross-fitting errors raised while generating or evaluating
/// a replicate. Integrates with `anyhow::Error` via `From`.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    // ---- Design validation ----
    /// Sample size must be strictly positive.
    InvalidSampleSize { n: usize },

    /// Coefficient vector must hold an intercept, at least two main effects,
    /// and one interaction coefficient.
    InvalidCoefficientCount { len: usize },

    /// Interaction indices must name two distinct covariate columns.
    InvalidInteractionPair { j: usize, l: usize, dim: usize },

    /// Noise standard deviation must be finite and non-negative.
    InvalidNoiseSd { value: f64 },

    /// A coefficient is NaN or infinite.
    NonFiniteCoefficient { index: usize, value: f64 },

    // ---- Study configuration ----
    /// A study needs at least one replicate.
    NoReplicates,

    /// Every replicate of a study failed; no aggregate can be formed.
    AllReplicatesFailed { attempted: usize },

    /// Query vector length does not match the design's covariate dimension.
    QueryDimensionMismatch { expected: usize, actual: usize },

    // ---- Crossfit passthrough ----
    /// A replicate's estimation failed.
    Crossfit(CrossfitError),

    // ---- Anyhow catchall ----
    Anyhow(String),

    // ---- Fallback ----
    UnknownError,
}

pub type SimResult<T> = Result<T, SimError>;

impl From<CrossfitError> for SimError {
    fn from(err: CrossfitError) -> Self {
        SimError::Crossfit(err)
    }
}

impl From<anyhow::Error> for SimError {
    fn from(err: anyhow::Error) -> Self {
        SimError::Anyhow(err.to_string())
    }
}

impl std::error::Error for SimError {}

/// Convert a [`SimError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<SimError> for pyo3::PyErr {
    fn from(err: SimError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Design validation ----
            SimError::InvalidSampleSize { n } => {
                write!(f, "Simulation Error: Sample size must be > 0; got: {n}")
            }
            SimError::InvalidCoefficientCount { len } => {
                write!(
                    f,
                    "Simulation Error: Coefficient vector needs intercept + >= 2 main effects \
                     + interaction; got length {len}"
                )
            }
            SimError::InvalidInteractionPair { j, l, dim } => {
                write!(
                    f,
                    "Simulation Error: Interaction pair ({j}, {l}) must name two distinct \
                     columns below dimension {dim}"
                )
            }
            SimError::InvalidNoiseSd { value } => {
                write!(f, "Simulation Error: Noise SD must be finite and >= 0; got: {value}")
            }
            SimError::NonFiniteCoefficient { index, value } => {
                write!(f, "Simulation Error: Coefficient at index {index} is non-finite: {value}")
            }

            // ---- Study configuration ----
            SimError::NoReplicates => {
                write!(f, "Simulation Error: A study needs at least one replicate")
            }
            SimError::AllReplicatesFailed { attempted } => {
                write!(f, "Simulation Error: All {attempted} replicates failed")
            }
            SimError::QueryDimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Simulation Error: Query has {actual} coordinates but the design has {expected}"
                )
            }

            // ---- Crossfit passthrough ----
            SimError::Crossfit(err) => write!(f, "Simulation Error: {err}"),

            // ---- Anyhow catchall ----
            SimError::Anyhow(msg) => write!(f, "Simulation Error: {msg}"),

            // ---- Fallback ----
            SimError::UnknownError => write!(f, "Simulation Error: Unknown error occurred"),
        }
    }
}
