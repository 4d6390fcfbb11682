//! Unified error handling for nuisance estimators.
//!
//! This module defines `NuisanceError`, the central error type used by the
//! regression and density nuisance estimators. It groups together
//! domain-specific failures (degenerate training data, singular designs,
//! invalid bandwidths) with catch-all and fallback variants. An alias
//! `NuisanceResult<T>` standardizes the return type across nuisance code.

/// Unified error type for nuisance-estimator fitting and prediction.
///
/// Covers degenerate training sets, linear-algebra failures during the
/// least-squares solve, kernel-density configuration problems, and generic
/// passthrough errors. Designed to integrate seamlessly with `anyhow::Error`
/// via `From`, and to provide readable diagnostics through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum NuisanceError {
    // ---- Training-data validation ----
    /// Training set contains no observations.
    EmptyTrainingSet,

    /// Covariate rows and outcome length disagree.
    DimensionMismatch { x_rows: usize, y_len: usize },

    /// Fewer training rows than design columns; the fit is underdetermined.
    InsufficientData { rows: usize, columns: usize },

    /// A training value is NaN or infinite.
    NonFiniteTrainingValue { index: usize, value: f64 },

    // ---- Least-squares solve ----
    /// Normal-equations matrix is singular (collinear or constant columns).
    SingularDesign { dim: usize },

    /// Interaction column index is out of range for the covariate dimension.
    InteractionOutOfRange { index: usize, dim: usize },

    // ---- Prediction ----
    /// Query vector length does not match the fitted covariate dimension.
    PredictDimensionMismatch { expected: usize, actual: usize },

    /// A prediction came out NaN or infinite.
    NonFinitePrediction { value: f64 },

    // ---- Kernel density ----
    /// Bandwidth must be finite and strictly positive.
    InvalidBandwidth { value: f64 },

    /// Support grid needs at least two points for quadrature.
    InvalidGridSize { value: usize },

    // ---- Anyhow catchall ----
    Anyhow(String),

    // ---- Fallback ----
    UnknownError,
}

pub type NuisanceResult<T> = Result<T, NuisanceError>;

impl From<anyhow::Error> for NuisanceError {
    fn from(err: anyhow::Error) -> Self {
        NuisanceError::Anyhow(err.to_string())
    }
}

impl std::error::Error for NuisanceError {}

impl std::fmt::Display for NuisanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Training-data validation ----
            NuisanceError::EmptyTrainingSet => {
                write!(f, "Nuisance Error: Training set is empty")
            }
            NuisanceError::DimensionMismatch { x_rows, y_len } => {
                write!(
                    f,
                    "Nuisance Error: Covariate rows ({x_rows}) and outcome length ({y_len}) disagree"
                )
            }
            NuisanceError::InsufficientData { rows, columns } => {
                write!(
                    f,
                    "Nuisance Error: {rows} training rows cannot identify {columns} design columns"
                )
            }
            NuisanceError::NonFiniteTrainingValue { index, value } => {
                write!(f, "Nuisance Error: Training value at index {index} is non-finite: {value}")
            }

            // ---- Least-squares solve ----
            NuisanceError::SingularDesign { dim } => {
                write!(f, "Nuisance Error: Normal-equations matrix ({dim}x{dim}) is singular")
            }
            NuisanceError::InteractionOutOfRange { index, dim } => {
                write!(
                    f,
                    "Nuisance Error: Interaction column {index} out of range for dimension {dim}"
                )
            }

            // ---- Prediction ----
            NuisanceError::PredictDimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Nuisance Error: Query has {actual} coordinates but the model expects {expected}"
                )
            }
            NuisanceError::NonFinitePrediction { value } => {
                write!(f, "Nuisance Error: Prediction is non-finite: {value}")
            }

            // ---- Kernel density ----
            NuisanceError::InvalidBandwidth { value } => {
                write!(f, "Nuisance Error: Bandwidth must be finite and > 0; got: {value}")
            }
            NuisanceError::InvalidGridSize { value } => {
                write!(f, "Nuisance Error: Support grid needs at least 2 points; got: {value}")
            }

            // ---- Anyhow catchall ----
            NuisanceError::Anyhow(msg) => write!(f, "Nuisance Error: {msg}"),

            // ---- Fallback ----
            NuisanceError::UnknownError => write!(f, "Nuisance Error: Unknown error occurred"),
        }
    }
}
