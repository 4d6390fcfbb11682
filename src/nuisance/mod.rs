//! nuisance — pluggable regression and density estimators for cross-fitting.
//!
//! Purpose
//! -------
//! Define the capability seams between the cross-fitting machinery and
//! whatever model estimates the nuisance function, plus the two concrete
//! estimators this crate ships: ordinary least squares for regression
//! functionals and a 1-D Gaussian kernel density estimate for density-based
//! functionals.
//!
//! Key behaviors
//! -------------
//! - [`RegressionFitter`] / [`RegressionModel`] abstract `fit(X, y) → model`
//!   and `model.predict(x) → ŷ` for conditional-functional targets.
//! - [`DensityFitter`] / [`DensityModel`] abstract `fit(x) → model` and
//!   `model.pdf(x) → p̂(x)` plus a support grid for quadrature.
//! - Concrete variants are selected at configuration time by choosing a
//!   fitter value; there is no runtime type inspection anywhere in the stack.
//!
//! Invariants & assumptions
//! ------------------------
//! - Fitters are stateless configuration objects; all fitted state lives in
//!   the returned model, so one fitter can be reused across folds and
//!   replicates without cross-contamination.
//! - Models are fit on training folds only and evaluated on held-out folds
//!   and query points; the traits make no assumption about which indices a
//!   caller passed in.
//! - All failures surface as [`NuisanceError`](errors::NuisanceError); none
//!   of the provided implementations panic on invalid user input.
//!
//! Downstream usage
//! ----------------
//! - The one-step estimators in [`crate::crossfit::estimators`] are generic
//!   over these traits; any conforming estimator is substitutable (the
//!   source material also demonstrates random forests — a conforming
//!   implementation would slot in here unchanged).
use ndarray::{Array1, ArrayView1, ArrayView2};

pub mod errors;
pub mod kde;
pub mod ols;

pub use errors::{NuisanceError, NuisanceResult};
pub use kde::{GaussianKde, GaussianKdeFitter};
pub use ols::{OlsFitter, OlsModel};

/// A fitted regression nuisance: covariate vector → predicted outcome.
pub trait RegressionModel {
    /// Predict the outcome at a single covariate vector.
    ///
    /// Errors
    /// ------
    /// - `NuisanceError::PredictDimensionMismatch` when `x` has the wrong
    ///   length for the fitted model.
    /// - `NuisanceError::NonFinitePrediction` when the prediction is NaN or
    ///   infinite.
    fn predict(&self, x: ArrayView1<f64>) -> NuisanceResult<f64>;
}

/// A regression-nuisance fitting procedure: `fit(X, y) → model`.
pub trait RegressionFitter {
    type Model: RegressionModel;

    /// Fit a nuisance model on training data.
    ///
    /// Errors
    /// ------
    /// - Any `NuisanceError` describing degenerate or insufficient training
    ///   data, or a failed solve.
    fn fit(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> NuisanceResult<Self::Model>;
}

/// A fitted 1-D density nuisance.
pub trait DensityModel {
    /// Estimated density at `x`. Strictly positive for the Gaussian KDE.
    fn pdf(&self, x: f64) -> f64;

    /// Evenly spaced grid covering (numerically) all of the density's mass,
    /// suitable for trapezoid quadrature of smooth functionals.
    fn support_grid(&self) -> Array1<f64>;
}

/// A density-nuisance fitting procedure: `fit(x) → model`.
pub trait DensityFitter {
    type Model: DensityModel;

    /// Fit a density model on a training series.
    ///
    /// Errors
    /// ------
    /// - Any `NuisanceError` describing degenerate training data or an
    ///   invalid bandwidth/grid configuration.
    fn fit(&self, x: ArrayView1<f64>) -> NuisanceResult<Self::Model>;
}
