//! rust_crossfit — cross-fitted one-step bias correction with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the cross-fitted estimators to Python via the `_rust_crossfit` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing result class and estimator functions used by the
//! `rust_crossfit` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`crossfit`, `nuisance`, and
//!   `simulation`) as the public crate surface.
//! - Define the `#[pyclass]` result wrapper and the `#[pymodule]` initializer
//!   for the `_rust_crossfit` Python extension.
//! - Create and register the `estimators` submodule under `rust_crossfit` so
//!   that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input conversion, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible functions mirror
//!   the invariants and signatures of their Rust counterparts
//!   ([`OneStepEstimate::conditional_mean`],
//!   [`OneStepEstimate::density_functional`]).
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Python-exposed items live under `_rust_crossfit.estimators` and are
//!   typically wrapped by thin pure-Python facades in the top-level
//!   `rust_crossfit` package.
//! - Indexing and statistical conventions follow the documentation of the
//!   underlying Rust modules (`crossfit::core`, `crossfit::estimators`, etc.).
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules and
//!   can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_crossfit` module defined
//!   here and wraps its functions in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the integration suite under `tests/`.
//! - Smoke tests for the PyO3 bindings verify that the estimator functions can
//!   be called and their results inspected from Python.

pub mod crossfit;
pub mod nuisance;
pub mod simulation;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    crossfit::estimators::{FunctionalTransforms, OneStepEstimate},
    utils::{
        build_kde_fitter, build_ols_fitter, build_options, build_regression_sample,
        build_univariate_sample, extract_f64_array,
    },
};

/// OneStep — Python-facing wrapper for a cross-fitted one-step estimate.
///
/// Purpose
/// -------
/// Present the plug-in estimate, the influence-function correction, and the
/// corrected estimate from [`OneStepEstimate`] to Python code in a
/// lightweight, read-only wrapper.
///
/// Key behaviors
/// -------------
/// - Expose `plugin`, `correction`, and `corrected` as scalar properties.
/// - Expose the per-fold plug-in and correction values as Python lists for
///   diagnostics.
///
/// Parameters
/// ----------
/// Instances are constructed internally by the estimator functions in
/// `rust_crossfit.estimators` and are not created directly by user code.
///
/// Fields
/// ------
/// - `inner`: [`OneStepEstimate`]
///   Full per-fold result from the cross-fitted estimation pass.
///
/// Invariants
/// ----------
/// - `inner` always holds one plug-in and one correction value per fold, all
///   finite.
///
/// Performance
/// -----------
/// - Scalar accessors are O(k) in the fold count; list accessors allocate one
///   `Vec<f64>` of length k.
///
/// Notes
/// -----
/// - Rust callers should use [`OneStepEstimate`] directly; this type exists
///   solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_crossfit.estimators")]
pub struct OneStep {
    /// Underlying Rust estimate.
    inner: OneStepEstimate,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl OneStep {
    /// The plug-in estimate: the mean of the per-fold plug-in values.
    #[getter]
    pub fn plugin(&self) -> f64 {
        self.inner.plugin()
    }

    /// The one-step correction: the mean of the per-fold influence terms.
    #[getter]
    pub fn correction(&self) -> f64 {
        self.inner.correction()
    }

    /// The corrected estimate: plug-in plus correction.
    #[getter]
    pub fn corrected(&self) -> f64 {
        self.inner.corrected()
    }

    /// Per-fold plug-in values, in fold order.
    #[getter]
    pub fn psi_folds(&self) -> Vec<f64> {
        self.inner.psi_folds().to_vec()
    }

    /// Per-fold correction values, in fold order.
    #[getter]
    pub fn phi_folds(&self) -> Vec<f64> {
        self.inner.phi_folds().to_vec()
    }

    /// Number of folds the estimate was formed over.
    #[getter]
    pub fn n_folds(&self) -> usize {
        self.inner.n_folds()
    }
}

/// Cross-fitted one-step estimate of a conditional mean at a query point.
///
/// Fits out-of-fold OLS nuisances, evaluates the exact-match influence
/// function on the held-out folds, and returns both the plug-in and the
/// corrected estimate. Covariates must be discrete for the exact-match
/// indicator to be meaningful.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (x, y, query, n_folds = None, seed = None, intercept = None, interactions = None),
    text_signature = "(x, y, query, /, n_folds=2, seed=None, intercept=True, interactions=None)"
)]
pub fn conditional_mean<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, query: &Bound<'py, PyAny>,
    n_folds: Option<usize>, seed: Option<u64>, intercept: Option<bool>,
    interactions: Option<Vec<(usize, usize)>>,
) -> PyResult<OneStep> {
    let sample = build_regression_sample(py, x, y)?;
    let query_arr = extract_f64_array(py, query)?;
    let fitter = build_ols_fitter(intercept, interactions);
    let options = build_options(n_folds, seed);

    let inner =
        OneStepEstimate::conditional_mean(&sample, query_arr.view(), &fitter, &options)?;
    Ok(OneStep { inner })
}

/// Cross-fitted one-step estimate of the Shannon entropy of a density.
///
/// Fits out-of-fold Gaussian KDE nuisances and corrects the plug-in entropy
/// with the smooth-functional influence term.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, n_folds = None, seed = None, bandwidth = None, grid_size = None),
    text_signature = "(data, /, n_folds=2, seed=None, bandwidth=None, grid_size=None)"
)]
pub fn shannon_entropy<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, n_folds: Option<usize>, seed: Option<u64>,
    bandwidth: Option<f64>, grid_size: Option<usize>,
) -> PyResult<OneStep> {
    let sample = build_univariate_sample(py, data)?;
    let fitter = build_kde_fitter(bandwidth, grid_size);
    let options = build_options(n_folds, seed);

    let inner = OneStepEstimate::density_functional(
        &sample,
        &FunctionalTransforms::shannon_entropy(),
        &fitter,
        &options,
    )?;
    Ok(OneStep { inner })
}

/// _rust_crossfit — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_crossfit` Python module and register the `estimators`
/// submodule used by the public `rust_crossfit` package.
///
/// Key behaviors
/// -------------
/// - Create the `estimators` submodule holding the result class and estimator
///   functions.
/// - Attach it to the parent `_rust_crossfit` module.
/// - Register it in `sys.modules` so it is importable via dotted paths from
///   Python.
///
/// Parameters
/// ----------
/// - `_py`: [`Python`]
///   GIL token provided by PyO3 during module initialization.
/// - `m`: `&Bound<PyModule>`
///   Module object representing `_rust_crossfit`.
///
/// Returns
/// -------
/// `PyResult<()>`
///   `Ok(())` on success, or a Python exception if registration fails.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_crossfit<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let estimators_mod = PyModule::new(_py, "estimators")?;
    estimators(_py, m, &estimators_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_crossfit.estimators", estimators_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn estimators<'py>(
    _py: Python, rust_crossfit: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<OneStep>()?;
    m.add_function(wrap_pyfunction!(conditional_mean, m)?)?;
    m.add_function(wrap_pyfunction!(shannon_entropy, m)?)?;
    rust_crossfit.add_submodule(m)?;
    Ok(())
}
