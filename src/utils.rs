#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    crossfit::core::{
        options::CrossfitOptions,
        sample::{RegressionSample, UnivariateSample},
    },
    nuisance::{kde::GaussianKdeFitter, ols::OlsFitter},
};

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray1, PyReadonlyArray2};

/// Pull a 1-D float64 array out of a numpy array, pandas Series, or sequence.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    _py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<Array1<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series_ro.as_array().to_owned());
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(Array1::from(vec))
}

/// Pull a 2-D float64 array out of a numpy array, pandas DataFrame, or nested
/// sequence.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(
    _py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or nested sequence of float64",
        )
    })?;
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err("all covariate rows must have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Build a validated [`RegressionSample`] from Python covariates and outcomes.
#[cfg(feature = "python-bindings")]
pub fn build_regression_sample<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>,
) -> PyResult<RegressionSample> {
    let x_arr = extract_f64_matrix(py, x)?;
    let y_arr = extract_f64_array(py, y)?;
    Ok(RegressionSample::new(x_arr, y_arr)?)
}

/// Build a validated [`UnivariateSample`] from a Python 1-D array.
#[cfg(feature = "python-bindings")]
pub fn build_univariate_sample<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>,
) -> PyResult<UnivariateSample> {
    let arr = extract_f64_array(py, data)?;
    Ok(UnivariateSample::new(arr)?)
}

/// Assemble an [`OlsFitter`] from Python-friendly arguments.
#[cfg(feature = "python-bindings")]
pub fn build_ols_fitter(
    intercept: Option<bool>, interactions: Option<Vec<(usize, usize)>>,
) -> OlsFitter {
    let mut fitter = OlsFitter::new().intercept(intercept.unwrap_or(true));
    for (j, l) in interactions.unwrap_or_default() {
        fitter = fitter.with_interaction(j, l);
    }
    fitter
}

/// Assemble a [`GaussianKdeFitter`] from Python-friendly arguments.
#[cfg(feature = "python-bindings")]
pub fn build_kde_fitter(bandwidth: Option<f64>, grid_size: Option<usize>) -> GaussianKdeFitter {
    let mut fitter = GaussianKdeFitter::new();
    if let Some(h) = bandwidth {
        fitter = fitter.bandwidth(h);
    }
    if let Some(points) = grid_size {
        fitter = fitter.grid_size(points);
    }
    fitter
}

/// Assemble [`CrossfitOptions`] with sensible Python-side defaults.
#[cfg(feature = "python-bindings")]
pub fn build_options(n_folds: Option<usize>, seed: Option<u64>) -> CrossfitOptions {
    use crate::crossfit::core::options::DEFAULT_N_FOLDS;

    CrossfitOptions::new(n_folds.unwrap_or(DEFAULT_N_FOLDS), seed)
}
