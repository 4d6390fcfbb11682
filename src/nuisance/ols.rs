//! Ordinary least squares — the linear regression nuisance estimator.
//!
//! Purpose
//! -------
//! Fit a linear regression of outcomes on a design built from raw covariates
//! (optional intercept column and optional product-interaction columns) by
//! solving the normal equations, and expose the fit as a
//! [`RegressionModel`] for out-of-fold prediction.
//!
//! Key behaviors
//! -------------
//! - [`OlsFitter`] is the configuration object: it records *how* the design
//!   is built, not any fitted state, so one fitter serves every fold.
//! - [`OlsFitter::fit`] validates the training data, assembles the design,
//!   and solves `XᵀX β = Xᵀy` via an `nalgebra` LU decomposition; singular
//!   normal equations surface as [`NuisanceError::SingularDesign`].
//! - [`OlsModel::predict`] rebuilds the same feature layout for a query
//!   vector and returns the inner product with β.
//!
//! Invariants & assumptions
//! ------------------------
//! - The design layout is `[intercept?][raw covariates][interaction products]`
//!   and is identical at fit and predict time; the fitted covariate dimension
//!   is checked on every prediction.
//! - Training needs at least as many rows as design columns; thinner data is
//!   an [`NuisanceError::InsufficientData`] failure, the degenerate-fold
//!   fitting error the cross-fitting layer reports per fold.
//! - Misspecification is expressed through the fitter configuration: omitting
//!   an interaction the data-generating process contains produces the biased
//!   plug-in the one-step correction targets.
//!
//! Conventions
//! -----------
//! - ndarray carries the data; the `n×n` normal-equations solve crosses into
//!   `nalgebra::DMatrix` the same way the crate's other linear algebra does.
//! - No I/O, no logging; all failures are structured `NuisanceError`s.
use crate::nuisance::{
    errors::{NuisanceError, NuisanceResult},
    RegressionFitter, RegressionModel,
};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// `OlsFitter` — design configuration for a least-squares nuisance.
///
/// Purpose
/// -------
/// Describe the regression design: whether an intercept column is prepended
/// and which covariate pairs contribute product-interaction columns. The
/// fitter holds no data; [`fit`](RegressionFitter::fit) returns an
/// [`OlsModel`] carrying the coefficients.
///
/// Fields
/// ------
/// - `intercept`: `bool` — prepend a column of ones.
/// - `interactions`: `Vec<(usize, usize)>` — 0-based covariate index pairs
///   `(j, l)`; each appends a column `x_j · x_l`.
///
/// Notes
/// -----
/// - `OlsFitter::new()` gives the plain main-effects model with intercept —
///   the misspecified nuisance in the crate's interaction scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OlsFitter {
    intercept: bool,
    interactions: Vec<(usize, usize)>,
}

impl OlsFitter {
    /// Main-effects-only design with an intercept.
    pub fn new() -> Self {
        OlsFitter { intercept: true, interactions: Vec::new() }
    }

    /// Toggle the intercept column.
    pub fn intercept(mut self, intercept: bool) -> Self {
        self.intercept = intercept;
        self
    }

    /// Append a product-interaction column `x_j · x_l`.
    pub fn with_interaction(mut self, j: usize, l: usize) -> Self {
        self.interactions.push((j, l));
        self
    }

    /// Number of design columns for covariate dimension `dim`.
    fn n_columns(&self, dim: usize) -> usize {
        usize::from(self.intercept) + dim + self.interactions.len()
    }

    /// Fill one design row from a raw covariate vector.
    fn fill_row(&self, x: ArrayView1<f64>, row: &mut [f64]) {
        fill_design_row(self.intercept, &self.interactions, x, row);
    }

    /// Validate training inputs against this design.
    fn validate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> NuisanceResult<()> {
        if x.nrows() == 0 {
            return Err(NuisanceError::EmptyTrainingSet);
        }
        if x.nrows() != y.len() {
            return Err(NuisanceError::DimensionMismatch { x_rows: x.nrows(), y_len: y.len() });
        }
        for &(j, l) in &self.interactions {
            let worst = j.max(l);
            if worst >= x.ncols() {
                return Err(NuisanceError::InteractionOutOfRange { index: worst, dim: x.ncols() });
            }
        }
        let columns = self.n_columns(x.ncols());
        if x.nrows() < columns {
            return Err(NuisanceError::InsufficientData { rows: x.nrows(), columns });
        }
        Ok(())
    }
}

/// Shared design-row layout: `[intercept?][raw covariates][interactions]`.
fn fill_design_row(
    intercept: bool, interactions: &[(usize, usize)], x: ArrayView1<f64>, row: &mut [f64],
) {
    let mut c = 0;
    if intercept {
        row[c] = 1.0;
        c += 1;
    }
    for &v in x.iter() {
        row[c] = v;
        c += 1;
    }
    for &(j, l) in interactions {
        row[c] = x[j] * x[l];
        c += 1;
    }
}

impl Default for OlsFitter {
    fn default() -> Self {
        OlsFitter::new()
    }
}

impl RegressionFitter for OlsFitter {
    type Model = OlsModel;

    /// Fit by solving the normal equations `XᵀX β = Xᵀy`.
    ///
    /// Errors
    /// ------
    /// - `NuisanceError::EmptyTrainingSet` / `DimensionMismatch` /
    ///   `InteractionOutOfRange` / `InsufficientData` on invalid inputs.
    /// - `NuisanceError::SingularDesign` when `XᵀX` has no LU solve
    ///   (collinear or constant design columns in the training fold).
    fn fit(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> NuisanceResult<OlsModel> {
        self.validate(x, y)?;

        let n = x.nrows();
        let p = self.n_columns(x.ncols());
        let mut design = Array2::<f64>::zeros((n, p));
        for (i, row) in x.rows().into_iter().enumerate() {
            self.fill_row(row, design.row_mut(i).as_slice_mut().expect("row is contiguous"));
        }

        let xtx = design.t().dot(&design);
        let xty = design.t().dot(&y);

        let mut xtx_nalg = DMatrix::<f64>::zeros(p, p);
        for j in 0..p {
            for i in 0..p {
                xtx_nalg[(i, j)] = xtx[[i, j]];
            }
        }
        let xty_nalg = DVector::<f64>::from_iterator(p, xty.iter().copied());

        let beta = xtx_nalg
            .lu()
            .solve(&xty_nalg)
            .ok_or(NuisanceError::SingularDesign { dim: p })?;

        Ok(OlsModel {
            beta: Array1::from_iter(beta.iter().copied()),
            intercept: self.intercept,
            interactions: self.interactions.clone(),
            dim: x.ncols(),
        })
    }
}

/// `OlsModel` — fitted least-squares coefficients plus design layout.
///
/// Invariants
/// ----------
/// - `beta.len() == intercept + dim + interactions.len()`.
/// - `predict` rejects query vectors whose length differs from `dim`.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsModel {
    beta: Array1<f64>,
    intercept: bool,
    interactions: Vec<(usize, usize)>,
    dim: usize,
}

impl OlsModel {
    /// Fitted coefficients in design-column order.
    pub fn beta(&self) -> &Array1<f64> {
        &self.beta
    }

    /// Raw covariate dimension the model was fit on.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl RegressionModel for OlsModel {
    fn predict(&self, x: ArrayView1<f64>) -> NuisanceResult<f64> {
        if x.len() != self.dim {
            return Err(NuisanceError::PredictDimensionMismatch {
                expected: self.dim,
                actual: x.len(),
            });
        }

        let mut features = vec![0.0; self.beta.len()];
        fill_design_row(self.intercept, &self.interactions, x, &mut features);

        let value: f64 = features.iter().zip(self.beta.iter()).map(|(f, b)| f * b).sum();
        if !value.is_finite() {
            return Err(NuisanceError::NonFinitePrediction { value });
        }
        Ok(value)
    }
}
