//! Cross-fitted one-step estimation of a conditional mean `E[Y | X = x*]`.
//!
//! Purpose
//! -------
//! Estimate the regression function at a fixed query point with a plug-in
//! nuisance fit, then correct its bias with the empirical influence function
//! for this functional:
//!
//! ```text
//! φ(x̃, ỹ) = 1[x̃ = x*] / P̂(x*) · (ỹ − m̂(x̃))
//! ```
//!
//! where `m̂` is the nuisance fit on the training folds and `P̂(x*)` is the
//! query point's empirical frequency among the training-fold covariates.
//! Cross-fitting keeps `m̂` and the observations scoring it disjoint, so the
//! correction does not inherit overfitting bias.
//!
//! Invariants & assumptions
//! ------------------------
//! - The indicator matches covariate vectors **exactly** (by bit pattern);
//!   this is only meaningful for discrete or pre-discretized covariates, as
//!   documented on [`EmpiricalPmf`].
//! - `P̂(x*)` is resolved once per fold, before any held-out observation is
//!   scored; a query vector absent from a training fold's support fails the
//!   whole estimate with [`CrossfitError::UnobservedQueryPoint`] rather than
//!   skipping, imputing, or dividing by zero.
//!
//! Edge cases
//! ----------
//! - A held-out fold with no observation matching `x*` contributes `φ_i = 0`;
//!   that is a legitimate zero correction, not an error.
//! - Nuisance-fit failures on a degenerate training fold propagate as
//!   [`CrossfitError::Nuisance`] with the underlying fitting error.
use crate::crossfit::{
    core::{
        folds::FoldPlan, options::CrossfitOptions, pmf::EmpiricalPmf, sample::RegressionSample,
        validation::validate_query,
    },
    errors::{CrossfitError, CrossfitResult},
    estimators::OneStepEstimate,
};
use crate::nuisance::{RegressionFitter, RegressionModel};
use ndarray::{Array1, ArrayView1};

impl OneStepEstimate {
    /// Cross-fitted one-step estimate of `E[Y | X = x*]`.
    ///
    /// Parameters
    /// ----------
    /// - `sample`: validated covariate/outcome data for one replicate.
    /// - `query`: the covariate vector `x*`; must match the sample's
    ///   dimension and be finite.
    /// - `fitter`: nuisance-fitting procedure, refit from scratch on each
    ///   fold's training data.
    /// - `options`: fold count and shuffle seed.
    ///
    /// Returns
    /// -------
    /// `CrossfitResult<OneStepEstimate>`
    ///   Both the plug-in `Ψ̂ = mean_i m̂_i(x*)` and the corrected
    ///   `Ψ̂_upd = Ψ̂ + mean_i φ_i`, with the per-fold components retained.
    ///
    /// Errors
    /// ------
    /// - `CrossfitError::QueryDimensionMismatch` / `NonFiniteQuery` on a bad
    ///   query vector.
    /// - `CrossfitError::InvalidFoldCount` when `options.n_folds` violates
    ///   `2 <= k <= n`.
    /// - `CrossfitError::UnobservedQueryPoint { fold }` when `x*` never
    ///   occurs among a training fold's covariates.
    /// - `CrossfitError::Nuisance` when a fold's nuisance fit or a
    ///   prediction fails.
    /// - `CrossfitError::NonFiniteFoldValue` when a fold aggregate comes out
    ///   NaN or infinite.
    ///
    /// Notes
    /// -----
    /// - With `options.seed` pinned, repeated calls return identical
    ///   estimates; the nuisance estimators in this crate are deterministic
    ///   given their inputs.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use ndarray::array;
    /// use rust_crossfit::crossfit::core::{options::CrossfitOptions, sample::RegressionSample};
    /// use rust_crossfit::crossfit::estimators::OneStepEstimate;
    /// use rust_crossfit::nuisance::OlsFitter;
    ///
    /// // 32 alternating binary covariates with y close to x.
    /// let x = ndarray::Array2::from_shape_fn((32, 1), |(i, _)| (i % 2) as f64);
    /// let y = ndarray::Array1::from_shape_fn(32, |i| (i % 2) as f64 + 0.01 * (i as f64));
    /// let sample = RegressionSample::new(x, y).unwrap();
    ///
    /// let estimate = OneStepEstimate::conditional_mean(
    ///     &sample,
    ///     array![1.0].view(),
    ///     &OlsFitter::new(),
    ///     &CrossfitOptions::new(2, Some(7)),
    /// )
    /// .unwrap();
    ///
    /// assert!(estimate.plugin().is_finite());
    /// assert!(estimate.corrected().is_finite());
    /// ```
    pub fn conditional_mean<F: RegressionFitter>(
        sample: &RegressionSample, query: ArrayView1<f64>, fitter: &F, options: &CrossfitOptions,
    ) -> CrossfitResult<Self> {
        validate_query(query, sample.dim())?;
        let plan = FoldPlan::new(sample.len(), options.n_folds, options.resolve_seed())?;

        let k = plan.n_folds();
        let mut psi_folds = Array1::<f64>::zeros(k);
        let mut phi_folds = Array1::<f64>::zeros(k);

        for i in 0..k {
            let train = plan.complement(i);
            let (x_train, y_train) = sample.subset(&train);
            let model = fitter.fit(x_train.view(), y_train.view())?;

            let psi = model.predict(query)?;
            if !psi.is_finite() {
                return Err(CrossfitError::NonFiniteFoldValue { fold: i, value: psi });
            }

            let pmf = EmpiricalPmf::from_rows(x_train.view());
            let p_star = pmf
                .frequency(query)
                .ok_or(CrossfitError::UnobservedQueryPoint { fold: i })?;

            let phi = fold_correction(sample, plan.fold(i), &model, query, p_star, i)?;
            if !phi.is_finite() {
                return Err(CrossfitError::NonFiniteFoldValue { fold: i, value: phi });
            }

            psi_folds[i] = psi;
            phi_folds[i] = phi;
        }

        Ok(OneStepEstimate::from_folds(psi_folds, phi_folds))
    }
}

/// Mean influence-function value over one held-out fold.
fn fold_correction<M: RegressionModel>(
    sample: &RegressionSample, held_out: &[usize], model: &M, query: ArrayView1<f64>, p_star: f64,
    fold: usize,
) -> CrossfitResult<f64> {
    if held_out.is_empty() {
        return Err(CrossfitError::EmptyFold { fold });
    }

    let mut sum = 0.0;
    for &idx in held_out {
        let row = sample.x().row(idx);
        if !rows_match(row, query) {
            continue;
        }
        let residual = sample.y()[idx] - model.predict(row)?;
        sum += residual / p_star;
    }
    Ok(sum / held_out.len() as f64)
}

/// Exact (bit-pattern) equality of two covariate vectors; valid for the
/// discrete designs this estimator is documented for.
fn rows_match(a: ArrayView1<f64>, b: ArrayView1<f64>) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits())
}
