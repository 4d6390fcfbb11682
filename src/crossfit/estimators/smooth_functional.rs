//! Cross-fitted one-step estimation of smooth density functionals.
//!
//! Purpose
//! -------
//! Estimate functionals of the form `Ψ(p) = φ(∫ ν(p))` of a 1-D density —
//! Shannon entropy being the canonical instance — by plugging in a density
//! nuisance fit and correcting with the functional's empirical influence
//! function:
//!
//! ```text
//! φ_i = φ'(∫ ν(p̂)) · ( mean_heldout ν'(p̂(x̃))  −  ∫ p̂ · ν'(p̂) )
//! ```
//!
//! where `p̂` is the density fit on fold `i`'s training data and the
//! integrals run over `p̂`'s support grid (trapezoid rule).
//!
//! Key behaviors
//! -------------
//! - [`FunctionalTransforms`] carries the outer transform `φ`, the inner
//!   transform `ν`, and their derivatives as plain function pointers chosen
//!   at configuration time; [`FunctionalTransforms::shannon_entropy`] is the
//!   built-in configuration.
//! - [`OneStepEstimate::density_functional`] runs the shared cross-fitting
//!   skeleton: out-of-fold density fits, grid quadrature for the plug-in,
//!   held-out averaging for the correction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Densities evaluated on the grid and at held-out points are floored at
//!   `f64::MIN_POSITIVE` before entering the transforms, so log-based `ν`
//!   stay finite where kernel tails underflow to zero.
//! - All per-fold values are checked finite before aggregation.
use crate::crossfit::{
    core::{folds::FoldPlan, options::CrossfitOptions, sample::UnivariateSample},
    errors::{CrossfitError, CrossfitResult},
    estimators::OneStepEstimate,
};
use crate::nuisance::{DensityFitter, DensityModel};
use ndarray::{Array1, ArrayView1};

/// `FunctionalTransforms` — configuration of a smooth density functional
/// `Ψ(p) = φ(∫ ν(p))`.
///
/// Fields
/// ------
/// - `outer`: `φ`, applied to the inner integral for the plug-in value.
/// - `outer_deriv`: `φ'`, evaluated at the inner integral in the correction.
/// - `inner`: `ν`, applied pointwise to the density under the integral.
/// - `inner_deriv`: `ν'`, evaluated at density values in both correction
///   terms.
///
/// Notes
/// -----
/// - Plain `fn` pointers keep the configuration `Copy` and trivially
///   comparable; closures with captured state have no place in a functional
///   definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionalTransforms {
    pub outer: fn(f64) -> f64,
    pub outer_deriv: fn(f64) -> f64,
    pub inner: fn(f64) -> f64,
    pub inner_deriv: fn(f64) -> f64,
}

impl FunctionalTransforms {
    /// Shannon entropy: `ν(p) = −p·ln p` (0 at p = 0), `φ = identity`.
    pub fn shannon_entropy() -> Self {
        FunctionalTransforms {
            outer: identity,
            outer_deriv: one,
            inner: neg_p_ln_p,
            inner_deriv: neg_ln_p_minus_one,
        }
    }
}

fn identity(t: f64) -> f64 {
    t
}

fn one(_t: f64) -> f64 {
    1.0
}

fn neg_p_ln_p(p: f64) -> f64 {
    if p > 0.0 { -p * p.ln() } else { 0.0 }
}

fn neg_ln_p_minus_one(p: f64) -> f64 {
    -p.ln() - 1.0
}

impl OneStepEstimate {
    /// Cross-fitted one-step estimate of `Ψ(p) = φ(∫ ν(p))` for a 1-D
    /// density `p`.
    ///
    /// Parameters
    /// ----------
    /// - `sample`: validated univariate observations from the density.
    /// - `transforms`: the functional's outer/inner transforms and their
    ///   derivatives.
    /// - `fitter`: density-nuisance fitting procedure, refit per fold.
    /// - `options`: fold count and shuffle seed.
    ///
    /// Returns
    /// -------
    /// `CrossfitResult<OneStepEstimate>` with per-fold plug-in values
    /// `ψ_i = φ(∫ ν(p̂_i))` and corrections
    /// `φ_i = φ'(∫ν(p̂_i)) · (mean ν'(p̂_i(x̃)) − ∫ p̂_i ν'(p̂_i))`.
    ///
    /// Errors
    /// ------
    /// - `CrossfitError::InvalidFoldCount` when `options.n_folds` violates
    ///   `2 <= k <= n`.
    /// - `CrossfitError::Nuisance` when a fold's density fit fails (e.g.
    ///   constant training data under the rule-of-thumb bandwidth).
    /// - `CrossfitError::NonFiniteFoldValue` when a fold aggregate comes out
    ///   NaN or infinite.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use ndarray::Array1;
    /// use rust_crossfit::crossfit::core::{options::CrossfitOptions, sample::UnivariateSample};
    /// use rust_crossfit::crossfit::estimators::{FunctionalTransforms, OneStepEstimate};
    /// use rust_crossfit::nuisance::GaussianKdeFitter;
    ///
    /// // A spread-out deterministic series; entropy of its KDE is finite.
    /// let data = Array1::from_shape_fn(64, |i| (i as f64 * 0.37).sin() * 2.0);
    /// let sample = UnivariateSample::new(data).unwrap();
    ///
    /// let estimate = OneStepEstimate::density_functional(
    ///     &sample,
    ///     &FunctionalTransforms::shannon_entropy(),
    ///     &GaussianKdeFitter::new(),
    ///     &CrossfitOptions::new(2, Some(5)),
    /// )
    /// .unwrap();
    ///
    /// assert!(estimate.plugin().is_finite());
    /// assert!(estimate.corrected().is_finite());
    /// ```
    pub fn density_functional<F: DensityFitter>(
        sample: &UnivariateSample, transforms: &FunctionalTransforms, fitter: &F,
        options: &CrossfitOptions,
    ) -> CrossfitResult<Self> {
        let plan = FoldPlan::new(sample.len(), options.n_folds, options.resolve_seed())?;

        let k = plan.n_folds();
        let mut psi_folds = Array1::<f64>::zeros(k);
        let mut phi_folds = Array1::<f64>::zeros(k);

        for i in 0..k {
            let train = sample.subset(&plan.complement(i));
            let model = fitter.fit(train.view())?;

            let grid = model.support_grid();
            let density: Vec<f64> = grid.iter().map(|&g| floor_density(model.pdf(g))).collect();

            let inner_integral =
                trapezoid(grid.view(), density.iter().map(|&p| (transforms.inner)(p)));
            let psi = (transforms.outer)(inner_integral);
            if !psi.is_finite() {
                return Err(CrossfitError::NonFiniteFoldValue { fold: i, value: psi });
            }

            let centering =
                trapezoid(grid.view(), density.iter().map(|&p| p * (transforms.inner_deriv)(p)));

            let held_out = plan.fold(i);
            if held_out.is_empty() {
                return Err(CrossfitError::EmptyFold { fold: i });
            }
            let held_mean = held_out
                .iter()
                .map(|&idx| (transforms.inner_deriv)(floor_density(model.pdf(sample.data()[idx]))))
                .sum::<f64>()
                / held_out.len() as f64;

            let phi = (transforms.outer_deriv)(inner_integral) * (held_mean - centering);
            if !phi.is_finite() {
                return Err(CrossfitError::NonFiniteFoldValue { fold: i, value: phi });
            }

            psi_folds[i] = psi;
            phi_folds[i] = phi;
        }

        Ok(OneStepEstimate::from_folds(psi_folds, phi_folds))
    }
}

/// Keep log-based transforms finite where kernel tails underflow.
fn floor_density(p: f64) -> f64 {
    p.max(f64::MIN_POSITIVE)
}

/// Trapezoid rule over an ascending grid and pointwise values.
fn trapezoid(grid: ArrayView1<f64>, values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    let mut acc = 0.0;
    for i in 1..grid.len() {
        acc += 0.5 * (values[i] + values[i - 1]) * (grid[i] - grid[i - 1]);
    }
    acc
}
