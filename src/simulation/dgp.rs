//! Synthetic data generation — Bernoulli designs with an interaction term.
//!
//! Purpose
//! -------
//! Generate the replicate data the bias studies run on: i.i.d. Bernoulli(0.5)
//! covariate columns, an outcome that is linear in an intercept, the main
//! effects, and one product-interaction column, plus Gaussian noise. The true
//! regression surface is available in closed form, so simulation studies can
//! measure bias exactly.
//!
//! Key behaviors
//! -------------
//! - [`InteractionDesign`] validates the coefficient layout
//!   `β = (β₀, β₁..β_d, β_int)` and the interaction column pair at
//!   construction.
//! - [`InteractionDesign::generate`] is deterministic given its seed: equal
//!   seeds yield equal covariates, noise, and outcomes.
//! - [`InteractionDesign::truth_at`] evaluates the noiseless surface at a
//!   query point — the ground truth a study compares its estimates against.
//!
//! Invariants & assumptions
//! ------------------------
//! - Covariates are exactly 0.0 or 1.0, which makes the exact-match
//!   indicator in the conditional-mean influence function well defined.
//! - The generated noise vector is returned alongside the sample so studies
//!   can reconstruct the noiseless outcomes if needed.
//!
//! Conventions
//! -----------
//! - Covariate dimension `d = β.len() − 2`; the interaction pair indexes raw
//!   covariate columns, 0-based.
//! - No global RNG state: every draw flows from the seed passed to
//!   [`generate`](InteractionDesign::generate).
use crate::crossfit::core::sample::RegressionSample;
use crate::simulation::errors::{SimError, SimResult};
use ndarray::{Array1, Array2, ArrayView1};
use rand::distributions::Distribution;
use rand::{rngs::StdRng, SeedableRng};
use statrs::distribution::{Bernoulli, Normal};

/// `InteractionDesign` — a Bernoulli-covariate DGP with one interaction.
///
/// Purpose
/// -------
/// Describe the data-generating process
/// `Y = β₀ + Σ_i β_i X_i + β_int · X_j X_l + ε`, `X_i ~ Bernoulli(0.5)`
/// i.i.d., `ε ~ N(0, noise_sd²)`, for repeated replicate generation with a
/// known ground truth.
///
/// Fields
/// ------
/// - `n`: observations per replicate.
/// - `beta`: coefficient vector `(β₀, β₁..β_d, β_int)`, length `d + 2`.
/// - `interaction`: 0-based covariate column pair `(j, l)`, `j != l`.
/// - `noise_sd`: Gaussian noise scale; 0 yields a noiseless design.
///
/// Invariants
/// ----------
/// - `beta.len() >= 4` (intercept, two mains, interaction), all finite.
/// - `j != l` and both below `d = beta.len() − 2`.
/// - `noise_sd` finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionDesign {
    n: usize,
    beta: Array1<f64>,
    interaction: (usize, usize),
    noise_sd: f64,
}

impl InteractionDesign {
    /// Construct a validated design.
    ///
    /// Errors
    /// ------
    /// - `SimError::InvalidSampleSize` when `n == 0`.
    /// - `SimError::InvalidCoefficientCount` when `beta.len() < 4`.
    /// - `SimError::NonFiniteCoefficient` pointing at the first offending
    ///   coefficient.
    /// - `SimError::InvalidInteractionPair` when the pair repeats a column
    ///   or exceeds the covariate dimension.
    /// - `SimError::InvalidNoiseSd` when `noise_sd` is negative or
    ///   non-finite.
    pub fn new(
        n: usize, beta: Array1<f64>, interaction: (usize, usize), noise_sd: f64,
    ) -> SimResult<Self> {
        if n == 0 {
            return Err(SimError::InvalidSampleSize { n });
        }
        if beta.len() < 4 {
            return Err(SimError::InvalidCoefficientCount { len: beta.len() });
        }
        for (index, &value) in beta.indexed_iter() {
            if !value.is_finite() {
                return Err(SimError::NonFiniteCoefficient { index, value });
            }
        }
        let dim = beta.len() - 2;
        let (j, l) = interaction;
        if j == l || j >= dim || l >= dim {
            return Err(SimError::InvalidInteractionPair { j, l, dim });
        }
        if !noise_sd.is_finite() || noise_sd < 0.0 {
            return Err(SimError::InvalidNoiseSd { value: noise_sd });
        }
        Ok(InteractionDesign { n, beta, interaction, noise_sd })
    }

    /// The benchmark scenario used throughout the crate's studies:
    /// `n` observations, four binary covariates,
    /// `β = (3.3, 0.6, 0.5, 0.9, 0.6, 1.0)` with interaction `X₂·X₃`
    /// (0-based columns 1 and 2), unit noise.
    pub fn benchmark(n: usize) -> SimResult<Self> {
        InteractionDesign::new(
            n,
            Array1::from_vec(vec![3.3, 0.6, 0.5, 0.9, 0.6, 1.0]),
            (1, 2),
            1.0,
        )
    }

    /// Covariate dimension `d`.
    pub fn dim(&self) -> usize {
        self.beta.len() - 2
    }

    /// Observations per replicate.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The interaction column pair `(j, l)`.
    pub fn interaction(&self) -> (usize, usize) {
        self.interaction
    }

    /// Noiseless regression surface at `query`.
    ///
    /// Errors
    /// ------
    /// - `SimError::QueryDimensionMismatch` when `query.len() != d`.
    pub fn truth_at(&self, query: ArrayView1<f64>) -> SimResult<f64> {
        let dim = self.dim();
        if query.len() != dim {
            return Err(SimError::QueryDimensionMismatch { expected: dim, actual: query.len() });
        }
        let (j, l) = self.interaction;
        let mut value = self.beta[0];
        for i in 0..dim {
            value += self.beta[i + 1] * query[i];
        }
        value += self.beta[dim + 1] * query[j] * query[l];
        Ok(value)
    }

    /// Generate one replicate. Deterministic given `seed`.
    ///
    /// Errors
    /// ------
    /// - `SimError::Anyhow` if a distribution constructor rejects its
    ///   parameters (cannot happen for a validated design).
    /// - `SimError::Crossfit` if the generated arrays fail sample
    ///   validation (likewise unreachable for finite coefficients/noise).
    pub fn generate(&self, seed: u64) -> SimResult<SimulatedSample> {
        let mut rng = StdRng::seed_from_u64(seed);
        let dim = self.dim();
        let (j, l) = self.interaction;

        let bernoulli =
            Bernoulli::new(0.5).map_err(|e| SimError::Anyhow(e.to_string()))?;
        let mut x = Array2::<f64>::zeros((self.n, dim));
        for mut row in x.rows_mut() {
            for v in row.iter_mut() {
                *v = bernoulli.sample(&mut rng);
            }
        }

        let noise = if self.noise_sd > 0.0 {
            let normal = Normal::new(0.0, self.noise_sd)
                .map_err(|e| SimError::Anyhow(e.to_string()))?;
            Array1::from_shape_fn(self.n, |_| normal.sample(&mut rng))
        } else {
            Array1::zeros(self.n)
        };

        let mut y = Array1::<f64>::zeros(self.n);
        for i in 0..self.n {
            let row = x.row(i);
            let mut value = self.beta[0];
            for c in 0..dim {
                value += self.beta[c + 1] * row[c];
            }
            value += self.beta[dim + 1] * row[j] * row[l];
            y[i] = value + noise[i];
        }

        let sample = RegressionSample::new(x, y)?;
        Ok(SimulatedSample { sample, noise })
    }
}

/// One generated replicate: the validated sample plus the noise draws that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedSample {
    pub sample: RegressionSample,
    pub noise: Array1<f64>,
}
