//! Bias studies — repeated-replicate evaluation of the one-step correction.
//!
//! Purpose
//! -------
//! Drive the crate's central experiment: generate many independent replicates
//! from a known design, run the cross-fitted conditional-mean estimator on
//! each, and summarize how plug-in and corrected estimates compare against
//! the closed-form ground truth (bias, variance, failure counts).
//!
//! Key behaviors
//! -------------
//! - [`BiasStudy::run`] executes `R` replicates sequentially; replicate `r`
//!   derives its seed as `base_seed + r`, so the whole study is reproducible
//!   and each replicate's data and fold split are independent.
//! - A failed replicate aborts only its own contribution: its error message
//!   is recorded in the summary and the aggregates are formed over the
//!   successful replicates. Only a study with zero successes errors.
//! - [`StudySummary`] is a plain value object; formatting and printing stay
//!   with the caller.
//!
//! Invariants & assumptions
//! ------------------------
//! - Replicates are independent deterministic computations; there is no
//!   shared mutable state across them beyond the result accumulators.
//! - Aggregation is a sequential mean/variance over replicate order; any
//!   future parallelization must preserve these reduction semantics.
use crate::crossfit::core::options::CrossfitOptions;
use crate::crossfit::estimators::OneStepEstimate;
use crate::nuisance::RegressionFitter;
use crate::simulation::{
    dgp::InteractionDesign,
    errors::{SimError, SimResult},
};
use ndarray::Array1;

/// `BiasStudy` — configuration for a repeated-replicate bias experiment.
///
/// Fields
/// ------
/// - `design`: the data-generating process, with its closed-form truth.
/// - `query`: the covariate vector `x*` the conditional mean targets.
/// - `replicates`: number of independent replicates `R >= 1`.
/// - `base_seed`: replicate `r` runs with seed `base_seed + r`.
/// - `n_folds`: fold count forwarded to the estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasStudy {
    design: InteractionDesign,
    query: Array1<f64>,
    replicates: usize,
    base_seed: u64,
    n_folds: usize,
}

impl BiasStudy {
    /// Construct a validated study.
    ///
    /// Errors
    /// ------
    /// - `SimError::NoReplicates` when `replicates == 0`.
    /// - `SimError::QueryDimensionMismatch` when the query does not match
    ///   the design's covariate dimension.
    pub fn new(
        design: InteractionDesign, query: Array1<f64>, replicates: usize, base_seed: u64,
        n_folds: usize,
    ) -> SimResult<Self> {
        if replicates == 0 {
            return Err(SimError::NoReplicates);
        }
        if query.len() != design.dim() {
            return Err(SimError::QueryDimensionMismatch {
                expected: design.dim(),
                actual: query.len(),
            });
        }
        Ok(BiasStudy { design, query, replicates, base_seed, n_folds })
    }

    /// Run the study with the given nuisance fitter.
    ///
    /// Returns
    /// -------
    /// `SimResult<StudySummary>` aggregating the successful replicates.
    ///
    /// Errors
    /// ------
    /// - `SimError::QueryDimensionMismatch` via the design's truth lookup
    ///   (unreachable after `new`'s validation).
    /// - `SimError::AllReplicatesFailed` when no replicate produced an
    ///   estimate.
    ///
    /// Notes
    /// -----
    /// - Estimation failures inside a replicate (degenerate folds,
    ///   unobserved query point) are demoted to recorded messages; data
    ///   generation shares the replicate seed, so a retry would reproduce
    ///   the same failure.
    pub fn run<F: RegressionFitter>(&self, fitter: &F) -> SimResult<StudySummary> {
        let truth = self.design.truth_at(self.query.view())?;

        let mut plugins = Vec::with_capacity(self.replicates);
        let mut correcteds = Vec::with_capacity(self.replicates);
        let mut failures = Vec::new();

        for r in 0..self.replicates {
            let seed = self.base_seed.wrapping_add(r as u64);
            match self.run_replicate(seed, fitter) {
                Ok(estimate) => {
                    plugins.push(estimate.plugin());
                    correcteds.push(estimate.corrected());
                }
                Err(err) => failures.push(format!("replicate {r} (seed {seed}): {err}")),
            }
        }

        if plugins.is_empty() {
            return Err(SimError::AllReplicatesFailed { attempted: self.replicates });
        }
        Ok(StudySummary::from_replicates(truth, plugins, correcteds, failures))
    }

    /// One replicate: generate, estimate, return both scalars.
    fn run_replicate<F: RegressionFitter>(
        &self, seed: u64, fitter: &F,
    ) -> SimResult<OneStepEstimate> {
        let replicate = self.design.generate(seed)?;
        let options = CrossfitOptions::new(self.n_folds, Some(seed));
        let estimate = OneStepEstimate::conditional_mean(
            &replicate.sample,
            self.query.view(),
            fitter,
            &options,
        )?;
        Ok(estimate)
    }
}

/// `StudySummary` — aggregate results of a bias study.
///
/// Purpose
/// -------
/// Hold everything a report needs: the ground truth, the mean and variance
/// of plug-in and corrected estimates across successful replicates, relative
/// biases, and the recorded failures.
///
/// Invariants
/// ----------
/// - Built from at least one successful replicate.
/// - Variances are sample variances (n − 1 denominator) and are NaN when
///   only one replicate succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySummary {
    truth: f64,
    plugins: Array1<f64>,
    correcteds: Array1<f64>,
    failures: Vec<String>,
}

impl StudySummary {
    fn from_replicates(
        truth: f64, plugins: Vec<f64>, correcteds: Vec<f64>, failures: Vec<String>,
    ) -> Self {
        StudySummary {
            truth,
            plugins: Array1::from_vec(plugins),
            correcteds: Array1::from_vec(correcteds),
            failures,
        }
    }

    /// Closed-form ground truth of the target functional.
    pub fn truth(&self) -> f64 {
        self.truth
    }

    /// Number of successful replicates.
    pub fn n_ok(&self) -> usize {
        self.plugins.len()
    }

    /// Number of failed replicates.
    pub fn n_failed(&self) -> usize {
        self.failures.len()
    }

    /// Recorded failure messages, one per failed replicate.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Per-replicate plug-in estimates.
    pub fn plugins(&self) -> &Array1<f64> {
        &self.plugins
    }

    /// Per-replicate corrected estimates.
    pub fn correcteds(&self) -> &Array1<f64> {
        &self.correcteds
    }

    /// Mean plug-in estimate across successful replicates.
    pub fn mean_plugin(&self) -> f64 {
        self.plugins.sum() / self.plugins.len() as f64
    }

    /// Mean corrected estimate across successful replicates.
    pub fn mean_corrected(&self) -> f64 {
        self.correcteds.sum() / self.correcteds.len() as f64
    }

    /// Sample variance of the plug-in estimates (NaN for one replicate).
    pub fn var_plugin(&self) -> f64 {
        sample_variance(&self.plugins)
    }

    /// Sample variance of the corrected estimates (NaN for one replicate).
    pub fn var_corrected(&self) -> f64 {
        sample_variance(&self.correcteds)
    }

    /// Mean plug-in relative bias, in percent of the truth.
    pub fn rel_bias_plugin_pct(&self) -> f64 {
        100.0 * (self.mean_plugin() - self.truth) / self.truth
    }

    /// Mean corrected relative bias, in percent of the truth.
    pub fn rel_bias_corrected_pct(&self) -> f64 {
        100.0 * (self.mean_corrected() - self.truth) / self.truth
    }
}

/// Sample variance with an n − 1 denominator; NaN below two observations.
fn sample_variance(values: &Array1<f64>) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = values.sum() / n as f64;
    values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nuisance::OlsFitter;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Study construction validation.
    // - Reproducibility of a full study under equal configuration.
    // - Summary arithmetic on hand-built replicate values.
    // - Failure isolation: a design too small to fit still reports rather
    //   than corrupting aggregates.
    //
    // They intentionally DO NOT cover:
    // - The bias-reduction comparison between misspecified and
    //   well-specified nuisances; that is the integration suite's headline
    //   test.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Reject zero replicates and mismatched query dimensions.
    //
    // Given
    // -----
    // - The benchmark design with 0 replicates, then with a length-2 query.
    //
    // Expect
    // ------
    // - `NoReplicates`, then `QueryDimensionMismatch { expected: 4, .. }`.
    fn construction_rejects_bad_configuration() {
        let design = InteractionDesign::benchmark(100).unwrap();

        assert_eq!(
            BiasStudy::new(design.clone(), array![1.0, 0.0, 1.0, 0.0], 0, 0, 2),
            Err(SimError::NoReplicates)
        );
        assert_eq!(
            BiasStudy::new(design, array![1.0, 0.0], 5, 0, 2),
            Err(SimError::QueryDimensionMismatch { expected: 4, actual: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // The same study configuration reproduces its summary exactly.
    //
    // Given
    // -----
    // - Two runs of a 4-replicate study on the benchmark design.
    //
    // Expect
    // ------
    // - Identical replicate vectors and aggregates; no failures; truth 4.8.
    fn study_is_reproducible() {
        let design = InteractionDesign::benchmark(400).unwrap();
        let study =
            BiasStudy::new(design, array![1.0, 0.0, 1.0, 0.0], 4, 17, 2).unwrap();
        let fitter = OlsFitter::new();

        let a = study.run(&fitter).unwrap();
        let b = study.run(&fitter).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.n_ok(), 4);
        assert_eq!(a.n_failed(), 0);
        assert_relative_eq!(a.truth(), 4.8, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify summary arithmetic on hand-built values.
    //
    // Given
    // -----
    // - truth = 4.0, plug-ins (4.2, 3.8), corrected (4.1, 3.9), one failure.
    //
    // Expect
    // ------
    // - Means 4.0, symmetric variances, zero relative bias, counts (2, 1).
    fn summary_arithmetic_is_exact() {
        let summary = StudySummary::from_replicates(
            4.0,
            vec![4.2, 3.8],
            vec![4.1, 3.9],
            vec!["replicate 2 (seed 19): boom".to_string()],
        );

        assert_relative_eq!(summary.mean_plugin(), 4.0);
        assert_relative_eq!(summary.mean_corrected(), 4.0);
        assert_relative_eq!(summary.var_plugin(), 0.08, epsilon = 1e-12);
        assert_relative_eq!(summary.var_corrected(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(summary.rel_bias_plugin_pct(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(summary.rel_bias_corrected_pct(), 0.0, epsilon = 1e-12);
        assert_eq!(summary.n_ok(), 2);
        assert_eq!(summary.n_failed(), 1);
        assert!(summary.failures()[0].contains("seed 19"));
    }

    #[test]
    // Purpose
    // -------
    // A study whose every replicate fails errors instead of producing an
    // empty aggregate.
    //
    // Given
    // -----
    // - A 4-observation design: 2-fold training sets have 2 rows against a
    //   5-column OLS design, so every fit fails.
    //
    // Expect
    // ------
    // - `SimError::AllReplicatesFailed { attempted: 3 }`.
    fn all_failures_error_out() {
        let design = InteractionDesign::benchmark(4).unwrap();
        let study =
            BiasStudy::new(design, array![1.0, 0.0, 1.0, 0.0], 3, 0, 2).unwrap();

        assert_eq!(
            study.run(&OlsFitter::new()).unwrap_err(),
            SimError::AllReplicatesFailed { attempted: 3 }
        );
    }
}
