//! Integration tests for cross-fitted one-step estimation.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from a synthetic Bernoulli design,
//!   through fold planning and out-of-fold nuisance fitting, to plug-in and
//!   one-step-corrected estimates and replicate-level bias summaries.
//! - Exercise realistic regimes (misspecified vs well-specified nuisances,
//!   several fold counts, moderate sample sizes) rather than toy edge cases
//!   only.
//!
//! Coverage
//! --------
//! - `simulation::dgp` and `simulation::study`:
//!   - `InteractionDesign::benchmark` generation and `BiasStudy` aggregation.
//! - `crossfit::estimators`:
//!   - The conditional-mean one-step under a misspecified OLS nuisance
//!     (headline bias-reduction property) and under the well-specified
//!     nuisance (correction stays small).
//!   - The smooth-density-functional one-step on Gaussian data via the
//!     Shannon-entropy transforms.
//! - `nuisance::ols` and `nuisance::kde`:
//!   - Fitting inside the cross-fitting loop, including interaction columns
//!     and Silverman bandwidth selection.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (fold balance,
//!   PMF lookups, validation routines) — these are covered by unit tests.
//! - Python bindings — those are expected to be tested at a higher
//!   integration or system level.
//! - Exhaustive stress testing over extreme sample sizes and replicate
//!   grids — those belong in targeted performance and property tests.
use approx::assert_relative_eq;
use ndarray::{Array1, array};
use rand::{SeedableRng, rngs::StdRng};
use rust_crossfit::{
    crossfit::{
        core::{options::CrossfitOptions, sample::UnivariateSample},
        estimators::{FunctionalTransforms, OneStepEstimate},
    },
    nuisance::{kde::GaussianKdeFitter, ols::OlsFitter},
    simulation::{dgp::InteractionDesign, study::BiasStudy},
};
use statrs::distribution::Normal;

/// Purpose
/// -------
/// Draw a reproducible standard-normal series for the entropy pipeline.
///
/// Parameters
/// ----------
/// - `n`: Length of the series; must be `> 0`.
/// - `seed`: RNG seed; equal seeds reproduce the series exactly.
///
/// Returns
/// -------
/// - A validated `UnivariateSample` of `n` i.i.d. N(0, 1) draws.
fn standard_normal_sample(n: usize, seed: u64) -> UnivariateSample {
    use rand::distributions::Distribution;

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).expect("standard normal");
    let data = Array1::from_iter((0..n).map(|_| normal.sample(&mut rng)));
    UnivariateSample::new(data).expect("finite draws form a valid sample")
}

#[test]
// Purpose
// -------
// Headline property: under a misspecified OLS nuisance (interaction column
// omitted), the one-step correction moves the estimate toward the truth.
//
// Given
// -----
// - The benchmark design (truth 4.8 at query (1, 0, 1, 0)), N = 5000,
//   6 replicates, 2 folds, fixed base seed.
// - An OLS fitter with intercept and main effects only.
//
// Expect
// ------
// - The plug-in estimate carries the omitted-variable bias (the projection
//   of the interaction onto the main effects adds about +0.25 here).
// - The corrected estimate sits within 0.2 of the truth and strictly closer
//   than the plug-in, in relative-bias terms.
fn correction_reduces_omitted_interaction_bias() {
    let design = InteractionDesign::benchmark(5000).expect("benchmark design is valid");
    let study = BiasStudy::new(design, array![1.0, 0.0, 1.0, 0.0], 6, 11, 2)
        .expect("study configuration is valid");

    let summary = study.run(&OlsFitter::new()).expect("replicates succeed at N = 5000");

    assert_eq!(summary.n_ok(), 6);
    assert_eq!(summary.n_failed(), 0);
    assert!(
        summary.mean_plugin() - summary.truth() > 0.1,
        "plug-in should inherit the omitted-variable bias, got mean {}",
        summary.mean_plugin()
    );
    assert!(
        (summary.mean_corrected() - summary.truth()).abs() < 0.2,
        "corrected mean {} should sit near the truth {}",
        summary.mean_corrected(),
        summary.truth()
    );
    assert!(
        summary.rel_bias_corrected_pct().abs() < summary.rel_bias_plugin_pct().abs(),
        "correction should shrink relative bias: plug-in {}%, corrected {}%",
        summary.rel_bias_plugin_pct(),
        summary.rel_bias_corrected_pct()
    );
}

#[test]
// Purpose
// -------
// Under the well-specified nuisance (interaction column included), the
// plug-in is already consistent and the correction stays small.
//
// Given
// -----
// - One benchmark replicate at N = 5000, 2 folds, fixed seed.
// - An OLS fitter with the (1, 2) interaction column.
//
// Expect
// ------
// - Plug-in within 0.2 of the truth; correction magnitude below 0.2; the
//   corrected estimate stays within 0.2 of the truth.
fn well_specified_nuisance_needs_no_material_correction() {
    let design = InteractionDesign::benchmark(5000).expect("benchmark design is valid");
    let replicate = design.generate(29).expect("generation succeeds");
    let fitter = OlsFitter::new().with_interaction(1, 2);
    let options = CrossfitOptions::new(2, Some(29));

    let estimate = OneStepEstimate::conditional_mean(
        &replicate.sample,
        array![1.0, 0.0, 1.0, 0.0].view(),
        &fitter,
        &options,
    )
    .expect("estimation succeeds");

    assert!((estimate.plugin() - 4.8).abs() < 0.2, "plug-in {}", estimate.plugin());
    assert!(estimate.correction().abs() < 0.2, "correction {}", estimate.correction());
    assert!((estimate.corrected() - 4.8).abs() < 0.2, "corrected {}", estimate.corrected());
}

#[test]
// Purpose
// -------
// The pipeline is a pure function of its seed: equal configurations
// reproduce estimates exactly, across fold counts.
//
// Given
// -----
// - One benchmark replicate at N = 1000, estimated twice with seed 7 at
//   k = 2 and twice at k = 5.
//
// Expect
// ------
// - Bitwise-equal estimates within each fold count; fold counts recorded
//   on the result match the configuration.
fn pipeline_is_reproducible_across_fold_counts() {
    let design = InteractionDesign::benchmark(1000).expect("benchmark design is valid");
    let replicate = design.generate(7).expect("generation succeeds");
    let fitter = OlsFitter::new().with_interaction(1, 2);
    let query = array![1.0, 0.0, 1.0, 0.0];

    for k in [2_usize, 5] {
        let options = CrossfitOptions::new(k, Some(7));
        let first =
            OneStepEstimate::conditional_mean(&replicate.sample, query.view(), &fitter, &options)
                .expect("estimation succeeds");
        let second =
            OneStepEstimate::conditional_mean(&replicate.sample, query.view(), &fitter, &options)
                .expect("estimation succeeds");

        assert_eq!(first, second);
        assert_eq!(first.n_folds(), k);
    }
}

#[test]
// Purpose
// -------
// End-to-end smooth-functional pipeline: cross-fitted KDE entropy of a
// standard normal lands near the closed form 0.5 * ln(2 * pi * e).
//
// Given
// -----
// - 600 N(0, 1) draws, Silverman bandwidth, 2 folds, fixed seed.
//
// Expect
// ------
// - Corrected entropy within 0.2 of 1.41894; per-fold values all finite;
//   a second run reproduces the estimate exactly.
fn kde_entropy_pipeline_matches_closed_form() {
    let sample = standard_normal_sample(600, 41);
    let fitter = GaussianKdeFitter::new();
    let options = CrossfitOptions::new(2, Some(41));
    let truth = 0.5 * (2.0 * std::f64::consts::PI * std::f64::consts::E).ln();

    let estimate = OneStepEstimate::density_functional(
        &sample,
        &FunctionalTransforms::shannon_entropy(),
        &fitter,
        &options,
    )
    .expect("estimation succeeds");

    assert!(
        (estimate.corrected() - truth).abs() < 0.2,
        "corrected entropy {} should sit near {}",
        estimate.corrected(),
        truth
    );
    assert!(estimate.psi_folds().iter().all(|v| v.is_finite()));
    assert!(estimate.phi_folds().iter().all(|v| v.is_finite()));

    let again = OneStepEstimate::density_functional(
        &sample,
        &FunctionalTransforms::shannon_entropy(),
        &fitter,
        &options,
    )
    .expect("estimation succeeds");
    assert_relative_eq!(estimate.corrected(), again.corrected());
}
