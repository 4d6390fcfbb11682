//! crossfit — cross-fitted one-step estimation: core primitives, estimators, and errors.
//!
//! Purpose
//! -------
//! Provide a cohesive cross-fitting layer that bundles validated data
//! containers, fold planning, empirical-frequency tables, the one-step
//! estimators, and shared error types under a single namespace. This is the
//! main entry point for influence-function bias correction in the crate and
//! the surface most consumers (including Python bindings) should depend on.
//!
//! Key behaviors
//! -------------
//! - Collect structural building blocks in [`core`]: samples, fold plans,
//!   the empirical PMF, options, and validation helpers.
//! - Expose the estimation API in [`estimators`] via [`OneStepEstimate`]:
//!   the conditional-mean one-step and the smooth-density-functional
//!   one-step, both generic over the nuisance traits in
//!   [`crate::nuisance`].
//! - Centralize cross-fitting error types in [`errors`] (`CrossfitError`
//!   and the `CrossfitResult` alias) so callers see a uniform error surface.
//! - Re-export the everyday types directly from this module and via
//!   [`prelude`] for ergonomic imports downstream.
//!
//! Invariants & assumptions
//! ------------------------
//! - Samples are validated at construction (finite, dimensionally
//!   consistent) and immutable afterwards; estimators subset by index, never
//!   mutate.
//! - Fold plans are disjoint, exhaustive, balanced, and a pure function of
//!   `(n, k, seed)`; a pinned seed makes every estimate reproducible.
//! - The conditional-mean influence function requires discrete (or
//!   pre-discretized) covariates for its exact-match indicator; an
//!   unobserved query point is a structured error, never a crash.
//!
//! Conventions
//! -----------
//! - The cross-fitting layer performs no I/O and no logging; callers
//!   orchestrate reporting. Failures surface as [`errors::CrossfitResult`].
pub mod core;
pub mod errors;
pub mod estimators;

pub use self::core::{CrossfitOptions, EmpiricalPmf, FoldPlan, RegressionSample, UnivariateSample};
pub use errors::{CrossfitError, CrossfitResult};
pub use estimators::{FunctionalTransforms, OneStepEstimate};

/// Everyday imports for cross-fitted estimation.
pub mod prelude {
    pub use super::core::{CrossfitOptions, RegressionSample, UnivariateSample};
    pub use super::errors::{CrossfitError, CrossfitResult};
    pub use super::estimators::{FunctionalTransforms, OneStepEstimate};
}
