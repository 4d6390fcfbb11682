//! core — shared data, splits, and configuration for cross-fitting.
//!
//! Purpose
//! -------
//! Collect the building blocks the one-step estimators are assembled from:
//! validated sample containers, seeded fold plans, the empirical covariate
//! PMF, run configuration, and the reusable validation helpers. Higher-level
//! estimators build on these primitives and rely on their invariants.
//!
//! Key behaviors
//! -------------
//! - Validate data once, at the boundary ([`RegressionSample`],
//!   [`UnivariateSample`]), so estimation code never re-checks finiteness.
//! - Decide fold membership once per estimation pass ([`FoldPlan`]), with
//!   the shuffle fully determined by an explicit seed.
//! - Tabulate discrete covariate frequencies ([`EmpiricalPmf`]) with an
//!   explicit "unobserved support point" signal at lookup.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; fold `i` is the held-out set for nuisances trained
//!   on its complement.
//! - No I/O, no logging, no global state anywhere in this layer; all
//!   configuration arrives via [`CrossfitOptions`].
pub mod folds;
pub mod options;
pub mod pmf;
pub mod sample;
pub mod validation;

pub use folds::FoldPlan;
pub use options::CrossfitOptions;
pub use pmf::EmpiricalPmf;
pub use sample::{RegressionSample, UnivariateSample};
