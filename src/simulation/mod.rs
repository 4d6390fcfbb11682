//! simulation — synthetic designs and replicate-level bias studies.
//!
//! Purpose
//! -------
//! Provide the experimental harness around the estimators: a Bernoulli-design
//! data-generating process with a closed-form ground truth
//! ([`InteractionDesign`]), and a replicate driver ([`BiasStudy`]) that
//! measures how far plug-in and one-step-corrected estimates sit from that
//! truth across many independent draws.
//!
//! Key behaviors
//! -------------
//! - Generate reproducible replicates: every draw is a pure function of the
//!   design and a seed.
//! - Run studies where each replicate gets its own derived seed, failures
//!   are recorded instead of aborting the study, and aggregates are formed
//!   over the successes ([`StudySummary`]).
//!
//! Conventions
//! -----------
//! - The simulation layer consumes the estimation API exactly as an external
//!   caller would; it has no privileged access to estimator internals.
//! - Failures surface as [`errors::SimResult`]; no logging, no I/O.
pub mod dgp;
pub mod errors;
pub mod study;

pub use dgp::{InteractionDesign, SimulatedSample};
pub use errors::{SimError, SimResult};
pub use study::{BiasStudy, StudySummary};
