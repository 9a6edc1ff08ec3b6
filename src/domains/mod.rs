//! Sampling domains.
//!
//! - Generators: one outcome per call from a non-uniform distribution
//! - Histogram: the trial runner that buckets outcomes into a density estimate

pub mod generators;
pub mod histogram;

pub use generators::{
    create_exponential_outcome_function, gen_exponential_outcome, triangular_outcome,
    ExponentialGenerator, OutcomeGenerator, TriangularGenerator,
};
pub use histogram::{run_trial, DensityHistogram, TrialParams, TrialRunner};
