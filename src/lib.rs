//! # distsim
//!
//! Monte Carlo approximation of non-uniform probability distributions.
//!
//! Random outcomes are drawn from a generator, binned into an equal-width
//! histogram over `[start, finish)`, and normalized into a density estimate
//! that can be laid over the closed-form density:
//! - Exponential distribution via inverse-transform sampling
//! - Triangular-region projection via rejection sampling
//!
//! Every run is seeded; the same seed reproduces every histogram bit for bit.
//!
//! ## Example
//!
//! ```rust
//! use distsim::prelude::*;
//!
//! let mut rng = SimRng::new(42);
//! let mut generator = ExponentialGenerator::new(30.0).unwrap();
//! let hist = run_trial(0.0, 120.0, 24, &mut generator, 1_000, &mut rng).unwrap();
//! assert_eq!(hist.len(), 24);
//! assert!((hist.total_mass() - 1.0).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod domains;
pub mod engine;
pub mod error;
pub mod scenarios;
pub mod visualization;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{SimConfig, SimConfigBuilder};
    pub use crate::domains::generators::{
        ExponentialGenerator, OutcomeGenerator, TriangularGenerator,
    };
    pub use crate::domains::histogram::{run_trial, DensityHistogram, TrialParams, TrialRunner};
    pub use crate::engine::jidoka::{JidokaConfig, JidokaGuard};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{SimError, SimResult};
    pub use crate::scenarios::{run_all, Scenario, ScenarioReport};
    pub use crate::visualization::{FigureRecorder, TextRenderer, VisualizationSink};
}

/// Re-export for public API
pub use error::{SimError, SimResult};
