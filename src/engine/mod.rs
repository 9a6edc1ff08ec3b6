//! Sampling engine primitives.
//!
//! - Deterministic RNG (PCG with partitioned seeds)
//! - Jidoka guards that stop a runaway or non-finite sampling loop

pub mod jidoka;
pub mod rng;

pub use jidoka::{JidokaConfig, JidokaGuard, ViolationSeverity};
pub use rng::SimRng;
