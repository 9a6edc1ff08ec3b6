//! Exponential distribution scenario.
//!
//! Samples `X = -λ·ln(U)` and compares against `f(x) = (1/λ)·exp(-x/λ)`.
//!
//! Outcomes beyond `finish` are redrawn, so the histogram integrates to 1
//! over `[start, finish]` while the ideal curve integrates to
//! `1 - exp(-finish/λ)`. Keeping `finish` several multiples of `λ` out makes
//! the gap negligible (default: `finish = 4λ`, about 1.8%).

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{check_curve_resolution, Scenario, DEFAULT_CURVE_RESOLUTION};
use crate::domains::generators::ExponentialGenerator;
use crate::domains::histogram::{DensityHistogram, TrialParams, TrialRunner};
use crate::engine::jidoka::JidokaConfig;
use crate::engine::rng::SimRng;
use crate::error::SimResult;

/// Exponential scenario configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, default)]
pub struct ExponentialConfig {
    /// Run this scenario.
    pub enabled: bool,
    /// Lower bound of the histogram range.
    pub start: f64,
    /// Upper bound of the histogram range.
    pub finish: f64,
    /// Mean time between events.
    #[validate(range(exclusive_min = 0.0))]
    pub lam: f64,
    /// Number of buckets.
    #[validate(range(min = 1))]
    pub subintervals: usize,
    /// Outcomes to accept.
    pub num_points: u64,
    /// Points along the ideal curve.
    #[validate(range(min = 2))]
    pub curve_resolution: usize,
}

impl Default for ExponentialConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start: 0.0,
            finish: 120.0,
            lam: 30.0,
            subintervals: 24,
            num_points: 10_000,
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
        }
    }
}

/// Exponential distribution vs. its histogram.
#[derive(Debug, Clone)]
pub struct ExponentialScenario {
    config: ExponentialConfig,
    params: TrialParams,
    generator: ExponentialGenerator,
}

impl ExponentialScenario {
    /// Create the scenario.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for a bad range, bucket count, `lam` or
    /// curve resolution.
    pub fn new(config: ExponentialConfig) -> SimResult<Self> {
        let params = TrialParams::new(
            config.start,
            config.finish,
            config.subintervals,
            config.num_points,
        )?;
        let generator = ExponentialGenerator::new(config.lam)?;
        check_curve_resolution(config.curve_resolution)?;
        Ok(Self {
            config,
            params,
            generator,
        })
    }

    /// Scenario configuration.
    #[must_use]
    pub const fn config(&self) -> &ExponentialConfig {
        &self.config
    }

    /// Probability mass of the true distribution inside `[start, finish]`.
    #[must_use]
    pub fn covered_mass(&self) -> f64 {
        let lam = self.generator.lam();
        let lo = self.params.start().max(0.0);
        let hi = self.params.finish().max(0.0);
        (-lo / lam).exp() - (-hi / lam).exp()
    }
}

impl Scenario for ExponentialScenario {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn title(&self) -> &'static str {
        "Exponential Distribution"
    }

    fn description(&self) -> &'static str {
        "Exponential Probability Distribution"
    }

    fn trial_params(&self) -> &TrialParams {
        &self.params
    }

    fn curve_resolution(&self) -> usize {
        self.config.curve_resolution
    }

    fn ideal_density(&self, x: f64) -> f64 {
        self.generator.density(x)
    }

    fn sample_histogram(
        &self,
        rng: &mut SimRng,
        jidoka: &JidokaConfig,
    ) -> SimResult<DensityHistogram> {
        let mut generator = self.generator;
        TrialRunner::new(self.params)
            .with_jidoka(jidoka.clone())
            .run(&mut generator, rng)
    }
}
