//! Triangular-region projection scenario.
//!
//! Points are drawn uniformly inside the triangle with vertices (0,0),
//! (1,0), (0,1) by rejection from the unit square; the x-coordinate has
//! density `f(x) = 2 - 2x` on `[0, 1]`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{check_curve_resolution, Scenario, DEFAULT_CURVE_RESOLUTION};
use crate::domains::generators::TriangularGenerator;
use crate::domains::histogram::{DensityHistogram, TrialParams, TrialRunner};
use crate::engine::jidoka::JidokaConfig;
use crate::engine::rng::SimRng;
use crate::error::SimResult;

/// Triangular scenario configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, default)]
pub struct TriangularConfig {
    /// Run this scenario.
    pub enabled: bool,
    /// Lower bound of the histogram range.
    pub start: f64,
    /// Upper bound of the histogram range.
    pub finish: f64,
    /// Number of buckets.
    #[validate(range(min = 1))]
    pub subintervals: usize,
    /// Outcomes to accept.
    pub num_points: u64,
    /// Points along the ideal curve.
    #[validate(range(min = 2))]
    pub curve_resolution: usize,
}

impl Default for TriangularConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start: 0.0,
            finish: 1.0,
            subintervals: 20,
            num_points: 100_000,
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
        }
    }
}

/// Triangular projection vs. its histogram.
#[derive(Debug, Clone)]
pub struct TriangularScenario {
    config: TriangularConfig,
    params: TrialParams,
}

impl TriangularScenario {
    /// Create the scenario.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for a bad range, bucket count or curve
    /// resolution.
    pub fn new(config: TriangularConfig) -> SimResult<Self> {
        let params = TrialParams::new(
            config.start,
            config.finish,
            config.subintervals,
            config.num_points,
        )?;
        check_curve_resolution(config.curve_resolution)?;
        Ok(Self { config, params })
    }

    /// Scenario configuration.
    #[must_use]
    pub const fn config(&self) -> &TriangularConfig {
        &self.config
    }
}

impl Scenario for TriangularScenario {
    fn name(&self) -> &'static str {
        "triangular"
    }

    fn title(&self) -> &'static str {
        "Arbitrary (Triangular) Distribution"
    }

    fn description(&self) -> &'static str {
        "\"Triangular\" Probability Distribution"
    }

    fn trial_params(&self) -> &TrialParams {
        &self.params
    }

    fn curve_resolution(&self) -> usize {
        self.config.curve_resolution
    }

    fn ideal_density(&self, x: f64) -> f64 {
        TriangularGenerator::density(x)
    }

    fn sample_histogram(
        &self,
        rng: &mut SimRng,
        jidoka: &JidokaConfig,
    ) -> SimResult<DensityHistogram> {
        TrialRunner::new(self.params)
            .with_jidoka(jidoka.clone())
            .run(&mut TriangularGenerator, rng)
    }
}
