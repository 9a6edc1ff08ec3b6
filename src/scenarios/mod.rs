//! Pre-built comparison scenarios.
//!
//! Each scenario fixes a distribution, its closed-form density, and the
//! trial parameters, then hands the empirical histogram and the ideal curve
//! to a [`VisualizationSink`]:
//! - Exponential distribution (inverse-transform sampling)
//! - Triangular-region projection (rejection sampling)

pub mod exponential;
pub mod triangular;

pub use exponential::{ExponentialConfig, ExponentialScenario};
pub use triangular::{TriangularConfig, TriangularScenario};

use serde::Serialize;

use crate::config::SimConfig;
use crate::domains::histogram::{DensityHistogram, TrialParams};
use crate::engine::jidoka::JidokaConfig;
use crate::engine::rng::SimRng;
use crate::error::{SimError, SimResult};
use crate::visualization::{HistogramSeries, VisualizationSink};

/// Samples along the ideal curve.
pub const DEFAULT_CURVE_RESOLUTION: usize = 256;

/// Legend label for the closed-form curve.
pub const CURVE_LABEL: &str = "Ideal Curve";

/// Legend label for the empirical histogram.
pub const HISTOGRAM_LABEL: &str = "Simulation Results";

/// A fixed distribution-vs-histogram comparison.
pub trait Scenario {
    /// Short identifier (`exponential`, `triangular`).
    fn name(&self) -> &'static str;

    /// Panel title.
    fn title(&self) -> &'static str;

    /// Distribution name used in progress messages.
    fn description(&self) -> &'static str;

    /// Validated trial parameters.
    fn trial_params(&self) -> &TrialParams;

    /// Points sampled along the ideal curve.
    fn curve_resolution(&self) -> usize {
        DEFAULT_CURVE_RESOLUTION
    }

    /// Closed-form density at `x`.
    fn ideal_density(&self, x: f64) -> f64;

    /// Run the trial with this scenario's generator.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the trial runner.
    fn sample_histogram(
        &self,
        rng: &mut SimRng,
        jidoka: &JidokaConfig,
    ) -> SimResult<DensityHistogram>;

    /// Ideal density sampled over `[start, finish]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` if the resolution is below 2.
    fn ideal_curve(&self) -> SimResult<Vec<(f64, f64)>> {
        let params = self.trial_params();
        Ok(linspace(params.start(), params.finish(), self.curve_resolution())?
            .into_iter()
            .map(|x| (x, self.ideal_density(x)))
            .collect())
    }

    /// Sample, compare, and draw one panel on `sink`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` before any draw if the curve resolution
    /// or guard configuration is unusable, otherwise trial or sink errors.
    fn run(
        &self,
        rng: &mut SimRng,
        jidoka: &JidokaConfig,
        sink: &mut dyn VisualizationSink,
    ) -> SimResult<ScenarioReport> {
        tracing::info!(scenario = self.name(), "simulating");

        jidoka.check()?;
        let curve = self.ideal_curve()?;
        let histogram = self.sample_histogram(rng, jidoka)?;
        let series = HistogramSeries::from_histogram(&histogram);

        sink.set_title(self.title())?;
        sink.render_curve(&curve, CURVE_LABEL)?;
        sink.render_histogram(&series, HISTOGRAM_LABEL)?;
        sink.add_legend()?;

        let max_deviation = histogram
            .midpoints()
            .iter()
            .zip(&histogram.densities)
            .map(|(&x, &d)| (d - self.ideal_density(x)).abs())
            .fold(0.0, f64::max);

        tracing::info!(
            scenario = self.name(),
            draws = histogram.draws,
            rejected = histogram.rejected(),
            max_deviation,
            "scenario complete"
        );

        Ok(ScenarioReport {
            name: self.name().to_string(),
            title: self.title().to_string(),
            histogram,
            curve,
            max_deviation,
        })
    }
}

/// Outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    /// Scenario identifier.
    pub name: String,
    /// Panel title.
    pub title: String,
    /// Empirical density.
    pub histogram: DensityHistogram,
    /// Ideal curve samples.
    pub curve: Vec<(f64, f64)>,
    /// Largest `|density - ideal|` at bucket midpoints.
    pub max_deviation: f64,
}

/// Reject curve resolutions that cannot span a range.
///
/// # Errors
///
/// Returns `InvalidParameters` if `n < 2`.
pub fn check_curve_resolution(n: usize) -> SimResult<()> {
    if n < 2 {
        return Err(SimError::invalid_parameters(format!(
            "curve resolution must be at least 2, got {n}"
        )));
    }
    Ok(())
}

/// `n` evenly spaced points from `start` to `finish` inclusive.
///
/// # Errors
///
/// Returns `InvalidParameters` if `n < 2`.
pub fn linspace(start: f64, finish: f64, n: usize) -> SimResult<Vec<f64>> {
    check_curve_resolution(n)?;
    let step = (finish - start) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    points[n - 1] = finish;
    Ok(points)
}

/// A scenario paired with its RNG stream.
pub struct ScheduledScenario {
    /// Whether the configuration enables it.
    pub enabled: bool,
    /// The scenario itself.
    pub scenario: Box<dyn Scenario>,
    /// Stream partitioned from the master seed.
    pub rng: SimRng,
}

impl ScheduledScenario {
    /// Run on this scenario's own stream.
    ///
    /// # Errors
    ///
    /// Returns trial errors or sink errors.
    pub fn run(
        &mut self,
        jidoka: &JidokaConfig,
        sink: &mut dyn VisualizationSink,
    ) -> SimResult<ScenarioReport> {
        self.scenario.run(&mut self.rng, jidoka, sink)
    }
}

/// Build both scenarios from `config`, exponential first.
///
/// Each scenario gets its own stream partitioned from the master seed, so
/// reordering or skipping one never changes the other's samples.
///
/// # Errors
///
/// Returns `InvalidParameters` if the guard or either scenario is
/// misconfigured, whether enabled or not.
pub fn schedule(config: &SimConfig) -> SimResult<Vec<ScheduledScenario>> {
    config.jidoka.check()?;
    let scenarios: [(bool, Box<dyn Scenario>); 2] = [
        (
            config.scenarios.exponential.enabled,
            Box::new(ExponentialScenario::new(config.scenarios.exponential.clone())?)
                as Box<dyn Scenario>,
        ),
        (
            config.scenarios.triangular.enabled,
            Box::new(TriangularScenario::new(config.scenarios.triangular.clone())?)
                as Box<dyn Scenario>,
        ),
    ];

    let mut master = SimRng::new(config.reproducibility.seed);
    let streams = master.partition(scenarios.len());

    Ok(scenarios
        .into_iter()
        .zip(streams)
        .map(|((enabled, scenario), rng)| ScheduledScenario {
            enabled,
            scenario,
            rng,
        })
        .collect())
}

/// Run every enabled scenario from `config` onto `sink`.
///
/// # Errors
///
/// Returns the first configuration, scenario, or sink error.
pub fn run_all(
    config: &SimConfig,
    sink: &mut dyn VisualizationSink,
) -> SimResult<Vec<ScenarioReport>> {
    let mut reports = Vec::with_capacity(2);
    for mut scheduled in schedule(config)? {
        if !scheduled.enabled {
            tracing::debug!(scenario = scheduled.scenario.name(), "scenario disabled");
            continue;
        }
        reports.push(scheduled.run(&config.jidoka, sink)?);
    }
    Ok(reports)
}
