//! Trial runner: sample, bucket, and normalize into a density histogram.
//!
//! # Estimator
//!
//! ```text
//! bucket_step = (finish - start) / subintervals
//! bucket(x)   = floor((x - start) / bucket_step)        for start < x < finish
//! density[i]  = count[i] / (num_points · bucket_step)
//! ```
//!
//! Buckets are half-open (`divisions[j] ≤ x < divisions[j+1]`), so every
//! accepted outcome is counted exactly once and `Σ density · bucket_step = 1`
//! whenever `num_points > 0`. Outcomes outside `(start, finish)` are
//! discarded and redrawn; the histogram therefore always integrates to 1
//! even when the true distribution has mass outside the range.

use serde::Serialize;

use crate::domains::generators::OutcomeGenerator;
use crate::engine::jidoka::{JidokaConfig, JidokaGuard};
use crate::engine::rng::SimRng;
use crate::error::{SimError, SimResult};

/// Largest bucket count a trial accepts.
pub const MAX_SUBINTERVALS: usize = 1 << 20;

/// Validated trial parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialParams {
    start: f64,
    finish: f64,
    subintervals: usize,
    num_points: u64,
}

impl TrialParams {
    /// Create trial parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` if the bounds or their difference are
    /// non-finite, if `finish <= start`, or if `subintervals` is outside
    /// `1..=MAX_SUBINTERVALS`.
    pub fn new(start: f64, finish: f64, subintervals: usize, num_points: u64) -> SimResult<Self> {
        if !start.is_finite() || !finish.is_finite() {
            return Err(SimError::invalid_parameters(format!(
                "range bounds must be finite, got [{start}, {finish}]"
            )));
        }
        if finish <= start {
            return Err(SimError::invalid_parameters(format!(
                "finish ({finish}) must be greater than start ({start})"
            )));
        }
        if !(finish - start).is_finite() {
            return Err(SimError::invalid_parameters(format!(
                "range width of [{start}, {finish}] overflows"
            )));
        }
        if subintervals == 0 {
            return Err(SimError::invalid_parameters(
                "subintervals must be at least 1",
            ));
        }
        if subintervals > MAX_SUBINTERVALS {
            return Err(SimError::invalid_parameters(format!(
                "subintervals must be at most {MAX_SUBINTERVALS}, got {subintervals}"
            )));
        }
        let params = Self {
            start,
            finish,
            subintervals,
            num_points,
        };
        // A range so narrow that its buckets round to zero width cannot be binned.
        if params.bucket_step() <= 0.0 {
            return Err(SimError::invalid_parameters(format!(
                "range [{start}, {finish}] is too narrow for {subintervals} subintervals"
            )));
        }
        Ok(params)
    }

    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub const fn finish(&self) -> f64 {
        self.finish
    }

    #[must_use]
    pub const fn subintervals(&self) -> usize {
        self.subintervals
    }

    #[must_use]
    pub const fn num_points(&self) -> u64 {
        self.num_points
    }

    /// Width of each bucket.
    #[must_use]
    pub fn bucket_step(&self) -> f64 {
        (self.finish - self.start) / self.subintervals as f64
    }

    /// The `subintervals + 1` division boundaries partitioning `[start, finish]`.
    #[must_use]
    pub fn divisions(&self) -> Vec<f64> {
        let step = self.bucket_step();
        (0..=self.subintervals)
            .map(|i| self.start + i as f64 * step)
            .collect()
    }

    /// Bucket index for an outcome, or `None` if it lies outside `(start, finish)`.
    #[must_use]
    pub fn bucket_index(&self, outcome: f64) -> Option<usize> {
        if !(self.start < outcome && outcome < self.finish) {
            return None;
        }
        let index = ((outcome - self.start) / self.bucket_step()).floor() as usize;
        // Rounding can push values just below `finish` onto the last boundary.
        Some(index.min(self.subintervals - 1))
    }
}

/// Normalized empirical density over equal-width buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityHistogram {
    /// Parameters the trial ran with.
    pub params: TrialParams,
    /// Accepted outcomes per bucket.
    pub counts: Vec<u64>,
    /// Estimated density per bucket.
    pub densities: Vec<f64>,
    /// Total draws taken, including discarded out-of-range outcomes.
    pub draws: u64,
}

impl DensityHistogram {
    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.densities.len()
    }

    /// True when there are no buckets (never the case for validated params).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.densities.is_empty()
    }

    /// Bucket width.
    #[must_use]
    pub fn bucket_step(&self) -> f64 {
        self.params.bucket_step()
    }

    /// Outcomes accepted into buckets.
    #[must_use]
    pub fn accepted(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Draws discarded for falling outside the range.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.draws - self.accepted()
    }

    /// Left edge of each bucket.
    #[must_use]
    pub fn left_edges(&self) -> Vec<f64> {
        let mut edges = self.params.divisions();
        edges.pop();
        edges
    }

    /// Midpoint of each bucket.
    #[must_use]
    pub fn midpoints(&self) -> Vec<f64> {
        let half = self.bucket_step() / 2.0;
        self.left_edges().into_iter().map(|x| x + half).collect()
    }

    /// `Σ density · bucket_step`; 1 for any trial with `num_points > 0`.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.densities.iter().sum::<f64>() * self.bucket_step()
    }
}

/// Runs sampling trials for one parameter set.
///
/// # Example
///
/// ```rust
/// use distsim::domains::histogram::{TrialParams, TrialRunner};
/// use distsim::domains::generators::TriangularGenerator;
/// use distsim::engine::rng::SimRng;
///
/// let params = TrialParams::new(0.0, 1.0, 20, 10_000).unwrap();
/// let mut rng = SimRng::new(42);
/// let hist = TrialRunner::new(params).run(&mut TriangularGenerator, &mut rng).unwrap();
/// assert_eq!(hist.len(), 20);
/// assert!((hist.total_mass() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct TrialRunner {
    params: TrialParams,
    jidoka: JidokaConfig,
}

impl TrialRunner {
    /// Create a runner with the default sampling guard.
    #[must_use]
    pub fn new(params: TrialParams) -> Self {
        Self {
            params,
            jidoka: JidokaConfig::default(),
        }
    }

    /// Replace the sampling guard configuration.
    #[must_use]
    pub fn with_jidoka(mut self, jidoka: JidokaConfig) -> Self {
        self.jidoka = jidoka;
        self
    }

    /// Parameters this runner samples with.
    #[must_use]
    pub const fn params(&self) -> &TrialParams {
        &self.params
    }

    /// Draw until `num_points` outcomes land in range, then normalize.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the guard configuration is unusable
    /// - `SamplingExhausted` if the draw budget runs out
    /// - `DomainError` if the generator yields a non-finite outcome
    /// - any error the generator itself returns
    pub fn run<G>(&self, generator: &mut G, rng: &mut SimRng) -> SimResult<DensityHistogram>
    where
        G: OutcomeGenerator + ?Sized,
    {
        self.jidoka.check()?;
        let params = &self.params;
        let requested = params.num_points();
        let mut counts = vec![0u64; params.subintervals()];
        let mut guard = JidokaGuard::new(&self.jidoka, requested);

        tracing::debug!(
            start = params.start(),
            finish = params.finish(),
            subintervals = params.subintervals(),
            num_points = requested,
            "trial started"
        );

        while guard.accepted() < requested {
            let outcome = generator.generate(rng)?;
            guard.inspect(outcome)?;
            if let Some(index) = params.bucket_index(outcome) {
                counts[index] += 1;
                guard.accept();
            }
        }

        let densities = if requested == 0 {
            vec![0.0; counts.len()]
        } else {
            let scale = requested as f64 * params.bucket_step();
            counts.iter().map(|&c| c as f64 / scale).collect()
        };

        tracing::debug!(
            draws = guard.draws(),
            rejected = guard.rejected(),
            "trial finished"
        );

        Ok(DensityHistogram {
            params: *params,
            counts,
            densities,
            draws: guard.draws(),
        })
    }
}

/// Run one trial with the default sampling guard.
///
/// # Errors
///
/// Returns `InvalidParameters` for bad bounds or bucket count, otherwise
/// whatever [`TrialRunner::run`] returns.
pub fn run_trial<G>(
    start: f64,
    finish: f64,
    subintervals: usize,
    generator: &mut G,
    num_points: u64,
    rng: &mut SimRng,
) -> SimResult<DensityHistogram>
where
    G: OutcomeGenerator + ?Sized,
{
    let params = TrialParams::new(start, finish, subintervals, num_points)?;
    TrialRunner::new(params).run(generator, rng)
}
