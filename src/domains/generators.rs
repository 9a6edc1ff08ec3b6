//! Outcome generators for non-uniform distributions.
//!
//! Each generator produces one independent sample per call, drawing from the
//! supplied [`SimRng`]:
//!
//! ```text
//! Exponential (inverse transform):  X = -λ·ln(U),  U ~ Uniform(0, 1)
//! Triangular  (rejection):          (U, V) ~ Uniform[0,1)², accept if U + V < 1, X = U
//!                                   f(x) = 2 - 2x on [0, 1]
//! ```

use crate::engine::rng::SimRng;
use crate::error::{SimError, SimResult};

/// Attempt ceiling for the triangular rejection loop.
///
/// Acceptance probability is 1/2, so reaching this means the random source is broken.
pub const MAX_TRIANGLE_ATTEMPTS: u32 = 10_000;

/// Produces one real-valued outcome per invocation.
///
/// Any `FnMut(&mut SimRng) -> f64` closure is a generator:
///
/// ```rust
/// use distsim::domains::generators::OutcomeGenerator;
/// use distsim::engine::rng::SimRng;
///
/// let mut constant = |_: &mut SimRng| 5.0;
/// let mut rng = SimRng::new(1);
/// assert_eq!(constant.generate(&mut rng).ok(), Some(5.0));
/// ```
pub trait OutcomeGenerator {
    /// Draw one outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the draw leaves the numeric domain or the
    /// generator cannot produce a sample.
    fn generate(&mut self, rng: &mut SimRng) -> SimResult<f64>;
}

impl<F> OutcomeGenerator for F
where
    F: FnMut(&mut SimRng) -> f64,
{
    fn generate(&mut self, rng: &mut SimRng) -> SimResult<f64> {
        Ok(self(rng))
    }
}

/// Exponential distribution with mean `lam` via inverse transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialGenerator {
    lam: f64,
}

impl ExponentialGenerator {
    /// Create an exponential generator with mean `lam`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` unless `lam` is finite and positive.
    pub fn new(lam: f64) -> SimResult<Self> {
        if !lam.is_finite() || lam <= 0.0 {
            return Err(SimError::invalid_parameters(format!(
                "exponential mean must be finite and positive, got {lam}"
            )));
        }
        Ok(Self { lam })
    }

    /// Mean of the distribution.
    #[must_use]
    pub const fn lam(&self) -> f64 {
        self.lam
    }

    /// Closed-form density `(1/λ)·exp(-x/λ)` for `x ≥ 0`, zero below.
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let k = 1.0 / self.lam;
        k * (-k * x).exp()
    }

    /// Map a uniform draw to an exponential outcome.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if `u` is not strictly positive or the result
    /// is non-finite.
    pub fn transform(&self, u: f64) -> SimResult<f64> {
        if u.is_nan() || u <= 0.0 {
            return Err(SimError::domain("exponential ln(u)", u));
        }
        let outcome = -self.lam * u.ln();
        if !outcome.is_finite() {
            return Err(SimError::domain("exponential outcome", outcome));
        }
        Ok(outcome)
    }
}

impl OutcomeGenerator for ExponentialGenerator {
    fn generate(&mut self, rng: &mut SimRng) -> SimResult<f64> {
        self.transform(rng.gen_open01())
    }
}

/// X-coordinate of a uniform point in the triangle (0,0), (1,0), (0,1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriangularGenerator;

impl TriangularGenerator {
    /// Closed-form density `2 - 2x` on `[0, 1]`, zero elsewhere.
    #[must_use]
    pub fn density(x: f64) -> f64 {
        if (0.0..=1.0).contains(&x) {
            2.0 - 2.0 * x
        } else {
            0.0
        }
    }
}

impl OutcomeGenerator for TriangularGenerator {
    fn generate(&mut self, rng: &mut SimRng) -> SimResult<f64> {
        for _ in 0..MAX_TRIANGLE_ATTEMPTS {
            let u = rng.gen_f64();
            let v = rng.gen_f64();
            if u + v < 1.0 {
                return Ok(u);
            }
        }
        Err(SimError::SamplingExhausted {
            draws: u64::from(MAX_TRIANGLE_ATTEMPTS),
            accepted: 0,
            requested: 1,
        })
    }
}

/// Draw one exponential outcome with mean `lam`.
///
/// # Errors
///
/// Returns `InvalidParameters` for a bad `lam`, `DomainError` for a bad draw.
pub fn gen_exponential_outcome(lam: f64, rng: &mut SimRng) -> SimResult<f64> {
    ExponentialGenerator::new(lam)?.generate(rng)
}

/// Build a reusable exponential outcome generator with mean `lam`.
///
/// # Errors
///
/// Returns `InvalidParameters` unless `lam` is finite and positive.
pub fn create_exponential_outcome_function(lam: f64) -> SimResult<impl OutcomeGenerator> {
    ExponentialGenerator::new(lam)
}

/// Draw one triangular outcome.
///
/// # Errors
///
/// Returns `SamplingExhausted` only if the random source never lands in the triangle.
pub fn triangular_outcome(rng: &mut SimRng) -> SimResult<f64> {
    TriangularGenerator.generate(rng)
}
