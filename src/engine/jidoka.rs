//! Jidoka (自働化) - stop-the-line guard for sampling loops.
//!
//! A trial keeps drawing until enough outcomes land inside its range. If the
//! generator's support never meets that range the loop would spin forever,
//! so every draw is inspected by a [`JidokaGuard`]:
//!
//! 1. **Non-finite outcomes**: NaN or Inf stops the trial with `DomainError`.
//! 2. **Draw budget**: more than `max_draws_per_point × requested` draws stops
//!    the trial with `SamplingExhausted`.
//!
//! # Severity Levels
//!
//! - **Acceptable**: budget usage below the warning fraction
//! - **Warning**: budget usage above the warning fraction (logged once)
//! - **Critical**: budget exhausted, stop the line

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Default draws allowed per requested outcome.
pub const DEFAULT_MAX_DRAWS_PER_POINT: u64 = 1_000;

/// Severity of the guard's current budget usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationSeverity {
    /// Within budget, continue normally.
    Acceptable,
    /// Approaching the budget (log, continue).
    Warning,
    /// Budget exceeded (stop the line).
    Critical,
}

/// Jidoka configuration for trial sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JidokaConfig {
    /// Draw budget per requested outcome. `None` disables the budget.
    #[serde(default = "default_max_draws_per_point")]
    pub max_draws_per_point: Option<u64>,
    /// NaN/Inf detection enabled.
    #[serde(default = "default_true")]
    pub check_finite: bool,
    /// Budget fraction at which a warning is logged (e.g., 0.8 = warn at 80%).
    #[serde(default = "default_warning_fraction")]
    pub warning_fraction: f64,
}

#[allow(clippy::unnecessary_wraps)]
const fn default_max_draws_per_point() -> Option<u64> {
    Some(DEFAULT_MAX_DRAWS_PER_POINT)
}

const fn default_true() -> bool {
    true
}

const fn default_warning_fraction() -> f64 {
    0.8
}

impl Default for JidokaConfig {
    fn default() -> Self {
        Self {
            max_draws_per_point: default_max_draws_per_point(),
            check_finite: true,
            warning_fraction: default_warning_fraction(),
        }
    }
}

impl JidokaConfig {
    /// Configuration with no draw budget (sampling may block forever).
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_draws_per_point: None,
            ..Self::default()
        }
    }

    /// Total draw budget for a trial requesting `requested` outcomes.
    ///
    /// A zero-point trial still gets one point's worth of budget.
    #[must_use]
    pub fn draw_budget(&self, requested: u64) -> Option<u64> {
        self.max_draws_per_point
            .map(|per_point| per_point.saturating_mul(requested.max(1)))
    }

    /// Reject settings that would stop every trial or never warn.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for a zero draw budget or a warning
    /// fraction outside `(0, 1]`.
    pub fn check(&self) -> SimResult<()> {
        if self.max_draws_per_point == Some(0) {
            return Err(SimError::invalid_parameters(
                "max_draws_per_point must be at least 1 (use null to disable the budget)",
            ));
        }
        if !(self.warning_fraction > 0.0 && self.warning_fraction <= 1.0) {
            return Err(SimError::invalid_parameters(format!(
                "warning_fraction must be in (0, 1], got {}",
                self.warning_fraction
            )));
        }
        Ok(())
    }
}

/// Per-trial guard that inspects every draw.
///
/// # Example
///
/// ```rust
/// use distsim::engine::jidoka::{JidokaConfig, JidokaGuard};
///
/// let mut guard = JidokaGuard::new(&JidokaConfig::default(), 10);
/// assert!(guard.inspect(0.5).is_ok());
/// assert!(guard.inspect(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct JidokaGuard {
    check_finite: bool,
    warning_fraction: f64,
    budget: Option<u64>,
    requested: u64,
    draws: u64,
    accepted: u64,
    warned: bool,
}

impl JidokaGuard {
    /// Create a guard for a trial requesting `requested` outcomes.
    #[must_use]
    pub fn new(config: &JidokaConfig, requested: u64) -> Self {
        Self {
            check_finite: config.check_finite,
            warning_fraction: config.warning_fraction,
            budget: config.draw_budget(requested),
            requested,
            draws: 0,
            accepted: 0,
            warned: false,
        }
    }

    /// Inspect one raw draw before it is classified as in or out of range.
    ///
    /// # Errors
    ///
    /// - `DomainError` if the outcome is NaN or infinite (when enabled)
    /// - `SamplingExhausted` if this draw exceeds the budget
    pub fn inspect(&mut self, outcome: f64) -> SimResult<()> {
        self.draws += 1;

        if self.check_finite && !outcome.is_finite() {
            return Err(SimError::domain(
                format!("outcome[{}]", self.draws - 1),
                outcome,
            ));
        }

        match self.severity() {
            ViolationSeverity::Acceptable => Ok(()),
            ViolationSeverity::Warning => {
                if !self.warned {
                    self.warned = true;
                    tracing::warn!(
                        draws = self.draws,
                        accepted = self.accepted,
                        requested = self.requested,
                        budget = self.budget,
                        "sampling approaching draw budget"
                    );
                }
                Ok(())
            }
            ViolationSeverity::Critical => {
                tracing::warn!(
                    draws = self.draws,
                    accepted = self.accepted,
                    requested = self.requested,
                    "sampling draw budget exhausted"
                );
                Err(SimError::SamplingExhausted {
                    draws: self.draws,
                    accepted: self.accepted,
                    requested: self.requested,
                })
            }
        }
    }

    /// Record that the last inspected draw was accepted.
    pub fn accept(&mut self) {
        self.accepted += 1;
    }

    /// Classify current budget usage.
    #[must_use]
    pub fn severity(&self) -> ViolationSeverity {
        match self.budget {
            None => ViolationSeverity::Acceptable,
            Some(budget) if self.draws > budget => ViolationSeverity::Critical,
            Some(budget) if self.draws as f64 > budget as f64 * self.warning_fraction => {
                ViolationSeverity::Warning
            }
            Some(_) => ViolationSeverity::Acceptable,
        }
    }

    /// Draws inspected so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Draws accepted so far.
    #[must_use]
    pub const fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Draws discarded so far.
    #[must_use]
    pub const fn rejected(&self) -> u64 {
        self.draws - self.accepted
    }

    /// Configured budget, if any.
    #[must_use]
    pub const fn budget(&self) -> Option<u64> {
        self.budget
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JidokaConfig::default();
        assert_eq!(config.max_draws_per_point, Some(DEFAULT_MAX_DRAWS_PER_POINT));
        assert!(config.check_finite);
        assert!((config.warning_fraction - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_draw_budget_scales_with_requested() {
        let config = JidokaConfig {
            max_draws_per_point: Some(10),
            ..Default::default()
        };
        assert_eq!(config.draw_budget(5), Some(50));
        assert_eq!(config.draw_budget(0), Some(10));
        assert_eq!(config.draw_budget(u64::MAX), Some(u64::MAX));
        assert_eq!(JidokaConfig::unbounded().draw_budget(5), None);
    }

    #[test]
    fn test_check_accepts_defaults_and_unbounded() {
        assert!(JidokaConfig::default().check().is_ok());
        assert!(JidokaConfig::unbounded().check().is_ok());
        let edge = JidokaConfig {
            max_draws_per_point: Some(1),
            warning_fraction: 1.0,
            ..Default::default()
        };
        assert!(edge.check().is_ok());
    }

    #[test]
    fn test_check_rejects_zero_budget() {
        let config = JidokaConfig {
            max_draws_per_point: Some(0),
            ..Default::default()
        };
        let err = config.check().unwrap_err();
        assert!(matches!(err, SimError::InvalidParameters { .. }));
        assert!(err.to_string().contains("max_draws_per_point"));
    }

    #[test]
    fn test_check_rejects_bad_warning_fraction() {
        for fraction in [f64::NAN, 0.0, -0.5, 1.5, f64::INFINITY] {
            let config = JidokaConfig {
                warning_fraction: fraction,
                ..Default::default()
            };
            assert!(config.check().is_err(), "{fraction}");
        }
    }

    #[test]
    fn test_guard_accepts_finite() {
        let mut guard = JidokaGuard::new(&JidokaConfig::default(), 3);
        for v in [0.0, -1.5, 1e300] {
            assert!(guard.inspect(v).is_ok());
            guard.accept();
        }
        assert_eq!(guard.draws(), 3);
        assert_eq!(guard.accepted(), 3);
        assert_eq!(guard.rejected(), 0);
    }

    #[test]
    fn test_guard_rejects_non_finite() {
        let mut guard = JidokaGuard::new(&JidokaConfig::default(), 3);
        let err = guard.inspect(f64::INFINITY).unwrap_err();
        assert!(matches!(err, SimError::DomainError { .. }));

        let mut guard = JidokaGuard::new(&JidokaConfig::default(), 3);
        let err = guard.inspect(f64::NAN).unwrap_err();
        assert!(err.to_string().contains("outcome[0]"));
    }

    #[test]
    fn test_guard_finite_check_can_be_disabled() {
        let config = JidokaConfig {
            check_finite: false,
            ..Default::default()
        };
        let mut guard = JidokaGuard::new(&config, 1);
        assert!(guard.inspect(f64::NAN).is_ok());
    }

    #[test]
    fn test_guard_exhausts_budget() {
        let config = JidokaConfig {
            max_draws_per_point: Some(4),
            ..Default::default()
        };
        let mut guard = JidokaGuard::new(&config, 2);
        for _ in 0..8 {
            assert!(guard.inspect(-1.0).is_ok());
        }
        match guard.inspect(-1.0) {
            Err(SimError::SamplingExhausted {
                draws,
                accepted,
                requested,
            }) => {
                assert_eq!(draws, 9);
                assert_eq!(accepted, 0);
                assert_eq!(requested, 2);
            }
            other => unreachable!("expected SamplingExhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_severity_progression() {
        let config = JidokaConfig {
            max_draws_per_point: Some(10),
            warning_fraction: 0.5,
            ..Default::default()
        };
        let mut guard = JidokaGuard::new(&config, 1);
        assert_eq!(guard.severity(), ViolationSeverity::Acceptable);
        for _ in 0..6 {
            let _ = guard.inspect(0.0);
        }
        assert_eq!(guard.severity(), ViolationSeverity::Warning);
        for _ in 0..5 {
            let _ = guard.inspect(0.0);
        }
        assert_eq!(guard.severity(), ViolationSeverity::Critical);
    }

    #[test]
    fn test_unbounded_never_exhausts() {
        let mut guard = JidokaGuard::new(&JidokaConfig::unbounded(), 1);
        for _ in 0..100_000 {
            assert!(guard.inspect(-1.0).is_ok());
        }
        assert_eq!(guard.budget(), None);
    }

    #[test]
    fn test_config_yaml_defaults() {
        let config: JidokaConfig = serde_yaml::from_str("check_finite: false").unwrap();
        assert!(!config.check_finite);
        assert_eq!(config.max_draws_per_point, Some(DEFAULT_MAX_DRAWS_PER_POINT));
    }

    #[test]
    fn test_config_yaml_unbounded() {
        let config: JidokaConfig = serde_yaml::from_str("max_draws_per_point: null").unwrap();
        assert_eq!(config.max_draws_per_point, None);
    }
}
