//! Configuration with YAML schema and validation.
//!
//! Mistakes are caught before any sampling starts:
//! - unknown keys rejected by serde
//! - field ranges checked by `validator`
//! - cross-field constraints checked in [`SimConfig::validate_semantic`]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::engine::jidoka::JidokaConfig;
use crate::error::{SimError, SimResult};
use crate::scenarios::{ExponentialConfig, TriangularConfig};
use crate::visualization::text::DEFAULT_BAR_WIDTH;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Reproducibility settings.
    #[validate(nested)]
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Sampling guard settings.
    #[serde(default)]
    pub jidoka: JidokaConfig,

    /// Per-scenario settings.
    #[validate(nested)]
    #[serde(default)]
    pub scenarios: ScenariosConfig,

    /// Rendering and export settings.
    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl SimConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns `YamlParse` if serialization fails.
    pub fn to_yaml(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::default()
    }

    /// Check constraints that span fields.
    ///
    /// # Errors
    ///
    /// Returns `Config` describing the first violated constraint.
    pub fn validate_semantic(&self) -> SimResult<()> {
        let (exponential, triangular) = (&self.scenarios.exponential, &self.scenarios.triangular);
        check_range("exponential", exponential.start, exponential.finish)?;
        check_range("triangular", triangular.start, triangular.finish)?;

        if !exponential.lam.is_finite() {
            return Err(SimError::config("scenarios.exponential.lam must be finite"));
        }

        let fraction = self.jidoka.warning_fraction;
        if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
            return Err(SimError::config(format!(
                "jidoka.warning_fraction must be in (0, 1], got {fraction}"
            )));
        }
        if self.jidoka.max_draws_per_point == Some(0) {
            return Err(SimError::config(
                "jidoka.max_draws_per_point must be positive; omit it with null to disable",
            ));
        }

        Ok(())
    }
}

fn check_range(scenario: &str, start: f64, finish: f64) -> SimResult<()> {
    if !start.is_finite() || !finish.is_finite() {
        return Err(SimError::config(format!(
            "scenarios.{scenario}: bounds must be finite, got [{start}, {finish}]"
        )));
    }
    if finish <= start {
        return Err(SimError::config(format!(
            "scenarios.{scenario}: finish ({finish}) must exceed start ({start})"
        )));
    }
    Ok(())
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            reproducibility: ReproducibilityConfig::default(),
            jidoka: JidokaConfig::default(),
            scenarios: ScenariosConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SimConfigBuilder {
    seed: Option<u64>,
    jidoka: Option<JidokaConfig>,
    exponential: Option<ExponentialConfig>,
    triangular: Option<TriangularConfig>,
    export_path: Option<PathBuf>,
}

impl SimConfigBuilder {
    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set sampling guard configuration.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn jidoka(mut self, config: JidokaConfig) -> Self {
        self.jidoka = Some(config);
        self
    }

    /// Override the exponential scenario.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn exponential(mut self, config: ExponentialConfig) -> Self {
        self.exponential = Some(config);
        self
    }

    /// Override the triangular scenario.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn triangular(mut self, config: TriangularConfig) -> Self {
        self.triangular = Some(config);
        self
    }

    /// Export recorded panels to `path`.
    #[must_use]
    pub fn export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = Some(path.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SimConfig {
        let mut config = SimConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(jidoka) = self.jidoka {
            config.jidoka = jidoka;
        }
        if let Some(exponential) = self.exponential {
            config.scenarios.exponential = exponential;
        }
        if let Some(triangular) = self.triangular {
            config.scenarios.triangular = triangular;
        }
        if self.export_path.is_some() {
            config.output.export_path = self.export_path;
        }

        config
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReproducibilityConfig {
    /// Master seed; each scenario gets a stream partitioned from it.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_seed() -> u64 {
    42
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

/// Both scenario configurations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ScenariosConfig {
    /// Exponential distribution scenario.
    #[validate(nested)]
    #[serde(default)]
    pub exponential: ExponentialConfig,
    /// Triangular projection scenario.
    #[validate(nested)]
    #[serde(default)]
    pub triangular: TriangularConfig,
}

/// Rendering and export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Widest bar in the text chart, in characters.
    #[validate(range(min = 1, max = 200))]
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    /// Write recorded panels here; format follows the extension.
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

const fn default_bar_width() -> usize {
    DEFAULT_BAR_WIDTH
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            export_path: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.reproducibility.seed, 42);
        assert!(config.scenarios.exponential.enabled);
        assert!(config.scenarios.triangular.enabled);
        assert_eq!(config.output.bar_width, DEFAULT_BAR_WIDTH);
        assert!(config.validate().is_ok());
        assert!(config.validate_semantic().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SimConfig::builder()
            .seed(12345)
            .jidoka(JidokaConfig::unbounded())
            .triangular(TriangularConfig {
                num_points: 500,
                ..Default::default()
            })
            .export_path("panels.json")
            .build();

        assert_eq!(config.reproducibility.seed, 12345);
        assert_eq!(config.jidoka.max_draws_per_point, None);
        assert_eq!(config.scenarios.triangular.num_points, 500);
        assert_eq!(
            config.output.export_path.as_deref(),
            Some(Path::new("panels.json"))
        );
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
reproducibility:
  seed: 7
scenarios:
  exponential:
    lam: 10.0
    finish: 40.0
  triangular:
    enabled: false
";
        let config = SimConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.reproducibility.seed, 7);
        assert!((config.scenarios.exponential.lam - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.scenarios.exponential.subintervals, 24);
        assert!(!config.scenarios.triangular.enabled);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = SimConfig::from_yaml("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SimConfig::builder().seed(99).export_path("out.csv").build();
        let yaml = config.to_yaml().unwrap();
        let back = SimConfig::from_yaml(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_rejects_unknown_field() {
        let yaml = r"
scenarios:
  exponential:
    lambda: 30.0
";
        assert!(matches!(
            SimConfig::from_yaml(yaml),
            Err(SimError::YamlParse(_))
        ));
    }

    #[test]
    fn test_rejects_zero_subintervals() {
        let yaml = r"
scenarios:
  triangular:
    subintervals: 0
";
        assert!(matches!(
            SimConfig::from_yaml(yaml),
            Err(SimError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_lam() {
        let yaml = r"
scenarios:
  exponential:
    lam: -1.0
";
        assert!(SimConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let yaml = r"
scenarios:
  triangular:
    start: 1.0
    finish: 0.0
";
        let err = SimConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SimError::Config { .. }));
        assert!(err.to_string().contains("triangular"));
    }

    #[test]
    fn test_rejects_bad_warning_fraction() {
        let yaml = r"
jidoka:
  warning_fraction: 1.5
";
        assert!(matches!(
            SimConfig::from_yaml(yaml),
            Err(SimError::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_draw_budget() {
        let yaml = r"
jidoka:
  max_draws_per_point: 0
";
        assert!(SimConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_null_draw_budget_disables_guard() {
        let yaml = r"
jidoka:
  max_draws_per_point: null
";
        let config = SimConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.jidoka.max_draws_per_point, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distsim.yaml");
        std::fs::write(&path, "reproducibility:\n  seed: 5\n").unwrap();
        let config = SimConfig::load(&path).unwrap();
        assert_eq!(config.reproducibility.seed, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimConfig::load("/nonexistent/distsim.yaml").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
