//! Error types for distsim.
//!
//! Every fallible operation returns `Result<T, SimError>`; library code
//! never panics on bad input.

use thiserror::Error;

/// Result type alias for distsim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all distsim operations.
///
/// # Design
///
/// Sampling failures (budget exhausted, non-finite values) stop a trial
/// immediately instead of hanging or leaking NaN into a histogram.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Parameter Errors =====
    /// Trial or generator parameters rejected before sampling.
    #[error("Invalid parameters: {message}")]
    InvalidParameters {
        /// Which constraint was violated.
        message: String,
    },

    // ===== Sampling Guard Stops =====
    /// Draw budget exhausted before enough in-range outcomes were accepted.
    #[error("Sampling exhausted after {draws} draws: accepted {accepted} of {requested} outcomes")]
    SamplingExhausted {
        /// Total draws taken from the generator.
        draws: u64,
        /// Outcomes accepted into the histogram.
        accepted: u64,
        /// Outcomes requested.
        requested: u64,
    },

    /// Numerical domain violation (logarithm of a non-positive value, NaN, Inf).
    #[error("Domain error: {location} produced {value}")]
    DomainError {
        /// Where the bad value appeared.
        location: String,
        /// The offending value.
        value: f64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SimError {
    /// Create an invalid-parameters error.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create a domain error for a bad numeric value.
    #[must_use]
    pub fn domain(location: impl Into<String>, value: f64) -> Self {
        Self::DomainError {
            location: location.into(),
            value,
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Check if this error was raised by the sampling guard (trial stopped mid-run).
    #[must_use]
    pub const fn is_sampling_failure(&self) -> bool {
        matches!(
            self,
            Self::SamplingExhausted { .. } | Self::DomainError { .. }
        )
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
