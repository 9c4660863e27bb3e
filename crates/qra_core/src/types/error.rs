//! Error types for distribution construction and sampling.

use thiserror::Error;

/// Errors raised by probability distributions.
///
/// Construction errors (`InvalidParameter`, `MissingParameter`, `UnknownKind`)
/// are configuration errors and surface before any sampling starts.
/// `InvalidSampleSize` and `QuantileOutOfRange` are raised by the sampling
/// capability itself.
///
/// # Examples
/// ```
/// use qra_core::types::DistributionError;
///
/// let err = DistributionError::QuantileOutOfRange { index: 3, value: 1.0 };
/// assert_eq!(
///     format!("{}", err),
///     "Quantile at index 3 is outside [0, 1): 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// A distribution parameter violates its constraints.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },

    /// A parameter required by the distribution kind was not supplied.
    #[error("Missing parameter '{name}' for {kind} distribution")]
    MissingParameter {
        /// Distribution kind tag.
        kind: String,
        /// Parameter name.
        name: &'static str,
    },

    /// The distribution tag is not in the registry.
    #[error("Unknown distribution: {0}")]
    UnknownKind(String),

    /// A direct draw was requested with a non-positive sample size.
    #[error("Sample size must be positive, got {0}")]
    InvalidSampleSize(usize),

    /// A quantile handed to the inverse CDF lies outside `[0, 1)`.
    #[error("Quantile at index {index} is outside [0, 1): {value}")]
    QuantileOutOfRange {
        /// Position of the offending quantile in the input.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

impl DistributionError {
    /// Create an invalid-parameter error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised while constructing a distribution.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::MissingParameter { .. } | Self::UnknownKind(_)
        )
    }
}
