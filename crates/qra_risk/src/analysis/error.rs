//! Analysis error types.

use thiserror::Error;

/// Errors raised by the analytics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A statistic was requested over no values.
    #[error("Cannot analyse an empty sample: {0}")]
    EmptySample(&'static str),

    /// Exceedance curves need at least two thresholds.
    #[error("Invalid bucket count {0}: must be at least 2")]
    InvalidBucketCount(usize),

    /// Positional lookup past the last risk.
    #[error("Risk index {index} out of range for {len} risks")]
    RiskIndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of risks in the result.
        len: usize,
    },

    /// Tolerance losses and probabilities differ in length.
    #[error("Tolerance has {losses} losses but {probabilities} probabilities")]
    ToleranceMismatch {
        /// Number of loss points.
        losses: usize,
        /// Number of probability points.
        probabilities: usize,
    },

    /// A tolerance point is not usable.
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(String),
}
