//! Error types for the simulation engine.
//!
//! - [`ConfigError`]: rejected configuration, raised before any sampling
//! - [`SamplingError`]: failure inside one risk's sampler
//! - [`SimulationError`]: what a simulation call reports, tagged with the
//!   failing risk where there is one

use qra_core::types::{DistributionError, RiskId};
use thiserror::Error;

use crate::rng::SequenceError;

/// Configuration error for the simulators.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Iteration count must be positive.
    #[error("Invalid iteration count {0}: must be at least 1")]
    InvalidIterationCount(usize),

    /// Worker count must be positive.
    #[error("Invalid parallelism {0}: must be at least 1")]
    InvalidParallelism(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Method name not recognised.
    #[error("Unknown simulation method '{0}': expected smc, qmc or rqmc")]
    UnknownMethod(String),
}

/// Failure while drawing samples for a single risk.
#[derive(Debug, Error)]
pub enum SamplingError {
    /// The distribution rejected the draw.
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// The low-discrepancy sequence could not supply the points.
    #[error("Sequence error: {0}")]
    Sequence(#[from] SequenceError),

    /// A working buffer could not be reserved.
    #[error("Could not allocate a buffer of {requested} values")]
    Allocation {
        /// Requested capacity.
        requested: usize,
    },

    /// The occurrence model rejected a rate.
    #[error("Invalid occurrence rate: {rate}")]
    InvalidRate {
        /// Offending rate.
        rate: f64,
    },
}

/// Error reported by a simulation call.
///
/// The first failing risk aborts the whole call; no partial results are
/// returned.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sampling failed for a risk.
    #[error("Sampling failed for risk {risk_id}: {source}")]
    Sampling {
        /// Failing risk.
        risk_id: RiskId,
        /// Underlying failure.
        #[source]
        source: SamplingError,
    },

    /// A drawn occurrence rate is negative or not finite.
    #[error("Invalid occurrence rate {rate} for risk {risk_id} in year {year}")]
    InvalidRate {
        /// Failing risk.
        risk_id: RiskId,
        /// Zero-based year index.
        year: usize,
        /// Offending rate.
        rate: f64,
    },

    /// The flat impact buffer for a risk could not be allocated.
    #[error("Could not allocate impact buffer for risk {risk_id} ({occurrences} occurrences)")]
    ImpactBufferAllocation {
        /// Failing risk.
        risk_id: RiskId,
        /// Total occurrences over all years.
        occurrences: u128,
    },

    /// The drawn impacts do not split into the drawn yearly occurrence
    /// counts. Indicates an internal bookkeeping fault.
    #[error(
        "Impact bookkeeping mismatch for risk {risk_id}: {impacts} impacts for {occurrences} occurrences"
    )]
    PartitionMismatch {
        /// Failing risk.
        risk_id: RiskId,
        /// Number of drawn impacts.
        impacts: usize,
        /// Total occurrences over all years.
        occurrences: u128,
    },

    /// The worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl SimulationError {
    /// Id of the risk that failed, if the error is tied to one.
    pub fn risk_id(&self) -> Option<&RiskId> {
        match self {
            Self::Sampling { risk_id, .. }
            | Self::InvalidRate { risk_id, .. }
            | Self::ImpactBufferAllocation { risk_id, .. }
            | Self::PartitionMismatch { risk_id, .. } => Some(risk_id),
            Self::Config(_) | Self::ThreadPool(_) => None,
        }
    }
}
