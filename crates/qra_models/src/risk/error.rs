//! Portfolio error types.

use qra_core::types::{DistributionError, RiskId};
use thiserror::Error;

/// Errors that can occur while building or querying a portfolio.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// No risk with this id.
    #[error("Risk not found: {0}")]
    RiskNotFound(RiskId),

    /// Two risks share an id.
    #[error("Duplicate risk ID: {0}")]
    DuplicateRisk(RiskId),

    /// Positional lookup past the end.
    #[error("Risk index {index} out of range for portfolio of {len} risks")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Portfolio size.
        len: usize,
    },

    /// A risk definition names an invalid distribution.
    #[error("Invalid definition for risk {id}: {source}")]
    InvalidDefinition {
        /// Offending risk.
        id: RiskId,
        /// Underlying distribution error.
        #[source]
        source: DistributionError,
    },
}
