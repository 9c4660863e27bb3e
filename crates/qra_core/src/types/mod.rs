//! Core types: identifiers and error types.

pub mod error;
pub mod ids;

pub use error::DistributionError;
pub use ids::RiskId;
