//! # qra_core: Foundation for Quantitative Risk Analysis
//!
//! ## Layer 1 (Foundation) Role
//!
//! qra_core is the bottom layer of the workspace, providing:
//! - Identifier types: `RiskId` (`types::ids`)
//! - Error types: `DistributionError` (`types::error`)
//! - The sampling capability every distribution exposes: `SampleDistribution` (`traits`)
//! - Descriptive statistics used by the analytics layer (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other qra_* crates, with minimal external dependencies:
//! - rand: RNG trait bounds for direct sampling
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use qra_core::math::statistics::{mean, percentile};
//! use qra_core::types::RiskId;
//!
//! let id = RiskId::new("R001");
//! assert_eq!(id.as_str(), "R001");
//!
//! let losses = [0.0, 10.0, 20.0, 30.0, 40.0];
//! assert_eq!(mean(&losses), 20.0);
//! assert_eq!(percentile(&losses, 50.0).unwrap(), 20.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `RiskId`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
