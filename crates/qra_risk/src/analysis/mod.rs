//! Analytics over simulated annual losses.
//!
//! - [`exceedance`]: loss exceedance curves
//! - [`mariq`]: portfolio-level analysis against a risk tolerance
//! - [`tornado`]: one-at-a-time P5/P95 variations
//! - [`single_risk`]: per-risk summary statistics

pub mod error;
pub mod exceedance;
pub mod mariq;
pub mod single_risk;
pub mod tornado;

pub use error::AnalysisError;
pub use exceedance::{ExceedanceCurve, DEFAULT_BUCKETS};
pub use mariq::{
    MariqAnalysis, RankedRisk, RiskMetrics, RiskTolerance, ToleranceBreach, TotalRiskProfile,
};
pub use single_risk::{
    SingleRiskAnalysis, SingleRiskStats, SummaryStats, DEFAULT_SINGLE_RISK_BUCKETS,
};
pub use tornado::{tornado_variations, TornadoAttribute, TornadoBar};
