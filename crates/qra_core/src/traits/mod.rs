//! Traits shared across the workspace.
//!
//! - [`SampleDistribution`]: the two-operation capability (`draw`,
//!   `draw_ppf`) through which the simulation engine consumes every
//!   frequency and impact distribution.

pub mod sampling;

pub use sampling::{validate_quantiles, SampleDistribution};
